use anyhow::{Context, Result};
use serde::Serialize;

use crate::alpha::{self, AlphaConversion};
use crate::console::{log_info, log_success, log_warn, step_header};
use crate::error::ToolError;
use crate::options::{normalize_path_string, ToolOptions};
use crate::report::{write_json_report, RunReport};
use crate::{extclean, resize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    ExtClean,
    StraightToPremultiplied,
    PremultipliedToStraight,
    Resize,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::ExtClean,
        Tool::StraightToPremultiplied,
        Tool::PremultipliedToStraight,
        Tool::Resize,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::ExtClean => "extclean",
            Tool::StraightToPremultiplied => "sta2pma",
            Tool::PremultipliedToStraight => "pma2sta",
            Tool::Resize => "resize",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            Tool::ExtClean => "File Extension Cleanup",
            Tool::StraightToPremultiplied => "PNG Alpha: Straight -> Premultiplied",
            Tool::PremultipliedToStraight => "PNG Alpha: Premultiplied -> Straight",
            Tool::Resize => "Atlas Image Resizing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Tool::ExtClean => "Strip extra extensions from .skel.*, .atlas.* and .json.* files",
            Tool::StraightToPremultiplied => "Convert RGBA PNG files to premultiplied alpha",
            Tool::PremultipliedToStraight => "Convert premultiplied RGBA PNG files to straight alpha",
            Tool::Resize => "Resize PNG pages to the sizes declared in .atlas files",
        }
    }
}

/// Run one tool end to end: header, transformation, optional report.
/// A missing input directory is reported and treated as a clean no-op.
pub fn run_tool(tool: Tool, opts: &ToolOptions) -> Result<()> {
    step_header(tool.title(), tool.name());
    log_info(&format!(
        "{} -> {}",
        normalize_path_string(&opts.input_dir),
        normalize_path_string(&opts.output_dir)
    ));

    let outcome = match tool {
        Tool::ExtClean => extclean::run(opts).map(|summary| finish(tool, opts, &summary)),
        Tool::StraightToPremultiplied => {
            alpha::run(opts, AlphaConversion::StraightToPremultiplied)
                .map(|summary| finish(tool, opts, &summary))
        }
        Tool::PremultipliedToStraight => {
            alpha::run(opts, AlphaConversion::PremultipliedToStraight)
                .map(|summary| finish(tool, opts, &summary))
        }
        Tool::Resize => resize::run(opts).map(|summary| finish(tool, opts, &summary)),
    };

    match outcome {
        Ok(report_result) => report_result,
        Err(ToolError::MissingInput(path)) => {
            log_warn(&format!(
                "Input directory '{}' does not exist.",
                normalize_path_string(&path)
            ));
            println!("Please create the input directory and place your files there.");
            Ok(())
        }
        Err(error) => Err(error).with_context(|| format!("{} failed", tool.name())),
    }
}

fn finish<T: Serialize>(tool: Tool, opts: &ToolOptions, summary: &T) -> Result<()> {
    let Some(report_path) = &opts.report_path else {
        return Ok(());
    };

    write_json_report(report_path, &RunReport::new(tool.name(), opts.to_view(), summary))?;
    log_success(&format!(
        "Report written to: {}",
        normalize_path_string(report_path)
    ));
    Ok(())
}
