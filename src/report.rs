use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use crate::options::{normalize_path_string, ToolOptionsView};

#[derive(Serialize)]
pub struct RunReport<'a, T: Serialize> {
    pub generated_at: String,
    pub tool: &'a str,
    pub options: ToolOptionsView,
    pub summary: &'a T,
}

impl<'a, T: Serialize> RunReport<'a, T> {
    pub fn new(tool: &'a str, options: ToolOptionsView, summary: &'a T) -> Self {
        Self {
            generated_at: now_rfc3339(),
            tool,
            options,
            summary,
        }
    }
}

pub fn write_json_report<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create report directory {}",
                normalize_path_string(parent)
            )
        })?;
    }

    let payload = serde_json::to_string_pretty(value).context("Failed to serialize JSON report")?;
    fs::write(path, payload)
        .with_context(|| format!("Failed to write report {}", normalize_path_string(path)))?;
    Ok(())
}

fn now_rfc3339() -> String {
    Local::now().to_rfc3339()
}
