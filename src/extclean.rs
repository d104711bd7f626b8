//! Copies an input tree while stripping the trailing extension Unity and
//! similar exporters append to Spine files (`hero.skel.bytes` → `hero.skel`).

use std::collections::BTreeMap;

use regex::Regex;
use serde::Serialize;

use crate::console::{log_info, log_success, log_warn, progress_bar};
use crate::error::ToolResult;
use crate::options::ToolOptions;
use crate::walk::{collect_files, copy_preserving, ensure_dir, ensure_input_dir, mirror_path};

/// Checked in order; the first matching rule wins.
const RENAME_PATTERNS: &[&str] = &[
    r"^(.+\.skel)\..+$",
    r"^(.+\.atlas)\..+$",
    r"^(.+\.json)\..+$",
];

pub struct RenameRules {
    rules: Vec<Regex>,
}

impl RenameRules {
    pub fn new() -> ToolResult<Self> {
        let rules = RENAME_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// The cleaned name, or `None` when `file_name` needs no rename.
    pub fn clean_file_name(&self, file_name: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            rule.captures(file_name)
                .and_then(|captures| captures.get(1))
                .map(|kept| kept.as_str().to_string())
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RenamedFile {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ExtCleanSummary {
    pub renamed_count: usize,
    pub copied_count: usize,
    pub total: usize,
    pub renamed: Vec<RenamedFile>,
    /// Output paths written more than once; the last input in walk order wins.
    pub collisions: Vec<String>,
}

pub fn run(opts: &ToolOptions) -> ToolResult<ExtCleanSummary> {
    ensure_input_dir(&opts.input_dir)?;
    ensure_dir(&opts.output_dir)?;

    let rules = RenameRules::new()?;
    let files = collect_files(&opts.input_dir, |_| true)?;
    log_info("Starting file extension cleanup...");

    let bar = progress_bar(files.len());
    let mut summary = ExtCleanSummary::default();
    let mut written: BTreeMap<String, String> = BTreeMap::new();

    for file in &files {
        bar.set_message(file.file_name.clone());
        let cleaned = rules.clean_file_name(&file.file_name);
        let output_name = cleaned.as_deref().unwrap_or(&file.file_name);
        let output_path = mirror_path(&opts.output_dir, &file.relative_dir, output_name);

        copy_preserving(&file.path, &output_path)?;
        tracing::debug!(
            "Copied {} -> {}",
            file.path.display(),
            output_path.display()
        );

        let output_key = file
            .relative_dir
            .join(output_name)
            .to_string_lossy()
            .replace('\\', "/");
        if let Some(previous) = written.insert(output_key.clone(), file.display_relative()) {
            bar.suspend(|| {
                log_warn(&format!(
                    "{} overwrote {} (both map to {})",
                    file.display_relative(),
                    previous,
                    output_key
                ))
            });
            summary.collisions.push(output_key);
        }

        match cleaned {
            Some(new_name) => {
                bar.suspend(|| log_info(&format!("Renamed: {} -> {}", file.file_name, new_name)));
                summary.renamed.push(RenamedFile {
                    from: file.display_relative(),
                    to: new_name,
                });
                summary.renamed_count += 1;
            }
            None => summary.copied_count += 1,
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    summary.total = summary.renamed_count + summary.copied_count;
    log_success("Processing complete:");
    println!("- Files renamed: {}", summary.renamed_count);
    println!("- Files copied unchanged: {}", summary.copied_count);
    println!("- Total files processed: {}", summary.total);
    Ok(summary)
}

#[cfg(test)]
mod tests;
