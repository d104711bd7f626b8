//! Resizes atlas page images to the dimensions their `.atlas` declares.

use std::path::{Component, Path};

use image::imageops::FilterType;
use image::GenericImageView;
use serde::Serialize;

use crate::atlas::{read_page_sizes, PageSize};
use crate::console::{log_info, log_success, log_warn, progress_bar};
use crate::error::ToolResult;
use crate::image_io::{load_image, save_png};
use crate::options::ToolOptions;
use crate::walk::{collect_files, copy_preserving, ensure_dir, ensure_input_dir, mirror_path};

#[derive(Debug, Clone, Serialize)]
pub struct ResizedPage {
    pub atlas: String,
    pub file_name: String,
    pub from: (u32, u32),
    pub to: (u32, u32),
}

#[derive(Debug, Default, Serialize)]
pub struct ResizeSummary {
    pub atlases: usize,
    pub resized: Vec<ResizedPage>,
    pub copied: Vec<String>,
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
    /// Page names that would resolve outside the atlas/output trees.
    pub rejected: Vec<String>,
}

enum PageOutcome {
    Resized { from: (u32, u32) },
    Copied,
    Missing,
    Invalid,
}

pub fn run(opts: &ToolOptions) -> ToolResult<ResizeSummary> {
    ensure_input_dir(&opts.input_dir)?;
    ensure_dir(&opts.output_dir)?;

    let atlases = collect_files(&opts.input_dir, |name| name.ends_with(".atlas"))?;
    let bar = progress_bar(atlases.len());
    let mut summary = ResizeSummary {
        atlases: atlases.len(),
        ..ResizeSummary::default()
    };

    for atlas in &atlases {
        bar.set_message(atlas.file_name.clone());
        let pages = read_page_sizes(&atlas.path)?;
        tracing::debug!(
            "{} declares {} page(s)",
            atlas.display_relative(),
            pages.len()
        );

        let Some(atlas_dir) = atlas.path.parent() else {
            bar.inc(1);
            continue;
        };

        for page in &pages {
            if !is_relative_page_name(&page.file_name) {
                bar.suspend(|| {
                    log_warn(&format!(
                        "Skipping {}: page name must stay inside {}",
                        page.file_name,
                        atlas.display_relative()
                    ))
                });
                summary.rejected.push(page.file_name.clone());
                continue;
            }

            let input_image = atlas_dir.join(&page.file_name);
            let output_image = mirror_path(&opts.output_dir, &atlas.relative_dir, &page.file_name);
            let page_key = atlas
                .relative_dir
                .join(&page.file_name)
                .to_string_lossy()
                .replace('\\', "/");

            match process_page(page, &input_image, &output_image)? {
                PageOutcome::Missing => {
                    bar.suspend(|| {
                        log_warn(&format!("Missing image: {}", input_image.display()))
                    });
                    summary.missing.push(page_key);
                }
                PageOutcome::Invalid => {
                    bar.suspend(|| {
                        log_warn(&format!(
                            "Skipping {}: declared size {}x{} is empty",
                            page_key, page.width, page.height
                        ))
                    });
                    summary.invalid.push(page_key);
                }
                PageOutcome::Copied => summary.copied.push(page_key),
                PageOutcome::Resized { from } => {
                    bar.suspend(|| {
                        log_info(&format!(
                            "Resized {} to {}x{}",
                            page.file_name, page.width, page.height
                        ))
                    });
                    summary.resized.push(ResizedPage {
                        atlas: atlas.display_relative(),
                        file_name: page_key,
                        from,
                        to: (page.width, page.height),
                    });
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    log_success("Processing complete.");
    Ok(summary)
}

fn is_relative_page_name(file_name: &str) -> bool {
    Path::new(file_name).components().all(|component| {
        !matches!(
            component,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    })
}

fn process_page(
    page: &PageSize,
    input_image: &Path,
    output_image: &Path,
) -> ToolResult<PageOutcome> {
    if !input_image.is_file() {
        return Ok(PageOutcome::Missing);
    }
    if page.width == 0 || page.height == 0 {
        return Ok(PageOutcome::Invalid);
    }

    let image = load_image(input_image)?;
    let current = image.dimensions();
    if current == (page.width, page.height) {
        copy_preserving(input_image, output_image)?;
        return Ok(PageOutcome::Copied);
    }

    let resized = image.resize_exact(page.width, page.height, FilterType::Nearest);
    save_png(&resized, output_image)?;
    Ok(PageOutcome::Resized { from: current })
}
