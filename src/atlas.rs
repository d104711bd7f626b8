//! Page-size extraction from Spine `.atlas` descriptors.
//!
//! A page starts with its image file name on its own line, followed by a
//! `size:` line:
//!
//! ```text
//! hero.png
//! size: 1024,512
//! format: RGBA8888
//! ```

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::error::{ToolError, ToolResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSize {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

pub fn parse_page_sizes(text: &str) -> ToolResult<Vec<PageSize>> {
    let number_regex = Regex::new(r"\d+")?;
    // `\n`, `\r\n` and a lone `\r` all end a line.
    let lines: Vec<&str> = text.lines().flat_map(|line| line.split('\r')).collect();
    let mut pages = Vec::new();

    let mut index = 0;
    while index < lines.len() {
        let line = lines[index];
        let Some(size_line) = lines.get(index + 1).filter(|_| line.ends_with(".png")) else {
            index += 1;
            continue;
        };

        let mut numbers = number_regex
            .find_iter(size_line)
            .map(|found| found.as_str().parse::<u32>());
        match (numbers.next(), numbers.next()) {
            (Some(Ok(width)), Some(Ok(height))) => {
                pages.push(PageSize {
                    file_name: line.trim().to_string(),
                    width,
                    height,
                });
                index += 2;
            }
            _ => index += 1,
        }
    }

    Ok(pages)
}

pub fn read_page_sizes(path: &Path) -> ToolResult<Vec<PageSize>> {
    let text = fs::read_to_string(path).map_err(|error| ToolError::io(path, error))?;
    parse_page_sizes(&text)
}
