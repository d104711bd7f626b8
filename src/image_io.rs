use std::path::Path;

use image::io::Reader as ImageReader;
use image::{DynamicImage, ImageFormat};

use crate::error::{ToolError, ToolResult};
use crate::walk::ensure_parent;

/// Decode an image, trusting the file contents over its extension.
pub fn load_image(path: &Path) -> ToolResult<DynamicImage> {
    let reader = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|error| ToolError::io(path, error))?;
    reader.decode().map_err(|error| ToolError::image(path, error))
}

pub fn save_png(image: &DynamicImage, path: &Path) -> ToolResult<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|error| ToolError::image(path, error))
}
