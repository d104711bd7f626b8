//! Straight <-> premultiplied alpha conversion for RGBA PNG files.

use std::path::Path;

use image::{DynamicImage, RgbaImage};
use serde::Serialize;

use crate::console::{log_info, log_success, progress_bar};
use crate::error::ToolResult;
use crate::image_io::{load_image, save_png};
use crate::options::ToolOptions;
use crate::walk::{collect_files, ensure_dir, ensure_input_dir, mirror_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaConversion {
    StraightToPremultiplied,
    PremultipliedToStraight,
}

impl AlphaConversion {
    pub fn apply(self, pixel: [u8; 4]) -> [u8; 4] {
        match self {
            Self::StraightToPremultiplied => premultiply_pixel(pixel),
            Self::PremultipliedToStraight => unpremultiply_pixel(pixel),
        }
    }
}

/// `c * a / 255`, truncated. Alpha is kept as is.
pub fn premultiply_pixel([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let factor = a as f64 / 255.0;
    let scale = |channel: u8| clamp_channel(channel as f64 * factor);
    [scale(r), scale(g), scale(b), a]
}

/// `c / (a / 255)`, clamped and truncated. Fully transparent pixels keep
/// their colour channels untouched.
pub fn unpremultiply_pixel([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    let factor = if a == 0 { 1.0 } else { a as f64 / 255.0 };
    let scale = |channel: u8| clamp_channel(channel as f64 / factor);
    [scale(r), scale(g), scale(b), a]
}

fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

pub fn convert_image(image: &mut RgbaImage, conversion: AlphaConversion) {
    for pixel in image.pixels_mut() {
        pixel.0 = conversion.apply(pixel.0);
    }
}

/// Decode `input` (any PNG colour type), convert it as RGBA8 and write the
/// result to `output` as PNG.
pub fn convert_file(input: &Path, output: &Path, conversion: AlphaConversion) -> ToolResult<()> {
    let mut rgba = load_image(input)?.to_rgba8();
    convert_image(&mut rgba, conversion);
    save_png(&DynamicImage::ImageRgba8(rgba), output)
}

#[derive(Debug, Serialize)]
pub struct AlphaSummary {
    pub conversion: AlphaConversion,
    pub converted_count: usize,
    pub converted: Vec<String>,
}

fn is_png_name(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".png")
}

pub fn run(opts: &ToolOptions, conversion: AlphaConversion) -> ToolResult<AlphaSummary> {
    ensure_input_dir(&opts.input_dir)?;
    ensure_dir(&opts.output_dir)?;

    let files = collect_files(&opts.input_dir, is_png_name)?;
    let bar = progress_bar(files.len());
    let mut converted = Vec::with_capacity(files.len());

    for file in &files {
        bar.set_message(file.file_name.clone());
        let output_path = mirror_path(&opts.output_dir, &file.relative_dir, &file.file_name);
        convert_file(&file.path, &output_path, conversion)?;
        bar.suspend(|| {
            log_info(&format!(
                "Converted: {} -> {}",
                file.path.display(),
                output_path.display()
            ))
        });
        converted.push(file.display_relative());
        bar.inc(1);
    }
    bar.finish_and_clear();

    log_success(&format!("Converted {} PNG file(s).", converted.len()));
    Ok(AlphaSummary {
        conversion,
        converted_count: converted.len(),
        converted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use image::{GrayImage, ImageFormat, Luma, Rgba};
    use rand::random;
    use std::fs;
    use std::path::PathBuf;

    fn unique_temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("assetools-alpha-{}", random::<u64>()))
    }

    #[test]
    fn premultiply_scales_colour_by_alpha() {
        assert_eq!(premultiply_pixel([200, 100, 50, 128]), [100, 50, 25, 128]);
        assert_eq!(premultiply_pixel([255, 255, 255, 255]), [255, 255, 255, 255]);
        assert_eq!(premultiply_pixel([255, 10, 99, 0]), [0, 0, 0, 0]);
        // 255 * 51 / 255 lands exactly on 51
        assert_eq!(premultiply_pixel([255, 0, 0, 51]), [51, 0, 0, 51]);
    }

    #[test]
    fn unpremultiply_divides_and_clamps() {
        assert_eq!(unpremultiply_pixel([100, 50, 25, 128]), [199, 99, 49, 128]);
        assert_eq!(unpremultiply_pixel([255, 255, 255, 255]), [255, 255, 255, 255]);
        // Invalid PMA input (colour above alpha) saturates.
        assert_eq!(unpremultiply_pixel([200, 0, 0, 100]), [255, 0, 0, 100]);
    }

    #[test]
    fn unpremultiply_leaves_transparent_pixels_unchanged() {
        assert_eq!(unpremultiply_pixel([12, 34, 56, 0]), [12, 34, 56, 0]);
    }

    #[test]
    fn round_trip_error_is_bounded_by_alpha_quantisation() {
        for alpha in [64u8, 128, 200, 255] {
            for channel in [0u8, 1, 17, 90, 128, 201, 255] {
                let straight = [channel, channel, channel, alpha];
                let restored = unpremultiply_pixel(premultiply_pixel(straight));
                let tolerance = (255.0 / alpha as f64).ceil() as i32;
                let delta = (restored[0] as i32 - channel as i32).abs();
                assert!(
                    delta <= tolerance,
                    "channel {} alpha {} restored {} (tolerance {})",
                    channel,
                    alpha,
                    restored[0],
                    tolerance
                );
                assert_eq!(restored[3], alpha);
            }
        }
    }

    #[test]
    fn convert_image_touches_every_pixel() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 128]));
        convert_image(&mut image, AlphaConversion::StraightToPremultiplied);
        assert!(image.pixels().all(|pixel| pixel.0 == [100, 50, 25, 128]));
    }

    #[test]
    fn run_converts_pngs_into_mirrored_tree() {
        let root = unique_temp_root();
        let input = root.join("input");
        fs::create_dir_all(input.join("hero")).expect("create input tree");

        RgbaImage::from_pixel(3, 2, Rgba([200, 100, 50, 128]))
            .save_with_format(input.join("hero/body.PNG"), ImageFormat::Png)
            .expect("write rgba fixture");
        DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 1, Luma([90])))
            .save_with_format(input.join("mask.png"), ImageFormat::Png)
            .expect("write gray fixture");
        fs::write(input.join("hero/hero.atlas"), b"body.PNG\n").expect("write atlas");

        let opts = ToolOptions {
            input_dir: input,
            output_dir: root.join("output"),
            ..ToolOptions::default()
        };
        let summary = run(&opts, AlphaConversion::StraightToPremultiplied).expect("run sta2pma");

        assert_eq!(summary.converted_count, 2);
        assert_eq!(summary.converted, vec!["hero/body.PNG", "mask.png"]);
        assert!(!root.join("output/hero/hero.atlas").exists());

        let body = load_image(&root.join("output/hero/body.PNG"))
            .expect("open converted body")
            .to_rgba8();
        assert_eq!(body.dimensions(), (3, 2));
        assert!(body.pixels().all(|pixel| pixel.0 == [100, 50, 25, 128]));

        // Opaque grayscale input becomes RGBA with unchanged colour.
        let mask = load_image(&root.join("output/mask.png"))
            .expect("open converted mask")
            .to_rgba8();
        assert_eq!(mask.get_pixel(0, 0).0, [90, 90, 90, 255]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn run_restores_straight_alpha_into_mirrored_tree() {
        let root = unique_temp_root();
        let input = root.join("input");
        fs::create_dir_all(input.join("hero")).expect("create input tree");

        let mut fixture = RgbaImage::from_pixel(2, 1, Rgba([100, 50, 25, 128]));
        fixture.put_pixel(1, 0, Rgba([12, 34, 56, 0]));
        fixture
            .save_with_format(input.join("hero/body.png"), ImageFormat::Png)
            .expect("write pma fixture");

        let opts = ToolOptions {
            input_dir: input,
            output_dir: root.join("output"),
            ..ToolOptions::default()
        };
        let summary = run(&opts, AlphaConversion::PremultipliedToStraight).expect("run pma2sta");

        assert_eq!(summary.conversion, AlphaConversion::PremultipliedToStraight);
        assert_eq!(summary.converted, vec!["hero/body.png"]);

        let body = load_image(&root.join("output/hero/body.png"))
            .expect("open converted body")
            .to_rgba8();
        assert_eq!(body.get_pixel(0, 0).0, [199, 99, 49, 128]);
        assert_eq!(body.get_pixel(1, 0).0, [12, 34, 56, 0]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn run_stops_on_undecodable_png() {
        let root = unique_temp_root();
        let input = root.join("input");
        fs::create_dir_all(&input).expect("create input");
        fs::write(input.join("broken.png"), b"not a png").expect("write broken");

        let opts = ToolOptions {
            input_dir: input,
            output_dir: root.join("output"),
            ..ToolOptions::default()
        };
        let error = run(&opts, AlphaConversion::PremultipliedToStraight).expect_err("decode error");
        assert!(matches!(error, ToolError::Image { .. }));

        let _ = fs::remove_dir_all(&root);
    }
}
