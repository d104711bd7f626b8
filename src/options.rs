use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;

pub const DEFAULT_INPUT: &str = "./input";
pub const DEFAULT_OUTPUT: &str = "./output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT),
            report_path: None,
            verbose: false,
        }
    }
}

impl ToolOptions {
    /// Build options from the arguments following the tool name. Relative
    /// paths resolve against the current working directory.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read current directory")?;
        Self::from_args_in(&cwd, args)
    }

    pub fn from_args_in(base: &Path, args: &[String]) -> Result<Self> {
        let mut opts = Self {
            input_dir: base.join(DEFAULT_INPUT),
            output_dir: base.join(DEFAULT_OUTPUT),
            ..Self::default()
        };

        let mut index = 0;
        while index < args.len() {
            let arg = &args[index];
            if let Some((key, value)) = arg.split_once('=') {
                opts.set_option(base, key, value)?;
                index += 1;
                continue;
            }

            match arg.as_str() {
                "--verbose" | "-v" => {
                    opts.verbose = true;
                    index += 1;
                }
                "--input" | "--output" | "--report" => {
                    index += 1;
                    let value = args
                        .get(index)
                        .ok_or_else(|| anyhow!("Missing value for option {}", arg))?;
                    opts.set_option(base, arg, value)?;
                    index += 1;
                }
                _ => bail!("Unknown option '{}'. Use `--help` for usage.", arg),
            }
        }

        Ok(opts)
    }

    fn set_option(&mut self, base: &Path, key: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            bail!("Missing value for option {}", key);
        }
        let resolved = resolve_path(base, value);
        match key {
            "--input" => self.input_dir = resolved,
            "--output" => self.output_dir = resolved,
            "--report" => self.report_path = Some(resolved),
            _ => bail!("Unknown option '{}'", key),
        }
        Ok(())
    }

    pub fn to_view(&self) -> ToolOptionsView {
        ToolOptionsView {
            input_dir: normalize_path_string(&self.input_dir),
            output_dir: normalize_path_string(&self.output_dir),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToolOptionsView {
    pub input_dir: String,
    pub output_dir: String,
}

pub fn print_option_help() {
    println!("Options:");
    println!(
        "  --input <path>    Source directory (default: {})",
        DEFAULT_INPUT
    );
    println!(
        "  --output <path>   Destination directory (default: {})",
        DEFAULT_OUTPUT
    );
    println!("  --report <path>   Write a JSON run report to this file");
    println!("  --verbose, -v     Enable debug logging (RUST_LOG overrides)");
    println!("  --help            Show this help message");
}

fn resolve_path(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

pub fn normalize_path_string(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
