//! Batch file tools for a Spine asset pipeline.
//!
//! Every tool walks an input tree, transforms one file at a time and writes
//! the result to the same relative location under an output tree.

pub mod alpha;
pub mod atlas;
pub mod console;
pub mod error;
pub mod extclean;
pub mod image_io;
pub mod logging;
pub mod options;
pub mod report;
pub mod resize;
pub mod tool;
pub mod walk;

pub use error::{ToolError, ToolResult};
pub use options::ToolOptions;
pub use tool::{run_tool, Tool};
