//! Output formatting for conversion results
//!
//! Supports multiple output formats:
//! - source: Converted code, with a header per file when there are several
//! - json: JSON array with code, stats and warnings per file
//! - stats: Counters and warnings per file, plus a total

mod colors;
mod formatter;

pub use colors::{ansi, paint};
#[cfg(feature = "native")]
pub use colors::should_use_color;
pub use formatter::{format_reports, format_stats_line, OutputFormat, OutputOptions, Report};
