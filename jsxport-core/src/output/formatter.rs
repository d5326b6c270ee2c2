//! Output formatters for different output modes

use serde::Serialize;

use super::colors::{ansi, paint};
use crate::convert::ConversionResult;
use crate::stats::ConversionStats;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Converted source code
    Source,
    /// JSON array with code, stats and warnings per file
    Json,
    /// Human-readable statistics and warnings
    Stats,
}

impl OutputFormat {
    /// Parse format from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "source" => Some(OutputFormat::Source),
            "json" => Some(OutputFormat::Json),
            "stats" => Some(OutputFormat::Stats),
            _ => None,
        }
    }

    /// Get list of all valid format names
    pub fn valid_formats() -> &'static [&'static str] {
        &["source", "json", "stats"]
    }
}

/// Options for output formatting
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Whether to use color in output
    pub use_color: bool,
}

/// One converted input, as shown to the user
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub file: &'a str,
    pub output_name: &'a str,
    #[serde(flatten)]
    pub result: &'a ConversionResult,
}

/// Format reports according to the specified format
pub fn format_reports(reports: &[Report], format: OutputFormat, options: &OutputOptions) -> String {
    match format {
        OutputFormat::Source => format_source(reports, options),
        OutputFormat::Json => format_json(reports),
        OutputFormat::Stats => format_stats(reports, options),
    }
}

fn format_source(reports: &[Report], options: &OutputOptions) -> String {
    let mut output = String::new();
    let show_headers = reports.len() > 1;

    for report in reports {
        if show_headers {
            let header = format!("// ==> {} ({})", report.file, report.output_name);
            output.push_str(&paint(&header, ansi::DIM, options.use_color));
            output.push('\n');
        }
        output.push_str(&report.result.code);
        if !report.result.code.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}

fn format_json(reports: &[Report]) -> String {
    serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
}

/// One line of counters for `stats`
pub fn format_stats_line(stats: &ConversionStats, options: &OutputOptions) -> String {
    let unconverted = if stats.unconverted_classes == 0 {
        paint("0 unconverted", ansi::GREEN, options.use_color)
    } else {
        paint(
            &format!("{} unconverted", stats.unconverted_classes),
            ansi::YELLOW,
            options.use_color,
        )
    };
    format!(
        "{} components, {} tailwind, {} bootstrap, {}",
        stats.components_converted, stats.tailwind_classes, stats.bootstrap_classes, unconverted
    )
}

fn format_stats(reports: &[Report], options: &OutputOptions) -> String {
    let mut output = String::new();
    let mut total = ConversionStats::default();

    for report in reports {
        let file = paint(report.file, ansi::CYAN, options.use_color);
        output.push_str(&format!("{}: {}\n", file, format_stats_line(&report.result.stats, options)));
        for warning in &report.result.warnings {
            output.push_str(&format!("  {} {}\n", paint("warning:", ansi::YELLOW, options.use_color), warning));
        }
        total += report.result.stats;
    }

    if reports.len() > 1 {
        let label = paint(&format!("total ({} files)", reports.len()), ansi::BOLD, options.use_color);
        output.push_str(&format!("{}: {}\n", label, format_stats_line(&total, options)));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert, Target};

    fn plain() -> OutputOptions {
        OutputOptions { use_color: false }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("xml"), None);
        assert!(OutputFormat::valid_formats().contains(&"stats"));
    }

    #[test]
    fn test_source_single_has_no_header() {
        let result = convert("<span>x</span>", Target::ReactNative);
        let report = Report {
            file: "<stdin>",
            output_name: "converted-react-native.jsx",
            result: &result,
        };
        let out = format_reports(&[report], OutputFormat::Source, &plain());
        assert_eq!(out, "import { Text } from 'react-native';\n\n<Text>x</Text>\n");
    }

    #[test]
    fn test_source_multiple_has_headers() {
        let a = convert("<span>a</span>", Target::ReactNative);
        let b = convert("<span>b</span>", Target::ReactNative);
        let reports = [
            Report { file: "a.jsx", output_name: "converted-a.jsx", result: &a },
            Report { file: "b.jsx", output_name: "converted-b.jsx", result: &b },
        ];
        let out = format_reports(&reports, OutputFormat::Source, &plain());
        assert!(out.starts_with("// ==> a.jsx (converted-a.jsx)\n"));
        assert!(out.contains("// ==> b.jsx (converted-b.jsx)\n"));
    }

    #[test]
    fn test_json_flattens_result() {
        let result = convert("<p className=\"nope\">x</p>", Target::ReactNative);
        let report = Report {
            file: "a.jsx",
            output_name: "converted-a.jsx",
            result: &result,
        };
        let out = format_reports(&[report], OutputFormat::Json, &plain());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["file"], "a.jsx");
        assert_eq!(value[0]["outputName"], "converted-a.jsx");
        assert_eq!(value[0]["stats"]["unconvertedClasses"], 1);
        assert_eq!(value[0]["warnings"][0], "Unconverted classes: nope");
    }

    #[test]
    fn test_stats_with_total() {
        let a = convert("<div className=\"p-4\">a</div>", Target::ReactNative);
        let b = convert("<div className=\"zzz\">b</div>", Target::ReactNative);
        let reports = [
            Report { file: "a.jsx", output_name: "converted-a.jsx", result: &a },
            Report { file: "b.jsx", output_name: "converted-b.jsx", result: &b },
        ];
        let out = format_reports(&reports, OutputFormat::Stats, &plain());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "a.jsx: 2 components, 1 tailwind, 0 bootstrap, 0 unconverted");
        assert_eq!(lines[1], "b.jsx: 2 components, 0 tailwind, 0 bootstrap, 1 unconverted");
        assert_eq!(lines[2], "  warning: Unconverted classes: zzz");
        assert_eq!(lines[3], "total (2 files): 4 components, 1 tailwind, 0 bootstrap, 1 unconverted");
    }
}
