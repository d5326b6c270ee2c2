//! jsxport - Convert React/Tailwind JSX to React Native, and Next.js pages to React
//!
//! This is the main CLI entry point that orchestrates loading, converting
//! and writing files.

mod cli;

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use jsxport_core::{
    convert_files_parallel, expand_globs, filter_supported_files, format_reports, write_output,
    Converter, ConverterConfig, FileConversion, JsxportConfig,
    OutputFormat, OutputOptions, Report, Target,
    output::should_use_color,
};
use tracing_subscriber::EnvFilter;

use cli::Args;
use clap::Parser;

const STDIN_LABEL: &str = "<stdin>";

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("error: {:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Log to stderr; `-v` enables debug, otherwise RUST_LOG or warnings only
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_target(value: Option<&str>) -> anyhow::Result<Option<Target>> {
    value
        .map(|name| {
            Target::from_str(name).map_err(|_| anyhow!("invalid target '{}'. Valid targets: react-native, react", name))
        })
        .transpose()
}

fn build_converter(args: &Args) -> anyhow::Result<Converter> {
    let target = parse_target(args.target.as_deref())?;
    let config = match &args.config {
        Some(path) => JsxportConfig::load(path)
            .with_context(|| format!("loading config {}", path))?
            .into_converter_config(target)?,
        None => ConverterConfig::new(target.unwrap_or_default()),
    };
    Ok(Converter::new(config))
}

fn run(args: Args) -> anyhow::Result<()> {
    // Validate output format
    let format = OutputFormat::from_str(&args.output).ok_or_else(|| {
        anyhow!(
            "invalid format '{}'. Valid formats: {}",
            args.output,
            OutputFormat::valid_formats().join(", ")
        )
    })?;

    // Determine color mode
    let use_color = if args.no_color {
        false
    } else {
        should_use_color(&args.color)
    };
    let options = OutputOptions { use_color };

    let converter = build_converter(&args)?;
    let target = converter.target();

    // Collect files
    let files = filter_supported_files(expand_globs(&args.files));
    let stdin_source = args.files.is_empty() && !atty::is(atty::Stream::Stdin);

    if files.is_empty() && !stdin_source {
        eprintln!("Usage: jsxport <files...> [OPTIONS]");
        eprintln!("   or: cat Card.jsx | jsxport [OPTIONS]");
        eprintln!("\nUse --help for more information.");
        bail!("no input files");
    }

    let conversions: Vec<FileConversion> = if stdin_source {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).context("reading stdin")?;
        vec![FileConversion {
            path: STDIN_LABEL.to_string(),
            output_name: target.output_name(args.name.as_deref()),
            result: Ok(converter.convert(&source)),
        }]
    } else {
        let concurrency = args.concurrency.unwrap_or_else(num_cpus::get);
        tracing::debug!(files = files.len(), concurrency, %target, "converting");
        convert_files_parallel(&files, &converter, Some(concurrency))
    };

    let mut failures = 0usize;
    for conversion in &conversions {
        if let Err(e) = &conversion.result {
            eprintln!("warning: {}", e);
            failures += 1;
        }
    }

    if let Some(out_dir) = &args.out_dir {
        for conversion in &conversions {
            if let Some(written) = write_output(Path::new(out_dir), conversion)? {
                tracing::info!(from = %conversion.path, to = %written.display(), "wrote");
            }
        }
    }

    let reports: Vec<Report> = conversions
        .iter()
        .filter_map(|c| {
            c.result.as_ref().ok().map(|result| Report {
                file: &c.path,
                output_name: &c.output_name,
                result,
            })
        })
        .collect();

    // Source is only printed when nothing was written to disk
    let show = format != OutputFormat::Source || args.out_dir.is_none();
    if show {
        print!("{}", format_reports(&reports, format, &options));
    }

    if failures > 0 && reports.is_empty() {
        bail!("no file could be converted");
    }

    if args.expect_clean {
        let unconverted: usize = reports.iter().map(|r| r.result.stats.unconverted_classes).sum();
        if unconverted > 0 {
            bail!("expectation failed: {} class token(s) left unconverted", unconverted);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target(None).unwrap(), None);
        assert_eq!(parse_target(Some("react")).unwrap(), Some(Target::React));
        assert!(parse_target(Some("vue")).is_err());
    }

    #[test]
    fn test_build_converter_with_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jsxport.toml");
        std::fs::write(&path, "target = \"react\"\n").unwrap();

        let args = Args::parse_from(["jsxport", "--config", path.to_str().unwrap()]);
        assert_eq!(build_converter(&args).unwrap().target(), Target::React);

        let args = Args::parse_from(["jsxport", "--config", path.to_str().unwrap(), "-t", "react-native"]);
        assert_eq!(build_converter(&args).unwrap().target(), Target::ReactNative);
    }

    #[test]
    fn test_build_converter_reports_bad_config() {
        let args = Args::parse_from(["jsxport", "--config", "missing.toml"]);
        let err = build_converter(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("loading config missing.toml"));
    }
}
