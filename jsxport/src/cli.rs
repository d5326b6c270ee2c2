//! CLI argument parsing using clap

use clap::Parser;

/// Convert React/Tailwind JSX to React Native, and Next.js pages to React
#[derive(Parser, Debug)]
#[command(name = "jsxport")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Convert a component and print the result
    jsxport src/Card.jsx

    # Convert a whole tree, writing converted-<file> next to each other in out/
    jsxport "src/**/*.jsx" --out-dir out

    # Next.js pages to React, written as <name>.react.tsx
    jsxport "pages/**/*.tsx" --target react --out-dir out

    # Convert from stdin
    cat Card.jsx | jsxport --name Card.jsx

    # CI: fail if any class could not be converted
    jsxport "src/**/*.jsx" -o stats --expect-clean

    # Extend the style tables
    jsxport src/Card.jsx --config jsxport.toml
"#)]
pub struct Args {
    /// Files to convert (supports glob patterns like "src/**/*.jsx")
    #[arg()]
    pub files: Vec<String>,

    /// Conversion target: react-native (default), react
    #[arg(short = 't', long = "target")]
    pub target: Option<String>,

    /// Config file (.toml, .json, .yaml) with extra style tables and rules
    #[arg(long = "config")]
    pub config: Option<String>,

    /// Output format: source (default), json, stats
    #[arg(short = 'o', long = "output", default_value = "source")]
    pub output: String,

    /// Write converted files into this directory instead of printing source
    #[arg(short = 'd', long = "out-dir")]
    pub out_dir: Option<String>,

    /// File name for stdin input (used for the output name)
    #[arg(long = "name")]
    pub name: Option<String>,

    /// Exit 1 if any class token was left unconverted
    #[arg(long = "expect-clean")]
    pub expect_clean: bool,

    /// Color output: auto (default), always, never
    #[arg(long = "color", default_value = "auto")]
    pub color: String,

    /// Disable color output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Number of parallel workers
    #[arg(short = 'c', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Show verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
