//! jsxport-core: rule-based JSX/TSX conversion library
//!
//! This library provides:
//! - React + Tailwind/Bootstrap to React Native conversion
//! - Next.js page to plain React conversion
//! - Configurable style tables and rewrite rules
//! - Multiple output formats
//!
//! Conversion is textual: ordered regex rules over the source, not a parse
//! tree. It never fails; what it cannot convert is reported as warnings.

pub mod config;
pub mod convert;
pub mod directive;
pub mod error;
pub mod imports;
pub mod next;
pub mod output;
pub mod rules;
pub mod stats;
pub mod style;
#[cfg(feature = "native")]
pub mod parallel;

// WASM support
#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ConfigFormat, JsxportConfig, RuleConfig};
pub use convert::{convert, ConversionResult, Converter, ConverterConfig, Target};
pub use directive::{strip_directives, Stripped};
pub use error::{ConfigError, FileError};
pub use imports::{ImportSynthesizer, Synthesized, NATIVE_COMPONENTS};
pub use output::{format_reports, OutputFormat, OutputOptions, Report};
pub use rules::{RewriteRule, RuleHit, RuleKind, RuleSet};
pub use stats::ConversionStats;
pub use style::{StyleObject, StyleTable, StyleTranslator, StyleValue, Vocabularies, Vocabulary};
#[cfg(feature = "native")]
pub use parallel::{
    convert_file, convert_files_parallel, expand_globs, filter_supported_files, write_output, FileConversion,
};
