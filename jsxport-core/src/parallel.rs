//! Parallel file conversion using Rayon

use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::convert::{ConversionResult, Converter};
use crate::error::FileError;

/// Extensions accepted for conversion
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jsx", "tsx"];

/// Outcome of converting one file
#[derive(Debug)]
pub struct FileConversion {
    pub path: String,
    /// Name the converted copy should be written under
    pub output_name: String,
    pub result: Result<ConversionResult, FileError>,
}

pub fn is_supported_file(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Read and convert a single file
pub fn convert_file(path: &str, converter: &Converter) -> Result<ConversionResult, FileError> {
    if !is_supported_file(path) {
        return Err(FileError::Unsupported(PathBuf::from(path)));
    }
    let source = std::fs::read_to_string(path).map_err(|source| FileError::Read {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(converter.convert(&source))
}

/// Convert multiple files in parallel. Results keep the order of `files`.
pub fn convert_files_parallel(
    files: &[String],
    converter: &Converter,
    concurrency: Option<usize>,
) -> Vec<FileConversion> {
    // Configure thread pool
    if let Some(num_threads) = concurrency {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if pool already initialized
    }

    files
        .par_iter()
        .map(|path| {
            let result = convert_file(path, converter);
            if let Err(e) = &result {
                tracing::warn!(file = %path, error = %e, "skipping file");
            }
            FileConversion {
                path: path.clone(),
                output_name: converter.target().output_name(Some(path)),
                result,
            }
        })
        .collect()
}

/// Write a converted file into `out_dir` under its output name
pub fn write_output(out_dir: &Path, conversion: &FileConversion) -> Result<Option<PathBuf>, FileError> {
    let Ok(result) = &conversion.result else {
        return Ok(None);
    };
    let target = out_dir.join(&conversion.output_name);
    std::fs::create_dir_all(out_dir)
        .and_then(|_| std::fs::write(&target, &result.code))
        .map_err(|source| FileError::Write {
            path: target.clone(),
            source,
        })?;
    Ok(Some(target))
}

/// Expand glob patterns to file paths
pub fn expand_globs(patterns: &[String]) -> Vec<String> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') {
            match glob::glob(pattern) {
                Ok(paths) => {
                    for entry in paths.flatten() {
                        if entry.is_file() {
                            if let Some(path) = entry.to_str() {
                                files.push(path.to_string());
                            }
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(pattern = %pattern, error = %e, "invalid glob pattern");
                }
            }
        } else {
            // Not a glob, use as-is
            files.push(pattern.clone());
        }
    }

    files
}

/// Keep only `.jsx` and `.tsx` files
pub fn filter_supported_files(files: Vec<String>) -> Vec<String> {
    files.into_iter().filter(|f| is_supported_file(f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::Target;

    #[test]
    fn test_expand_globs_non_glob() {
        let patterns = vec!["App.jsx".to_string()];
        let files = expand_globs(&patterns);
        assert_eq!(files, vec!["App.jsx"]);
    }

    #[test]
    fn test_expand_globs_matches_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.jsx"), "<div/>").unwrap();
        std::fs::write(dir.path().join("b.tsx"), "<div/>").unwrap();
        std::fs::create_dir(dir.path().join("sub.jsx")).unwrap();

        let pattern = format!("{}/*.?sx", dir.path().display());
        let mut files = expand_globs(&[pattern]);
        files.sort();
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("a.jsx"));
        assert!(files[1].ends_with("b.tsx"));
    }

    #[test]
    fn test_filter_supported_files() {
        let files = vec![
            "App.jsx".to_string(),
            "page.TSX".to_string(),
            "util.js".to_string(),
            "readme.md".to_string(),
        ];
        let filtered = filter_supported_files(files);
        assert_eq!(filtered, vec!["App.jsx", "page.TSX"]);
    }

    #[test]
    fn test_convert_files_parallel_keeps_order_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("Card.jsx");
        std::fs::write(&good, "<div className=\"p-4\">card</div>").unwrap();
        let missing = dir.path().join("Missing.jsx");
        let files = vec![
            good.to_string_lossy().into_owned(),
            missing.to_string_lossy().into_owned(),
            "notes.txt".to_string(),
        ];

        let converter = Converter::for_target(Target::ReactNative);
        let results = convert_files_parallel(&files, &converter, Some(2));

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].output_name, "converted-Card.jsx");
        let first = results[0].result.as_ref().unwrap();
        assert!(first.code.contains("<View style={{"));
        assert!(matches!(results[1].result, Err(FileError::Read { .. })));
        assert!(matches!(results[2].result, Err(FileError::Unsupported(_))));
    }

    #[test]
    fn test_write_output() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let conversion = FileConversion {
            path: "pages/index.tsx".to_string(),
            output_name: Target::React.output_name(Some("pages/index.tsx")),
            result: Ok(crate::convert::convert("function Index() { return null; }", Target::React)),
        };

        let written = write_output(&out_dir, &conversion).unwrap().unwrap();
        assert_eq!(written, out_dir.join("index.react.tsx"));
        let content = std::fs::read_to_string(written).unwrap();
        assert!(content.contains("export default Index;"));
    }
}
