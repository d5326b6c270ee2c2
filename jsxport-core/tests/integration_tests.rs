/// Integration tests for jsxport-core
///
/// These tests verify:
/// 1. React Native conversion of realistic components
/// 2. Next.js to React conversion of a full page
/// 3. Batch conversion and output files
/// 4. Config files driving the converter

use std::path::PathBuf;
use jsxport_core::{
    convert, convert_files_parallel, expand_globs, filter_supported_files, strip_directives, write_output,
    Converter, ImportSynthesizer, JsxportConfig, Target, Vocabularies,
    style::strip_prefix,
};

fn get_test_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_test_fixtures_dir().join(name)).expect("fixture should exist")
}

#[test]
fn test_card_component() {
    let result = convert(&read_fixture("Card.jsx"), Target::ReactNative);
    let code = &result.code;

    assert!(code.starts_with(
        "import React from 'react';\nimport { View, Text, TouchableOpacity, StyleSheet } from 'react-native';\n"
    ));
    assert!(!code.contains("use client"));
    assert!(!code.contains("<div"));
    assert!(code.contains("<TouchableOpacity className=\"btn btn-primary\" // Unconverted classes: btn btn-primary onPress={onOpen}>"));
    assert!(code.contains("// Unconverted classes: shadow-md"));
    assert!(code.contains("// Unconverted classes: text-gray-800"));
    assert!(code.contains("// Unconverted classes: fancy-underline"));

    let stats = result.stats;
    assert_eq!(stats.components_converted, 9);
    assert_eq!(stats.tailwind_classes, 3);
    assert_eq!(stats.bootstrap_classes, 0);
    assert_eq!(stats.unconverted_classes, 5);
    assert_eq!(stats.class_tokens, 11);
    assert_eq!(stats.mapped_tokens + stats.unconverted_classes, stats.class_tokens);
    assert_eq!(result.warnings.len(), 5);
}

#[test]
fn test_form_component_without_styles() {
    let result = convert(&read_fixture("Form.tsx"), Target::ReactNative);
    let code = &result.code;

    assert!(code.contains("import React, { useState } from 'react';\nimport { View, TextInput, Image } from 'react-native';\n"));
    assert!(code.contains("<TextInput value={name} onChangeText={setName} />"));
    assert!(code.contains("<Image src=\"logo.png\" />"));
    assert!(!code.contains("StyleSheet"));
    assert_eq!(result.stats.components_converted, 5);
    assert_eq!(result.stats.unconverted_classes, 1);
}

#[test]
fn test_next_page_to_react() {
    let result = convert(&read_fixture("page.tsx"), Target::React);
    let code = &result.code;

    assert!(code.starts_with("import React, { useEffect, useState } from 'react';\n"));
    assert!(code.contains("import { Link, useNavigate } from 'react-router-dom';"));
    assert!(code.contains("setProps({ props: { posts } });"));
    assert!(code.contains("export default function Posts() {\n  const [props, setProps] = useState({});"));
    assert!(code.contains("const navigate = useNavigate();"));
    assert!(code.contains("<img src=\"/banner.png\" width={600} height={200} alt=\"\" />"));
    assert!(code.contains(".map((post, index) => ("));
    assert!(code.contains("key={index}>{post.title}</Link>"));
    assert!(code.contains("<div className=\"posts\">"));
    assert!(code.contains("navigate('/new')"));
    assert!(!code.contains("next/"));
    assert!(!code.contains("getStaticProps"));

    assert_eq!(result.stats.components_converted, 4);
    assert!(result
        .warnings
        .contains(&"Next.js Image component has been converted to standard img tag".to_string()));
}

#[test]
fn test_conversion_is_deterministic() {
    let source = read_fixture("Card.jsx");
    let converter = Converter::for_target(Target::ReactNative);
    assert_eq!(converter.convert(&source), converter.convert(&source));
}

#[test]
fn test_stripping_and_imports_are_idempotent() {
    let source = read_fixture("Card.jsx");
    let stripped = strip_directives(&source).text;
    assert_eq!(strip_directives(&stripped).text, stripped);

    let converted = convert(&source, Target::ReactNative).code;
    let synthesizer = ImportSynthesizer::react_native();
    let again = synthesizer.synthesize(&converted);
    assert_eq!(again.text, converted);
    assert!(again.added.is_empty());
}

#[test]
fn test_unconverted_tokens_miss_every_table() {
    let result = convert(&read_fixture("Card.jsx"), Target::ReactNative);
    let vocabularies = Vocabularies::builtin();
    for token in ["shadow-md", "text-gray-800", "fancy-underline", "btn", "btn-primary"] {
        assert!(vocabularies.lookup(strip_prefix(token)).is_none(), "{} should be unmapped", token);
        assert!(result.code.contains(token));
    }
}

#[test]
fn test_batch_conversion_writes_outputs() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["Card.jsx", "Form.tsx", "page.tsx"] {
        std::fs::copy(get_test_fixtures_dir().join(name), dir.path().join(name)).unwrap();
    }
    std::fs::write(dir.path().join("notes.md"), "# notes").unwrap();

    let pattern = format!("{}/*", dir.path().display());
    let mut files = filter_supported_files(expand_globs(&[pattern]));
    files.sort();
    assert_eq!(files.len(), 3);

    let converter = Converter::for_target(Target::ReactNative);
    let results = convert_files_parallel(&files, &converter, None);
    assert!(results.iter().all(|r| r.result.is_ok()));

    let out_dir = dir.path().join("converted");
    for conversion in &results {
        write_output(&out_dir, conversion).unwrap();
    }
    assert!(out_dir.join("converted-Card.jsx").is_file());
    assert!(out_dir.join("converted-Form.tsx").is_file());
    assert!(out_dir.join("converted-page.tsx").is_file());
}

#[test]
fn test_config_file_extends_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("jsxport.yaml");
    std::fs::write(
        &config_path,
        "vocabularies:\n  tailwind:\n    shadow-md:\n      elevation: 4\n    text-gray-800:\n      color: '#1f2937'\n",
    )
    .unwrap();

    let config = JsxportConfig::load(&config_path).unwrap();
    let converter = Converter::new(config.into_converter_config(None).unwrap());
    let result = converter.convert(&read_fixture("Card.jsx"));

    assert!(result.code.contains("elevation: 4"));
    assert!(result.code.contains("color: \"#1f2937\""));
    assert_eq!(result.stats.unconverted_classes, 3);
}
