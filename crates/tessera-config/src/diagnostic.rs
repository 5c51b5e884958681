// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment extraction errors into miette diagnostics.
//!
//! Unknown keys get a source span pointing at the offending line when the
//! file can be found, plus a "did you mean" hint ranked by Jaro-Winkler
//! similarity.

#![allow(unused_assignments)] // emitted by the miette derive on span fields

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Hints below this Jaro-Winkler score are noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration problem, renderable with miette.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(code(tessera::config::unknown_key))]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        #[help]
        help: String,
        #[label("not a recognized key here")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(tessera::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        found: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tessera::config::missing_key),
        help("add `{key} = ...` under `{section}` in tessera.toml")
    )]
    MissingKey { key: String, section: String },

    /// Semantic check that failed after deserialization succeeded.
    #[error("validation error: {message}")]
    #[diagnostic(code(tessera::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(tessera::config::other))]
    Other(String),
}

/// Convert every error carried by a `figment::Error` into a diagnostic.
///
/// `toml_sources` pairs file paths with their contents and is only used to
/// attach spans to unknown-key errors.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| diagnose(&error, toml_sources))
        .collect()
}

fn diagnose(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let suggestion = suggest_key(field, expected);
            let valid = expected.join(", ");
            let help = match &suggestion {
                Some(s) => format!("did you mean `{s}`? valid keys: {valid}"),
                None => format!("valid keys: {valid}"),
            };
            let (span, src) = match locate(error, field, toml_sources) {
                Some((span, src)) => (Some(span), Some(src)),
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion,
                help,
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.to_string(),
            section: section_label(&error.path),
        },
        Kind::InvalidType(found, expected) => ConfigError::InvalidType {
            key: error.path.join("."),
            found: found.to_string(),
            expected: expected.clone(),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn section_label(path: &[String]) -> String {
    if path.is_empty() {
        "the top level".to_string()
    } else {
        format!("[{}]", path.join("."))
    }
}

fn locate(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no path; with a single candidate it must be the one.
    let (path, content) = match file {
        Some(file) => toml_sources.iter().find(|(p, _)| *p == file)?,
        None => match toml_sources {
            [only] => only,
            _ => return None,
        },
    };

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `field` inside the table named by `path`.
///
/// Tables and arrays of tables are matched by their dotted header. With an
/// empty `path`, both top-level keys and table headers named `field` match,
/// which covers unknown sections such as `[plugins]`.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let wanted = (!path.is_empty()).then(|| path.join("."));
    let mut current: Option<&str> = None;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let trimmed = line.trim_start();
        let indent = line.len() - trimmed.len();

        if let Some(header) = table_header(trimmed) {
            if wanted.is_none() && header == field {
                return trimmed.find(field).map(|i| start + indent + i);
            }
            current = Some(header);
            continue;
        }

        if current == wanted.as_deref()
            && let Some((key, _)) = trimmed.split_once('=')
            && key.trim() == field
        {
            return Some(start + indent);
        }
    }

    None
}

fn table_header(line: &str) -> Option<&str> {
    let line = line.trim_end();
    line.strip_prefix("[[")
        .and_then(|rest| rest.strip_suffix("]]"))
        .or_else(|| line.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
        .map(str::trim)
}

/// The valid key most similar to `unknown`, if any is similar enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render diagnostics into a single string with miette's graphical handler.
pub fn render_to_string(errors: &[ConfigError]) -> String {
    let handler = GraphicalReportHandler::new();
    let mut out = String::new();
    for error in errors {
        let mut report = String::new();
        if handler.render_report(&mut report, error as &dyn Diagnostic).is_ok() {
            out.push_str(&report);
        } else {
            out.push_str(&format!("Error: {error}\n"));
        }
    }
    out
}

/// Print diagnostics to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    eprint!("{}", render_to_string(errors));
}
