// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for the OpenXC JSON codec.
//!
//! This crate provides [`CodecConfig`] (payload encoding, output layout,
//! stream limits and log level) together with helpers for loading from TOML
//! files, applying `OXC_*` environment overrides, merging overlays, and
//! producing advisory [`ConfigWarning`]s.
#![deny(unsafe_code)]
#![warn(missing_docs)]

use oxc_json::stream::{DEFAULT_MAX_RECORD_LEN, JsonStream};
use oxc_json::{JsonFormatter, PayloadEncoding};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file was not found.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
    },

    /// The file could not be parsed as valid TOML.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Human-readable parse error detail.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory-level issues that do not prevent operation but deserve attention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A recommended optional field is missing.
    MissingOptionalField {
        /// Name of the missing field.
        field: String,
        /// Why it matters.
        hint: String,
    },
    /// The stream record limit is unusually large.
    LargeRecordLimit {
        /// Limit in bytes.
        bytes: usize,
    },
    /// Pretty output spans several lines per message.
    PrettyOutput,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::MissingOptionalField { field, hint } => {
                write!(f, "missing optional field '{field}': {hint}")
            }
            ConfigWarning::LargeRecordLimit { bytes } => {
                write!(f, "max_record_len of {bytes} bytes is unusually large")
            }
            ConfigWarning::PrettyOutput => {
                f.write_str("pretty output is not newline-delimited; stream readers cannot split it")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level codec configuration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct CodecConfig {
    /// Payload encoding for serialized messages: `"array"` or `"hex"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_encoding: Option<PayloadEncoding>,

    /// Pretty-print single messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,

    /// Log level override (e.g. `"debug"`, `"info"`, `"warn"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Longest accepted stream record, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_record_len: Option<usize>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            payload_encoding: None,
            pretty: None,
            log_level: Some("info".into()),
            max_record_len: None,
        }
    }
}

impl CodecConfig {
    /// The configured payload encoding, defaulting to the array form.
    #[must_use]
    pub fn payload_encoding(&self) -> PayloadEncoding {
        self.payload_encoding.unwrap_or_default()
    }

    /// The configured record limit, or the stream default.
    #[must_use]
    pub fn max_record_len(&self) -> usize {
        self.max_record_len.unwrap_or(DEFAULT_MAX_RECORD_LEN)
    }

    /// Build the formatter described by this config.
    #[must_use]
    pub fn formatter(&self) -> JsonFormatter {
        JsonFormatter::new()
            .with_payload_encoding(self.payload_encoding())
            .pretty(self.pretty.unwrap_or(false))
    }

    /// Build a stream decoder described by this config.
    #[must_use]
    pub fn stream(&self) -> JsonStream {
        JsonStream::with_max_record_len(self.max_record_len()).with_formatter(self.formatter())
    }
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard upper bound on `max_record_len` (16 MiB).
const MAX_RECORD_LEN: usize = 16 * 1024 * 1024;

/// Threshold above which the record limit generates a warning (1 MiB).
const LARGE_RECORD_THRESHOLD: usize = 1024 * 1024;

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`CodecConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`CodecConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<CodecConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|_| ConfigError::FileNotFound {
                path: p.display().to_string(),
            })?;
            parse_toml(&content)?
        }
        None => CodecConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`CodecConfig`].
pub fn parse_toml(content: &str) -> Result<CodecConfig, ConfigError> {
    toml::from_str::<CodecConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `OXC_PAYLOAD_ENCODING`
/// - `OXC_PRETTY` (`1`/`true`/`yes` or `0`/`false`/`no`)
/// - `OXC_LOG_LEVEL`
/// - `OXC_MAX_RECORD_LEN`
///
/// Values that do not parse are ignored.
pub fn apply_env_overrides(config: &mut CodecConfig) {
    if let Ok(val) = std::env::var("OXC_PAYLOAD_ENCODING")
        && let Ok(encoding) = val.parse()
    {
        config.payload_encoding = Some(encoding);
    }
    if let Ok(val) = std::env::var("OXC_PRETTY") {
        match val.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => config.pretty = Some(true),
            "0" | "false" | "no" => config.pretty = Some(false),
            _ => {}
        }
    }
    if let Ok(val) = std::env::var("OXC_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var("OXC_MAX_RECORD_LEN")
        && let Ok(n) = val.parse()
    {
        config.max_record_len = Some(n);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (unknown log level, out-of-range record limit) are returned as a [`ConfigError::ValidationError`]; soft issues come back
/// as warnings. An unknown payload encoding never gets this far: it is
/// rejected when the file is parsed.
pub fn validate_config(config: &CodecConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(ref level) = config.log_level
        && !VALID_LOG_LEVELS.contains(&level.as_str())
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if config.payload_encoding.is_none() {
        warnings.push(ConfigWarning::MissingOptionalField {
            field: "payload_encoding".into(),
            hint: "payloads will be written as integer arrays".into(),
        });
    }

    if let Some(n) = config.max_record_len {
        if n == 0 || n > MAX_RECORD_LEN {
            errors.push(format!(
                "max_record_len {n} out of range (1..={MAX_RECORD_LEN})"
            ));
        } else if n > LARGE_RECORD_THRESHOLD {
            warnings.push(ConfigWarning::LargeRecordLimit { bytes: n });
        }
    }

    if config.pretty == Some(true) {
        warnings.push(ConfigWarning::PrettyOutput);
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations.  Values in `overlay` take precedence over `base`.
pub fn merge_configs(base: CodecConfig, overlay: CodecConfig) -> CodecConfig {
    CodecConfig {
        payload_encoding: overlay.payload_encoding.or(base.payload_encoding),
        pretty: overlay.pretty.or(base.pretty),
        log_level: overlay.log_level.or(base.log_level),
        max_record_len: overlay.max_record_len.or(base.max_record_len),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // -- 1. Default config is valid ------------------------------------------

    #[test]
    fn default_config_is_valid() {
        let cfg = CodecConfig::default();
        let warnings = validate_config(&cfg).expect("default config should be valid");
        assert!(!warnings.is_empty(), "should have advisory warnings");
    }

    // -- 2. Default config builds the default formatter ----------------------

    #[test]
    fn default_config_builds_default_formatter() {
        let cfg = CodecConfig::default();
        assert_eq!(cfg.formatter(), JsonFormatter::new());
        assert_eq!(cfg.max_record_len(), DEFAULT_MAX_RECORD_LEN);
    }

    // -- 3. Load from valid TOML string --------------------------------------

    #[test]
    fn parse_valid_toml_string() {
        let toml = r#"
            payload_encoding = "hex"
            pretty = true
            log_level = "debug"
            max_record_len = 4096
        "#;
        let cfg = parse_toml(toml).unwrap();
        assert_eq!(cfg.payload_encoding(), PayloadEncoding::Hex);
        assert_eq!(cfg.pretty, Some(true));
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.max_record_len(), 4096);
        let f = cfg.formatter();
        assert!(f.is_pretty());
        assert_eq!(f.payload_encoding(), PayloadEncoding::Hex);
    }

    // -- 4. Invalid TOML produces ParseError ---------------------------------

    #[test]
    fn parse_invalid_toml_gives_parse_error() {
        let err = parse_toml("this is [not valid toml =").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn parse_wrong_types_gives_parse_error() {
        let err = parse_toml("pretty = \"yes\"").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    // -- 5. Validation errors ------------------------------------------------

    #[test]
    fn validation_catches_invalid_log_level() {
        let cfg = CodecConfig {
            log_level: Some("verbose".into()),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&cfg).unwrap_err(),
            ConfigError::ValidationError { .. }
        ));
    }

    #[test]
    fn unknown_encoding_is_a_parse_error() {
        match parse_toml("payload_encoding = \"base64\"").unwrap_err() {
            ConfigError::ParseError { reason } => assert!(reason.contains("base64"), "{reason}"),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn encoding_names_are_lowercase_in_toml() {
        assert!(parse_toml("payload_encoding = \"HEX\"").is_err());
        let cfg = parse_toml("payload_encoding = \"array\"").unwrap();
        assert_eq!(cfg.payload_encoding, Some(PayloadEncoding::Array));
    }

    #[test]
    fn validation_catches_record_limit_bounds() {
        for n in [0, MAX_RECORD_LEN + 1] {
            let cfg = CodecConfig {
                max_record_len: Some(n),
                ..Default::default()
            };
            assert!(validate_config(&cfg).is_err(), "{n}");
        }
    }

    // -- 6. Warnings ---------------------------------------------------------

    #[test]
    fn large_record_limit_and_pretty_warn() {
        let cfg = CodecConfig {
            payload_encoding: Some(PayloadEncoding::Array),
            pretty: Some(true),
            max_record_len: Some(LARGE_RECORD_THRESHOLD + 1),
            ..Default::default()
        };
        let warnings = validate_config(&cfg).unwrap();
        assert!(warnings.contains(&ConfigWarning::PrettyOutput));
        assert!(
            warnings
                .iter()
                .any(|w| matches!(w, ConfigWarning::LargeRecordLimit { .. }))
        );
    }

    #[test]
    fn fully_specified_config_has_no_warnings() {
        let cfg = CodecConfig {
            payload_encoding: Some(PayloadEncoding::Hex),
            pretty: Some(false),
            log_level: Some("warn".into()),
            max_record_len: Some(1024),
        };
        assert!(validate_config(&cfg).unwrap().is_empty());
    }

    // -- 7. Merge ------------------------------------------------------------

    #[test]
    fn merge_overlay_overrides_base() {
        let base = CodecConfig {
            payload_encoding: Some(PayloadEncoding::Array),
            max_record_len: Some(10),
            ..Default::default()
        };
        let overlay = CodecConfig {
            payload_encoding: Some(PayloadEncoding::Hex),
            log_level: None,
            ..Default::default()
        };
        let merged = merge_configs(base, overlay);
        assert_eq!(merged.payload_encoding, Some(PayloadEncoding::Hex));
        assert_eq!(merged.max_record_len, Some(10));
        assert_eq!(merged.log_level.as_deref(), Some("info"));
    }

    // -- 8. Roundtrip and file loading ---------------------------------------

    #[test]
    fn empty_string_toml_parses_to_defaults() {
        let cfg = parse_toml("").unwrap();
        assert_eq!(cfg.payload_encoding, None);
        assert_eq!(cfg.log_level, None);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = CodecConfig {
            payload_encoding: Some(PayloadEncoding::Hex),
            pretty: Some(true),
            log_level: Some("debug".into()),
            max_record_len: Some(2048),
        };
        let serialized = toml::to_string(&cfg).unwrap();
        let deserialized: CodecConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(cfg, deserialized);
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("oxc.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "payload_encoding = \"hex\"\nlog_level = \"warn\"").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.payload_encoding, Some(PayloadEncoding::Hex));
        assert_eq!(cfg.log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn load_missing_file_gives_file_not_found() {
        let err = load_config(Some(Path::new("/nonexistent/oxc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn warning_display() {
        let w = ConfigWarning::MissingOptionalField {
            field: "f".into(),
            hint: "h".into(),
        };
        assert!(w.to_string().contains("'f'"));
        assert!(
            ConfigWarning::LargeRecordLimit { bytes: 9999 }
                .to_string()
                .contains("9999")
        );
    }
}
