//! Reading many inputs against one schema
//!
//! Copyright (c) 2025 Warrant Team
//! Licensed under the Apache-2.0 license

use crate::error::SchemaErrors;
use crate::schema::Schema;
use crate::value::Value;
use std::env;

/// Environment variable enabling fail-fast batch reads (`true`/`false`, `1`/`0`)
pub const FAIL_FAST_ENV: &str = "WARRANT_SCHEMA_FAIL_FAST";

/// Environment variable capping the errors collected by a batch read
pub const MAX_ERRORS_ENV: &str = "WARRANT_SCHEMA_MAX_ERRORS";

/// Batch read configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Whether to stop on first error or collect all errors
    pub fail_fast: bool,
    /// Maximum number of errors to collect (0 = unlimited)
    pub max_errors: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_errors: 0,
        }
    }
}

impl BatchConfig {
    /// Stop at the first rejected input
    pub fn strict() -> Self {
        Self {
            fail_fast: true,
            max_errors: 0,
        }
    }

    /// Collect every rejection
    pub fn lenient() -> Self {
        Self::default()
    }

    /// Default configuration overridden by `WARRANT_SCHEMA_*` variables.
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(FAIL_FAST_ENV) {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => config.fail_fast = true,
                "0" | "false" | "no" => config.fail_fast = false,
                _ => tracing::warn!(
                    variable = FAIL_FAST_ENV,
                    value = %raw,
                    "ignoring invalid boolean"
                ),
            }
        }

        if let Some(raw) = lookup(MAX_ERRORS_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(max_errors) => config.max_errors = max_errors,
                Err(err) => tracing::warn!(
                    variable = MAX_ERRORS_ENV,
                    value = %raw,
                    error = %err,
                    "ignoring invalid error limit"
                ),
            }
        }

        tracing::debug!(?config, "loaded batch configuration");
        config
    }

    /// Enable fail-fast mode
    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Set maximum number of errors to collect
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }
}

/// Read every input with `schema`.
///
/// Returns the conforming values in input order, or the rejections, each
/// tagged with the `index` of its input.
pub fn read_batch(
    schema: &Schema,
    inputs: &[Value],
    config: &BatchConfig,
) -> Result<Vec<Value>, SchemaErrors> {
    let mut values = Vec::with_capacity(inputs.len());
    let mut errors = SchemaErrors::new();

    for (index, input) in inputs.iter().enumerate() {
        match schema.read(input) {
            Ok(value) => values.push(value),
            Err(error) => {
                tracing::debug!(index, schema = %schema, error = %error, "batch input rejected");
                errors.add(error.with_context("index", index.into()));

                if config.fail_fast {
                    break;
                }

                if config.max_errors > 0 && errors.len() >= config.max_errors {
                    break;
                }
            }
        }
    }

    errors.into_result()?;
    Ok(values)
}
