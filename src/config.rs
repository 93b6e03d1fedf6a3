// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Tracksheet-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Tracksheet and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Application configuration.
//!
//! Layers, lowest precedence first: defaults, an optional JSON file, then `TRACKSHEET_*`
//! environment variables. Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::backend::MockBackendConfig;
use crate::model::fixtures::DEMO_SHEET_SLUG;

pub const ENV_SHEET: &str = "TRACKSHEET_SHEET";
pub const ENV_FETCH_LATENCY_MS: &str = "TRACKSHEET_FETCH_LATENCY_MS";
pub const ENV_MUTATION_LATENCY_MS: &str = "TRACKSHEET_MUTATION_LATENCY_MS";
pub const ENV_LOG: &str = "TRACKSHEET_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sheet_slug: String,
    pub fetch_latency_ms: u64,
    pub mutation_latency_ms: u64,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `warn` or `tracksheet=debug`.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_slug: DEMO_SHEET_SLUG.to_owned(),
            fetch_latency_ms: 500,
            mutation_latency_ms: 300,
            log_filter: "warn".to_owned(),
        }
    }
}

impl Config {
    /// Defaults, then `file` if given, then the process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlays values found through `lookup` (normally `std::env::var`).
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(slug) = non_empty(lookup(ENV_SHEET)) {
            self.sheet_slug = slug;
        }
        if let Some(raw) = non_empty(lookup(ENV_FETCH_LATENCY_MS)) {
            self.fetch_latency_ms = parse_millis(ENV_FETCH_LATENCY_MS, &raw)?;
        }
        if let Some(raw) = non_empty(lookup(ENV_MUTATION_LATENCY_MS)) {
            self.mutation_latency_ms = parse_millis(ENV_MUTATION_LATENCY_MS, &raw)?;
        }
        if let Some(filter) = non_empty(lookup(ENV_LOG)) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    pub fn backend(&self) -> MockBackendConfig {
        MockBackendConfig {
            fetch_latency: Duration::from_millis(self.fetch_latency_ms),
            mutation_latency: Duration::from_millis(self.mutation_latency_ms),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_millis(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_owned(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{key} must be a whole number of milliseconds (got {value:?})")]
    InvalidNumber { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use rstest::rstest;

    use super::{Config, ConfigError, ENV_FETCH_LATENCY_MS, ENV_LOG, ENV_SHEET};

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_demo_backend() {
        let config = Config::default();
        assert_eq!(config.sheet_slug, "dsa-mastery-sheet");
        assert_eq!(config.backend().fetch_latency, Duration::from_millis(500));
        assert_eq!(config.backend().mutation_latency, Duration::from_millis(300));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: Config =
            serde_json::from_str(r#"{ "fetch_latency_ms": 0 }"#).expect("config");
        assert_eq!(config.fetch_latency_ms, 0);
        assert_eq!(config.mutation_latency_ms, 300);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = Config {
            sheet_slug: "from-file".to_owned(),
            ..Config::default()
        }
        .with_env(env(&[
            (ENV_SHEET, "from-env"),
            (ENV_FETCH_LATENCY_MS, " 25 "),
            (ENV_LOG, "tracksheet=debug"),
        ]))
        .expect("config");

        assert_eq!(config.sheet_slug, "from-env");
        assert_eq!(config.fetch_latency_ms, 25);
        assert_eq!(config.log_filter, "tracksheet=debug");
    }

    #[rstest]
    #[case("fast")]
    #[case("-1")]
    fn invalid_latency_is_rejected(#[case] raw: &str) {
        let err = Config::default()
            .with_env(env(&[(ENV_FETCH_LATENCY_MS, raw)]))
            .expect_err("invalid");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { key: ENV_FETCH_LATENCY_MS, .. }
        ));
    }

    #[test]
    fn blank_variables_are_ignored() {
        let config = Config::default()
            .with_env(env(&[(ENV_SHEET, "  ")]))
            .expect("config");
        assert_eq!(config, Config::default());
    }
}
