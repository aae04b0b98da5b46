//! Configuration shared by the adapters and the CLI.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelConfig {
    /// Field delimiter for CSV input and output. Must be a single ASCII byte.
    pub delimiter: u8,

    /// When set, commands keep duplicate rows (as if `--all` was passed).
    pub bag_mode: bool,

    /// Name given to the relation read from standard input.
    pub relation_name: String,

    /// `tracing` filter directive for the binary layer.
    pub log_filter: String,
}

impl Default for RelConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            bag_mode: false,
            relation_name: "stdin".to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl RelConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `RELALG_DELIMITER`: CSV delimiter (one ASCII character, `\t` for tab)
    /// - `RELALG_BAG_MODE`: `1`/`true` to keep duplicates by default
    /// - `RELALG_RELATION_NAME`: name of the stdin relation
    /// - `RELALG_LOG`: log filter directive
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("RELALG_DELIMITER") {
            if let Some(d) = parse_delimiter(&s) {
                cfg.delimiter = d;
            }
        }

        if let Ok(s) = std::env::var("RELALG_BAG_MODE") {
            cfg.bag_mode = matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }

        if let Ok(s) = std::env::var("RELALG_RELATION_NAME") {
            if !s.trim().is_empty() {
                cfg.relation_name = s;
            }
        }

        if let Ok(s) = std::env::var("RELALG_LOG") {
            cfg.log_filter = s;
        }

        cfg
    }
}

/// Parse a delimiter argument: a single ASCII character, or `\t`/`tab`.
pub fn parse_delimiter(s: &str) -> Option<u8> {
    match s {
        "\\t" | "tab" => Some(b'\t'),
        _ => {
            let bytes = s.as_bytes();
            (bytes.len() == 1 && bytes[0].is_ascii()).then(|| bytes[0])
        }
    }
}
