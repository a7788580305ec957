//! Environment-driven settings.
//!
//! Everything is read from the process environment once; there is no config
//! file. `Settings::from_lookup` exists so tests can supply variables without
//! touching the real environment.

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Turns shape diagnostics on or off (`1`/`true`/`on`, `0`/`false`/`off`).
pub const SHAPE_DIAGNOSTICS_ENV: &str = "ZAAKCATALOGUS_SHAPE_DIAGNOSTICS";
/// Overrides the JSON Schema used to validate catalog payloads.
pub const SCHEMA_PATH_ENV: &str = "ZAAKCATALOGUS_SCHEMA";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Whether prop shape mismatches are logged. Defaults to on in debug
    /// builds and off in release builds.
    pub shape_diagnostics: bool,
    /// Schema file to use instead of the embedded catalog schema.
    pub schema_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let shape_diagnostics = lookup(SHAPE_DIAGNOSTICS_ENV)
            .and_then(|raw| parse_flag(&raw))
            .unwrap_or(cfg!(debug_assertions));
        let schema_path = lookup(SCHEMA_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        Self {
            shape_diagnostics,
            schema_path,
        }
    }
}

/// Settings for this process, read on first use.
pub fn settings() -> &'static Settings {
    static SETTINGS: OnceLock<Settings> = OnceLock::new();
    SETTINGS.get_or_init(Settings::from_env)
}

pub fn shape_diagnostics_enabled() -> bool {
    settings().shape_diagnostics
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_follow_build_profile() {
        let settings = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(settings.shape_diagnostics, cfg!(debug_assertions));
        assert!(settings.schema_path.is_none());
    }

    #[test]
    fn explicit_flags_override_default() {
        let on = Settings::from_lookup(lookup_from(&[(SHAPE_DIAGNOSTICS_ENV, " ON ")]));
        assert!(on.shape_diagnostics);
        let off = Settings::from_lookup(lookup_from(&[(SHAPE_DIAGNOSTICS_ENV, "0")]));
        assert!(!off.shape_diagnostics);
        let garbage = Settings::from_lookup(lookup_from(&[(SHAPE_DIAGNOSTICS_ENV, "maybe")]));
        assert_eq!(garbage.shape_diagnostics, cfg!(debug_assertions));
    }

    #[test]
    fn schema_path_ignores_blank_values() {
        let blank = Settings::from_lookup(lookup_from(&[(SCHEMA_PATH_ENV, "  ")]));
        assert!(blank.schema_path.is_none());
        let set = Settings::from_lookup(lookup_from(&[(SCHEMA_PATH_ENV, "/tmp/catalogus.json")]));
        assert_eq!(set.schema_path, Some(PathBuf::from("/tmp/catalogus.json")));
    }
}
