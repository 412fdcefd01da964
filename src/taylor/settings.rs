// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Settings shared by series composition and symbolic expansion.
//!
//! A settings document looks like
//! ```toml
//! [expansion]
//! composition_check = "warn"   # strict | warn | off
//! center_tolerance = 1e-10
//! loglevel = "info"
//! ```
use crate::taylor::taylor_errors::{TaylorError, TaylorResult};
use log::warn;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumString};

/// What happens when the outer series of a composition is not centered at
/// the value the inner series takes at its own center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum CompositionCheck {
    /// fail with `TaylorError::CenterMismatch`
    #[default]
    Strict,
    /// log a warning and substitute anyway
    Warn,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionSettings {
    pub composition_check: CompositionCheck,
    /// relative tolerance used when comparing centers, scaled by max(1, |value|)
    pub center_tolerance: f64,
    pub loglevel: Option<String>,
}

impl Default for ExpansionSettings {
    fn default() -> Self {
        ExpansionSettings {
            composition_check: CompositionCheck::Strict,
            center_tolerance: 1e-12,
            loglevel: None,
        }
    }
}

impl ExpansionSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_composition_check(mut self, check: CompositionCheck) -> Self {
        self.composition_check = check;
        self
    }

    pub fn with_center_tolerance(mut self, tolerance: f64) -> Self {
        self.center_tolerance = tolerance;
        self
    }

    pub fn with_loglevel(mut self, loglevel: &str) -> Self {
        self.loglevel = Some(loglevel.to_string());
        self
    }

    /// true when `outer_center` may be used to expand the outer function of
    /// a composition whose inner series evaluates to `inner_value`
    pub fn centers_match(&self, outer_center: f64, inner_value: f64) -> bool {
        (outer_center - inner_value).abs() <= self.center_tolerance * inner_value.abs().max(1.0)
    }

    /// applies the composition policy. Ok(()) means the substitution may run
    pub fn check_composition(&self, outer_center: f64, inner_value: f64) -> TaylorResult<()> {
        if self.centers_match(outer_center, inner_value) {
            return Ok(());
        }
        match self.composition_check {
            CompositionCheck::Strict => Err(TaylorError::CenterMismatch {
                outer_center,
                inner_value,
            }),
            CompositionCheck::Warn => {
                warn!(
                    "composing a series centered at {} with an inner series of value {}; result is approximate",
                    outer_center, inner_value
                );
                Ok(())
            }
            CompositionCheck::Off => Ok(()),
        }
    }

    pub fn from_toml_str(document: &str) -> TaylorResult<Self> {
        let table = document
            .parse::<toml::Table>()
            .map_err(|e| TaylorError::Config(e.to_string()))?;
        let mut settings = ExpansionSettings::default();
        let Some(section) = table.get("expansion") else {
            return Ok(settings);
        };
        let section = section
            .as_table()
            .ok_or_else(|| TaylorError::Config("[expansion] must be a table".to_string()))?;

        for (key, value) in section {
            match key.as_str() {
                "composition_check" => {
                    let name = value.as_str().ok_or_else(|| {
                        TaylorError::Config("composition_check must be a string".to_string())
                    })?;
                    settings.composition_check = CompositionCheck::from_str(name).map_err(|_| {
                        TaylorError::Config(format!(
                            "composition_check must be strict, warn or off, got {}",
                            name
                        ))
                    })?;
                }
                "center_tolerance" => {
                    let tolerance = value
                        .as_float()
                        .or_else(|| value.as_integer().map(|i| i as f64))
                        .ok_or_else(|| {
                            TaylorError::Config("center_tolerance must be a number".to_string())
                        })?;
                    if !(tolerance >= 0.0 && tolerance.is_finite()) {
                        return Err(TaylorError::Config(format!(
                            "center_tolerance must be a non-negative finite number, got {}",
                            tolerance
                        )));
                    }
                    settings.center_tolerance = tolerance;
                }
                "loglevel" => {
                    let level = value.as_str().ok_or_else(|| {
                        TaylorError::Config("loglevel must be a string".to_string())
                    })?;
                    match level {
                        "trace" | "debug" | "info" | "warn" | "error" | "off" | "none" => {
                            settings.loglevel = Some(level.to_string())
                        }
                        _ => {
                            return Err(TaylorError::Config(format!(
                                "loglevel must be debug, info, warn, error or off, got {}",
                                level
                            )));
                        }
                    }
                }
                other => {
                    return Err(TaylorError::Config(format!("unknown key {}", other)));
                }
            }
        }
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> TaylorResult<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        let settings = ExpansionSettings::default();
        assert_eq!(settings.composition_check, CompositionCheck::Strict);
        assert!(settings.centers_match(1.0, 1.0));
        assert!(!settings.centers_match(1.0, 1.001));
        assert!(settings.check_composition(0.0, 0.5).is_err());
    }

    #[test]
    fn test_parse_settings() {
        let doc = r#"
            [expansion]
            composition_check = "warn"
            center_tolerance = 1e-6
            loglevel = "debug"
        "#;
        let settings = ExpansionSettings::from_toml_str(doc).unwrap();
        assert_eq!(settings.composition_check, CompositionCheck::Warn);
        assert_eq!(settings.center_tolerance, 1e-6);
        assert_eq!(settings.loglevel, Some("debug".to_string()));
        assert!(settings.check_composition(0.0, 0.5).is_ok());
    }

    #[test]
    fn test_missing_section_gives_defaults() {
        let settings = ExpansionSettings::from_toml_str("title = \"run\"").unwrap();
        assert_eq!(settings, ExpansionSettings::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad_check = "[expansion]\ncomposition_check = \"sometimes\"";
        assert!(matches!(
            ExpansionSettings::from_toml_str(bad_check),
            Err(TaylorError::Config(_))
        ));
        let bad_key = "[expansion]\ncutoff = 3";
        assert!(ExpansionSettings::from_toml_str(bad_key).is_err());
        let negative = "[expansion]\ncenter_tolerance = -1.0";
        assert!(ExpansionSettings::from_toml_str(negative).is_err());
    }

    #[test]
    fn test_display_roundtrip_of_check() {
        assert_eq!(CompositionCheck::Off.to_string(), "off");
        assert_eq!(CompositionCheck::from_str("strict").unwrap(), CompositionCheck::Strict);
    }
}
