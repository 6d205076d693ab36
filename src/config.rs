//! Externally supplied scoring configuration.

use crate::Result;
use crate::collect::TRUST_MEASURED;
use crate::domain::Domain;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use strum::IntoEnumIterator;

const LOG_TARGET: &str = "    config";

const DEFAULT_LOWER_BOUND_YEAR: i32 = 2020;
const DEFAULT_MEDIAN_YEAR: i32 = 2034;

/// Time-bar computation mode.
///
/// The default interpolates elapsed time between a lower-bound year and a median
/// forecast year. `median_year` of 2034 is a carried-over forecasting default,
/// policy rather than a correctness constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimeBarConfig {
    /// Linear interpolation of the current year between two reference years.
    MedianDate {
        #[serde(default = "default_lower_bound_year")]
        lower_bound_year: i32,

        #[serde(default = "default_median_year")]
        median_year: i32,
    },

    /// Directly supplied percentage.
    ProgressProxy {
        #[serde(default)]
        progress: f64,
    },

    /// Unrecognized mode; scores as zero instead of failing the load.
    #[serde(other)]
    Unknown,
}

const fn default_lower_bound_year() -> i32 {
    DEFAULT_LOWER_BOUND_YEAR
}

const fn default_median_year() -> i32 {
    DEFAULT_MEDIAN_YEAR
}

impl Default for TimeBarConfig {
    fn default() -> Self {
        Self::MedianDate {
            lower_bound_year: DEFAULT_LOWER_BOUND_YEAR,
            median_year: DEFAULT_MEDIAN_YEAR,
        }
    }
}

/// Weight tables and time-bar settings driving the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// Trust tier -> weight. A zero or absent tier excludes its metrics from
    /// scoring without being an error.
    #[serde(default = "default_trust_weights")]
    pub trust_weights: HashMap<String, f64>,

    /// Domain -> weight. Need not sum to one; absent domains contribute nothing
    /// to the aggregate.
    #[serde(default = "default_domain_weights")]
    pub domain_weights: HashMap<Domain, f64>,

    #[serde(default)]
    pub time_bar: TimeBarConfig,
}

fn default_trust_weights() -> HashMap<String, f64> {
    HashMap::from([(TRUST_MEASURED.to_string(), 1.0)])
}

fn default_domain_weights() -> HashMap<Domain, f64> {
    #[expect(clippy::cast_precision_loss, reason = "domain count is tiny")]
    let equal_weight = 1.0 / Domain::iter().count() as f64;
    Domain::iter().map(|d| (d, equal_weight)).collect()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            trust_weights: default_trust_weights(),
            domain_weights: default_domain_weights(),
            time_bar: TimeBarConfig::default(),
        }
    }
}

impl SourcesConfig {
    /// Load the sources configuration from a file or use defaults.
    ///
    /// With no explicit path, searches the data directory for
    /// `sources.[toml|yml|yaml|json]` and falls back to the built-in defaults
    /// when none exists.
    pub fn load(data_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading sources configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                data_dir.join("sources.toml"),
                data_dir.join("sources.yml"),
                data_dir.join("sources.yaml"),
                data_dir.join("sources.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading sources configuration from {path}")),
                }
            }

            let Some(result) = found else {
                log::info!(target: LOG_TARGET, "No sources configuration found, using built-in defaults");
                return Ok(Self::default());
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML sources configuration from {final_path}"))?,
            "yml" | "yaml" => {
                serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML sources configuration from {final_path}"))?
            }
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON sources configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported sources configuration file extension: {extension}")),
        };

        Ok(config)
    }

    /// Save the configuration to a file, dispatching the format on the extension.
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => {
                toml::to_string_pretty(self).into_app_err_with(|| format!("serializing sources configuration to TOML for {output_path}"))?
            }
            "yml" | "yaml" => {
                serde_yaml::to_string(self).into_app_err_with(|| format!("serializing sources configuration to YAML for {output_path}"))?
            }
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing sources configuration to JSON for {output_path}"))?,
            _ => return Err(app_err!("unsupported sources configuration file extension: {extension}")),
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{parent}'"))?;
        }

        fs::write(output_path, text).into_app_err_with(|| format!("writing sources configuration to {output_path}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SourcesConfig::default();

        assert!((config.trust_weights[TRUST_MEASURED] - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.domain_weights.len(), Domain::iter().count());
        assert!((config.domain_weights[&Domain::K] - 0.1).abs() < 1e-12);
        assert_eq!(
            config.time_bar,
            TimeBarConfig::MedianDate {
                lower_bound_year: 2020,
                median_year: 2034,
            }
        );
    }

    #[test]
    fn test_parse_json_with_partial_fields() {
        let config: SourcesConfig = serde_json::from_str(
            r#"{
                "trust_weights": {"measured": 1.0, "unverified": 0.0},
                "domain_weights": {"R": 1.0}
            }"#,
        )
        .unwrap();

        assert!((config.trust_weights["unverified"]).abs() < f64::EPSILON);
        assert_eq!(config.domain_weights.len(), 1);
        assert_eq!(config.time_bar, TimeBarConfig::default());
    }

    #[test]
    fn test_parse_unrecognized_time_bar_mode() {
        let config: SourcesConfig = serde_json::from_str(r#"{"time_bar": {"mode": "oracle"}}"#).unwrap();
        assert_eq!(config.time_bar, TimeBarConfig::Unknown);
    }

    #[test]
    fn test_parse_progress_proxy_mode() {
        let config: SourcesConfig = serde_json::from_str(r#"{"time_bar": {"mode": "progress_proxy", "progress": 37.5}}"#).unwrap();
        assert_eq!(config.time_bar, TimeBarConfig::ProgressProxy { progress: 37.5 });
    }

    #[test]
    fn test_unknown_domain_code_is_rejected() {
        let result: core::result::Result<SourcesConfig, _> = serde_json::from_str(r#"{"domain_weights": {"XY": 1.0}}"#);
        let _ = result.unwrap_err();
    }

    #[test]
    fn test_unknown_top_level_field_is_rejected() {
        let result: core::result::Result<SourcesConfig, _> = serde_json::from_str(r#"{"trust_levels": {}}"#);
        let _ = result.unwrap_err();
    }

    #[test]
    fn test_parse_toml() {
        let config: SourcesConfig = toml::from_str(
            "[trust_weights]\nmeasured = 1.0\n\n[domain_weights]\nK = 0.5\nR = 0.5\n\n[time_bar]\nmode = \"median_date\"\nmedian_year = 2040\n",
        )
        .unwrap();

        assert_eq!(config.domain_weights.len(), 2);
        assert_eq!(
            config.time_bar,
            TimeBarConfig::MedianDate {
                lower_bound_year: 2020,
                median_year: 2040,
            }
        );
    }
}
