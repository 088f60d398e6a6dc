use crate::{
    chase::{
        ChaseTuning, DEFAULT_BUG_APPEAR_DELAY_MS, DEFAULT_POINTER_THROTTLE_MS,
        DEFAULT_POUNCE_DELAY_MS,
    },
    pursuit::{
        PursuitTuning, DEFAULT_LERP_FACTOR, DEFAULT_MAX_DISTANCE, DEFAULT_MIN_DISTANCE,
        DEFAULT_RETREAT_DELAY_MS,
    },
    telemetry::LogLevel,
};

pub const DEFAULT_CONTACT_SUBMIT_DELAY_MS: u32 = 1_500;
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

const MIN_DISTANCE_BOUNDS: (f64, f64) = (0.0, 100.0);
const MAX_DISTANCE_BOUNDS: (f64, f64) = (10.0, 5_000.0);
const LERP_FACTOR_BOUNDS: (f64, f64) = (0.01, 1.0);
const RETREAT_DELAY_MS_BOUNDS: (f64, f64) = (100.0, 60_000.0);
const BUG_APPEAR_DELAY_MS_BOUNDS: (f64, f64) = (0.0, 60_000.0);
const POUNCE_DELAY_MS_BOUNDS: (f64, f64) = (0.0, 10_000.0);
const POINTER_THROTTLE_MS_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const CONTACT_SUBMIT_DELAY_MS_BOUNDS: (u32, u32) = (0, 10_000);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RuntimeConfig {
    pub chase: ChaseTuning,
    pub contact_submit_delay_ms: u32,
    pub log_level: LogLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            chase: ChaseTuning::default(),
            contact_submit_delay_ms: DEFAULT_CONTACT_SUBMIT_DELAY_MS,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl RuntimeConfig {
    /// Reads every tunable through `lookup`; anything missing, malformed or
    /// out of bounds keeps its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let min_distance = parse_f64_with_bounds(
            &lookup,
            "pursuit-min-distance",
            DEFAULT_MIN_DISTANCE,
            MIN_DISTANCE_BOUNDS,
        );
        let max_distance = parse_f64_with_bounds(
            &lookup,
            "pursuit-max-distance",
            DEFAULT_MAX_DISTANCE,
            MAX_DISTANCE_BOUNDS,
        )
        .max(min_distance);
        let lerp_factor = parse_f64_with_bounds(
            &lookup,
            "pursuit-lerp-factor",
            DEFAULT_LERP_FACTOR,
            LERP_FACTOR_BOUNDS,
        );
        let retreat_delay_ms = parse_f64_with_bounds(
            &lookup,
            "retreat-delay-ms",
            DEFAULT_RETREAT_DELAY_MS,
            RETREAT_DELAY_MS_BOUNDS,
        );
        let bug_appear_delay_ms = parse_f64_with_bounds(
            &lookup,
            "bug-appear-delay-ms",
            DEFAULT_BUG_APPEAR_DELAY_MS,
            BUG_APPEAR_DELAY_MS_BOUNDS,
        );
        let pounce_delay_ms = parse_f64_with_bounds(
            &lookup,
            "pounce-delay-ms",
            DEFAULT_POUNCE_DELAY_MS,
            POUNCE_DELAY_MS_BOUNDS,
        );
        let pointer_throttle_ms = parse_f64_with_bounds(
            &lookup,
            "pointer-throttle-ms",
            DEFAULT_POINTER_THROTTLE_MS,
            POINTER_THROTTLE_MS_BOUNDS,
        );
        let contact_submit_delay_ms = parse_u32_with_bounds(
            &lookup,
            "contact-submit-delay-ms",
            DEFAULT_CONTACT_SUBMIT_DELAY_MS,
            CONTACT_SUBMIT_DELAY_MS_BOUNDS,
        );
        let log_level = lookup("log-level")
            .and_then(|value| LogLevel::parse(&value))
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            chase: ChaseTuning {
                pursuit: PursuitTuning {
                    min_distance,
                    max_distance,
                    lerp_factor,
                    retreat_delay_ms,
                    ..PursuitTuning::default()
                },
                bug_appear_delay_ms,
                pounce_delay_ms,
                pointer_throttle_ms,
            },
            contact_submit_delay_ms,
            log_level,
        }
    }

    pub fn as_json(&self) -> serde_json::Value {
        let pursuit = &self.chase.pursuit;
        serde_json::json!({
            "min_distance": pursuit.min_distance,
            "max_distance": pursuit.max_distance,
            "lerp_factor": pursuit.lerp_factor,
            "retreat_delay_ms": pursuit.retreat_delay_ms,
            "bug_appear_delay_ms": self.chase.bug_appear_delay_ms,
            "pounce_delay_ms": self.chase.pounce_delay_ms,
            "pointer_throttle_ms": self.chase.pointer_throttle_ms,
            "contact_submit_delay_ms": self.contact_submit_delay_ms,
            "log_level": self.log_level.as_str(),
        })
    }
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    lookup(name)
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_u32_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: u32,
    bounds: (u32, u32),
) -> u32 {
    lookup(name)
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> RuntimeConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| values.get(key).cloned())
    }

    #[test]
    fn empty_lookup_yields_reference_constants() {
        let config = config_from(&[]);

        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.chase.pursuit.min_distance, 5.0);
        assert_eq!(config.chase.pursuit.max_distance, 300.0);
        assert_eq!(config.chase.pursuit.lerp_factor, 0.12);
        assert_eq!(config.chase.pursuit.retreat_delay_ms, 2_000.0);
        assert_eq!(config.chase.pointer_throttle_ms, 16.0);
    }

    #[test]
    fn in_bounds_values_override_defaults() {
        let config = config_from(&[
            ("pursuit-lerp-factor", " 0.25 "),
            ("retreat-delay-ms", "500"),
            ("contact-submit-delay-ms", "0"),
            ("log-level", "debug"),
        ]);

        assert_eq!(config.chase.pursuit.lerp_factor, 0.25);
        assert_eq!(config.chase.pursuit.retreat_delay_ms, 500.0);
        assert_eq!(config.contact_submit_delay_ms, 0);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn malformed_or_out_of_bounds_values_fall_back() {
        let config = config_from(&[
            ("pursuit-lerp-factor", "2.5"),
            ("pursuit-min-distance", "NaN"),
            ("pounce-delay-ms", "soon"),
            ("log-level", "verbose"),
        ]);

        assert_eq!(config.chase.pursuit.lerp_factor, DEFAULT_LERP_FACTOR);
        assert_eq!(config.chase.pursuit.min_distance, DEFAULT_MIN_DISTANCE);
        assert_eq!(config.chase.pounce_delay_ms, DEFAULT_POUNCE_DELAY_MS);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn max_distance_never_drops_below_min_distance() {
        let config = config_from(&[
            ("pursuit-min-distance", "80"),
            ("pursuit-max-distance", "20"),
        ]);

        assert_eq!(config.chase.pursuit.min_distance, 80.0);
        assert_eq!(config.chase.pursuit.max_distance, 80.0);
    }

    #[test]
    fn json_summary_names_every_tunable() {
        let summary = RuntimeConfig::default().as_json();

        assert_eq!(summary["lerp_factor"], 0.12);
        assert_eq!(summary["log_level"], "info");
        assert_eq!(summary["contact_submit_delay_ms"], 1_500);
    }
}
