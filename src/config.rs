//! Runtime configuration
//!
//! Defaults reproduce the classic 150×150 board in a 600×600 window,
//! ticking ten times per second. Every value can be overridden from the
//! environment.

use std::env;
use std::str::FromStr;

use crate::error::{SimError, SimResult};

/// Largest grid side a render target is guaranteed to support
pub const MAX_GRID_SIDE: usize = 16_384;

/// Simulation and window configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Seconds between simulation ticks
    pub tick_interval: f64,
    /// Window width in pixels
    pub window_width: i32,
    /// Window height in pixels
    pub window_height: i32,
    /// Brush radius in cells (1 = 3×3 block)
    pub brush_radius: usize,
    /// Rule kernel name, see `domain::rule_by_name`
    pub rule: String,
    /// Fraction of cells alive at startup (0 = blank board)
    pub seed_density: f64,
    /// Draw the statistics overlay
    pub show_overlay: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: 150,
            grid_height: 150,
            tick_interval: 0.1,
            window_width: 600,
            window_height: 600,
            brush_radius: 1,
            rule: "Conway".to_string(),
            seed_density: 0.0,
            show_overlay: false,
        }
    }
}

impl SimConfig {
    /// Create config from `CA_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(w) = parse_var(&lookup, "CA_GRID_WIDTH") {
            config.grid_width = w;
        }
        if let Some(h) = parse_var(&lookup, "CA_GRID_HEIGHT") {
            config.grid_height = h;
        }
        if let Some(ms) = parse_var::<f64>(&lookup, "CA_TICK_MS") {
            config.tick_interval = ms / 1000.0;
        }
        if let Some(side) = parse_var(&lookup, "CA_WINDOW") {
            config.window_width = side;
            config.window_height = side;
        }
        if let Some(radius) = parse_var(&lookup, "CA_BRUSH") {
            config.brush_radius = radius;
        }
        if let Some(rule) = lookup("CA_RULE") {
            config.rule = rule;
        }
        if let Some(density) = parse_var(&lookup, "CA_SEED_DENSITY") {
            config.seed_density = density;
        }
        if let Some(flag) = lookup("CA_OVERLAY") {
            config.show_overlay = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        config
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> SimResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(SimError::config(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(SimError::config(format!(
                "grid {}x{} exceeds the {MAX_GRID_SIDE} texel limit",
                self.grid_width, self.grid_height
            )));
        }
        if !self.tick_interval.is_finite() || self.tick_interval < 0.0 {
            return Err(SimError::config(format!(
                "tick interval must be a non-negative number of seconds, got {}",
                self.tick_interval
            )));
        }
        if !(0.0..=1.0).contains(&self.seed_density) {
            return Err(SimError::config(format!(
                "seed density must be within [0, 1], got {}",
                self.seed_density
            )));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(SimError::config("window must have a positive size"));
        }
        Ok(())
    }

    /// Grid dimensions as (width, height)
    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid_width, self.grid_height)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("ignoring {key}={raw:?}: not a valid value, keeping default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_classic_board() {
        let config = SimConfig::default();
        assert_eq!(config.grid_size(), (150, 150));
        assert_eq!(config.tick_interval, 0.1);
        assert_eq!((config.window_width, config.window_height), (600, 600));
        assert_eq!(config.brush_radius, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("CA_GRID_WIDTH", "64"),
            ("CA_GRID_HEIGHT", "32"),
            ("CA_TICK_MS", "250"),
            ("CA_RULE", "HighLife"),
            ("CA_OVERLAY", "true"),
        ]));
        assert_eq!(config.grid_size(), (64, 32));
        assert_eq!(config.tick_interval, 0.25);
        assert_eq!(config.rule, "HighLife");
        assert!(config.show_overlay);
    }

    #[test]
    fn test_unparsable_values_keep_defaults() {
        let config = SimConfig::from_lookup(lookup_from(&[
            ("CA_GRID_WIDTH", "wide"),
            ("CA_TICK_MS", ""),
        ]));
        assert_eq!(config.grid_width, 150);
        assert_eq!(config.tick_interval, 0.1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let empty = SimConfig { grid_width: 0, ..SimConfig::default() };
        assert!(matches!(empty.validate(), Err(SimError::Config(_))));

        let huge = SimConfig { grid_height: MAX_GRID_SIDE + 1, ..SimConfig::default() };
        assert!(huge.validate().is_err());

        let negative = SimConfig { tick_interval: -1.0, ..SimConfig::default() };
        assert!(negative.validate().is_err());

        let dense = SimConfig { seed_density: 1.5, ..SimConfig::default() };
        assert!(dense.validate().is_err());
    }
}
