//! Game configuration, with defaults and environment overrides.

use std::str::FromStr;

use crate::{
    BONUS_AXIS, BONUS_LENGTH, DEFAULT_BOARD_SIZE, DEFAULT_PALETTE_SIZE, DESPAWN_ANIMATION_MS,
    MIN_RUN, MOVE_DELAY_MS, SCORE_FACTOR, SPAWN_ANIMATION_MS, SPAWN_BEADS, TICK_MS,
};

/// Errors raised while building a [`GameConfig`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size must be at least 2, got {0}")]
    BoardSize(u8),

    #[error("palette must hold at least one color, got {0}")]
    PaletteSize(u8),

    #[error("minimum run must be at least 2, got {0}")]
    MinRun(usize),

    #[error("spawn count must be at least 1, got {0}")]
    SpawnCount(usize),

    #[error("tick interval must be at least 1 ms, got {0}")]
    TickMs(u64),

    #[error("{name} must be a positive finite number, got {value}")]
    Factor { name: &'static str, value: f64 },

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub board_size: u8,
    pub palette_size: u8,
    pub spawn_count: usize,
    pub min_run: usize,
    pub score_factor: f64,
    pub bonus_length: f64,
    pub bonus_axis: f64,
    pub tick_ms: u64,
    pub spawn_animation_ms: u64,
    pub despawn_animation_ms: u64,
    pub move_delay_ms: u64,
    pub seed: u32,
    /// JSON-lines event log destination, if any.
    pub event_log: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            palette_size: DEFAULT_PALETTE_SIZE,
            spawn_count: SPAWN_BEADS,
            min_run: MIN_RUN,
            score_factor: SCORE_FACTOR,
            bonus_length: BONUS_LENGTH,
            bonus_axis: BONUS_AXIS,
            tick_ms: TICK_MS,
            spawn_animation_ms: SPAWN_ANIMATION_MS,
            despawn_animation_ms: DESPAWN_ANIMATION_MS,
            move_delay_ms: MOVE_DELAY_MS,
            seed: 1,
            event_log: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`], reading through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut cfg = Self::default();

        if let Some(v) = parse_var(&lookup, "LINES_BOARD_SIZE")? {
            cfg.board_size = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_COLORS")? {
            cfg.palette_size = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_SPAWN")? {
            cfg.spawn_count = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_MIN_RUN")? {
            cfg.min_run = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_SEED")? {
            cfg.seed = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_TICK_MS")? {
            cfg.tick_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_SPAWN_MS")? {
            cfg.spawn_animation_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_DESPAWN_MS")? {
            cfg.despawn_animation_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "LINES_MOVE_MS")? {
            cfg.move_delay_ms = v;
        }

        cfg.event_log = lookup("LINES_EVENT_LOG")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        cfg.validate()
    }

    /// Check value ranges, returning the config unchanged when they hold.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.board_size < 2 {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        if self.palette_size == 0 {
            return Err(ConfigError::PaletteSize(self.palette_size));
        }
        if self.min_run < 2 {
            return Err(ConfigError::MinRun(self.min_run));
        }
        if self.spawn_count == 0 {
            return Err(ConfigError::SpawnCount(self.spawn_count));
        }
        // A zero interval would reschedule the tick into the same instant forever.
        if self.tick_ms == 0 {
            return Err(ConfigError::TickMs(self.tick_ms));
        }
        for (name, value) in [
            ("score factor", self.score_factor),
            ("length bonus", self.bonus_length),
            ("axis bonus", self.bonus_axis),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Factor { name, value });
            }
        }
        Ok(self)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidEnv { var, value: raw })
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
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let cfg = GameConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = GameConfig::from_lookup(lookup_from(&[
            ("LINES_BOARD_SIZE", "12"),
            ("LINES_COLORS", "5"),
            ("LINES_SEED", "99"),
            ("LINES_EVENT_LOG", " /tmp/lines.jsonl "),
        ]))
        .unwrap();
        assert_eq!(cfg.board_size, 12);
        assert_eq!(cfg.palette_size, 5);
        assert_eq!(cfg.seed, 99);
        assert_eq!(cfg.event_log.as_deref(), Some("/tmp/lines.jsonl"));
    }

    #[test]
    fn garbage_value_is_reported() {
        let err = GameConfig::from_lookup(lookup_from(&[("LINES_MIN_RUN", "five")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEnv {
                var: "LINES_MIN_RUN",
                value: "five".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let cfg = GameConfig {
            min_run: 1,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::MinRun(1)));

        let cfg = GameConfig {
            palette_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::PaletteSize(0)));

        let cfg = GameConfig {
            bonus_axis: f64::NAN,
            ..GameConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Factor { .. })));
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let err = GameConfig::from_lookup(lookup_from(&[("LINES_TICK_MS", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::TickMs(0));

        let cfg = GameConfig::from_lookup(lookup_from(&[("LINES_TICK_MS", "1")])).unwrap();
        assert_eq!(cfg.tick_ms, 1);
    }
}
