//! Simulation configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use agent::DEFAULT_INTERACT_RANGE;

/// Configuration required to set up a simulation run and its logging.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Hard stop for the tick loop.
    pub tick_limit: u64,
    /// Pause between ticks. Zero runs as fast as possible.
    pub tick_interval: Duration,
    pub seed: u64,
    pub npc_count: u32,
    pub interact_range: u32,
    pub pc_speed: u32,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub log_to_file: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_limit: 200,
            tick_interval: Duration::ZERO,
            seed: 7,
            npc_count: 2,
            interact_range: DEFAULT_INTERACT_RANGE,
            pc_speed: 1,
            session_id: None,
            log_dir: None,
            log_to_file: true,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_TICK_LIMIT` - Maximum number of ticks (default: 200)
    /// - `SIM_TICK_MS` - Milliseconds between ticks (default: 0)
    /// - `SIM_SEED` - Seed for wandering NPCs (default: 7)
    /// - `SIM_NPC_COUNT` - Number of NPCs to place (default: 2)
    /// - `SIM_INTERACT_RANGE` - Kick and talk distance in tiles (default: 1)
    /// - `SIM_PC_SPEED` - Player tiles per tick (default: 1)
    /// - `GAME_SESSION_ID` - Session identifier for log files (default: auto-generated)
    /// - `SIM_LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `SIM_LOG_TO_FILE` - Write a session log file (default: true)
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(limit) = read_var::<u64>(&lookup, "SIM_TICK_LIMIT") {
            config.tick_limit = limit.max(1);
        }

        if let Some(ms) = read_var::<u64>(&lookup, "SIM_TICK_MS") {
            config.tick_interval = Duration::from_millis(ms);
        }

        if let Some(seed) = read_var(&lookup, "SIM_SEED") {
            config.seed = seed;
        }

        if let Some(count) = read_var(&lookup, "SIM_NPC_COUNT") {
            config.npc_count = count;
        }

        if let Some(range) = read_var(&lookup, "SIM_INTERACT_RANGE") {
            config.interact_range = range;
        }

        if let Some(speed) = read_var::<u32>(&lookup, "SIM_PC_SPEED") {
            config.pc_speed = speed.max(1);
        }

        config.session_id = lookup("GAME_SESSION_ID");
        config.log_dir = lookup("SIM_LOG_DIR").map(PathBuf::from);

        if let Some(enable) = read_var::<bool>(&lookup, "SIM_LOG_TO_FILE") {
            config.log_to_file = enable;
        }

        config
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> SimConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.tick_limit, 200);
        assert_eq!(config.tick_interval, Duration::ZERO);
        assert_eq!(config.npc_count, 2);
        assert!(config.session_id.is_none());
        assert!(config.log_to_file);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config_from(&[
            ("SIM_TICK_LIMIT", "50"),
            ("SIM_TICK_MS", "100"),
            ("SIM_SEED", "99"),
            ("SIM_PC_SPEED", "3"),
            ("GAME_SESSION_ID", "demo"),
            ("SIM_LOG_TO_FILE", "false"),
        ]);
        assert_eq!(config.tick_limit, 50);
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.seed, 99);
        assert_eq!(config.pc_speed, 3);
        assert_eq!(config.session_id.as_deref(), Some("demo"));
        assert!(!config.log_to_file);
    }

    #[test]
    fn unparsable_and_zero_values_fall_back() {
        let config = config_from(&[("SIM_NPC_COUNT", "many"), ("SIM_PC_SPEED", "0")]);
        assert_eq!(config.npc_count, 2);
        assert_eq!(config.pc_speed, 1);
    }
}
