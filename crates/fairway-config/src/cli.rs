//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Fairway command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "fairway", about = "Headless golf shot simulation")]
pub struct CliArgs {
    /// Force at full backswing.
    #[arg(long)]
    pub max_force: Option<f32>,

    /// Number of holes to play.
    #[arg(long)]
    pub holes: Option<u32>,

    /// Simulated seconds before giving up.
    #[arg(long)]
    pub max_seconds: Option<f32>,

    /// Seconds the scripted golfer holds each swing.
    #[arg(long)]
    pub swing_hold: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(force) = args.max_force {
            self.swing.max_force = force;
        }
        if let Some(holes) = args.holes {
            self.sim.holes = holes;
        }
        if let Some(secs) = args.max_seconds {
            self.sim.max_sim_seconds = secs;
        }
        if let Some(hold) = args.swing_hold {
            self.sim.swing_hold_seconds = hold;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            max_force: Some(150.0),
            holes: Some(1),
            log_level: Some("debug".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.swing.max_force, 150.0);
        assert_eq!(config.sim.holes, 1);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.sim.max_sim_seconds, 180.0);
        assert_eq!(config.swing.force_rate, 200.0);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "fairway",
            "--max-force",
            "250",
            "--swing-hold",
            "1.2",
            "--config",
            "/tmp/fw",
        ]);
        assert_eq!(args.max_force, Some(250.0));
        assert_eq!(args.swing_hold, Some(1.2));
        assert_eq!(args.config, Some(PathBuf::from("/tmp/fw")));
        assert_eq!(args.holes, None);
    }
}
