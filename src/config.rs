use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;
use crate::{
    AGENT_SIZE, BASE_SPEED, FIELD_HEIGHT, FIELD_WIDTH, INITIAL_COUNT, MAX_FIELD_SIZE, MIN_SPEED_FACTOR,
};

/// Command line for the windowed simulation.
#[derive(Parser, Debug, Clone)]
#[command(name = "rps-swarm")]
#[command(author, version, about = "Rock, scissors and paper swarm", long_about = None)]
pub struct Args {
    /// Number of agents created when the run starts
    #[arg(short, long, default_value_t = INITIAL_COUNT)]
    pub count: usize,

    /// Seed for the random generator; drawn from the OS when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Field width in pixels
    #[arg(long, default_value_t = FIELD_WIDTH)]
    pub width: f64,

    /// Field height in pixels
    #[arg(long, default_value_t = FIELD_HEIGHT)]
    pub height: f64,

    /// TrueType font used for labels and the stats bar
    #[arg(short, long, default_value = "assets/FiraSans-Regular.ttf")]
    pub font: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    pub width: f64,
    pub height: f64,
    /// Diameter of every agent's circle.
    pub diameter: f64,
    pub base_speed: f64,
    pub initial_count: usize,
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            diameter: AGENT_SIZE,
            base_speed: BASE_SPEED,
            initial_count: INITIAL_COUNT,
            seed: None,
        }
    }
}

impl From<&Args> for SimConfig {
    fn from(args: &Args) -> Self {
        SimConfig {
            width: args.width,
            height: args.height,
            initial_count: args.count,
            seed: args.seed,
            ..SimConfig::default()
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("diameter", self.diameter),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDimension { name, value });
            }
        }
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if value > MAX_FIELD_SIZE {
                return Err(ConfigError::FieldTooLarge {
                    name,
                    value,
                    max: MAX_FIELD_SIZE,
                });
            }
        }
        if self.diameter >= self.width || self.diameter >= self.height {
            return Err(ConfigError::AgentTooLarge {
                diameter: self.diameter,
                width: self.width,
                height: self.height,
            });
        }
        if !self.base_speed.is_finite() || self.base_speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.base_speed));
        }
        Ok(())
    }

    pub fn min_speed(&self) -> f64 {
        self.base_speed * MIN_SPEED_FACTOR
    }

    /// Largest x an agent's top-left corner may take.
    pub fn max_x(&self) -> f64 {
        self.width - self.diameter
    }

    pub fn max_y(&self) -> f64 {
        self.height - self.diameter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_x(), 780.0);
        assert_eq!(config.max_y(), 580.0);
        assert!((config.min_speed() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn rejects_agent_larger_than_field() {
        let config = SimConfig {
            width: 15.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::AgentTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_bad_numbers() {
        let config = SimConfig {
            height: f64::NAN,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimension { name: "height", .. })
        ));

        let config = SimConfig {
            base_speed: 0.0,
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidSpeed(0.0)));
    }

    #[test]
    fn rejects_fields_beyond_window_limit() {
        let config = SimConfig {
            width: 1e12,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FieldTooLarge { name: "width", .. })
        ));

        let config = SimConfig {
            height: MAX_FIELD_SIZE + 1.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::FieldTooLarge { name: "height", .. })
        ));

        let config = SimConfig {
            width: MAX_FIELD_SIZE,
            height: MAX_FIELD_SIZE,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn args_override_field_and_population() {
        let args = Args::parse_from(["rps-swarm", "--count", "30", "--seed", "7", "--width", "1024"]);
        let config = SimConfig::from(&args);
        assert_eq!(config.initial_count, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.width, 1024.0);
        assert_eq!(config.height, FIELD_HEIGHT);
        assert_eq!(config.diameter, AGENT_SIZE);
    }
}
