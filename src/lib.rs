//! Rock, scissors and paper agents chasing and converting each other on a
//! bounded field.
//!
//! - [`agent`]: the agent, its type and per-frame steering.
//! - [`simulation`]: the population and the frame loop.
//! - [`render`]: the drawing surface the loop draws through.
//! - [`config`]: field geometry, speeds and command line.

pub mod agent;
pub mod config;
pub mod error;
pub mod render;
pub mod simulation;
pub mod simulation_stats;

pub use agent::{Agent, AgentType};
pub use config::{Args, SimConfig};
pub use error::{AppError, ConfigError};
pub use render::{Canvas, Color};
pub use simulation::{Simulation, TickSummary};
pub use simulation_stats::SimulationStats;

pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;
pub const AGENT_SIZE: f64 = 20.0;
pub const BASE_SPEED: f64 = 2.0;
pub const INITIAL_COUNT: usize = 15;
pub const MIN_SPEED_FACTOR: f64 = 0.3;
pub const STATS_AREA_HEIGHT: f64 = 50.0;
/// Largest field width or height a window is opened for.
pub const MAX_FIELD_SIZE: f64 = 16384.0;
