use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;

use crate::config::SimConfig;
use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentType {
    Rock,
    Scissors,
    Paper,
}

impl AgentType {
    pub const ALL: [AgentType; 3] = [AgentType::Rock, AgentType::Scissors, AgentType::Paper];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Rock beats scissors, scissors beat paper, paper beats rock.
    pub fn can_kill(self, other: AgentType) -> bool {
        matches!(
            (self, other),
            (AgentType::Rock, AgentType::Scissors)
                | (AgentType::Scissors, AgentType::Paper)
                | (AgentType::Paper, AgentType::Rock)
        )
    }

    pub fn index(self) -> usize {
        match self {
            AgentType::Rock => 0,
            AgentType::Scissors => 1,
            AgentType::Paper => 2,
        }
    }

    pub fn color(self) -> Color {
        match self {
            AgentType::Rock => [0.533, 0.533, 0.533, 1.0],
            AgentType::Scissors => [1.0, 0.42, 0.42, 1.0],
            AgentType::Paper => [0.455, 0.725, 1.0, 1.0],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgentType::Rock => "Rock",
            AgentType::Scissors => "Scissors",
            AgentType::Paper => "Paper",
        }
    }
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A circle on the field. `x`/`y` is the top-left corner of its bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub kind: AgentType,
}

impl Agent {
    pub fn new(x: f64, y: f64, kind: AgentType) -> Self {
        Agent {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
            kind,
        }
    }

    /// Random in-bounds position, velocity within half the base speed per axis.
    pub fn spawn(kind: AgentType, config: &SimConfig, rng: &mut impl Rng) -> Self {
        Agent {
            x: rng.random_range(0.0..config.max_x()),
            y: rng.random_range(0.0..config.max_y()),
            dx: rng.random_range(-0.5..0.5) * config.base_speed,
            dy: rng.random_range(-0.5..0.5) * config.base_speed,
            kind,
        }
    }

    pub fn speed(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    pub fn can_kill(&self, other: &Agent) -> bool {
        self.kind.can_kill(other.kind)
    }

    pub fn center(&self, config: &SimConfig) -> [f64; 2] {
        let radius = config.diameter / 2.0;
        [self.x + radius, self.y + radius]
    }

    pub fn distance_squared(&self, other: &Agent) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Nearest agent this one can kill or be killed by. `me` is this agent's
    /// own slot in `others`.
    pub fn find_target<'a>(&self, me: usize, others: &'a [Agent]) -> Option<&'a Agent> {
        let mut closest = None;
        let mut min_dist = f64::INFINITY;
        for (idx, other) in others.iter().enumerate() {
            if idx == me || !(self.can_kill(other) || other.can_kill(self)) {
                continue;
            }
            let dist = self.distance_squared(other);
            if dist < min_dist {
                min_dist = dist;
                closest = Some(other);
            }
        }
        closest
    }

    /// One frame of movement and steering against the pre-frame `others`.
    /// Type changes are left to collision resolution.
    pub fn advance(&mut self, me: usize, others: &[Agent], config: &SimConfig, rng: &mut impl Rng) {
        self.x += self.dx;
        self.y += self.dy;
        self.bounce_off_walls(config, rng);

        match self.find_target(me, others) {
            Some(target) => self.steer_at(target, config),
            None => {
                self.dx += rng.random_range(-0.1..0.1);
                self.dy += rng.random_range(-0.1..0.1);
            }
        }

        self.pull_toward_center(config);
        self.enforce_min_speed(config, rng);
    }

    fn bounce_off_walls(&mut self, config: &SimConfig, rng: &mut impl Rng) {
        let (max_x, max_y) = (config.max_x(), config.max_y());

        if self.x < 0.0 {
            self.x = 0.0;
            self.dx = self.dx.abs() * damping(rng);
        } else if self.x > max_x {
            self.x = max_x;
            self.dx = -self.dx.abs() * damping(rng);
        }

        if self.y < 0.0 {
            self.y = 0.0;
            self.dy = self.dy.abs() * damping(rng);
        } else if self.y > max_y {
            self.y = max_y;
            self.dy = -self.dy.abs() * damping(rng);
        }
    }

    /// Chase prey, flee predators, both at base speed.
    fn steer_at(&mut self, target: &Agent, config: &SimConfig) {
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= 0.0 {
            return;
        }

        let factor = if self.can_kill(target) { 1.0 } else { -1.0 };
        self.dx = dx / distance * config.base_speed * factor;
        self.dy = dy / distance * config.base_speed * factor;
    }

    /// Keeps agents from idling against the walls.
    fn pull_toward_center(&mut self, config: &SimConfig) {
        let to_center_x = config.width / 2.0 - self.x;
        let to_center_y = config.height / 2.0 - self.y;
        let to_center = (to_center_x * to_center_x + to_center_y * to_center_y).sqrt();

        let edge_dist = self
            .x
            .min(config.width - self.x)
            .min(self.y)
            .min(config.height - self.y);
        let attraction = (1.0 - edge_dist / (config.width / 2.0)).max(0.0) * 0.2;

        if to_center > 0.0 {
            self.dx += to_center_x / to_center * config.base_speed * attraction;
            self.dy += to_center_y / to_center * config.base_speed * attraction;
        }
    }

    fn enforce_min_speed(&mut self, config: &SimConfig, rng: &mut impl Rng) {
        let min_speed = config.min_speed();
        if self.speed() < min_speed {
            let angle = rng.random_range(0.0..TAU);
            self.dx = angle.cos() * min_speed;
            self.dy = angle.sin() * min_speed;
        }
    }
}

fn damping(rng: &mut impl Rng) -> f64 {
    0.8 + rng.random::<f64>() * 0.4
}
