use log::{debug, info, trace};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::agent::{Agent, AgentType};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::render::{Canvas, LABEL_COLOR, LABEL_FONT_SIZE};
use crate::simulation_stats::{SimulationStats, census};

/// Offset from circle center to label baseline.
const LABEL_BASELINE_OFFSET: f64 = 4.0;

const KEY_HELP: &str = "1/2/3 add rock/scissors/paper";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    pub conversions: usize,
    /// Per-type population after the tick, indexed by [`AgentType::index`].
    pub population: [usize; 3],
}

/// One independent arena: the population, the run flag and the random source.
pub struct Simulation {
    config: SimConfig,
    agents: Vec<Agent>,
    running: bool,
    rng: SmallRng,
    seed: u64,
    stats: SimulationStats,
    takeover_reported: bool,
}

impl Simulation {
    /// Seeds from `config.seed`, or from the thread generator when unset.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self::with_seed(config, seed)
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!("simulation seeded with {seed}");
        Ok(Simulation {
            config,
            agents: Vec::new(),
            running: false,
            rng: SmallRng::seed_from_u64(seed),
            seed,
            stats: SimulationStats::default(),
            takeover_reported: false,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    /// Begin a run with `initial_count` random agents. Ignored while running.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let agents = (0..self.config.initial_count)
            .map(|_| {
                let kind = AgentType::random(&mut self.rng);
                Agent::spawn(kind, &self.config, &mut self.rng)
            })
            .collect();
        self.begin(agents);
    }

    /// Begin a run with a caller-chosen population. Ignored while running.
    pub fn start_with(&mut self, agents: Vec<Agent>) {
        if self.running {
            return;
        }
        self.begin(agents);
    }

    fn begin(&mut self, agents: Vec<Agent>) {
        self.agents = agents;
        self.running = true;
        self.stats = SimulationStats::default();
        self.takeover_reported = false;
        let [rock, scissors, paper] = census(&self.agents);
        info!(
            "run started with {} agents (rock {rock}, scissors {scissors}, paper {paper})",
            self.agents.len()
        );
    }

    /// Append one agent at a random spot. Allowed whether or not a run is active.
    pub fn add_agent(&mut self, kind: AgentType) {
        let agent = Agent::spawn(kind, &self.config, &mut self.rng);
        debug!("added {kind} at ({:.1}, {:.1})", agent.x, agent.y);
        self.agents.push(agent);
        info!("population now {}", self.agents.len());
    }

    /// Update then render one frame. Does nothing until [`Simulation::start`].
    pub fn tick(&mut self, canvas: &mut impl Canvas) -> TickSummary {
        if !self.running {
            return TickSummary::default();
        }
        let summary = self.step();
        self.render(canvas);
        summary
    }

    /// The update half of a frame.
    pub fn step(&mut self) -> TickSummary {
        if !self.running {
            return TickSummary::default();
        }

        // Every agent steers against where the others were before this frame.
        let snapshot = self.agents.clone();
        let seeds: Vec<u64> = (0..self.agents.len()).map(|_| self.rng.random()).collect();
        let config = &self.config;
        self.agents
            .par_iter_mut()
            .zip(seeds)
            .enumerate()
            .for_each(|(idx, (agent, seed))| {
                let mut rng = SmallRng::seed_from_u64(seed);
                agent.advance(idx, &snapshot, config, &mut rng);
            });

        let conversions = self.resolve_collisions();
        self.stats.record_frame(&self.agents);
        self.check_takeover();

        let population = census(&self.agents);
        trace!(
            "frame {}: {conversions} conversions, population {population:?}",
            self.stats.frames
        );
        TickSummary {
            conversions,
            population,
        }
    }

    /// Touching pairs: the loser takes the winner's type. Pairs are visited in
    /// index order, so one frame may chain conversions.
    pub fn resolve_collisions(&mut self) -> usize {
        let diameter_sq = self.config.diameter * self.config.diameter;
        let mut conversions = 0;
        for i in 0..self.agents.len() {
            for j in (i + 1)..self.agents.len() {
                let (a, b) = (&self.agents[i], &self.agents[j]);
                if a.distance_squared(b) >= diameter_sq {
                    continue;
                }
                let (winner, loser) = if a.can_kill(b) {
                    (a.kind, j)
                } else if b.can_kill(a) {
                    (b.kind, i)
                } else {
                    continue;
                };
                self.agents[loser].kind = winner;
                self.stats.record_conversion(winner);
                conversions += 1;
            }
        }
        conversions
    }

    fn check_takeover(&mut self) {
        let Some(first) = self.agents.first().map(|a| a.kind) else {
            return;
        };
        let uniform = self.agents.iter().all(|a| a.kind == first);
        if uniform && !self.takeover_reported {
            info!(
                "{first} has taken over all {} agents after {} frames",
                self.agents.len(),
                self.stats.frames
            );
        }
        self.takeover_reported = uniform;
    }

    /// The render half of a frame.
    pub fn render(&self, canvas: &mut impl Canvas) {
        canvas.clear_rect([0.0, 0.0, self.config.width, self.config.height]);
        let radius = self.config.diameter / 2.0;
        for agent in &self.agents {
            let [cx, cy] = agent.center(&self.config);
            canvas.fill_circle([cx, cy], radius, agent.kind.color());
            canvas.fill_text_centered(
                agent.kind.label(),
                [cx, cy + LABEL_BASELINE_OFFSET],
                LABEL_FONT_SIZE,
                LABEL_COLOR,
            );
        }
    }

    /// One-line summary for the stats bar.
    pub fn status_line(&self) -> String {
        if !self.running {
            return format!(
                "Press S to start ({} agents) | {KEY_HELP}",
                self.config.initial_count
            );
        }
        let [rock, scissors, paper] = census(&self.agents);
        let [by_rock, by_scissors, by_paper] = self.stats.conversions_by_winner;
        format!(
            "R {rock} | S {scissors} | P {paper} | Conversions {} (R{by_rock} S{by_scissors} P{by_paper}) | Frame {} | {KEY_HELP}",
            self.stats.total_conversions, self.stats.frames
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::recording::{DrawCall, RecordingCanvas};

    fn sim() -> Simulation {
        Simulation::with_seed(SimConfig::default(), 42).unwrap()
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let mut sim = sim();
        sim.start();
        let first = sim.agents().to_vec();
        sim.start();
        assert_eq!(sim.agents(), first.as_slice());
        assert_eq!(sim.agents().len(), 15);
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut sim = sim();
        sim.add_agent(AgentType::Paper);
        let before = sim.agents().to_vec();
        let mut canvas = RecordingCanvas::default();
        assert_eq!(sim.tick(&mut canvas), TickSummary::default());
        assert!(canvas.calls.is_empty());
        assert_eq!(sim.agents(), before.as_slice());
    }

    #[test]
    fn start_discards_agents_added_before() {
        let mut sim = sim();
        sim.add_agent(AgentType::Rock);
        sim.add_agent(AgentType::Rock);
        sim.start();
        assert_eq!(sim.agents().len(), 15);
    }

    #[test]
    fn collision_converts_loser_only() {
        let mut sim = sim();
        sim.start_with(vec![
            Agent::new(100.0, 100.0, AgentType::Scissors),
            Agent::new(110.0, 100.0, AgentType::Paper),
            Agent::new(400.0, 400.0, AgentType::Rock),
        ]);
        assert_eq!(sim.resolve_collisions(), 1);
        let kinds: Vec<_> = sim.agents().iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [AgentType::Scissors, AgentType::Scissors, AgentType::Rock]
        );
        assert_eq!(sim.stats().conversions_by_winner, [0, 1, 0]);
    }

    #[test]
    fn distant_or_same_type_pairs_do_not_convert() {
        let mut sim = sim();
        sim.start_with(vec![
            Agent::new(100.0, 100.0, AgentType::Rock),
            Agent::new(120.0, 100.0, AgentType::Scissors),
            Agent::new(300.0, 300.0, AgentType::Paper),
            Agent::new(305.0, 300.0, AgentType::Paper),
        ]);
        assert_eq!(sim.resolve_collisions(), 0);
    }

    #[test]
    fn render_draws_circle_and_label_per_agent() {
        let mut sim = sim();
        sim.start_with(vec![Agent::new(10.0, 20.0, AgentType::Rock)]);
        let mut canvas = RecordingCanvas::default();
        sim.render(&mut canvas);
        assert_eq!(
            canvas.calls,
            vec![
                DrawCall::Clear([0.0, 0.0, 800.0, 600.0]),
                DrawCall::Circle {
                    center: [20.0, 30.0],
                    radius: 10.0,
                    color: AgentType::Rock.color(),
                },
                DrawCall::Text {
                    text: "Rock".to_string(),
                    at: [20.0, 34.0],
                },
            ]
        );
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = sim();
        let mut b = sim();
        a.start();
        b.start();
        for _ in 0..50 {
            a.step();
            b.step();
        }
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn stats_follow_the_run() {
        let mut sim = sim();
        sim.start();
        for _ in 0..10 {
            sim.step();
        }
        assert_eq!(sim.stats().frames, 10);
        assert_eq!(sim.stats().population_history.len(), 10);
        let line = sim.status_line();
        assert!(line.contains("Frame 10"), "{line}");
        assert!(line.contains(KEY_HELP), "{line}");
    }

    #[test]
    fn status_line_credits_conversions_to_winner() {
        let mut sim = sim();
        assert!(sim.status_line().contains(KEY_HELP));
        sim.start_with(vec![
            Agent::new(100.0, 100.0, AgentType::Paper),
            Agent::new(105.0, 100.0, AgentType::Rock),
        ]);
        sim.resolve_collisions();
        let line = sim.status_line();
        assert!(line.starts_with("R 0 | S 0 | P 2 |"), "{line}");
        assert!(line.contains("Conversions 1 (R0 S0 P1)"), "{line}");
        assert!(line.contains(KEY_HELP), "{line}");
    }
}
