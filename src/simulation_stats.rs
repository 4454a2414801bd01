use crate::agent::{Agent, AgentType};

const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Default, Clone)]
pub struct SimulationStats {
    pub frames: u64,
    pub total_conversions: usize,
    /// Conversions credited to the winning type, indexed by [`AgentType::index`].
    pub conversions_by_winner: [usize; 3],
    /// Per-type population after each frame, oldest first.
    pub population_history: Vec<[usize; 3]>,
}

impl SimulationStats {
    pub fn record_conversion(&mut self, winner: AgentType) {
        self.total_conversions += 1;
        self.conversions_by_winner[winner.index()] += 1;
    }

    pub fn record_frame(&mut self, agents: &[Agent]) {
        self.frames += 1;
        self.population_history.push(census(agents));
        if self.population_history.len() > HISTORY_LIMIT {
            self.population_history.remove(0);
        }
    }
}

/// Number of agents of each type, indexed by [`AgentType::index`].
pub fn census(agents: &[Agent]) -> [usize; 3] {
    let mut counts = [0; 3];
    for agent in agents {
        counts[agent.kind.index()] += 1;
    }
    counts
}
