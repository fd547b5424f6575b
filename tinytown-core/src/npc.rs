//! The simulated character: owned resource state plus a day's bookkeeping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MetabolismConfig;
use crate::types::{Effects, Personality, Resources};

/// A simulated character.
///
/// All state is owned exclusively by the NPC and mutated only during its
/// own turn; NPCs never share or contend for anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    /// Stable identifier ("npc1").
    pub id: String,
    /// Display name.
    pub name: String,
    /// The three clamped resource counters.
    pub resources: Resources,
    /// Display name of the current place.
    pub location: String,
    /// Hour of the day currently being simulated.
    pub current_hour: u32,
    /// Hours spent on `fulltime`/`parttime` today. Reset at hour 0.
    pub hours_worked_today: u32,
    /// Append-only history of `H{hour}:{action}` tokens.
    pub action_history: Vec<String>,
    /// Personality tag (prompt flavor only).
    pub personality: Personality,
}

impl Npc {
    /// Create an NPC at Home with the default 50/50/50 resources.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, personality: Personality) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            resources: Resources::default(),
            location: "Home".to_string(),
            current_hour: 0,
            hours_worked_today: 0,
            action_history: Vec::new(),
            personality,
        }
    }

    /// Override the starting resources.
    #[must_use]
    pub fn with_resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    /// Apply one hour of passive decay: food and rest drop, floored at 0
    /// by the uniform clamp. Runs before any decision is made.
    pub fn metabolize(&mut self, metabolism: &MetabolismConfig) {
        let before = self.resources;
        self.resources.apply(&Effects {
            food: -metabolism.food_decay,
            rest: -metabolism.rest_decay,
            money: 0,
        });
        debug!(
            npc = %self.name,
            "metabolism: food {}->{} rest {}->{}",
            before.food, self.resources.food, before.rest, self.resources.rest
        );
    }

    /// Append a compact history token for an executed action.
    pub fn record_action(&mut self, action_name: &str) {
        self.action_history
            .push(format!("H{}:{}", self.current_hour, action_name));
    }

    /// The last `n` history tokens joined as a path string.
    #[must_use]
    pub fn recent_path(&self, n: usize) -> String {
        let start = self.action_history.len().saturating_sub(n);
        self.action_history[start..].join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metabolism_floors_at_zero() {
        let mut npc = Npc::new("npc1", "Max", Personality::Workaholic)
            .with_resources(Resources::new(50, 3, 2));
        npc.metabolize(&MetabolismConfig::default());
        assert_eq!(npc.resources.food, 0);
        assert_eq!(npc.resources.rest, 0);
        assert_eq!(npc.resources.money, 50);
    }

    #[test]
    fn metabolism_decays_by_configured_amount() {
        let mut npc = Npc::new("npc1", "Max", Personality::Workaholic);
        npc.metabolize(&MetabolismConfig {
            food_decay: 7,
            rest_decay: 3,
        });
        assert_eq!(npc.resources.food, 43);
        assert_eq!(npc.resources.rest, 47);
    }

    #[test]
    fn history_tokens_carry_the_hour() {
        let mut npc = Npc::new("npc1", "Max", Personality::Workaholic);
        npc.current_hour = 7;
        npc.record_action("sleep");
        assert_eq!(npc.action_history, vec!["H7:sleep"]);
    }

    #[test]
    fn recent_path_takes_the_tail() {
        let mut npc = Npc::new("npc1", "Max", Personality::Workaholic);
        for hour in 0..5 {
            npc.current_hour = hour;
            npc.record_action("walk");
        }
        assert_eq!(npc.recent_path(2), "H3:walk -> H4:walk");
        assert_eq!(npc.recent_path(100).matches("walk").count(), 5);
    }
}
