//! The day loop and the free-choice capability boundary.
//!
//! One implicit state per simulated hour, 0..=23, terminal after the last.
//! NPCs are processed strictly in list order; each decision completes
//! before the loop advances. A decision failure never halts the run — it
//! degrades to a uniformly-random fallback action.

use async_trait::async_trait;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::apply::apply_action;
use crate::config::SimConfig;
use crate::error::DecisionError;
use crate::npc::Npc;
use crate::rules::survival_rule;
use crate::stats::{DayReport, is_distressed};
use crate::types::ActionProposal;
use crate::world::World;

/// Confidence attached to the random fallback action.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// The fixed action pool drawn from when free choice fails.
pub const FALLBACK_ACTIONS: [&str; 4] = ["sleep", "eating", "relax", "walk"];

/// The free-choice collaborator: propose an action for an NPC given the
/// world catalogue.
///
/// This is the only non-deterministic input to the engine. The LLM-backed
/// implementation lives in `tinytown-llm`; tests use scripted fakes. The
/// core never retries a failed call.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    /// Propose an action, or fail and let the loop fall back.
    async fn propose(
        &self,
        npc: &Npc,
        world: &World,
        hour: u32,
    ) -> Result<ActionProposal, DecisionError>;
}

/// Draw the uniform-random substitute used when delegation fails.
///
/// Placement rule: Home for sleep and relax, Park otherwise. An `eating`
/// draw therefore targets the Park, where it is not offered, and the hour
/// is wasted at apply time — a dazed NPC wandering to the wrong place.
#[must_use]
pub fn fallback_proposal<R: Rng + ?Sized>(npc_id: &str, rng: &mut R) -> ActionProposal {
    let action = FALLBACK_ACTIONS
        .choose(rng)
        .copied()
        .unwrap_or("sleep");
    let place = if matches!(action, "sleep" | "relax") {
        "Home"
    } else {
        "Park"
    };
    ActionProposal::new(npc_id, action, place, "random fallback", FALLBACK_CONFIDENCE)
}

/// A single-day simulation over a fixed NPC roster.
pub struct Simulation<D> {
    world: World,
    config: SimConfig,
    decider: D,
    npcs: Vec<Npc>,
}

impl<D: DecisionSource> Simulation<D> {
    /// Build a simulation.
    #[must_use]
    pub fn new(world: World, config: SimConfig, decider: D, npcs: Vec<Npc>) -> Self {
        Self {
            world,
            config,
            decider,
            npcs,
        }
    }

    /// The current roster.
    #[must_use]
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Run one full day and return the per-NPC summaries.
    ///
    /// Per hour: reset worked-hours at hour 0, apply metabolism to every
    /// NPC, then decide and apply per NPC in list order. Interim vitals
    /// are logged every `report_interval` hours.
    pub async fn run_day(&mut self) -> Vec<DayReport> {
        info!("day starting: {} NPCs", self.npcs.len());

        for hour in 0..self.config.schedule.hours_per_day {
            info!(hour, "=== hour {hour} ===");

            if hour == 0 {
                for npc in &mut self.npcs {
                    npc.hours_worked_today = 0;
                    info!(npc = %npc.name, personality = %npc.personality, "new day");
                }
            }

            for npc in &mut self.npcs {
                npc.metabolize(&self.config.metabolism);
            }

            for i in 0..self.npcs.len() {
                self.npcs[i].current_hour = hour;
                let proposal = self.decide(i, hour).await;
                apply_action(&mut self.npcs[i], &proposal, &self.world);
            }

            let interval = self.config.schedule.report_interval;
            if interval > 0 && hour % interval == interval - 1 {
                self.log_interim(hour);
            }
        }

        let reports: Vec<DayReport> = self.npcs.iter().map(DayReport::for_npc).collect();
        info!("day complete");
        reports
    }

    /// Hybrid decision for one NPC: survival gate first, then delegation,
    /// then the random fallback.
    async fn decide(&self, index: usize, hour: u32) -> ActionProposal {
        let npc = &self.npcs[index];

        if let Some(forced) = survival_rule(npc, &self.config.thresholds) {
            info!(npc = %npc.name, action = %forced.action, reason = %forced.reason, "[forced]");
            return forced;
        }

        match self.decider.propose(npc, &self.world, hour).await {
            Ok(proposal) => {
                info!(
                    npc = %npc.name,
                    action = %proposal.action,
                    confidence = proposal.confidence,
                    reason = %proposal.reason,
                    "[free choice]"
                );
                proposal
            }
            Err(e) => {
                warn!(npc = %npc.name, error = %e, "free choice failed, random action");
                fallback_proposal(&npc.id, &mut rand::thread_rng())
            }
        }
    }

    fn log_interim(&self, hour: u32) {
        info!(hour, "--- interim vitals ---");
        for npc in &self.npcs {
            info!(
                npc = %npc.name,
                resources = %npc.resources,
                worked = npc.hours_worked_today,
                distressed = is_distressed(&npc.resources),
                "vitals"
            );
        }
    }
}
