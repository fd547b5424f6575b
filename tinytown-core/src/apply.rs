//! Effect application — the single mutation path for NPC state.
//!
//! Resolution failures are non-fatal by contract: an unknown place or
//! action leaves the NPC untouched (location included) and the hour is
//! simply wasted. Metabolism has already been paid by the loop.

use tracing::{info, warn};

use crate::npc::Npc;
use crate::types::ActionProposal;
use crate::world::World;

/// Action names that accumulate into `hours_worked_today`.
pub const WORK_ACTIONS: [&str; 2] = ["fulltime", "parttime"];

/// Result of attempting to apply a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The action executed; the canonical catalogue name is carried.
    Applied {
        /// Catalogue name of the executed action.
        action: String,
    },
    /// The target place is not in the world. No state changed.
    UnknownPlace {
        /// The unresolvable place name as proposed.
        place: String,
    },
    /// The place exists but offers no such action. No state changed.
    UnknownAction {
        /// The place that was resolved.
        place: String,
        /// The unresolvable action name as proposed.
        action: String,
    },
}

impl ApplyOutcome {
    /// Whether the proposal actually executed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Execute a proposal against an NPC.
///
/// On success: applies every effect delta with the uniform [0, 200] clamp,
/// moves the NPC to the place, accumulates worked hours for the two work
/// variants, and appends a history token. On resolution failure: logs at
/// warn and changes nothing.
pub fn apply_action(npc: &mut Npc, proposal: &ActionProposal, world: &World) -> ApplyOutcome {
    let Some(place) = world.place(&proposal.place) else {
        warn!(npc = %npc.name, place = %proposal.place, "unknown place, action dropped");
        return ApplyOutcome::UnknownPlace {
            place: proposal.place.clone(),
        };
    };

    let Some(action) = place.find_action(&proposal.action) else {
        warn!(
            npc = %npc.name,
            place = %place.name,
            action = %proposal.action,
            "action not offered here, dropped"
        );
        return ApplyOutcome::UnknownAction {
            place: place.name.clone(),
            action: proposal.action.clone(),
        };
    };

    npc.resources.apply(&action.effects);
    npc.location = place.name.clone();

    if WORK_ACTIONS.contains(&action.name.as_str()) {
        npc.hours_worked_today += action.duration;
    }

    npc.record_action(&action.name);

    info!(
        npc = %npc.name,
        action = %action.name,
        place = %place.name,
        resources = %npc.resources,
        "applied"
    );

    ApplyOutcome::Applied {
        action: action.name.clone(),
    }
}
