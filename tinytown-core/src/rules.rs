//! The survival gate — hard resource floors that pre-empt free choice.
//!
//! Checked in strict priority order: starvation pre-empts exhaustion,
//! which pre-empts bankruptcy. The three conditions are independent
//! comparisons; when more than one holds, the first listed wins.

use crate::config::RuleThresholds;
use crate::npc::Npc;
use crate::types::ActionProposal;

/// Evaluate the survival thresholds against an NPC snapshot.
///
/// Returns the forced action with confidence 1.0 and a diagnostic reason,
/// or `None` when all floors hold and the caller should delegate to free
/// choice.
#[must_use]
pub fn survival_rule(npc: &Npc, thresholds: &RuleThresholds) -> Option<ActionProposal> {
    if npc.resources.food < thresholds.food {
        return Some(ActionProposal::new(
            &npc.id,
            "eating",
            "Food Store",
            format!(
                "survival baseline: food={} < {}, forced eating",
                npc.resources.food, thresholds.food
            ),
            1.0,
        ));
    }

    if npc.resources.rest < thresholds.rest {
        return Some(ActionProposal::new(
            &npc.id,
            "sleep",
            "Home",
            format!(
                "survival baseline: rest={} < {}, forced sleep",
                npc.resources.rest, thresholds.rest
            ),
            1.0,
        ));
    }

    if npc.resources.money < thresholds.money {
        return Some(ActionProposal::new(
            &npc.id,
            "parttime",
            "Food Store",
            format!(
                "bankruptcy protection: money={} < {}, emergency work",
                npc.resources.money, thresholds.money
            ),
            1.0,
        ));
    }

    None
}
