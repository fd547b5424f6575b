//! # Tinytown Core
//!
//! Deterministic engine for a small-town NPC day simulation.
//!
//! Every simulated hour each NPC pays a fixed metabolism cost, then picks
//! one action from a static catalogue of places. Action selection is
//! hybrid:
//!
//! - **Survival gate** — hard resource floors that force `eating`, `sleep`
//!   or `parttime` work, checked in strict priority order.
//! - **Free choice** — delegated through the [`DecisionSource`] trait to an
//!   external reasoning collaborator (an LLM in `tinytown-llm`), with a
//!   uniform-random fallback when that collaborator fails.
//!
//! Nothing in this crate talks to the network. The entire engine is
//! testable with a scripted [`DecisionSource`].

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod apply;
pub mod config;
pub mod error;
pub mod npc;
pub mod rules;
pub mod sim;
pub mod stats;
pub mod types;
pub mod world;

pub use config::SimConfig;
pub use error::{CoreError, DecisionError};
pub use npc::Npc;
pub use sim::{DecisionSource, Simulation};
pub use types::{ActionProposal, Effects, Personality, Resources};
pub use world::World;
