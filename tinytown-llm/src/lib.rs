//! # tinytown-llm — the free-choice layer
//!
//! Implements the core's [`DecisionSource`](tinytown_core::DecisionSource)
//! capability with a real reasoning collaborator:
//!
//! - **Ollama** (local, recommended default)
//! - **OpenAI-compatible API** (also works with Together, etc.)
//! - **None** — every call fails, so the core's random fallback carries
//!   the whole day (fully offline runs)
//!
//! The contract with the core is narrow: NPC state + world catalogue in,
//! one structured action proposal (or a failure signal) out. The core
//! never retries; HTTP-level retries live here, bounded by config.

pub mod client;
pub mod decider;
pub mod error;
pub mod prompt;
pub mod types;

pub use client::{LlmClient, LlmProvider};
pub use decider::LlmDecider;
pub use error::LlmError;
pub use types::{LlmRequest, LlmResponse};
