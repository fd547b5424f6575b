//! The LLM-backed [`DecisionSource`] implementation.

use async_trait::async_trait;
use tracing::debug;

use tinytown_core::npc::Npc;
use tinytown_core::types::ActionProposal;
use tinytown_core::world::World;
use tinytown_core::{DecisionError, DecisionSource};

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::prompt::{DECISION_SYSTEM, DECISION_USER, render_template};
use crate::types::LlmRequest;

/// Free-choice decider that delegates to an LLM.
pub struct LlmDecider {
    client: LlmClient,
    timeout_ms: u64,
}

impl LlmDecider {
    /// Wrap a configured client.
    #[must_use]
    pub fn new(client: LlmClient, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }

    fn build_request(npc: &Npc, world: &World, hour: u32) -> Result<LlmRequest, LlmError> {
        let catalogue = serde_json::to_string_pretty(&world.catalogue())
            .map_err(|e| LlmError::ParseError(e.to_string()))?;

        let hour_s = hour.to_string();
        let money = npc.resources.money.to_string();
        let food = npc.resources.food.to_string();
        let rest = npc.resources.rest.to_string();
        let worked = npc.hours_worked_today.to_string();
        let personality = npc.personality.to_string();
        let vars: Vec<(&str, &str)> = vec![
            ("npc_name", &npc.name),
            ("npc_id", &npc.id),
            ("personality", &personality),
            ("personality_description", npc.personality.description()),
            ("hour", &hour_s),
            ("money", &money),
            ("food", &food),
            ("rest", &rest),
            ("location", &npc.location),
            ("hours_worked", &worked),
            ("catalogue", &catalogue),
        ];

        Ok(LlmRequest::new(
            render_template(DECISION_SYSTEM, &vars),
            render_template(DECISION_USER, &vars),
        ))
    }

    /// Parse the model's reply into a proposal for `npc`.
    ///
    /// Local models often wrap JSON in prose or code fences, so the first
    /// top-level `{...}` span is extracted before deserializing. The
    /// `npc_id` is overwritten with the real id and confidence is clamped;
    /// everything else is taken at face value — validity against the
    /// catalogue is the apply step's job.
    fn parse_proposal(npc: &Npc, text: &str) -> Result<ActionProposal, LlmError> {
        let span = extract_json_object(text)
            .ok_or_else(|| LlmError::ParseError(format!("no JSON object in reply: '{text}'")))?;
        let parsed: ActionProposal = serde_json::from_str(span)
            .map_err(|e| LlmError::ParseError(format!("{e} — raw span: '{span}'")))?;
        Ok(ActionProposal {
            npc_id: npc.id.clone(),
            confidence: parsed.confidence.clamp(0.0, 1.0),
            ..parsed
        })
    }
}

#[async_trait]
impl DecisionSource for LlmDecider {
    async fn propose(
        &self,
        npc: &Npc,
        world: &World,
        hour: u32,
    ) -> Result<ActionProposal, DecisionError> {
        let request = Self::build_request(npc, world, hour)?.with_timeout(self.timeout_ms);

        let response = self.client.generate(&request).await?;
        debug!(
            npc = %npc.name,
            model = %response.model,
            latency_ms = response.latency_ms,
            "LLM replied"
        );

        Ok(Self::parse_proposal(npc, &response.text)?)
    }
}

/// Extract the first top-level `{...}` span from free text.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                '\\' if !escaped => escaped = true,
                '"' if !escaped => in_string = false,
                _ => escaped = false,
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }
    None
}
