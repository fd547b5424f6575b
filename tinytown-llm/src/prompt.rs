//! Prompt template for the free-choice decision task.
//!
//! The prompt hands the collaborator the NPC's numeric state, its
//! personality, and the full static catalogue, and asks for one JSON
//! action proposal. `{key}` placeholders are filled by
//! [`render_template`].

/// System prompt: who the NPC is and how much latitude it has.
pub const DECISION_SYSTEM: &str = r"You are {npc_name} (personality: {personality}).
Your character: {personality_description}.
Within the safe range (food and rest comfortably above the survival floors),
you freely choose how to spend the hour. You can work for money, eat, sleep,
relax, or browse around town.
Your response must be a single valid JSON object and nothing else.";

/// User prompt: current state, the personality legend, the catalogue, and
/// the required response shape.
pub const DECISION_USER: &str = r#"# Hour {hour}: {npc_name}'s free time

## Current status (safe range)
- Money: {money}
- Food: {food}
- Rest: {rest}
- Location: {location}
- Worked today: {hours_worked}h

## Your personality: {personality}
- workaholic: prioritize work and earning money
- lazy: prioritize rest and relaxation
- foodie: eat food frequently
- balanced: balance all activities

## Available actions (free choice)
{catalogue}

## Decision
Based on your personality and current status, choose an action you want to
do. You don't always have to work; you can walk in the park, relax at home,
chat at the factory, or browse the store.

Return JSON:
{"npc_id": "{npc_id}", "action": "walk", "place": "Park", "duration": 1, "reason": "why you chose this, in under 30 words", "confidence": 0.85}"#;

/// Simple template interpolation: replaces `{key}` with the value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_rendering_works() {
        let rendered = render_template(
            "Hello {name}, you are {personality}.",
            &[("name", "Max"), ("personality", "workaholic")],
        );
        assert_eq!(rendered, "Hello Max, you are workaholic.");
    }

    #[test]
    fn template_leaves_unknown_keys_alone() {
        let rendered = render_template("Hello {name}, {unknown}.", &[("name", "Max")]);
        assert_eq!(rendered, "Hello Max, {unknown}.");
    }

    #[test]
    fn decision_prompt_interpolates_state() {
        let user = render_template(
            DECISION_USER,
            &[
                ("hour", "9"),
                ("npc_name", "Alice"),
                ("npc_id", "npc2"),
                ("personality", "lazy"),
                ("money", "50"),
                ("food", "40"),
                ("rest", "60"),
                ("location", "Home"),
                ("hours_worked", "0"),
                ("catalogue", "[]"),
            ],
        );
        assert!(user.contains("Hour 9: Alice's free time"));
        assert!(user.contains("\"npc_id\": \"npc2\""));
        assert!(!user.contains("{money}"));
    }
}
