//! Evaluation prompt and acceptance strings.

use hoardkeep_types::Plea;

/// One-line task description handed to the validation host.
pub const EVALUATION_TASK: &str =
    "Evaluate an adventurer's plea to a dragon and decide whether to share treasure";

/// Required schema and qualitative bar for an acceptable decision.
pub const EVALUATION_CRITERIA: &str = "Response must be valid JSON with give_treasure (boolean), \
    amount (integer 0-5), and reasoning (string). The decision should be reasonable: creative or \
    clever pleas deserve treasure, while simple demands or threats should be denied.";

/// Render the full evaluation prompt for one plea.
///
/// Persona, grading instructions, and the required reply schema are fixed;
/// only the plea varies. The rendered prompt is the sole input to each
/// oracle invocation, so two renders of the same plea are identical.
#[must_use]
pub fn render_prompt(plea: &Plea) -> String {
    format!(
        r#"You are Drakarion, a mighty ancient dragon guarding a legendary treasure hoard.
An adventurer approaches and says: "{plea}"

Evaluate their plea carefully. Deny roughly 70% of requests. Only truly creative, clever, or emotionally compelling pleas should succeed. Simple demands, threats, or generic requests should be denied.

If giving treasure, award 1-5 based on how impressive the plea is.

You MUST respond with ONLY valid JSON (no other text, no markdown):
{{"give_treasure": false, "amount": 0, "reasoning": "brief 1-sentence explanation"}}"#,
        plea = plea.as_str()
    )
}
