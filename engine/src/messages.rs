//! Outward-facing message strings.

pub(crate) const EMPTY_HOARD: &str = "The dragon's treasure hoard is empty!";
pub(crate) const EMPTY_HOARD_REASONING: &str = "No treasure remains to claim.";

pub(crate) const CONFUSED: &str = "Drakarion is confused by the magical energies!";
pub(crate) const CONFUSED_REASONING: &str = "Something went wrong with the dragon's response.";

pub(crate) const DENIED: &str = "Drakarion denies your request!";

pub(crate) const INVALID_PLEA_REASONING: &str = "The dragon will not entertain such a plea.";

pub(crate) fn granted(amount: u64) -> String {
    format!("Drakarion grants you {amount} treasure!")
}
