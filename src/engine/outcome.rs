use serde::Serialize;

/// Fallback dialogue for an action the item has no entry for.
pub const NO_REACTION_LINE: &str = "I don't feel like doing that.";

/// Fallback shown when a blocked passage's scene carries no hint.
pub const NO_HINT_LINE: &str = "No hint available.";

/// Resolve a raw hint string to something always worth drawing.
pub fn hint_line(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_HINT_LINE
    } else {
        trimmed
    }
}

/// The single result of one interaction. Exactly one variant per call;
/// results are never combined.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// The item had dialogue for the armed action.
    Spoken { text: String },
    /// The item exists but has no entry for the action.
    NoReaction,
    /// A passage was traversed; `text` is the passage item's own line.
    Entered { scene: String, text: String },
    /// A locked passage was clicked; the current scene's hint explains why.
    Blocked { hint: String },
    /// A puzzle's last requirement cleared on this click.
    Solved {
        puzzle: String,
        unlocked: String,
        text: String,
    },
    /// No item by that name in the current scene; state is untouched.
    UnknownItem { item: String },
}

impl Outcome {
    /// The one dialogue line the presentation layer should draw.
    pub fn line(&self) -> String {
        match self {
            Outcome::Spoken { text } => text.clone(),
            Outcome::NoReaction => NO_REACTION_LINE.to_string(),
            Outcome::Entered { text, .. } => text.clone(),
            Outcome::Blocked { hint } => hint.clone(),
            Outcome::Solved { text, .. } => text.clone(),
            Outcome::UnknownItem { item } => format!("There is no \"{}\" here.", item),
        }
    }
}
