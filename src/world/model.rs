use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//////////////////////////////
/// GAME STRUCTS AND ENUMS ///
//////////////////////////////

/// Scene names containing this marker (case-insensitive) are start-scene
/// candidates; the first one in document order wins.
pub const START_SCENE_MARKER: &str = "START";

/// Naming convention for the externally generated scene backdrop.
pub const SCENE_IMAGE_PREFIX: &str = "scene_";
pub const SCENE_IMAGE_EXT: &str = "jpeg";

/// File name of the backdrop image for a scene, e.g. `scene_START_lounge.jpeg`.
/// The engine only computes the name; the presentation layer resolves it.
pub fn scene_image_file(scene_name: &str) -> String {
    format!("{}{}.{}", SCENE_IMAGE_PREFIX, scene_name, SCENE_IMAGE_EXT)
}

/// The four verbs a player can arm and apply to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Talk,
    Use,
    Look,
    #[serde(rename = "pick up")]
    PickUp,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Talk,
        ActionKind::Use,
        ActionKind::Look,
        ActionKind::PickUp,
    ];

    /// Wire/display form, matching the keys of an item's interaction map.
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Talk => "talk",
            ActionKind::Use => "use",
            ActionKind::Look => "look",
            ActionKind::PickUp => "pick up",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown action '{0}' (expected talk, use, look, or pick up)")]
pub struct UnknownActionKind(pub String);

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "talk" => Ok(ActionKind::Talk),
            "use" => Ok(ActionKind::Use),
            "look" => Ok(ActionKind::Look),
            // "pick up" is two words; tolerate the common contractions
            "pick up" | "pickup" | "pick" => Ok(ActionKind::PickUp),
            other => Err(UnknownActionKind(other.to_string())),
        }
    }
}

/// One (action, item) pair a puzzle wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub action: ActionKind,
    pub item: String,
}

/// An interactable object inside exactly one scene.
#[derive(Debug)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub interactions: IndexMap<ActionKind, String>,
    /// Target scene for passage items; `None` means not a passage.
    pub leads_to: Option<String>,
    /// Normalized position inside the backdrop, both axes in [0, 1].
    pub coordinates: (f64, f64),
}

/// One explorable location. Everything but `locked` is fixed after load.
#[derive(Debug)]
pub struct Scene {
    pub name: String,
    pub description: String,
    pub items: IndexMap<String, Item>,
    pub locked: bool,
    pub hint: String,
}

/// A named unlock condition: clear every requirement and `unlocks` opens.
#[derive(Debug)]
pub struct Puzzle {
    pub name: String,
    /// Free-form category from the description ("dialog", "item_usage", ...).
    pub kind: String,
    pub hint: String,
    pub completion_text: String,
    pub requirements: Vec<Requirement>,
    /// Scene whose locked flag flips once the requirements are cleared.
    pub unlocks: String,
}

/// Runtime world type used by the game session. Scene and puzzle maps keep
/// the document order of the description; start-scene fallback and
/// completion-text selection are defined in terms of that order.
#[derive(Debug)]
pub struct World {
    pub scenes: IndexMap<String, Scene>,
    pub puzzles: IndexMap<String, Puzzle>,
    pub start_scene: String,
}
