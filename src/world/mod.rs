mod loader;
mod model;
mod validator;

pub use loader::{StructuralError, load_world_from_file, load_world_from_str};

// Minimal, intentional surface area: re-export only what the game/engine uses.
pub use model::{
    ActionKind, Item, Puzzle, Requirement, Scene, UnknownActionKind, World, scene_image_file,
};
pub use validator::{ValidationWarning, validate_world};
