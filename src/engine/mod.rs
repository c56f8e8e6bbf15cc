mod interact;
mod outcome;
mod puzzles;
mod snapshot;

pub use interact::apply_interaction;

pub use outcome::{NO_HINT_LINE, NO_REACTION_LINE, Outcome, hint_line};

pub use puzzles::{PuzzleProgress, seed_progress, unlock_scene};

pub use snapshot::{ItemMatch, ItemView, PassageView, SceneSnapshot, find_item, scene_snapshot};

pub(crate) use puzzles::mark_unsatisfiable_puzzles;
