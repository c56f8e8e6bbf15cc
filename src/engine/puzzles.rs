use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::world::{ActionKind, Requirement, World};

/// Mutable bookkeeping for one puzzle. The world's puzzle definitions stay
/// as loaded; only this shrinks as the player clears requirements.
#[derive(Debug, Clone)]
pub struct PuzzleProgress {
    remaining: Vec<Requirement>,
    solved: bool,
    unsatisfiable: bool,
}

impl PuzzleProgress {
    pub fn remaining(&self) -> &[Requirement] {
        &self.remaining
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.unsatisfiable
    }
}

/// A puzzle that finished on this call.
pub struct Completion {
    pub puzzle: String,
    pub unlocked: String,
    pub text: String,
}

/// Build the progress table from the loaded world, in document order.
/// A puzzle with no requirements is already solved; its target opens now.
pub fn seed_progress(world: &mut World) -> IndexMap<String, PuzzleProgress> {
    let mut progress: IndexMap<String, PuzzleProgress> = IndexMap::new();
    let mut open_now: Vec<(String, String)> = Vec::new();

    for (puzzle_name, puzzle) in &world.puzzles {
        let solved = puzzle.requirements.is_empty();
        if solved {
            open_now.push((puzzle_name.clone(), puzzle.unlocks.clone()));
        }

        progress.insert(
            puzzle_name.clone(),
            PuzzleProgress {
                remaining: puzzle.requirements.clone(),
                solved,
                unsatisfiable: false,
            },
        );
    }

    for (puzzle_name, target) in open_now {
        debug!("puzzle '{puzzle_name}' has no requirements; '{target}' starts open");
        unlock_scene(world, &target);
    }

    progress
}

/// Flip a scene's locked flag off. Returns whether anything changed;
/// unlocking an already-open or missing scene is a no-op.
pub fn unlock_scene(world: &mut World, scene_name: &str) -> bool {
    if let Some(scene) = world.scenes.get_mut(scene_name) {
        if scene.locked {
            scene.locked = false;
            debug!("scene '{scene_name}' unlocked");
            return true;
        }
    }
    false
}

/// Clear `(action, item)` from every active puzzle that lists it, one
/// occurrence per puzzle per call even when the pair is listed twice.
/// Puzzles emptied by this call unlock their targets; completions come
/// back in document order.
pub fn advance_puzzles(
    world: &mut World,
    progress: &mut IndexMap<String, PuzzleProgress>,
    action: ActionKind,
    item_name: &str,
) -> Vec<Completion> {
    let mut completions: Vec<Completion> = Vec::new();

    for (puzzle_name, state) in progress.iter_mut() {
        if state.solved || state.unsatisfiable {
            continue;
        }

        let hit = state
            .remaining
            .iter()
            .position(|req| req.action == action && req.item == item_name);

        let Some(index) = hit else {
            continue;
        };

        state.remaining.remove(index);
        debug!(
            "puzzle '{puzzle_name}': cleared '{action} {item_name}', {} requirement(s) left",
            state.remaining.len()
        );

        if state.remaining.is_empty() {
            state.solved = true;
            if let Some(puzzle) = world.puzzles.get(puzzle_name) {
                completions.push(Completion {
                    puzzle: puzzle_name.clone(),
                    unlocked: puzzle.unlocks.clone(),
                    text: puzzle.completion_text.clone(),
                });
            }
        }
    }

    for done in &completions {
        unlock_scene(world, &done.unlocked);
    }

    completions
}

/// Flag puzzles that can never finish: a requirement names an item no
/// scene contains, or the unlock target is gone. Warned once, then the
/// puzzle is skipped for the rest of the session.
pub fn mark_unsatisfiable_puzzles(
    world: &World,
    progress: &mut IndexMap<String, PuzzleProgress>,
) {
    let known_items: HashSet<&str> = world
        .scenes
        .values()
        .flat_map(|scene| scene.items.keys())
        .map(String::as_str)
        .collect();

    for (puzzle_name, state) in progress.iter_mut() {
        if state.solved || state.unsatisfiable {
            continue;
        }

        if let Some(puzzle) = world.puzzles.get(puzzle_name) {
            if !world.scenes.contains_key(&puzzle.unlocks) {
                warn!(
                    "puzzle '{puzzle_name}' unlocks missing scene '{}'; treating it as unsatisfiable",
                    puzzle.unlocks
                );
                state.unsatisfiable = true;
                continue;
            }
        }

        if let Some(req) = state
            .remaining
            .iter()
            .find(|req| !known_items.contains(req.item.as_str()))
        {
            warn!(
                "puzzle '{puzzle_name}' requires '{} {}' but no scene has that item; treating it as unsatisfiable",
                req.action, req.item
            );
            state.unsatisfiable = true;
        }
    }
}
