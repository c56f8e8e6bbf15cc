use indexmap::IndexMap;
use log::warn;

use crate::world::{ActionKind, World};

use super::outcome::{NO_REACTION_LINE, Outcome, hint_line};
use super::puzzles::{PuzzleProgress, advance_puzzles};

/// Apply one click: `action` armed, `item_name` clicked. The sole mutating
/// entry point; everything else about the engine is a query.
///
/// Resolution order, exactly one outcome per call:
/// 1. the item must exist in the current scene, else a no-op report;
/// 2. the item's dialogue for the action, else the fixed fallback;
/// 3. a passage item tries to traverse: open target wins outright and
///    skips puzzle checks, a locked target keeps the player here and
///    answers with the scene's hint;
/// 4. otherwise requirements clear, and a finished puzzle's completion
///    text beats whatever step 2 produced.
pub fn apply_interaction(
    world: &mut World,
    current_scene: &mut String,
    progress: &mut IndexMap<String, PuzzleProgress>,
    action: ActionKind,
    item_name: &str,
) -> Outcome {
    let Some(scene) = world.scenes.get(current_scene.as_str()) else {
        warn!("current scene '{current_scene}' is missing from the world");
        return Outcome::UnknownItem {
            item: item_name.to_string(),
        };
    };

    let Some(item) = scene.items.get(item_name) else {
        return Outcome::UnknownItem {
            item: item_name.to_string(),
        };
    };

    let spoken: Option<String> = item.interactions.get(&action).cloned();
    let passage: Option<String> = item.leads_to.clone();
    let scene_hint: String = scene.hint.clone();

    if let Some(target) = passage {
        // Copy the lock state out so the world can be mutated below.
        let target_locked: Option<bool> = world.scenes.get(&target).map(|s| s.locked);

        match target_locked {
            Some(false) => {
                *current_scene = target.clone();
                return Outcome::Entered {
                    scene: target,
                    text: spoken.unwrap_or_else(|| NO_REACTION_LINE.to_string()),
                };
            }
            Some(true) => {
                // No transition, but the click still counts toward puzzles;
                // the passage item itself may be a requirement.
                let completions = advance_puzzles(world, progress, action, item_name);
                if let Some(done) = completions.into_iter().next() {
                    return Outcome::Solved {
                        puzzle: done.puzzle,
                        unlocked: done.unlocked,
                        text: done.text,
                    };
                }
                return Outcome::Blocked {
                    hint: hint_line(&scene_hint).to_string(),
                };
            }
            None => {
                warn!("item '{item_name}' leads to missing scene '{target}'; ignoring the passage");
            }
        }
    }

    let completions = advance_puzzles(world, progress, action, item_name);
    if let Some(done) = completions.into_iter().next() {
        return Outcome::Solved {
            puzzle: done.puzzle,
            unlocked: done.unlocked,
            text: done.text,
        };
    }

    match spoken {
        Some(text) => Outcome::Spoken { text },
        None => Outcome::NoReaction,
    }
}
