pub mod engine;
pub mod world;

use indexmap::IndexMap;
use log::warn;

use engine::{Outcome, PuzzleProgress, SceneSnapshot};
use world::{ActionKind, World};

pub use world::{load_world_from_file, load_world_from_str};

/// One play session: the world, the active scene, and puzzle progress.
/// The presentation layer reads snapshots and feeds clicks back in; it
/// never touches the world directly.
pub struct GameState {
    world: World,
    current_scene: String,
    progress: IndexMap<String, PuzzleProgress>,
}

#[cfg(feature = "wasm")]
mod wasm_bindings {
    use super::*;
    use serde_wasm_bindgen::to_value;
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct WasmGame {
        state: GameState,
    }

    #[wasm_bindgen]
    impl WasmGame {
        /// Create a game from a JSON world description string.
        #[wasm_bindgen(constructor)]
        pub fn new(world_json: &str) -> Result<WasmGame, JsValue> {
            let world =
                load_world_from_str(world_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(WasmGame {
                state: GameState::new(world),
            })
        }

        /// Current-scene view for the rendering side.
        #[wasm_bindgen]
        pub fn snapshot(&self) -> JsValue {
            match self.state.snapshot() {
                Some(snap) => to_value(&snap).unwrap_or(JsValue::NULL),
                None => JsValue::NULL,
            }
        }

        /// Apply one click; `action` is one of "talk", "use", "look", "pick up".
        #[wasm_bindgen]
        pub fn click(&mut self, action: &str, item: &str) -> Result<JsValue, JsValue> {
            let action: ActionKind = action
                .parse()
                .map_err(|e: world::UnknownActionKind| JsValue::from_str(&e.to_string()))?;
            let outcome = self.state.apply_interaction(action, item);
            Ok(to_value(&outcome).unwrap_or(JsValue::NULL))
        }

        /// The current scene's hint, ready to draw.
        #[wasm_bindgen]
        pub fn hint(&self) -> String {
            self.state.hint_line()
        }
    }
}

impl GameState {
    /// Wrap a loaded world: log advisory warnings, seed puzzle progress,
    /// flag unsatisfiable puzzles, and point the session at the start scene.
    pub fn new(mut world: World) -> Self {
        for warning in world::validate_world(&world) {
            warn!("{}", warning.message);
        }

        let current_scene = world.start_scene.clone();
        let mut progress = engine::seed_progress(&mut world);
        engine::mark_unsatisfiable_puzzles(&world, &mut progress);

        GameState {
            world,
            current_scene,
            progress,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn current_scene(&self) -> &str {
        &self.current_scene
    }

    /// The sole mutating operation; see `engine::apply_interaction`.
    pub fn apply_interaction(&mut self, action: ActionKind, item_name: &str) -> Outcome {
        engine::apply_interaction(
            &mut self.world,
            &mut self.current_scene,
            &mut self.progress,
            action,
            item_name,
        )
    }

    /// Read-only view of the current scene for the presentation layer.
    pub fn snapshot(&self) -> Option<SceneSnapshot> {
        engine::scene_snapshot(&self.world, &self.current_scene)
    }

    /// A scene's raw hint text, if the scene exists.
    pub fn scene_hint(&self, scene_name: &str) -> Option<&str> {
        self.world.scenes.get(scene_name).map(|s| s.hint.as_str())
    }

    /// The current scene's hint resolved to a drawable line.
    pub fn hint_line(&self) -> String {
        let raw = self.scene_hint(&self.current_scene).unwrap_or("");
        engine::hint_line(raw).to_string()
    }

    pub fn is_locked(&self, scene_name: &str) -> Option<bool> {
        self.world.scenes.get(scene_name).map(|s| s.locked)
    }

    /// Locked scenes reachable from the current scene's passages,
    /// in item order, deduplicated.
    pub fn locked_passages(&self) -> Vec<String> {
        let Some(scene) = self.world.scenes.get(&self.current_scene) else {
            return Vec::new();
        };

        let mut targets: Vec<String> = Vec::new();
        for item in scene.items.values() {
            if let Some(target) = &item.leads_to {
                let locked = self
                    .world
                    .scenes
                    .get(target)
                    .is_some_and(|s| s.locked);
                if locked && !targets.contains(target) {
                    targets.push(target.clone());
                }
            }
        }
        targets
    }

    /// Puzzle progress in document order, for status displays.
    pub fn puzzles(&self) -> impl Iterator<Item = (&str, &PuzzleProgress)> {
        self.progress
            .iter()
            .map(|(name, state)| (name.as_str(), state))
    }
}
