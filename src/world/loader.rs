use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use thiserror::Error;

use super::model::{
    ActionKind, Item, Puzzle, Requirement, Scene, START_SCENE_MARKER, World,
};

/// Load-time failures. Any of these aborts the session before it starts;
/// everything recoverable is a normal engine outcome instead.
#[derive(Debug, Error)]
pub enum StructuralError {
    #[error("failed to read world description: {0}")]
    Io(#[from] std::io::Error),

    /// Unparseable JSON, including missing required fields such as an
    /// entity's `items` or `interactions` map; serde names the field.
    #[error("world description is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("world description contains no scenes")]
    NoScenes,

    #[error("item '{item}' in scene '{scene}' leads to unknown scene '{target}'")]
    UnknownPassageTarget {
        scene: String,
        item: String,
        target: String,
    },

    #[error("puzzle '{puzzle}' unlocks unknown scene '{target}'")]
    UnknownUnlockTarget { puzzle: String, target: String },
}

////////////////////
/// JSON STRUCTS ///
////////////////////

#[derive(Deserialize)]
struct WorldFile {
    scenes: IndexMap<String, SceneConfig>,
    #[serde(default)]
    puzzles: IndexMap<String, PuzzleConfig>,
}

#[derive(Deserialize)]
struct SceneConfig {
    #[serde(default)]
    scene_description: String,

    items: IndexMap<String, ItemConfig>,

    #[serde(default)]
    is_locked: bool,

    #[serde(default)]
    hint: String,
}

#[derive(Deserialize)]
struct ItemConfig {
    #[serde(default)]
    description: String,

    interactions: IndexMap<ActionKind, String>,

    #[serde(default)]
    leads_to: Option<String>,

    #[serde(default)]
    coordinates: Option<[f64; 2]>,
}

#[derive(Deserialize)]
struct PuzzleConfig {
    #[serde(default, rename = "type")]
    kind: String,

    #[serde(default)]
    hint: String,

    #[serde(default)]
    completion_text: String,

    #[serde(default)]
    requirements: Vec<(ActionKind, String)>,

    result: UnlockResult,
}

#[derive(Deserialize)]
struct UnlockResult {
    unlocked_area: String,
}

/////////////////////////////
/// JSON PARSER FUNCTIONS ///
/////////////////////////////

/// Public API: load a world from a description file on disk.
pub fn load_world_from_file(path: &Path) -> Result<World, StructuralError> {
    let contents = fs::read_to_string(path)?;
    debug!("read world description from {}", path.display());
    load_world_from_str(&contents)
}

/// Public API: load a world from an in-memory description string.
pub fn load_world_from_str(data: &str) -> Result<World, StructuralError> {
    let world_file: WorldFile = serde_json::from_str(data)?;

    if world_file.scenes.is_empty() {
        return Err(StructuralError::NoScenes);
    }

    // Build scenes in document order
    let mut scenes: IndexMap<String, Scene> = IndexMap::new();

    for (scene_name, cfg) in world_file.scenes {
        let mut items: IndexMap<String, Item> = IndexMap::new();

        for (item_name, ic) in cfg.items {
            let [x, y] = ic.coordinates.unwrap_or([0.5, 0.5]);

            items.insert(
                item_name.clone(),
                Item {
                    name: item_name,
                    description: ic.description,
                    interactions: ic.interactions,
                    leads_to: passage_target(ic.leads_to.as_deref()),
                    coordinates: (x, y),
                },
            );
        }

        scenes.insert(
            scene_name.clone(),
            Scene {
                name: scene_name,
                description: cfg.scene_description,
                items,
                locked: cfg.is_locked,
                hint: cfg.hint,
            },
        );
    }

    // Start scene: first marker match in document order, else the first scene.
    // Permissive on purpose; a missing marker still yields a playable world.
    let start_scene = match scenes
        .keys()
        .find(|name| name.to_uppercase().contains(START_SCENE_MARKER))
        .or_else(|| scenes.keys().next())
    {
        Some(name) => name.clone(),
        None => return Err(StructuralError::NoScenes),
    };

    if let Some(start) = scenes.get_mut(&start_scene) {
        if start.locked {
            debug!("start scene '{start_scene}' was flagged locked; forcing unlocked");
            start.locked = false;
        }
    }

    // Passage references must resolve
    for scene in scenes.values() {
        for item in scene.items.values() {
            if let Some(target) = &item.leads_to {
                if !scenes.contains_key(target) {
                    return Err(StructuralError::UnknownPassageTarget {
                        scene: scene.name.clone(),
                        item: item.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }
    }

    // Build puzzles; unlock targets must resolve
    let mut puzzles: IndexMap<String, Puzzle> = IndexMap::new();

    for (puzzle_name, pc) in world_file.puzzles {
        let target = pc.result.unlocked_area;
        if !scenes.contains_key(&target) {
            return Err(StructuralError::UnknownUnlockTarget {
                puzzle: puzzle_name,
                target,
            });
        }

        let requirements = pc
            .requirements
            .into_iter()
            .map(|(action, item)| Requirement { action, item })
            .collect();

        puzzles.insert(
            puzzle_name.clone(),
            Puzzle {
                name: puzzle_name,
                kind: pc.kind,
                hint: pc.hint,
                completion_text: pc.completion_text,
                requirements,
                unlocks: target,
            },
        );
    }

    debug!(
        "loaded world: {} scene(s), {} puzzle(s), start '{}'",
        scenes.len(),
        puzzles.len(),
        start_scene
    );

    Ok(World {
        scenes,
        puzzles,
        start_scene,
    })
}

/// Normalize a raw `leads_to` value; the description uses "n/a" for
/// items that are not passages, and omitting the field means the same.
fn passage_target(raw: Option<&str>) -> Option<String> {
    let s = raw?.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("n/a") {
        return None;
    }
    Some(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(json: &str) -> World {
        load_world_from_str(json).expect("world should load")
    }

    const TWO_SCENES: &str = r#"{
        "scenes": {
            "harbor": {
                "scene_description": "A foggy harbor.",
                "items": {
                    "gate": {
                        "description": "Rusty but proud.",
                        "interactions": {"look": "It's locked tight."},
                        "leads_to": "warehouse",
                        "coordinates": [0.8, 0.4]
                    }
                },
                "is_locked": false,
                "hint": "The gate wants a key."
            },
            "warehouse": {
                "scene_description": "Crates everywhere.",
                "items": {
                    "crate": {
                        "description": "Heavy.",
                        "interactions": {"use": "It won't budge."},
                        "leads_to": "n/a"
                    }
                },
                "is_locked": true,
                "hint": ""
            }
        },
        "puzzles": {
            "puzzle_1": {
                "type": "dialog",
                "hint": "Someone must know the way in.",
                "completion_text": "The gate creaks open.",
                "requirements": [["look", "gate"]],
                "result": {"unlocked_area": "warehouse"}
            }
        }
    }"#;

    #[test]
    fn loads_scenes_items_and_puzzles() {
        let w = world(TWO_SCENES);
        assert_eq!(w.scenes.len(), 2);
        assert_eq!(w.puzzles.len(), 1);

        let harbor = &w.scenes["harbor"];
        assert!(!harbor.locked);
        assert_eq!(harbor.hint, "The gate wants a key.");

        let gate = &harbor.items["gate"];
        assert_eq!(gate.leads_to.as_deref(), Some("warehouse"));
        assert_eq!(gate.coordinates, (0.8, 0.4));
        assert_eq!(
            gate.interactions.get(&ActionKind::Look).map(String::as_str),
            Some("It's locked tight.")
        );

        let puzzle = &w.puzzles["puzzle_1"];
        assert_eq!(puzzle.kind, "dialog");
        assert_eq!(puzzle.unlocks, "warehouse");
        assert_eq!(
            puzzle.requirements,
            vec![Requirement {
                action: ActionKind::Look,
                item: "gate".to_string(),
            }]
        );
    }

    #[test]
    fn start_scene_falls_back_to_first_in_document_order() {
        let w = world(TWO_SCENES);
        assert_eq!(w.start_scene, "harbor");
    }

    #[test]
    fn start_marker_wins_over_document_order() {
        let json = r#"{
            "scenes": {
                "cellar": {"items": {}, "is_locked": true, "hint": ""},
                "START_kitchen": {"items": {}, "is_locked": false, "hint": ""}
            }
        }"#;
        let w = world(json);
        assert_eq!(w.start_scene, "START_kitchen");
    }

    #[test]
    fn start_marker_matches_case_insensitively_first_match_wins() {
        let json = r#"{
            "scenes": {
                "cellar": {"items": {}},
                "start_porch": {"items": {}},
                "START_kitchen": {"items": {}}
            }
        }"#;
        let w = world(json);
        assert_eq!(w.start_scene, "start_porch");
    }

    #[test]
    fn locked_start_scene_is_forced_unlocked() {
        let json = r#"{
            "scenes": {
                "START_vault": {"items": {}, "is_locked": true}
            }
        }"#;
        let w = world(json);
        assert!(!w.scenes["START_vault"].locked);
    }

    #[test]
    fn empty_scene_map_is_structural() {
        let err = load_world_from_str(r#"{"scenes": {}}"#).unwrap_err();
        assert!(matches!(err, StructuralError::NoScenes));
    }

    #[test]
    fn missing_scenes_key_names_the_field() {
        let err = load_world_from_str(r#"{"puzzles": {}}"#).unwrap_err();
        assert!(err.to_string().contains("scenes"));
    }

    #[test]
    fn missing_items_map_names_the_field() {
        let err = load_world_from_str(r#"{"scenes": {"bar": {"hint": ""}}}"#).unwrap_err();
        assert!(matches!(err, StructuralError::Malformed(_)));
        assert!(err.to_string().contains("items"));
    }

    #[test]
    fn missing_interactions_map_names_the_field() {
        let json = r#"{
            "scenes": {
                "bar": {"items": {"stool": {"description": "Wobbly."}}}
            }
        }"#;
        let err = load_world_from_str(json).unwrap_err();
        assert!(err.to_string().contains("interactions"));
    }

    #[test]
    fn dangling_passage_target_is_structural() {
        let json = r#"{
            "scenes": {
                "bar": {
                    "items": {
                        "door": {"interactions": {}, "leads_to": "atlantis"}
                    }
                }
            }
        }"#;
        let err = load_world_from_str(json).unwrap_err();
        match err {
            StructuralError::UnknownPassageTarget {
                scene,
                item,
                target,
            } => {
                assert_eq!(scene, "bar");
                assert_eq!(item, "door");
                assert_eq!(target, "atlantis");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn dangling_unlock_target_is_structural() {
        let json = r#"{
            "scenes": {"bar": {"items": {}}},
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["talk", "barkeep"]],
                    "result": {"unlocked_area": "atlantis"}
                }
            }
        }"#;
        let err = load_world_from_str(json).unwrap_err();
        assert!(matches!(err, StructuralError::UnknownUnlockTarget { .. }));
    }

    #[test]
    fn sentinel_and_missing_leads_to_are_equivalent() {
        let json = r#"{
            "scenes": {
                "bar": {
                    "items": {
                        "a": {"interactions": {}, "leads_to": "n/a"},
                        "b": {"interactions": {}, "leads_to": "N/A"},
                        "c": {"interactions": {}, "leads_to": ""},
                        "d": {"interactions": {}}
                    }
                }
            }
        }"#;
        let w = world(json);
        for item in w.scenes["bar"].items.values() {
            assert!(item.leads_to.is_none(), "item '{}'", item.name);
        }
    }

    #[test]
    fn coordinates_default_to_center() {
        let json = r#"{
            "scenes": {
                "bar": {"items": {"stool": {"interactions": {}}}}
            }
        }"#;
        let w = world(json);
        assert_eq!(w.scenes["bar"].items["stool"].coordinates, (0.5, 0.5));
    }

    #[test]
    fn missing_puzzles_key_is_tolerated() {
        let w = world(r#"{"scenes": {"bar": {"items": {}}}}"#);
        assert!(w.puzzles.is_empty());
    }

    #[test]
    fn unknown_interaction_kind_is_malformed() {
        let json = r#"{
            "scenes": {
                "bar": {
                    "items": {"stool": {"interactions": {"shove": "No."}}}
                }
            }
        }"#;
        let err = load_world_from_str(json).unwrap_err();
        assert!(matches!(err, StructuralError::Malformed(_)));
    }

    #[test]
    fn loads_from_file() {
        use std::io::Write;

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("game_data.json");
        let mut f = fs::File::create(&path).expect("create");
        f.write_all(TWO_SCENES.as_bytes()).expect("write");

        let w = load_world_from_file(&path).expect("load");
        assert_eq!(w.start_scene, "harbor");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_world_from_file(Path::new("definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, StructuralError::Io(_)));
    }
}
