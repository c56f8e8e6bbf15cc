use std::collections::HashSet;

use super::model::{Requirement, START_SCENE_MARKER, World};

/// Advisory finding about a loaded world. Warnings never stop a session;
/// the engine runs the world as written and works around them.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub message: String,
}

impl ValidationWarning {
    fn new(msg: impl Into<String>) -> Self {
        ValidationWarning {
            message: msg.into(),
        }
    }
}

pub fn validate_world(world: &World) -> Vec<ValidationWarning> {
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    // Scenes must not be empty
    if world.scenes.is_empty() {
        warnings.push(ValidationWarning::new("world has no scenes"));
    }

    // start_scene must exist
    if !world.scenes.contains_key(&world.start_scene) {
        warnings.push(ValidationWarning::new(format!(
            "start scene '{}' not found among scenes",
            world.start_scene
        )));
    }

    // Extra start markers are ignored; say which scene won
    let marked: Vec<&String> = world
        .scenes
        .keys()
        .filter(|name| name.to_uppercase().contains(START_SCENE_MARKER))
        .collect();
    if marked.len() > 1 {
        for extra in &marked[1..] {
            warnings.push(ValidationWarning::new(format!(
                "scene '{}' also carries the start marker; '{}' is the start",
                extra, marked[0]
            )));
        }
    }

    // Index helpers
    let all_items: HashSet<String> = world
        .scenes
        .values()
        .flat_map(|scene| scene.items.keys())
        .cloned()
        .collect();

    // Validate item placement
    for (scene_name, scene) in &world.scenes {
        for item in scene.items.values() {
            let (x, y) = item.coordinates;
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                warnings.push(ValidationWarning::new(format!(
                    "item '{}' in scene '{}' has coordinates ({}, {}) outside the unit square",
                    item.name, scene_name, x, y
                )));
            }
        }
    }

    // Validate puzzles
    for (puzzle_name, puzzle) in &world.puzzles {
        match world.scenes.get(&puzzle.unlocks) {
            Some(target) => {
                if !target.locked {
                    warnings.push(ValidationWarning::new(format!(
                        "puzzle '{}' unlocks scene '{}' which is not locked",
                        puzzle_name, puzzle.unlocks
                    )));
                }
            }
            None => {
                warnings.push(ValidationWarning::new(format!(
                    "puzzle '{}' unlocks missing scene '{}'",
                    puzzle_name, puzzle.unlocks
                )));
            }
        }

        let mut seen: Vec<&Requirement> = Vec::new();
        for req in &puzzle.requirements {
            if !all_items.contains(&req.item) {
                warnings.push(ValidationWarning::new(format!(
                    "puzzle '{}' requires item '{}' which exists in no scene",
                    puzzle_name, req.item
                )));
            }

            if seen.contains(&req) {
                warnings.push(ValidationWarning::new(format!(
                    "puzzle '{}' lists requirement '{} {}' more than once",
                    puzzle_name, req.action, req.item
                )));
            } else {
                seen.push(req);
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::load_world_from_str;

    fn warnings_for(json: &str) -> Vec<String> {
        let world = load_world_from_str(json).expect("world should load");
        validate_world(&world)
            .into_iter()
            .map(|w| w.message)
            .collect()
    }

    #[test]
    fn clean_world_produces_no_warnings() {
        let json = r#"{
            "scenes": {
                "START_bar": {
                    "items": {
                        "door": {
                            "interactions": {"look": "Sturdy oak."},
                            "leads_to": "cellar",
                            "coordinates": [0.2, 0.9]
                        }
                    }
                },
                "cellar": {"items": {}, "is_locked": true}
            },
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["look", "door"]],
                    "result": {"unlocked_area": "cellar"}
                }
            }
        }"#;
        assert!(warnings_for(json).is_empty());
    }

    #[test]
    fn unresolvable_requirement_item_warns() {
        let json = r#"{
            "scenes": {
                "START_bar": {"items": {}},
                "cellar": {"items": {}, "is_locked": true}
            },
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["talk", "ghost"]],
                    "result": {"unlocked_area": "cellar"}
                }
            }
        }"#;
        let warnings = warnings_for(json);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ghost"));
        assert!(warnings[0].contains("no scene"));
    }

    #[test]
    fn duplicate_requirement_pair_warns_once() {
        let json = r#"{
            "scenes": {
                "START_bar": {
                    "items": {"door": {"interactions": {}}}
                },
                "cellar": {"items": {}, "is_locked": true}
            },
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["look", "door"], ["look", "door"]],
                    "result": {"unlocked_area": "cellar"}
                }
            }
        }"#;
        let warnings = warnings_for(json);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("more than once"));
    }

    #[test]
    fn same_item_different_actions_is_not_a_duplicate() {
        let json = r#"{
            "scenes": {
                "START_bar": {
                    "items": {"door": {"interactions": {}}}
                },
                "cellar": {"items": {}, "is_locked": true}
            },
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["look", "door"], ["use", "door"]],
                    "result": {"unlocked_area": "cellar"}
                }
            }
        }"#;
        assert!(warnings_for(json).is_empty());
    }

    #[test]
    fn out_of_range_coordinates_warn() {
        let json = r#"{
            "scenes": {
                "START_bar": {
                    "items": {
                        "sign": {
                            "interactions": {},
                            "coordinates": [1.4, 0.5]
                        }
                    }
                }
            }
        }"#;
        let warnings = warnings_for(json);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unit square"));
    }

    #[test]
    fn unlocking_an_open_scene_warns() {
        let json = r#"{
            "scenes": {
                "START_bar": {"items": {"door": {"interactions": {}}}},
                "patio": {"items": {}}
            },
            "puzzles": {
                "puzzle_1": {
                    "requirements": [["use", "door"]],
                    "result": {"unlocked_area": "patio"}
                }
            }
        }"#;
        let warnings = warnings_for(json);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("not locked"));
    }

    #[test]
    fn extra_start_markers_warn() {
        let json = r#"{
            "scenes": {
                "START_bar": {"items": {}},
                "start_cellar": {"items": {}}
            }
        }"#;
        let warnings = warnings_for(json);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("start_cellar"));
        assert!(warnings[0].contains("START_bar"));
    }
}
