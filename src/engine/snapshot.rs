use serde::Serialize;

use crate::world::{ActionKind, Item, Scene, World, scene_image_file};

/// Read-only view of the active scene, rebuilt per event. The presentation
/// layer draws from this and never touches the world directly.
#[derive(Debug, Clone, Serialize)]
pub struct SceneSnapshot {
    pub scene: String,
    pub description: String,
    pub hint: String,
    /// File name of the scene's backdrop, resolved against an asset dir.
    pub image: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemView {
    pub name: String,
    pub description: String,
    /// Action kinds with dialogue, in description order.
    pub actions: Vec<ActionKind>,
    /// Normalized [0,1] position within the backdrop.
    pub coordinates: (f64, f64),
    pub passage: Option<PassageView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PassageView {
    pub to: String,
    pub locked: bool,
}

/// Snapshot the named scene. `None` only if the name doesn't resolve,
/// which a loaded world never produces for its own current scene.
pub fn scene_snapshot(world: &World, scene_name: &str) -> Option<SceneSnapshot> {
    let scene = world.scenes.get(scene_name)?;

    let items = scene
        .items
        .values()
        .map(|item| {
            let passage = item.leads_to.as_ref().map(|to| PassageView {
                to: to.clone(),
                locked: world.scenes.get(to).is_some_and(|s| s.locked),
            });

            ItemView {
                name: item.name.clone(),
                description: item.description.clone(),
                actions: item.interactions.keys().copied().collect(),
                coordinates: item.coordinates,
                passage,
            }
        })
        .collect();

    Some(SceneSnapshot {
        scene: scene.name.clone(),
        description: scene.description.clone(),
        hint: scene.hint.clone(),
        image: scene_image_file(&scene.name),
        items,
    })
}

pub enum ItemMatch<'a> {
    None,
    One(&'a Item),
    Many(Vec<&'a Item>),
}

/// Find the *best* matching item by counting full-word overlaps.
/// - Highest score wins
/// - Ties => Many (ambiguity)
/// - Score 0 => None
pub fn find_item<'a>(scene: &'a Scene, query: &str) -> ItemMatch<'a> {
    let query_words = name_words(query);
    if query_words.is_empty() {
        return ItemMatch::None;
    }

    // (item, score)
    let mut scored: Vec<(&Item, usize)> = Vec::new();

    for item in scene.items.values() {
        let item_words = name_words(&item.name);

        // Score = number of query words that appear in the item's name words
        let mut score = 0usize;
        for qw in &query_words {
            if item_words.iter().any(|iw| iw == qw) {
                score += 1;
            }
        }

        if score > 0 {
            scored.push((item, score));
        }
    }

    if scored.is_empty() {
        return ItemMatch::None;
    }

    let max_score = scored.iter().map(|(_, s)| *s).max().unwrap_or(0);

    let mut best: Vec<&Item> = scored
        .into_iter()
        .filter(|(_, s)| *s == max_score)
        .map(|(i, _)| i)
        .collect();

    match best.len() {
        0 => ItemMatch::None,
        1 => ItemMatch::One(best[0]),
        _ => {
            // sort to make ambiguity reporting stable
            best.sort_by(|a, b| a.name.cmp(&b.name));
            ItemMatch::Many(best)
        }
    }
}

/// Generated item names separate words with underscores as often as spaces.
fn name_words(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}
