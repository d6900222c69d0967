//! Raw PokeAPI records to the shapes the catalog and quiz hand out.

use crate::api::{RawCreature, RawSpecies};
use crate::model::{Ability, Creature, CreatureProfile, SpriteSet, Stat};

pub const SPRITE_CDN_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";

pub const DESCRIPTION_PLACEHOLDER: &str = "description unavailable";
pub const GENUS_PLACEHOLDER: &str = "Pokémon";
pub const HABITAT_PLACEHOLDER: &str = "unknown";

const OFFICIAL_ARTWORK: &str = "/other/official-artwork/front_default";

pub fn normalize(raw: &RawCreature) -> Creature {
    Creature {
        id: raw.id,
        name: raw.name.clone(),
        types: raw
            .types
            .iter()
            .map(|slot| slot.type_info.name.clone())
            .collect(),
        image: resolve_image(raw),
    }
}

pub fn normalize_profile(raw: &RawCreature, species: &RawSpecies) -> CreatureProfile {
    let description = species
        .flavor_text_entries
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| sanitize_text(&entry.flavor_text))
        .unwrap_or_else(|| DESCRIPTION_PLACEHOLDER.to_string());
    let genus = species
        .genera
        .iter()
        .find(|entry| entry.language.name == "en")
        .map(|entry| entry.genus.clone())
        .unwrap_or_else(|| GENUS_PLACEHOLDER.to_string());

    CreatureProfile {
        creature: normalize(raw),
        height: raw.height,
        weight: raw.weight,
        base_experience: raw.base_experience,
        abilities: raw
            .abilities
            .iter()
            .map(|slot| Ability {
                name: slot.ability.name.clone(),
                is_hidden: slot.is_hidden,
            })
            .collect(),
        stats: raw
            .stats
            .iter()
            .map(|slot| Stat {
                name: slot.stat.name.clone(),
                base_stat: slot.base_stat,
                effort: slot.effort,
            })
            .collect(),
        sprites: sprite_set(raw),
        description,
        genus,
        capture_rate: species.capture_rate,
        growth_rate: species.growth_rate.as_ref().map(|rate| rate.name.clone()),
        habitat: species
            .habitat
            .as_ref()
            .map(|habitat| habitat.name.clone())
            .unwrap_or_else(|| HABITAT_PLACEHOLDER.to_string()),
        generation: species.generation.as_ref().map(|gen| gen.name.clone()),
    }
}

/// Official artwork, then the default front sprite, then the CDN path for the id.
pub fn resolve_image(raw: &RawCreature) -> String {
    let sprites = raw.sprites.as_ref();
    sprites
        .and_then(|sprites| pointer_string(sprites, OFFICIAL_ARTWORK))
        .or_else(|| sprites.and_then(|sprites| pointer_string(sprites, "/front_default")))
        .unwrap_or_else(|| fallback_image_url(raw.id))
}

pub fn fallback_image_url(id: u32) -> String {
    format!("{SPRITE_CDN_BASE}/{id}.png")
}

/// Replacement URL to try after `creature.image` failed to load.
///
/// Returns `None` once the image already is the fallback, so callers
/// cannot loop on a missing asset.
pub fn image_fallback(creature: &Creature) -> Option<String> {
    let fallback = fallback_image_url(creature.id);
    (creature.image != fallback).then_some(fallback)
}

pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `mr-mime` -> `Mr Mime`, for labels.
pub fn format_label(name: &str) -> String {
    name.split('-')
        .map(display_name)
        .collect::<Vec<_>>()
        .join(" ")
}

fn sprite_set(raw: &RawCreature) -> SpriteSet {
    let Some(sprites) = raw.sprites.as_ref() else {
        return SpriteSet::default();
    };
    SpriteSet {
        front_default: pointer_string(sprites, "/front_default"),
        front_shiny: pointer_string(sprites, "/front_shiny"),
        back_default: pointer_string(sprites, "/back_default"),
        back_shiny: pointer_string(sprites, "/back_shiny"),
        official_artwork: pointer_string(sprites, OFFICIAL_ARTWORK),
    }
}

fn sanitize_text(text: &str) -> String {
    text.replace('\u{000C}', " ").replace('\n', " ")
}

fn pointer_string(value: &serde_json::Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(|val| val.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
