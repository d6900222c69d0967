//! In-memory transport and PokeAPI-shaped fixtures for tests.
//!
//! Everything here is plain data: a `StubTransport` answers GETs from a URL
//! map and records every request so tests can assert on traffic.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::transport::Transport;

pub const TEST_API_BASE: &str = "http://dex.test/api/v2";

#[derive(Default)]
pub struct StubTransport {
    responses: Mutex<HashMap<String, Value>>,
    failures: Mutex<HashMap<String, ApiError>>,
    requests: Mutex<Vec<String>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, url: impl Into<String>, body: Value) -> Self {
        self.insert(url, body);
        self
    }

    pub fn insert(&self, url: impl Into<String>, body: Value) {
        lock(&self.responses).insert(url.into(), body);
    }

    /// Makes `url` fail with `error` instead of answering.
    pub fn fail(&self, url: impl Into<String>, error: ApiError) {
        lock(&self.failures).insert(url.into(), error);
    }

    /// Registers `/pokemon/{id}` and `/pokemon/{name}` for a creature record.
    pub fn insert_creature(&self, record: Value) {
        let id = record["id"].as_u64().unwrap_or_default();
        let name = record["name"].as_str().unwrap_or_default().to_string();
        self.insert(format!("{TEST_API_BASE}/pokemon/{id}"), record.clone());
        if !name.is_empty() {
            self.insert(format!("{TEST_API_BASE}/pokemon/{name}"), record);
        }
    }

    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        lock(&self.requests)
            .iter()
            .filter(|request| request.as_str() == url)
            .count()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get_json(&self, url: &str) -> Result<Value, ApiError> {
        lock(&self.requests).push(url.to_string());
        // Let sibling tasks interleave the way real requests would.
        tokio::task::yield_now().await;
        if let Some(error) = lock(&self.failures).get(url) {
            return Err(error.clone());
        }
        lock(&self.responses)
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::not_found(url))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn creature_url(id: u32) -> String {
    format!("{TEST_API_BASE}/pokemon/{id}/")
}

pub fn species_url(id: u32) -> String {
    format!("{TEST_API_BASE}/pokemon-species/{id}/")
}

/// A `/pokemon/{id}` record with official artwork and a default sprite.
pub fn creature_json(id: u32, name: &str, types: &[&str]) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "base_experience": 64,
        "types": types
            .iter()
            .enumerate()
            .map(|(slot, tag)| json!({
                "slot": slot + 1,
                "type": { "name": tag, "url": format!("{TEST_API_BASE}/type/{tag}/") }
            }))
            .collect::<Vec<_>>(),
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "effort": 0, "stat": { "name": "attack", "url": "" } },
            { "base_stat": 65, "effort": 1, "stat": { "name": "special-attack", "url": "" } }
        ],
        "abilities": [
            { "ability": { "name": "overgrow", "url": "" }, "is_hidden": false, "slot": 1 },
            { "ability": { "name": "chlorophyll", "url": "" }, "is_hidden": true, "slot": 3 }
        ],
        "sprites": {
            "front_default": format!("https://sprites.test/front/{id}.png"),
            "front_shiny": format!("https://sprites.test/shiny/{id}.png"),
            "back_default": null,
            "back_shiny": null,
            "other": {
                "official-artwork": {
                    "front_default": format!("https://sprites.test/artwork/{id}.png")
                }
            }
        },
        "species": { "name": name, "url": species_url(id) }
    })
}

pub fn species_json(id: u32, flavor: &str, genus: &str) -> Value {
    json!({
        "id": id,
        "flavor_text_entries": [
            { "flavor_text": "Un texte en français.", "language": { "name": "fr", "url": "" } },
            { "flavor_text": flavor, "language": { "name": "en", "url": "" } },
            { "flavor_text": "A later English entry.", "language": { "name": "en", "url": "" } }
        ],
        "genera": [
            { "genus": "Pokémon Graine", "language": { "name": "fr", "url": "" } },
            { "genus": genus, "language": { "name": "en", "url": "" } }
        ],
        "capture_rate": 45,
        "growth_rate": { "name": "medium-slow", "url": "" },
        "habitat": { "name": "grassland", "url": "" },
        "generation": { "name": "generation-i", "url": "" }
    })
}

/// A `/pokemon?limit&offset` listing page.
pub fn listing_json(count: Option<u32>, names: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = names
        .iter()
        .map(|(id, name)| json!({ "name": name, "url": creature_url(*id) }))
        .collect();
    match count {
        Some(count) => json!({ "count": count, "next": null, "previous": null, "results": results }),
        None => json!({ "results": results }),
    }
}

/// A `/type/{tag}` record listing its members.
pub fn type_json(tag: &str, members: &[(u32, &str)]) -> Value {
    json!({
        "name": tag,
        "pokemon": members
            .iter()
            .map(|(id, name)| json!({
                "slot": 1,
                "pokemon": { "name": name, "url": creature_url(*id) }
            }))
            .collect::<Vec<_>>()
    })
}

pub fn type_list_json(tags: &[&str]) -> Value {
    json!({
        "count": tags.len(),
        "results": tags
            .iter()
            .map(|tag| json!({ "name": tag, "url": format!("{TEST_API_BASE}/type/{tag}/") }))
            .collect::<Vec<_>>()
    })
}

/// Synthetic name used by fixtures that need many distinct creatures.
pub fn mon_name(id: u32) -> String {
    format!("mon{id}")
}
