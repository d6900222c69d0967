use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::transport::Transport;

pub const API_BASE: &str = "https://pokeapi.co/api/v2";

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub count: Option<u32>,
    pub results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawCreature {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub weight: Option<u32>,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub stats: Vec<RawStatSlot>,
    #[serde(default)]
    pub abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    pub sprites: Option<serde_json::Value>,
    #[serde(default)]
    pub species: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawTypeSlot {
    #[serde(rename = "type")]
    pub type_info: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawStatSlot {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawAbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSpecies {
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<GenusEntry>,
    #[serde(default)]
    pub capture_rate: Option<u32>,
    #[serde(default)]
    pub growth_rate: Option<NamedResource>,
    #[serde(default)]
    pub habitat: Option<NamedResource>,
    #[serde(default)]
    pub generation: Option<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GenusEntry {
    pub genus: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeListResponse {
    results: Vec<NamedResource>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypeDetailResponse {
    pokemon: Vec<TypePokemonEntry>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypePokemonEntry {
    pokemon: NamedResource,
}

/// Typed access to the PokeAPI resources the catalog and quiz need.
///
/// The gateway never retries; every failure is reported once, as an
/// [`ApiError`] naming the URL that failed.
pub struct Gateway {
    transport: Arc<dyn Transport>,
    base_url: String,
}

impl Gateway {
    pub fn new(transport: Arc<dyn Transport>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One page of `{name, url}` references plus the upstream total.
    pub async fn list_creatures(&self, page: u32, page_size: u32) -> Result<RawListing, ApiError> {
        let offset = page.max(1).saturating_sub(1).saturating_mul(page_size);
        let url = format!(
            "{}/pokemon?limit={page_size}&offset={offset}",
            self.base_url
        );
        self.fetch_json(&url).await
    }

    pub async fn get_creature(&self, id_or_name: &str) -> Result<RawCreature, ApiError> {
        let url = format!(
            "{}/pokemon/{}",
            self.base_url,
            urlencoding::encode(id_or_name)
        );
        self.fetch_json(&url).await
    }

    /// Full membership of a type. Upstream does not paginate this list.
    pub async fn get_creatures_by_type(&self, tag: &str) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/type/{}", self.base_url, urlencoding::encode(tag));
        let response: TypeDetailResponse = self.fetch_json(&url).await?;
        Ok(response
            .pokemon
            .into_iter()
            .map(|entry| entry.pokemon)
            .collect())
    }

    pub async fn get_type_tags(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/type?limit=999", self.base_url);
        let response: TypeListResponse = self.fetch_json(&url).await?;
        let mut types: Vec<String> = response
            .results
            .into_iter()
            .map(|entry| entry.name)
            .filter(|name| name != "unknown" && name != "shadow")
            .collect();
        types.sort();
        types.dedup();
        Ok(types)
    }

    pub async fn get_species(&self, species_url: &str) -> Result<RawSpecies, ApiError> {
        self.fetch_json(species_url).await
    }

    /// The first `limit` creature references, in upstream (ascending id) order.
    pub async fn get_roster(&self, limit: usize) -> Result<Vec<NamedResource>, ApiError> {
        let url = format!("{}/pokemon?limit={limit}", self.base_url);
        let listing: RawListing = self.fetch_json(&url).await?;
        Ok(listing.results)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let value = self.transport.get_json(url).await?;
        serde_json::from_value(value).map_err(|err| ApiError::malformed(url, err))
    }
}
