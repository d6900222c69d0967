use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::api::Gateway;
use crate::error::ApiError;
use crate::model::{
    page_bounds, Creature, CreatureProfile, Page, DEFAULT_TOTAL_COUNT, PAGE_SIZE,
};
use crate::normalize::{normalize, normalize_profile};
use crate::suggest::SuggestionIndex;

pub const DEFAULT_DETAIL_CONCURRENCY: usize = 20;

/// Which listing a catalog page belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogQuery {
    #[default]
    All,
    Type(String),
    Search(String),
}

impl CatalogQuery {
    pub fn label(&self) -> String {
        match self {
            CatalogQuery::All => "All".to_string(),
            CatalogQuery::Type(tag) => format!("Type: {tag}"),
            CatalogQuery::Search(query) => format!("Search: {query}"),
        }
    }
}

/// Paged, normalized views over the upstream catalog.
///
/// Every query returns a whole [`Page`] or an error; a page is never
/// assembled from a partially failed batch.
pub struct Catalog {
    gateway: Arc<Gateway>,
    suggestions: Arc<SuggestionIndex>,
    detail_concurrency: usize,
}

impl Catalog {
    pub fn new(gateway: Arc<Gateway>, suggestions: Arc<SuggestionIndex>) -> Self {
        Self {
            gateway,
            suggestions,
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }

    pub fn with_detail_concurrency(mut self, limit: usize) -> Self {
        self.detail_concurrency = limit.max(1);
        self
    }

    pub async fn query(&self, query: &CatalogQuery, page: u32) -> Result<Page<Creature>, ApiError> {
        match query {
            CatalogQuery::All => self.by_page(page).await,
            CatalogQuery::Type(tag) => self.by_type(tag, page).await,
            CatalogQuery::Search(text) => self.search(text, page).await,
        }
    }

    pub async fn by_page(&self, page: u32) -> Result<Page<Creature>, ApiError> {
        let page = page.max(1);
        let listing = self.gateway.list_creatures(page, PAGE_SIZE).await?;
        let names = listing.results.into_iter().map(|entry| entry.name).collect();
        let items = self.fetch_all(names).await?;
        Ok(Page::new(
            items,
            page,
            listing.count.unwrap_or(DEFAULT_TOTAL_COUNT),
        ))
    }

    /// Exact lookup first; on a miss, prefix matches against the roster.
    pub async fn search(&self, query: &str, page: u32) -> Result<Page<Creature>, ApiError> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.by_page(page).await;
        }

        match self.gateway.get_creature(&query).await {
            Ok(raw) => return Ok(Page::single(normalize(&raw))),
            Err(err) if err.is_not_found() => {
                tracing::debug!(%query, "no exact match, searching roster");
            }
            Err(err) => return Err(err),
        }

        let matches = self.suggestions.prefix_matches(&query).await?;
        if matches.is_empty() {
            return Ok(Page::empty());
        }
        let page = page.max(1);
        let total = matches.len() as u32;
        let names = matches[page_bounds(page, matches.len())]
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        let items = self.fetch_all(names).await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn by_type(&self, tag: &str, page: u32) -> Result<Page<Creature>, ApiError> {
        let tag = tag.trim().to_lowercase();
        if tag.is_empty() {
            return self.by_page(page).await;
        }
        let page = page.max(1);
        let members = self.gateway.get_creatures_by_type(&tag).await?;
        let total = members.len() as u32;
        let names = members[page_bounds(page, members.len())]
            .iter()
            .map(|member| member.name.clone())
            .collect();
        let items = self.fetch_all(names).await?;
        Ok(Page::new(items, page, total))
    }

    pub async fn type_tags(&self) -> Result<Vec<String>, ApiError> {
        self.gateway.get_type_tags().await
    }

    pub async fn profile(&self, id_or_name: &str) -> Result<CreatureProfile, ApiError> {
        let raw = self.gateway.get_creature(id_or_name).await?;
        let species_url = raw
            .species
            .as_ref()
            .map(|species| species.url.clone())
            .ok_or_else(|| {
                ApiError::malformed(format!("pokemon/{id_or_name}"), "record has no species")
            })?;
        let species = self.gateway.get_species(&species_url).await?;
        Ok(normalize_profile(&raw, &species))
    }

    /// Fetches and normalizes `names` concurrently, keeping their order.
    async fn fetch_all(&self, names: Vec<String>) -> Result<Vec<Creature>, ApiError> {
        let semaphore = Arc::new(Semaphore::new(self.detail_concurrency));
        let mut join_set = JoinSet::new();
        for (index, name) in names.iter().cloned().enumerate() {
            let gateway = self.gateway.clone();
            let semaphore = semaphore.clone();
            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| ApiError::fetch(&name, "detail semaphore closed"))?;
                let raw = gateway.get_creature(&name).await?;
                Ok::<_, ApiError>((index, normalize(&raw)))
            });
        }

        let mut slots: Vec<Option<Creature>> = vec![None; names.len()];
        while let Some(joined) = join_set.join_next().await {
            let outcome = joined.unwrap_or_else(|err| Err(ApiError::fetch("detail batch", err)));
            match outcome {
                Ok((index, creature)) => slots[index] = Some(creature),
                Err(err) => {
                    tracing::warn!(error = %err, "detail fetch failed, dropping page");
                    join_set.abort_all();
                    return Err(err);
                }
            }
        }
        Ok(slots.into_iter().flatten().collect())
    }
}
