use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::api::{Gateway, NamedResource};
use crate::error::ApiError;
use crate::model::{RosterEntry, Suggestion};
use crate::normalize::{display_name, fallback_image_url};

pub const ROSTER_LIMIT: usize = 1000;
pub const SUGGESTION_LIMIT: usize = 8;
pub const MIN_QUERY_LEN: usize = 2;

/// Lazily fetched roster of creature names used for autocomplete and for
/// the search fallback.
///
/// The roster is populated on first use and kept for the lifetime of the
/// index. Concurrent first callers share one in-flight fetch; a failed
/// fetch leaves the index empty so the next call tries again.
pub struct SuggestionIndex {
    gateway: Arc<Gateway>,
    roster: OnceCell<Vec<RosterEntry>>,
    limit: usize,
}

impl SuggestionIndex {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self::with_limit(gateway, ROSTER_LIMIT)
    }

    pub fn with_limit(gateway: Arc<Gateway>, limit: usize) -> Self {
        Self {
            gateway,
            roster: OnceCell::new(),
            limit,
        }
    }

    pub fn is_populated(&self) -> bool {
        self.roster.initialized()
    }

    pub async fn roster(&self) -> Result<&[RosterEntry], ApiError> {
        let roster = self
            .roster
            .get_or_try_init(|| async {
                let entries = self.gateway.get_roster(self.limit).await?;
                tracing::info!(count = entries.len(), "roster loaded");
                Ok::<_, ApiError>(roster_entries(entries))
            })
            .await?;
        Ok(roster.as_slice())
    }

    /// Autocomplete entries for `query`, at most `limit`, in roster order.
    pub async fn suggestions(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, ApiError> {
        let query = query.trim().to_lowercase();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }
        let roster = self.roster().await?;
        Ok(roster
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().contains(&query) || entry.id.to_string().contains(&query)
            })
            .take(limit)
            .map(|entry| Suggestion {
                id: entry.id,
                name: entry.name.clone(),
                display_name: display_name(&entry.name),
                image: fallback_image_url(entry.id),
            })
            .collect())
    }

    /// Entries whose name starts with `query` or whose id contains it.
    ///
    /// `query` is expected to be trimmed and lowercased already.
    pub async fn prefix_matches(&self, query: &str) -> Result<Vec<RosterEntry>, ApiError> {
        let roster = self.roster().await?;
        Ok(roster
            .iter()
            .filter(|entry| {
                entry.name.to_lowercase().starts_with(query) || entry.id.to_string().contains(query)
            })
            .cloned()
            .collect())
    }
}

fn roster_entries(resources: Vec<NamedResource>) -> Vec<RosterEntry> {
    resources
        .into_iter()
        .enumerate()
        .map(|(index, resource)| RosterEntry {
            id: id_from_url(&resource.url).unwrap_or(index as u32 + 1),
            name: resource.name,
            url: resource.url,
        })
        .collect()
}

fn id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/').rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{listing_json, StubTransport, TEST_API_BASE};
    use serde_json::json;

    fn roster_url() -> String {
        format!("{TEST_API_BASE}/pokemon?limit={ROSTER_LIMIT}")
    }

    fn index_with(stub: StubTransport) -> (Arc<StubTransport>, SuggestionIndex) {
        let stub = Arc::new(stub);
        let gateway = Arc::new(Gateway::new(stub.clone(), TEST_API_BASE));
        (stub, SuggestionIndex::new(gateway))
    }

    fn starter_roster() -> StubTransport {
        StubTransport::new().with_json(
            roster_url(),
            listing_json(
                Some(1302),
                &[
                    (1, "bulbasaur"),
                    (2, "ivysaur"),
                    (3, "venusaur"),
                    (4, "charmander"),
                    (5, "charmeleon"),
                    (6, "charizard"),
                    (12, "butterfree"),
                    (25, "pikachu"),
                    (26, "raichu"),
                ],
            ),
        )
    }

    #[tokio::test]
    async fn short_queries_do_not_fetch() {
        let (stub, index) = index_with(starter_roster());

        assert!(index.suggestions("c", 8).await.unwrap().is_empty());
        assert!(index.suggestions("  p  ", 8).await.unwrap().is_empty());
        assert!(stub.requests().is_empty());
        assert!(!index.is_populated());
    }

    #[tokio::test]
    async fn matches_name_substring_and_id() {
        let (_, index) = index_with(starter_roster());

        let saurs = index.suggestions("SAUR", 8).await.unwrap();
        let names: Vec<_> = saurs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["bulbasaur", "ivysaur", "venusaur"]);

        let by_id = index.suggestions("25", 8).await.unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].display_name, "Pikachu");
        assert_eq!(by_id[0].image, fallback_image_url(25));
    }

    #[tokio::test]
    async fn results_are_capped_in_roster_order() {
        let (_, index) = index_with(starter_roster());
        let capped = index.suggestions("ar", 2).await.unwrap();
        let names: Vec<_> = capped.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["charmander", "charizard"]);
    }

    #[tokio::test]
    async fn roster_is_fetched_once() {
        let (stub, index) = index_with(starter_roster());

        index.suggestions("char", 8).await.unwrap();
        index.suggestions("pika", 8).await.unwrap();
        index.prefix_matches("bu").await.unwrap();

        assert_eq!(stub.request_count(&roster_url()), 1);
    }

    #[tokio::test]
    async fn concurrent_first_calls_share_one_fetch() {
        let (stub, index) = index_with(starter_roster());

        let (a, b) = tokio::join!(index.suggestions("char", 8), index.suggestions("chu", 8));

        assert_eq!(a.unwrap().len(), 3);
        assert_eq!(b.unwrap().len(), 2);
        assert_eq!(stub.request_count(&roster_url()), 1);
    }

    #[tokio::test]
    async fn failed_roster_fetch_is_retried_later() {
        let stub = StubTransport::new();
        let (stub, index) = index_with(stub);

        let error = index.suggestions("char", 8).await.unwrap_err();
        assert!(error.is_not_found());
        assert!(!index.is_populated());

        stub.insert(
            roster_url(),
            json!({ "results": [{ "name": "charmander", "url": format!("{TEST_API_BASE}/pokemon/4/") }] }),
        );
        let found = index.suggestions("char", 8).await.unwrap();
        assert_eq!(found[0].id, 4);
    }

    #[tokio::test]
    async fn prefix_matches_use_starts_with() {
        let (_, index) = index_with(starter_roster());

        let names: Vec<_> = index
            .prefix_matches("char")
            .await
            .unwrap()
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        assert_eq!(names, vec!["charmander", "charmeleon", "charizard"]);

        // "saur" is inside names but no name starts with it.
        assert!(index.prefix_matches("saur").await.unwrap().is_empty());
    }

    #[test]
    fn ids_come_from_urls_with_index_fallback() {
        let entries = roster_entries(vec![
            NamedResource {
                name: "deoxys-attack".into(),
                url: "https://pokeapi.co/api/v2/pokemon/10001/".into(),
            },
            NamedResource {
                name: "oddity".into(),
                url: "not-a-url".into(),
            },
        ]);
        assert_eq!(entries[0].id, 10001);
        assert_eq!(entries[1].id, 2);
    }
}
