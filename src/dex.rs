use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::Gateway;
use crate::catalog::{Catalog, CatalogQuery};
use crate::config::ClientConfig;
use crate::error::{ApiError, QuizError};
use crate::model::{Creature, CreatureProfile, Page, Suggestion};
use crate::quiz::{Generation, QuizEngine, QuizRound};
use crate::suggest::SuggestionIndex;
use crate::transport::{HttpTransport, Transport};

/// The services the front-end talks to, wired over one shared gateway.
pub struct Dex {
    catalog: Catalog,
    suggestions: Arc<SuggestionIndex>,
    quiz: QuizEngine,
}

impl Dex {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()), config)
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        let gateway = Arc::new(Gateway::new(transport, config.api_base.clone()));
        let suggestions = Arc::new(SuggestionIndex::new(gateway.clone()));
        let catalog = Catalog::new(gateway.clone(), suggestions.clone())
            .with_detail_concurrency(config.detail_concurrency);
        let quiz = QuizEngine::new(gateway, config.draw);
        Self {
            catalog,
            suggestions,
            quiz,
        }
    }

    pub async fn query(&self, query: &CatalogQuery, page: u32) -> Result<Page<Creature>, ApiError> {
        self.catalog.query(query, page).await
    }

    pub async fn type_tags(&self) -> Result<Vec<String>, ApiError> {
        self.catalog.type_tags().await
    }

    pub async fn profile(&self, id_or_name: &str) -> Result<CreatureProfile, ApiError> {
        self.catalog.profile(id_or_name).await
    }

    pub async fn suggestions(&self, query: &str, limit: usize) -> Result<Vec<Suggestion>, ApiError> {
        self.suggestions.suggestions(query, limit).await
    }

    pub async fn draw_round(&self, generation: Option<Generation>) -> Result<QuizRound, QuizError> {
        let mut rng = StdRng::from_os_rng();
        self.quiz.draw_round(generation, &mut rng).await
    }
}
