use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;
use tui_dispatch_debug::debug::{ron_string, DebugSection, DebugState};

use crate::catalog::CatalogQuery;
use crate::model::{Creature, CreatureProfile, Page, Suggestion};
use crate::quiz::{QuizPhase, QuizSession};

pub const LISTING_ERROR_MESSAGE: &str =
    "Could not load Pokémon. Check your connection and press r to retry.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Catalog,
    Detail,
    Quiz,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// Highlighted suggestion; `None` submits the typed query.
    pub selected: Option<usize>,
}

impl SearchState {
    pub fn reset(&mut self) {
        self.query.clear();
        self.suggestions.clear();
        self.selected = None;
    }

    /// What a submit would search for right now.
    pub fn submission(&self) -> String {
        self.selected
            .and_then(|index| self.suggestions.get(index))
            .map(|suggestion| suggestion.name.clone())
            .unwrap_or_else(|| self.query.trim().to_string())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub screen: Screen,

    pub query: CatalogQuery,
    pub page: Page<Creature>,
    /// Page the latest listing request asked for.
    pub requested_page: u32,
    pub list_request: u64,
    pub list_loading: bool,
    pub list_error: Option<String>,
    pub selected_index: usize,

    pub types: Vec<String>,
    pub search: SearchState,

    pub detail_name: Option<String>,
    pub detail: DataResource<CreatureProfile>,

    pub quiz: QuizSession,
    pub quiz_error: Option<String>,

    pub message: Option<String>,
    pub tick: u32,
    pub terminal_size: (u16, u16),
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Catalog,
            query: CatalogQuery::All,
            page: Page::empty(),
            requested_page: 1,
            list_request: 0,
            list_loading: false,
            list_error: None,
            selected_index: 0,
            types: Vec::new(),
            search: SearchState::default(),
            detail_name: None,
            detail: DataResource::Empty,
            quiz: QuizSession::new(),
            quiz_error: None,
            message: None,
            tick: 0,
            terminal_size: (0, 0),
        }
    }
}

impl AppState {
    pub fn selected_creature(&self) -> Option<&Creature> {
        self.page.items.get(self.selected_index)
    }

    pub fn active_type(&self) -> Option<&str> {
        match &self.query {
            CatalogQuery::Type(tag) => Some(tag.as_str()),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.list_loading
            || self.detail.is_loading()
            || (self.quiz.phase == QuizPhase::Drawing && self.quiz_error.is_none())
    }
}

impl DebugState for AppState {
    fn debug_sections(&self) -> Vec<DebugSection> {
        vec![
            DebugSection::new("Catalog")
                .entry("screen", ron_string(&self.screen))
                .entry("query", ron_string(&self.query))
                .entry("page", ron_string(&self.page.current_page))
                .entry("total_pages", ron_string(&self.page.total_pages))
                .entry("total_count", ron_string(&self.page.total_count))
                .entry("items", ron_string(&self.page.items.len()))
                .entry("selected", ron_string(&self.selected_index))
                .entry("types", ron_string(&self.types.len())),
            DebugSection::new("Search")
                .entry("active", ron_string(&self.search.active))
                .entry("query", ron_string(&self.search.query))
                .entry("suggestions", ron_string(&self.search.suggestions.len()))
                .entry("selected", ron_string(&self.search.selected)),
            DebugSection::new("Quiz")
                .entry("phase", ron_string(&self.quiz.phase))
                .entry("generation", ron_string(&self.quiz.generation))
                .entry("score", ron_string(&self.quiz.score))
                .entry("answered", ron_string(&self.quiz.answered))
                .entry("round_seq", ron_string(&self.quiz.round_seq))
                .entry("error", ron_string(&self.quiz_error)),
            DebugSection::new("Status")
                .entry("list_request", ron_string(&self.list_request))
                .entry("list_loading", ron_string(&self.list_loading))
                .entry("list_error", ron_string(&self.list_error))
                .entry("detail", ron_string(&self.detail_name))
                .entry("detail_loading", ron_string(&self.detail.is_loading()))
                .entry("message", ron_string(&self.message)),
        ]
    }
}
