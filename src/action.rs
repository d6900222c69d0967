use serde::{Deserialize, Serialize};

use crate::model::{Creature, CreatureProfile, Page, Suggestion};
use crate::quiz::{Generation, QuizRound};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[action(infer_categories)]
pub enum Action {
    Init,

    ListingReload,
    ListingDidLoad { request: u64, page: Page<Creature> },
    ListingDidError { request: u64, error: String },

    PageNext,
    PagePrev,
    SelectionMove(i16),
    DexSelect(usize),

    TypesDidLoad(Vec<String>),
    TypesDidError(String),
    TypeFilterNext,
    TypeFilterPrev,
    TypeFilterClear,

    SearchStart,
    SearchCancel,
    SearchSubmit,
    SearchInput(char),
    SearchBackspace,
    SearchSuggestionMove(i16),
    SearchSuggestionsDidLoad { query: String, suggestions: Vec<Suggestion> },
    SearchSuggestionsDidError { query: String, error: String },

    DetailOpen,
    DetailClose,
    DetailDidLoad(CreatureProfile),
    DetailDidError { name: String, error: String },

    QuizOpen,
    QuizClose,
    QuizStart(Option<Generation>),
    QuizAnswer(usize),
    QuizNext,
    QuizRestart,
    QuizRoundDidLoad { seq: u64, round: QuizRound },
    QuizRoundDidError { seq: u64, error: String },

    UiTerminalResize(u16, u16),
    Tick,
    Quit,
}
