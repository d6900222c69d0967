use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::catalog::CatalogQuery;
use crate::effect::Effect;
use crate::model::Page;
use crate::state::{AppState, Screen, LISTING_ERROR_MESSAGE};
use crate::suggest::MIN_QUERY_LEN;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => DispatchResult::changed_with_many(vec![
            load_listing(state, 1),
            Effect::LoadTypes,
        ]),

        Action::ListingReload => {
            let page = state.requested_page;
            DispatchResult::changed_with(load_listing(state, page))
        }

        Action::ListingDidLoad { request, page } => {
            if request != state.list_request {
                return DispatchResult::unchanged();
            }
            state.page = page;
            state.list_loading = false;
            state.list_error = None;
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::ListingDidError { request, error } => {
            if request != state.list_request {
                return DispatchResult::unchanged();
            }
            state.page = Page::empty();
            state.requested_page = 1;
            state.list_loading = false;
            state.list_error = Some(LISTING_ERROR_MESSAGE.to_string());
            state.message = Some(error);
            state.selected_index = 0;
            DispatchResult::changed()
        }

        Action::PageNext => {
            if state.list_loading || !state.page.has_next() {
                return DispatchResult::unchanged();
            }
            let page = state.page.current_page + 1;
            DispatchResult::changed_with(load_listing(state, page))
        }

        Action::PagePrev => {
            if state.list_loading || !state.page.has_prev() {
                return DispatchResult::unchanged();
            }
            let page = state.page.current_page - 1;
            DispatchResult::changed_with(load_listing(state, page))
        }

        Action::SelectionMove(delta) => {
            let len = state.page.items.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = (state.selected_index as i32 + delta as i32).clamp(0, len as i32 - 1) as usize;
            select(state, next)
        }

        Action::DexSelect(index) => {
            if index >= state.page.items.len() {
                return DispatchResult::unchanged();
            }
            select(state, index)
        }

        Action::TypesDidLoad(types) => {
            state.types = types;
            DispatchResult::changed()
        }

        Action::TypesDidError(error) => {
            state.message = Some(format!("Type list unavailable: {error}"));
            DispatchResult::changed()
        }

        Action::TypeFilterNext => cycle_type(state, 1),
        Action::TypeFilterPrev => cycle_type(state, -1),

        Action::TypeFilterClear => {
            if state.query == CatalogQuery::All {
                return DispatchResult::unchanged();
            }
            state.query = CatalogQuery::All;
            DispatchResult::changed_with(load_listing(state, 1))
        }

        Action::SearchStart => {
            state.search.active = true;
            state.search.reset();
            if let CatalogQuery::Search(query) = &state.query {
                state.search.query = query.clone();
            }
            DispatchResult::changed()
        }

        Action::SearchCancel => {
            state.search.active = false;
            state.search.reset();
            DispatchResult::changed()
        }

        Action::SearchInput(ch) => {
            state.search.query.push(ch);
            search_query_changed(state)
        }

        Action::SearchBackspace => {
            if state.search.query.pop().is_none() {
                return DispatchResult::unchanged();
            }
            search_query_changed(state)
        }

        Action::SearchSuggestionMove(delta) => {
            let len = state.search.suggestions.len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let next = match state.search.selected {
                None if delta > 0 => Some(0),
                None => None,
                Some(current) => {
                    let moved = current as i32 + delta as i32;
                    if moved < 0 {
                        None
                    } else {
                        Some((moved as usize).min(len - 1))
                    }
                }
            };
            if next == state.search.selected {
                return DispatchResult::unchanged();
            }
            state.search.selected = next;
            DispatchResult::changed()
        }

        Action::SearchSuggestionsDidLoad { query, suggestions } => {
            if !state.search.active || query != state.search.query.trim() {
                return DispatchResult::unchanged();
            }
            state.search.suggestions = suggestions;
            state.search.selected = None;
            DispatchResult::changed()
        }

        Action::SearchSuggestionsDidError { query, .. } => {
            if query != state.search.query.trim() || state.search.suggestions.is_empty() {
                return DispatchResult::unchanged();
            }
            state.search.suggestions.clear();
            state.search.selected = None;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            let submitted = state.search.submission();
            state.search.active = false;
            state.search.reset();
            state.query = if submitted.is_empty() {
                CatalogQuery::All
            } else {
                CatalogQuery::Search(submitted)
            };
            DispatchResult::changed_with(load_listing(state, 1))
        }

        Action::DetailOpen => {
            let Some(name) = state.selected_creature().map(|creature| creature.name.clone()) else {
                return DispatchResult::unchanged();
            };
            state.screen = Screen::Detail;
            state.detail_name = Some(name.clone());
            state.detail = DataResource::Loading;
            DispatchResult::changed_with(Effect::LoadProfile { name })
        }

        Action::DetailClose => {
            if state.screen != Screen::Detail {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Catalog;
            DispatchResult::changed()
        }

        Action::DetailDidLoad(profile) => {
            if state.detail_name.as_deref() != Some(profile.creature.name.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Loaded(profile);
            DispatchResult::changed()
        }

        Action::DetailDidError { name, error } => {
            if state.detail_name.as_deref() != Some(name.as_str()) {
                return DispatchResult::unchanged();
            }
            state.detail = DataResource::Failed(error);
            DispatchResult::changed()
        }

        Action::QuizOpen => {
            state.screen = Screen::Quiz;
            DispatchResult::changed()
        }

        Action::QuizClose => {
            if state.screen != Screen::Quiz {
                return DispatchResult::unchanged();
            }
            state.screen = Screen::Catalog;
            state.quiz.restart();
            state.quiz_error = None;
            DispatchResult::changed()
        }

        Action::QuizStart(generation) => match state.quiz.start(generation) {
            Some(seq) => {
                state.quiz_error = None;
                DispatchResult::changed_with(Effect::DrawRound { seq, generation })
            }
            None => DispatchResult::unchanged(),
        },

        Action::QuizRoundDidLoad { seq, round } => {
            if state.quiz.round_ready(seq, round) {
                state.quiz_error = None;
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::QuizRoundDidError { seq, error } => {
            if !state.quiz.is_current_draw(seq) {
                return DispatchResult::unchanged();
            }
            state.quiz_error = Some(error);
            DispatchResult::changed()
        }

        Action::QuizAnswer(index) => {
            let Some(option_id) = state
                .quiz
                .round
                .as_ref()
                .and_then(|round| round.options.get(index))
                .map(|option| option.id)
            else {
                return DispatchResult::unchanged();
            };
            if state.quiz.answer(option_id).is_some() {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::QuizNext => {
            // Enter after an exhausted draw tries again.
            let seq = if state.quiz_error.is_some() {
                state.quiz.redraw()
            } else {
                state.quiz.next()
            };
            match seq {
                Some(seq) => {
                    state.quiz_error = None;
                    DispatchResult::changed_with(Effect::DrawRound {
                        seq,
                        generation: state.quiz.generation,
                    })
                }
                None => DispatchResult::unchanged(),
            }
        }

        Action::QuizRestart => {
            state.quiz.restart();
            state.quiz_error = None;
            DispatchResult::changed()
        }

        Action::UiTerminalResize(width, height) => {
            state.terminal_size = (width, height);
            DispatchResult::changed()
        }

        Action::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

fn load_listing(state: &mut AppState, page: u32) -> Effect {
    state.list_request += 1;
    state.list_loading = true;
    state.list_error = None;
    state.message = None;
    state.requested_page = page.max(1);
    Effect::LoadListing {
        request: state.list_request,
        query: state.query.clone(),
        page: state.requested_page,
    }
}

fn select(state: &mut AppState, index: usize) -> DispatchResult<Effect> {
    if index == state.selected_index {
        return DispatchResult::unchanged();
    }
    state.selected_index = index;
    DispatchResult::changed()
}

/// All -> first type -> ... -> last type -> All, in either direction.
fn cycle_type(state: &mut AppState, step: i32) -> DispatchResult<Effect> {
    if state.types.is_empty() {
        return DispatchResult::unchanged();
    }
    let slots = state.types.len() as i32 + 1;
    let current = state
        .active_type()
        .and_then(|tag| state.types.iter().position(|known| known == tag))
        .map(|index| index as i32 + 1)
        .unwrap_or(0);
    let next = (current + step).rem_euclid(slots);
    state.query = match next {
        0 => CatalogQuery::All,
        slot => CatalogQuery::Type(state.types[slot as usize - 1].clone()),
    };
    DispatchResult::changed_with(load_listing(state, 1))
}

fn search_query_changed(state: &mut AppState) -> DispatchResult<Effect> {
    state.search.selected = None;
    let query = state.search.query.trim().to_string();
    if query.chars().count() < MIN_QUERY_LEN {
        state.search.suggestions.clear();
        return DispatchResult::changed();
    }
    DispatchResult::changed_with(Effect::LoadSuggestions { query })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Creature, CreatureProfile, SpriteSet, Suggestion};
    use crate::quiz::{Generation, QuizOption, QuizPhase, QuizRound};

    fn creature(id: u32, name: &str) -> Creature {
        Creature {
            id,
            name: name.into(),
            types: vec!["fire".into()],
            image: format!("https://sprites.test/{id}.png"),
        }
    }

    fn loaded_state(names: &[&str]) -> AppState {
        let mut state = AppState::default();
        let items = names
            .iter()
            .enumerate()
            .map(|(idx, name)| creature(idx as u32 + 1, name))
            .collect();
        state.page = Page::new(items, 1, 60);
        state
    }

    fn round(correct: u32) -> QuizRound {
        QuizRound {
            target: creature(correct, "target"),
            options: [correct, 10, 11, 12]
                .into_iter()
                .map(|id| QuizOption {
                    id,
                    name: format!("mon{id}"),
                    is_correct: id == correct,
                })
                .collect(),
        }
    }

    #[test]
    fn test_init_loads_first_page_and_types() {
        let mut state = AppState::default();
        let result = reducer(&mut state, Action::Init);

        assert!(state.list_loading);
        assert_eq!(
            result.effects,
            vec![
                Effect::LoadListing {
                    request: 1,
                    query: CatalogQuery::All,
                    page: 1
                },
                Effect::LoadTypes,
            ]
        );
    }

    #[test]
    fn test_stale_listing_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::Init);
        reducer(&mut state, Action::ListingReload);
        assert_eq!(state.list_request, 2);

        let stale = reducer(
            &mut state,
            Action::ListingDidLoad {
                request: 1,
                page: Page::single(creature(1, "bulbasaur")),
            },
        );
        assert!(!stale.changed);
        assert!(state.list_loading);
        assert!(state.page.items.is_empty());
    }

    #[test]
    fn test_listing_error_resets_to_empty_first_page() {
        let mut state = loaded_state(&["charmander"]);
        reducer(&mut state, Action::PageNext);

        let request = state.list_request;
        reducer(
            &mut state,
            Action::ListingDidError {
                request,
                error: "request failed".into(),
            },
        );

        assert!(!state.list_loading);
        assert_eq!(state.page, Page::empty());
        assert_eq!(state.list_error.as_deref(), Some(LISTING_ERROR_MESSAGE));
    }

    #[test]
    fn test_paging_respects_bounds() {
        let mut state = loaded_state(&["a", "b"]);
        assert!(!reducer(&mut state, Action::PagePrev).changed);

        let result = reducer(&mut state, Action::PageNext);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadListing { page: 2, .. }]
        ));

        // Ignored while the previous request is in flight.
        assert!(!reducer(&mut state, Action::PageNext).changed);
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut state = loaded_state(&["a", "b", "c"]);
        reducer(&mut state, Action::SelectionMove(10));
        assert_eq!(state.selected_index, 2);
        reducer(&mut state, Action::SelectionMove(-10));
        assert_eq!(state.selected_index, 0);
        assert!(!reducer(&mut state, Action::DexSelect(3)).changed);
    }

    #[test]
    fn test_type_filter_cycles_through_all() {
        let mut state = AppState {
            types: vec!["fire".into(), "water".into()],
            ..Default::default()
        };

        reducer(&mut state, Action::TypeFilterNext);
        assert_eq!(state.query, CatalogQuery::Type("fire".into()));
        reducer(&mut state, Action::TypeFilterNext);
        assert_eq!(state.query, CatalogQuery::Type("water".into()));
        reducer(&mut state, Action::TypeFilterNext);
        assert_eq!(state.query, CatalogQuery::All);
        reducer(&mut state, Action::TypeFilterPrev);
        assert_eq!(state.query, CatalogQuery::Type("water".into()));

        let result = reducer(&mut state, Action::TypeFilterClear);
        assert_eq!(state.query, CatalogQuery::All);
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadListing { query: CatalogQuery::All, page: 1, .. }]
        ));
    }

    #[test]
    fn test_one_character_query_requests_no_suggestions() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchStart);

        let first = reducer(&mut state, Action::SearchInput('p'));
        assert!(first.effects.is_empty());

        let second = reducer(&mut state, Action::SearchInput('i'));
        assert_eq!(
            second.effects,
            vec![Effect::LoadSuggestions { query: "pi".into() }]
        );
    }

    #[test]
    fn test_outdated_suggestions_are_dropped() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchStart);
        for ch in "char".chars() {
            reducer(&mut state, Action::SearchInput(ch));
        }

        let stale = reducer(
            &mut state,
            Action::SearchSuggestionsDidLoad {
                query: "cha".into(),
                suggestions: Vec::new(),
            },
        );
        assert!(!stale.changed);
    }

    #[test]
    fn test_submit_uses_highlighted_suggestion() {
        let mut state = AppState::default();
        reducer(&mut state, Action::SearchStart);
        for ch in "pika".chars() {
            reducer(&mut state, Action::SearchInput(ch));
        }
        reducer(
            &mut state,
            Action::SearchSuggestionsDidLoad {
                query: "pika".into(),
                suggestions: vec![Suggestion {
                    id: 25,
                    name: "pikachu".into(),
                    display_name: "Pikachu".into(),
                    image: String::new(),
                }],
            },
        );
        reducer(&mut state, Action::SearchSuggestionMove(1));

        let result = reducer(&mut state, Action::SearchSubmit);

        assert!(!state.search.active);
        assert_eq!(state.query, CatalogQuery::Search("pikachu".into()));
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::LoadListing { page: 1, .. }]
        ));
    }

    #[test]
    fn test_empty_submit_returns_to_full_listing() {
        let mut state = AppState {
            query: CatalogQuery::Search("zzz".into()),
            ..Default::default()
        };
        reducer(&mut state, Action::SearchStart);
        for _ in 0..3 {
            reducer(&mut state, Action::SearchBackspace);
        }
        reducer(&mut state, Action::SearchSubmit);
        assert_eq!(state.query, CatalogQuery::All);
    }

    #[test]
    fn test_detail_ignores_other_profiles() {
        let mut state = loaded_state(&["bulbasaur", "ivysaur"]);
        let result = reducer(&mut state, Action::DetailOpen);
        assert_eq!(
            result.effects,
            vec![Effect::LoadProfile {
                name: "bulbasaur".into()
            }]
        );
        assert_eq!(state.screen, Screen::Detail);

        let other = CreatureProfile {
            creature: creature(2, "ivysaur"),
            height: None,
            weight: None,
            base_experience: None,
            abilities: Vec::new(),
            stats: Vec::new(),
            sprites: SpriteSet::default(),
            description: String::new(),
            genus: String::new(),
            capture_rate: None,
            growth_rate: None,
            habitat: String::new(),
            generation: None,
        };
        assert!(!reducer(&mut state, Action::DetailDidLoad(other)).changed);
        assert!(state.detail.is_loading());
    }

    #[test]
    fn test_quiz_round_flow() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuizOpen);
        let result = reducer(&mut state, Action::QuizStart(Some(Generation::Kanto)));
        let seq = state.quiz.round_seq;
        assert_eq!(
            result.effects,
            vec![Effect::DrawRound {
                seq,
                generation: Some(Generation::Kanto)
            }]
        );

        reducer(&mut state, Action::QuizRoundDidLoad { seq, round: round(7) });
        assert_eq!(state.quiz.phase, QuizPhase::InRound);

        let correct_index = state
            .quiz
            .round
            .as_ref()
            .and_then(|round| round.options.iter().position(|o| o.is_correct))
            .unwrap();
        reducer(&mut state, Action::QuizAnswer(correct_index));
        assert_eq!(state.quiz.score, 1);
        assert!(!reducer(&mut state, Action::QuizAnswer(0)).changed);

        let next = reducer(&mut state, Action::QuizNext);
        assert!(matches!(
            next.effects.as_slice(),
            [Effect::DrawRound { generation: Some(Generation::Kanto), .. }]
        ));
    }

    #[test]
    fn test_round_after_restart_is_ignored() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuizStart(None));
        let seq = state.quiz.round_seq;
        reducer(&mut state, Action::QuizRestart);

        let result = reducer(&mut state, Action::QuizRoundDidLoad { seq, round: round(3) });
        assert!(!result.changed);
        assert_eq!(state.quiz.phase, QuizPhase::NotStarted);
    }

    #[test]
    fn test_leaving_quiz_discards_session_and_pending_round() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuizOpen);
        reducer(&mut state, Action::QuizStart(Some(Generation::Kanto)));
        let seq = state.quiz.round_seq;

        assert!(reducer(&mut state, Action::QuizClose).changed);
        assert_eq!(state.screen, Screen::Catalog);

        let late = reducer(&mut state, Action::QuizRoundDidLoad { seq, round: round(4) });
        assert!(!late.changed);
        assert_eq!(state.quiz.phase, QuizPhase::NotStarted);
        assert_eq!(state.quiz.round, None);
    }

    #[test]
    fn test_reopened_quiz_starts_fresh() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuizOpen);
        reducer(&mut state, Action::QuizStart(Some(Generation::Kanto)));
        let seq = state.quiz.round_seq;
        reducer(&mut state, Action::QuizRoundDidLoad { seq, round: round(7) });
        let correct_index = state
            .quiz
            .round
            .as_ref()
            .and_then(|round| round.options.iter().position(|o| o.is_correct))
            .unwrap();
        reducer(&mut state, Action::QuizAnswer(correct_index));
        assert_eq!(state.quiz.score, 1);

        reducer(&mut state, Action::QuizClose);
        reducer(&mut state, Action::QuizOpen);

        assert_eq!(state.quiz.phase, QuizPhase::NotStarted);
        assert_eq!((state.quiz.score, state.quiz.answered), (0, 0));
        assert_eq!(state.quiz.generation, None);
        assert!(state.quiz_error.is_none());
    }

    #[test]
    fn test_exhausted_draw_retries_on_next() {
        let mut state = AppState::default();
        reducer(&mut state, Action::QuizStart(Some(Generation::Hoenn)));
        let seq = state.quiz.round_seq;
        reducer(
            &mut state,
            Action::QuizRoundDidError {
                seq,
                error: "gave up".into(),
            },
        );
        assert!(state.quiz_error.is_some());

        let result = reducer(&mut state, Action::QuizNext);
        assert!(state.quiz_error.is_none());
        assert!(matches!(
            result.effects.as_slice(),
            [Effect::DrawRound { seq: retry, .. }] if *retry > seq
        ));
    }
}
