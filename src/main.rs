mod ui;

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use dexquiz::action::Action;
use dexquiz::config::{ClientConfig, DexArgs};
use dexquiz::dex::Dex;
use dexquiz::effect::Effect;
use dexquiz::reducer::reducer;
use dexquiz::state::{AppState, Screen};
use dexquiz::suggest::SUGGESTION_LIMIT;

#[derive(Parser, Debug)]
#[command(name = "dexquiz")]
#[command(about = "Browse PokeAPI and play Who's that Pokémon? in the terminal")]
struct Args {
    #[command(flatten)]
    dex: DexArgs,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DexComponentId {
    DexList,
    Search,
    Detail,
    Quiz,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum DexContext {
    DexList,
    Search,
    Detail,
    Quiz,
}

impl EventRoutingState<DexComponentId, DexContext> for AppState {
    fn focused(&self) -> Option<DexComponentId> {
        if self.search.active {
            return Some(DexComponentId::Search);
        }
        match self.screen {
            Screen::Catalog => Some(DexComponentId::DexList),
            Screen::Detail => Some(DexComponentId::Detail),
            Screen::Quiz => Some(DexComponentId::Quiz),
        }
    }

    fn modal(&self) -> Option<DexComponentId> {
        if self.search.active {
            Some(DexComponentId::Search)
        } else {
            None
        }
    }

    fn binding_context(&self, id: DexComponentId) -> DexContext {
        match id {
            DexComponentId::DexList => DexContext::DexList,
            DexComponentId::Search => DexContext::Search,
            DexComponentId::Detail => DexContext::Detail,
            DexComponentId::Quiz => DexContext::Quiz,
        }
    }

    fn default_context(&self) -> DexContext {
        DexContext::DexList
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let _log_guard = dexquiz::logging::init(args.dex.log_dir.as_deref());
    let config = ClientConfig::from(&args.dex);
    tracing::info!(api_base = %config.api_base, "starting dexquiz");
    let dex = Arc::new(Dex::new(&config));

    let debug = DebugSession::new(args.debug);
    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::default()) })
        .await
        .map_err(debug_error)?;
    let replay_actions = debug.load_replay_items().map_err(debug_error)?;
    let (middleware, recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions, dex).await;

    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug.save_actions(recorder.as_ref()).map_err(debug_error)?;
    Ok(())
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
    dex: Arc<Dex>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ui::DexUi::new()));
    let mut bus: EventBus<AppState, Action, DexComponentId, DexContext> = EventBus::new();
    let keybindings: Keybindings<DexContext> = Keybindings::new();

    let ui_list = Rc::clone(&ui);
    bus.register(DexComponentId::DexList, move |event, state| {
        ui_list.borrow_mut().handle_list_event(&event.kind, state)
    });

    let ui_search = Rc::clone(&ui);
    bus.register(DexComponentId::Search, move |event, state| {
        ui_search.borrow_mut().handle_search_event(&event.kind, state)
    });

    let ui_detail = Rc::clone(&ui);
    bus.register(DexComponentId::Detail, move |event, state| {
        ui_detail.borrow_mut().handle_detail_event(&event.kind, state)
    });

    let ui_quiz = Rc::clone(&ui);
    bus.register(DexComponentId::Quiz, move |event, state| {
        ui_quiz.borrow_mut().handle_quiz_event(&event.kind, state)
    });

    bus.register_global(|event, state| match event.kind {
        EventKind::Resize(width, height) => {
            HandlerResponse::action(Action::UiTerminalResize(width, height)).with_render()
        }
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Char('q') if !state.search.active => {
                HandlerResponse::action(Action::Quit)
            }
            crossterm::event::KeyCode::Char('z')
                if !state.search.active && state.screen != Screen::Quiz =>
            {
                HandlerResponse::action(Action::QuizOpen)
            }
            _ => HandlerResponse::ignored(),
        },
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |runtime| {
                if debug.render_once() {
                    return;
                }
                runtime
                    .subscriptions()
                    .interval("tick", Duration::from_millis(120), || Action::Tick);
            },
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, dex.clone()),
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, dex: Arc<Dex>) {
    match effect {
        Effect::LoadListing {
            request,
            query,
            page,
        } => {
            ctx.tasks().spawn(TaskKey::new("listing"), async move {
                match dex.query(&query, page).await {
                    Ok(page) => Action::ListingDidLoad { request, page },
                    Err(err) => {
                        tracing::warn!(error = %err, ?query, "listing failed");
                        Action::ListingDidError {
                            request,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadTypes => {
            ctx.tasks().spawn(TaskKey::new("types"), async move {
                match dex.type_tags().await {
                    Ok(types) => Action::TypesDidLoad(types),
                    Err(err) => Action::TypesDidError(err.to_string()),
                }
            });
        }
        Effect::LoadSuggestions { query } => {
            ctx.tasks().spawn(TaskKey::new("suggestions"), async move {
                match dex.suggestions(&query, SUGGESTION_LIMIT).await {
                    Ok(suggestions) => Action::SearchSuggestionsDidLoad { query, suggestions },
                    Err(err) => {
                        tracing::warn!(error = %err, "suggestions unavailable");
                        Action::SearchSuggestionsDidError {
                            query,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
        Effect::LoadProfile { name } => {
            ctx.tasks().spawn(TaskKey::new("profile"), async move {
                match dex.profile(&name).await {
                    Ok(profile) => Action::DetailDidLoad(profile),
                    Err(err) => Action::DetailDidError {
                        name,
                        error: err.to_string(),
                    },
                }
            });
        }
        Effect::DrawRound { seq, generation } => {
            ctx.tasks().spawn(TaskKey::new("quiz_round"), async move {
                match dex.draw_round(generation).await {
                    Ok(round) => Action::QuizRoundDidLoad { seq, round },
                    Err(err) => {
                        tracing::warn!(error = %err, seq, "quiz draw exhausted");
                        Action::QuizRoundDidError {
                            seq,
                            error: err.to_string(),
                        }
                    }
                }
            });
        }
    }
}
