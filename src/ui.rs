use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tui_dispatch::{Component, EventContext, EventKind, HandlerResponse, RenderContext};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Padding, SelectList, SelectListBehavior, SelectListProps,
    SelectListStyle, SelectionStyle, StatusBar, StatusBarHint, StatusBarItem, StatusBarProps,
    StatusBarSection, StatusBarStyle,
};

use dexquiz::action::Action;
use dexquiz::model::{CreatureProfile, Stat};
use dexquiz::normalize::{display_name, format_label};
use dexquiz::quiz::{Generation, QuizPhase, QuizSession};
use dexquiz::state::{AppState, Screen};
use tui_dispatch::DataResource;

use crate::DexComponentId;

const BG_BASE: Color = Color::Rgb(14, 16, 26);
const BG_PANEL: Color = Color::Rgb(24, 28, 44);
const BG_HIGHLIGHT: Color = Color::Rgb(120, 36, 44);
const TEXT_MAIN: Color = Color::Rgb(238, 238, 242);
const TEXT_DIM: Color = Color::Rgb(168, 172, 190);
const ACCENT_RED: Color = Color::Rgb(230, 72, 72);
const ACCENT_GOLD: Color = Color::Rgb(244, 196, 64);
const ACCENT_GREEN: Color = Color::Rgb(96, 204, 120);

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct DexUi {
    dex_list: SelectList,
    status_bar: StatusBar,
}

impl DexUi {
    pub fn new() -> Self {
        Self {
            dex_list: SelectList::new(),
            status_bar: StatusBar::new(),
        }
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        _render_ctx: RenderContext,
        event_ctx: &mut EventContext<DexComponentId>,
    ) {
        let base = Block::default().style(Style::default().bg(BG_BASE));
        frame.render_widget(base, area);
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        render_header(frame, layout[0], state);
        match state.screen {
            Screen::Catalog => {
                render_catalog(frame, layout[1], state, event_ctx, &mut self.dex_list)
            }
            Screen::Detail => render_detail(frame, layout[1], state, event_ctx),
            Screen::Quiz => render_quiz(frame, layout[1], state, event_ctx),
        }
        render_footer(frame, layout[2], state, &mut self.status_bar);

        if state.search.active {
            let modal_area = centered_rect(60, 14, area);
            event_ctx.set_component_area(DexComponentId::Search, modal_area);
            render_search(frame, modal_area, state);
        } else {
            event_ctx.component_areas.remove(&DexComponentId::Search);
        }
    }

    pub fn handle_list_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_list_event(event, state, &mut self.dex_list)
    }

    pub fn handle_search_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_search_event(event, state)
    }

    pub fn handle_detail_event(
        &mut self,
        event: &EventKind,
        _state: &AppState,
    ) -> HandlerResponse<Action> {
        let actions = match event {
            EventKind::Key(key) => match key.code {
                crossterm::event::KeyCode::Esc | crossterm::event::KeyCode::Backspace => {
                    vec![Action::DetailClose]
                }
                _ => vec![],
            },
            _ => vec![],
        };
        handler_response(actions)
    }

    pub fn handle_quiz_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        handle_quiz_event(event, &state.quiz, state.quiz_error.is_some())
    }
}

pub fn handle_list_event(
    event: &EventKind,
    state: &AppState,
    dex_list: &mut SelectList,
) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Enter => vec![Action::DetailOpen],
            crossterm::event::KeyCode::Char('n') => vec![Action::PageNext],
            crossterm::event::KeyCode::Char('p') => vec![Action::PagePrev],
            crossterm::event::KeyCode::Char('[') => vec![Action::TypeFilterPrev],
            crossterm::event::KeyCode::Char(']') => vec![Action::TypeFilterNext],
            crossterm::event::KeyCode::Char('c') => vec![Action::TypeFilterClear],
            crossterm::event::KeyCode::Char('/') => vec![Action::SearchStart],
            crossterm::event::KeyCode::Char('r') => vec![Action::ListingReload],
            _ => {
                let items = dex_items(state);
                let props = SelectListProps {
                    items: &items,
                    count: items.len(),
                    selected: state.selected_index.min(items.len().saturating_sub(1)),
                    is_focused: true,
                    style: dex_list_style(),
                    behavior: SelectListBehavior {
                        show_scrollbar: true,
                        wrap_navigation: false,
                    },
                    on_select: Action::DexSelect,
                    render_item: &|item| item.clone(),
                };
                let actions: Vec<_> = dex_list.handle_event(event, props).into_iter().collect();
                return handler_response(actions);
            }
        },
        EventKind::Scroll { delta, .. } => vec![Action::SelectionMove((*delta * 3) as i16)],
        _ => vec![],
    };
    handler_response(actions)
}

pub fn handle_search_event(event: &EventKind, _state: &AppState) -> HandlerResponse<Action> {
    let actions = match event {
        EventKind::Key(key) => match key.code {
            crossterm::event::KeyCode::Esc => vec![Action::SearchCancel],
            crossterm::event::KeyCode::Enter => vec![Action::SearchSubmit],
            crossterm::event::KeyCode::Backspace => vec![Action::SearchBackspace],
            crossterm::event::KeyCode::Down => vec![Action::SearchSuggestionMove(1)],
            crossterm::event::KeyCode::Up => vec![Action::SearchSuggestionMove(-1)],
            crossterm::event::KeyCode::Char(ch) => vec![Action::SearchInput(ch)],
            _ => vec![],
        },
        _ => vec![],
    };
    handler_response(actions)
}

fn handle_quiz_event(
    event: &EventKind,
    quiz: &QuizSession,
    draw_failed: bool,
) -> HandlerResponse<Action> {
    let EventKind::Key(key) = event else {
        return HandlerResponse::ignored();
    };
    let digit = match key.code {
        crossterm::event::KeyCode::Char(ch) => ch.to_digit(10),
        _ => None,
    };
    let actions = match (quiz.phase, key.code) {
        (_, crossterm::event::KeyCode::Esc) => vec![Action::QuizClose],
        (_, crossterm::event::KeyCode::Char('x')) => vec![Action::QuizRestart],
        (QuizPhase::NotStarted, _) => match digit {
            Some(0) => vec![Action::QuizStart(None)],
            Some(number) => Generation::from_number(number as u8)
                .map(|gen| vec![Action::QuizStart(Some(gen))])
                .unwrap_or_default(),
            None => vec![],
        },
        (QuizPhase::InRound, _) => match digit {
            Some(number @ 1..=4) => vec![Action::QuizAnswer(number as usize - 1)],
            _ => vec![],
        },
        (QuizPhase::RoundResolved, crossterm::event::KeyCode::Enter) => vec![Action::QuizNext],
        (QuizPhase::Drawing, crossterm::event::KeyCode::Enter) if draw_failed => {
            vec![Action::QuizNext]
        }
        _ => vec![],
    };
    handler_response(actions)
}

fn handler_response(actions: Vec<Action>) -> HandlerResponse<Action> {
    if actions.is_empty() {
        HandlerResponse::ignored()
    } else {
        HandlerResponse {
            actions,
            consumed: true,
            needs_render: false,
        }
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let title_style = Style::default()
        .fg(ACCENT_RED)
        .add_modifier(Modifier::BOLD);
    let page = &state.page;
    let spinner = if state.is_busy() {
        SPINNER[state.tick as usize % SPINNER.len()]
    } else {
        " "
    };
    let line = Line::from(vec![
        Span::styled("DEXQUIZ", title_style),
        Span::raw("  |  "),
        Span::styled(state.query.label(), Style::default().fg(ACCENT_GOLD)),
        Span::raw("  |  Page "),
        Span::styled(
            format!("{}/{}", page.current_page, page.total_pages.max(1)),
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::raw("  |  Total "),
        Span::styled(page.total_count.to_string(), Style::default().fg(ACCENT_GOLD)),
        Span::raw("  "),
        Span::styled(spinner, Style::default().fg(TEXT_DIM)),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_catalog(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
    dex_list: &mut SelectList,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    event_ctx.set_component_area(DexComponentId::DexList, layout[0]);
    let block = panel("DEX");
    let inner = block.inner(layout[0]);
    frame.render_widget(block, layout[0]);

    if let Some(error) = state.list_error.as_deref() {
        frame.render_widget(
            Paragraph::new(error)
                .style(Style::default().fg(ACCENT_RED))
                .wrap(Wrap { trim: true }),
            inner,
        );
    } else if state.page.items.is_empty() && !state.list_loading {
        frame.render_widget(
            Paragraph::new("No Pokémon found.").style(Style::default().fg(TEXT_DIM)),
            inner,
        );
    } else {
        let items = dex_items(state);
        let props = SelectListProps {
            items: &items,
            count: items.len(),
            selected: state.selected_index.min(items.len().saturating_sub(1)),
            is_focused: !state.search.active,
            style: dex_list_style(),
            behavior: SelectListBehavior {
                show_scrollbar: true,
                wrap_navigation: false,
            },
            on_select: Action::DexSelect,
            render_item: &|item| item.clone(),
        };
        dex_list.render(frame, inner, props);
    }

    let preview = match state.selected_creature() {
        Some(creature) => Text::from(vec![
            Line::from(Span::styled(
                format!("#{:04} {}", creature.id, display_name(&creature.name)),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Types: {}", type_list(&creature.types))),
            Line::from(""),
            Line::from(Span::styled(
                creature.image.clone(),
                Style::default().fg(TEXT_DIM),
            )),
        ]),
        None => Text::from(""),
    };
    frame.render_widget(
        Paragraph::new(preview)
            .block(panel("PREVIEW"))
            .wrap(Wrap { trim: true }),
        layout[1],
    );
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
) {
    event_ctx.set_component_area(DexComponentId::Detail, area);
    let title = state
        .detail_name
        .as_deref()
        .map(format_label)
        .unwrap_or_else(|| "DETAIL".to_string());
    let text = match &state.detail {
        DataResource::Loaded(profile) => profile_text(profile),
        DataResource::Failed(error) => Text::from(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(ACCENT_RED),
        ))),
        DataResource::Loading | DataResource::Empty => Text::from("Loading..."),
    };
    frame.render_widget(
        Paragraph::new(text)
            .block(panel(&title))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn profile_text(profile: &CreatureProfile) -> Text<'static> {
    let label = Style::default().fg(TEXT_DIM);
    let value = Style::default().fg(TEXT_MAIN);
    let creature = &profile.creature;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("#{:04} {}", creature.id, display_name(&creature.name)),
                Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", profile.genus), label),
        ]),
        Line::from(vec![
            Span::styled("Types: ", label),
            Span::styled(type_list(&creature.types), value),
        ]),
        Line::from(vec![
            Span::styled("Height: ", label),
            Span::styled(decimetres(profile.height), value),
            Span::styled("  Weight: ", label),
            Span::styled(hectograms(profile.weight), value),
            Span::styled("  Base XP: ", label),
            Span::styled(optional(profile.base_experience), value),
        ]),
        Line::from(""),
        Line::from(Span::styled(profile.description.clone(), value)),
        Line::from(""),
        Line::from(Span::styled("Abilities", label)),
    ];
    lines.extend(profile.abilities.iter().map(|ability| {
        let hidden = if ability.is_hidden { " (hidden)" } else { "" };
        Line::from(format!("  {}{hidden}", format_label(&ability.name)))
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Base stats", label)));
    lines.extend(profile.stats.iter().map(|stat| Line::from(render_stat(stat))));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Capture rate: ", label),
        Span::styled(optional(profile.capture_rate), value),
        Span::styled("  Growth: ", label),
        Span::styled(
            profile
                .growth_rate
                .as_deref()
                .map(format_label)
                .unwrap_or_else(|| "-".to_string()),
            value,
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Habitat: ", label),
        Span::styled(format_label(&profile.habitat), value),
        Span::styled("  Generation: ", label),
        Span::styled(
            profile
                .generation
                .as_deref()
                .map(generation_label)
                .unwrap_or_else(|| "-".to_string()),
            value,
        ),
    ]));
    Text::from(lines)
}

fn render_quiz(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    event_ctx: &mut EventContext<DexComponentId>,
) {
    event_ctx.set_component_area(DexComponentId::Quiz, area);
    let quiz = &state.quiz;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Score ", Style::default().fg(TEXT_DIM)),
            Span::styled(quiz.score.to_string(), Style::default().fg(ACCENT_GOLD)),
            Span::styled("  Answered ", Style::default().fg(TEXT_DIM)),
            Span::styled(quiz.answered.to_string(), Style::default().fg(ACCENT_GOLD)),
            Span::styled("  Accuracy ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!("{}%", quiz.accuracy()),
                Style::default().fg(ACCENT_GOLD),
            ),
            Span::styled("  Region ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                quiz.generation
                    .map(|gen| gen.label().to_string())
                    .unwrap_or_else(|| "All".to_string()),
                Style::default().fg(ACCENT_GOLD),
            ),
        ]),
        Line::from(""),
    ];

    match quiz.phase {
        QuizPhase::NotStarted => {
            lines.push(Line::from("Choose a generation:"));
            lines.push(Line::from("  0  All generations"));
            lines.extend(Generation::ALL.iter().map(|gen| {
                let range = gen.range();
                Line::from(format!(
                    "  {}  {:<8} #{}-#{}",
                    gen.number(),
                    gen.label(),
                    range.start(),
                    range.end()
                ))
            }));
        }
        QuizPhase::Drawing => match state.quiz_error.as_deref() {
            Some(error) => {
                lines.push(Line::from(Span::styled(
                    error.to_string(),
                    Style::default().fg(ACCENT_RED),
                )));
                lines.push(Line::from("Press Enter to try again."));
            }
            None => lines.push(Line::from(format!(
                "Drawing a Pokémon {}",
                SPINNER[state.tick as usize % SPINNER.len()]
            ))),
        },
        QuizPhase::InRound | QuizPhase::RoundResolved => {
            if let Some(round) = quiz.round.as_ref() {
                let resolved = quiz.phase == QuizPhase::RoundResolved;
                let heading = if resolved {
                    format!("It's {}!", display_name(&round.target.name))
                } else {
                    "Who's that Pokémon?".to_string()
                };
                lines.push(Line::from(Span::styled(
                    heading,
                    Style::default().fg(ACCENT_GOLD).add_modifier(Modifier::BOLD),
                )));
                lines.push(Line::from(""));
                for (index, option) in round.options.iter().enumerate() {
                    let style = if !resolved {
                        Style::default().fg(TEXT_MAIN)
                    } else if option.is_correct {
                        Style::default().fg(ACCENT_GREEN).add_modifier(Modifier::BOLD)
                    } else if quiz.selected == Some(option.id) {
                        Style::default().fg(ACCENT_RED)
                    } else {
                        Style::default().fg(TEXT_DIM)
                    };
                    lines.push(Line::from(Span::styled(
                        format!("  {}  {}", index + 1, display_name(&option.name)),
                        style,
                    )));
                }
                if resolved {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        round.target.image.clone(),
                        Style::default().fg(TEXT_DIM),
                    )));
                }
            }
        }
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(panel("QUIZ"))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Clear, area);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("/", Style::default().fg(ACCENT_GOLD)),
            Span::styled(
                format!("{}_", state.search.query),
                Style::default().fg(TEXT_MAIN),
            ),
        ]),
        Line::from(""),
    ];
    lines.extend(
        state
            .search
            .suggestions
            .iter()
            .enumerate()
            .map(|(index, suggestion)| {
                let style = if state.search.selected == Some(index) {
                    Style::default().bg(BG_HIGHLIGHT).fg(TEXT_MAIN)
                } else {
                    Style::default().fg(TEXT_DIM)
                };
                Line::from(Span::styled(
                    format!("#{:04} {}", suggestion.id, suggestion.display_name),
                    style,
                ))
            }),
    );
    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(panel("SEARCH")),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, status_bar: &mut StatusBar) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.list_loading {
            "Loading Pokémon...".to_string()
        } else if state.detail.is_loading() {
            "Loading details...".to_string()
        } else {
            String::new()
        }
    });
    let hints = status_hints(state);
    let global = vec![StatusBarHint::new("z", "Quiz"), StatusBarHint::new("q", "Quit")];
    let status_span = Span::styled(status.as_str(), Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(TEXT_DIM),
                focused_style: Some(Style::default().fg(ACCENT_RED)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_RED)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&hints).with_separator("  "),
        center: StatusBarSection::hints(&global).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    Component::<Action>::render(status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> Vec<StatusBarHint<'static>> {
    if state.search.active {
        return vec![
            StatusBarHint::new("Enter", "Search"),
            StatusBarHint::new("Up/Down", "Pick"),
            StatusBarHint::new("Esc", "Cancel"),
        ];
    }
    match state.screen {
        Screen::Catalog => vec![
            StatusBarHint::new("j/k", "Move"),
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("n/p", "Page"),
            StatusBarHint::new("[/]", "Type"),
            StatusBarHint::new("c", "Clear"),
            StatusBarHint::new("/", "Search"),
            StatusBarHint::new("r", "Reload"),
        ],
        Screen::Detail => vec![StatusBarHint::new("Esc", "Back")],
        Screen::Quiz => match state.quiz.phase {
            QuizPhase::NotStarted => vec![
                StatusBarHint::new("0-9", "Generation"),
                StatusBarHint::new("Esc", "Back"),
            ],
            QuizPhase::InRound => vec![
                StatusBarHint::new("1-4", "Answer"),
                StatusBarHint::new("x", "Restart"),
                StatusBarHint::new("Esc", "Back"),
            ],
            QuizPhase::RoundResolved | QuizPhase::Drawing => vec![
                StatusBarHint::new("Enter", "Next"),
                StatusBarHint::new("x", "Restart"),
                StatusBarHint::new("Esc", "Back"),
            ],
        },
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(TEXT_DIM))
}

fn dex_items(state: &AppState) -> Vec<Line<'static>> {
    state
        .page
        .items
        .iter()
        .map(|creature| {
            Line::from(format!(
                "#{:04} {:<14} {}",
                creature.id,
                display_name(&creature.name),
                creature.types.join("/")
            ))
        })
        .collect()
}

fn dex_list_style() -> SelectListStyle {
    SelectListStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::xy(1, 0),
            bg: None,
            fg: Some(TEXT_MAIN),
        },
        selection: SelectionStyle {
            style: Some(
                Style::default()
                    .bg(BG_HIGHLIGHT)
                    .fg(TEXT_MAIN)
                    .add_modifier(Modifier::BOLD),
            ),
            marker: None,
            disabled: false,
        },
        ..SelectListStyle::default()
    }
}

fn type_list(types: &[String]) -> String {
    types
        .iter()
        .map(|tag| display_name(tag))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn render_stat(stat: &Stat) -> String {
    let bar_len = (stat.base_stat as usize / 10).clamp(1, 20);
    let effort = if stat.effort > 0 {
        format!("  +{} EV", stat.effort)
    } else {
        String::new()
    };
    format!(
        "  {:>4} {:>3} {}{effort}",
        shorten_stat(&stat.name),
        stat.base_stat,
        "#".repeat(bar_len)
    )
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SATK".to_string(),
        "special-defense" => "SDEF".to_string(),
        "speed" => "SPD".to_string(),
        other => format_label(other),
    }
}

/// `generation-iv` -> `Generation IV`.
fn generation_label(name: &str) -> String {
    match name.split_once('-') {
        Some((_, numeral)) => format!("Generation {}", numeral.to_ascii_uppercase()),
        None => format_label(name),
    }
}

fn decimetres(value: Option<u32>) -> String {
    value
        .map(|dm| format!("{:.1} m", dm as f32 / 10.0))
        .unwrap_or_else(|| "-".to_string())
}

fn hectograms(value: Option<u32>) -> String {
    value
        .map(|hg| format!("{:.1} kg", hg as f32 / 10.0))
        .unwrap_or_else(|| "-".to_string())
}

fn optional(value: Option<u32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
