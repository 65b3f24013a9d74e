use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
    Frame,
};
use tui_dispatch::{Component, EventKind, EventOutcome};
use tui_dispatch_components::style::BorderStyle;
use tui_dispatch_components::{
    centered_rect, BaseStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, StatusBar,
    StatusBarHint, StatusBarItem, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use crate::action::Action;
use crate::state::{display_name, AppState, FocusArea, LoadPhase, PokemonRecord, PopupTab};

const BG_BASE: Color = Color::Rgb(16, 20, 30);
const BG_PANEL: Color = Color::Rgb(24, 30, 44);
const BG_PANEL_ALT: Color = Color::Rgb(32, 40, 58);
const TEXT_MAIN: Color = Color::Rgb(230, 238, 244);
const TEXT_DIM: Color = Color::Rgb(164, 178, 194);
const ACCENT_RED: Color = Color::Rgb(236, 106, 94);
const ACCENT_GOLD: Color = Color::Rgb(228, 184, 96);
const ACCENT_TEAL: Color = Color::Rgb(88, 196, 180);
const BORDER_DIM: Color = Color::Rgb(70, 82, 102);
const HIGHLIGHT_BG: Color = Color::Rgb(44, 84, 108);

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 5;
const TRAY_WIDTH: u16 = 32;

fn type_color(name: &str) -> Color {
    match name {
        "normal" => Color::Rgb(168, 168, 120),
        "fire" => Color::Rgb(240, 128, 48),
        "water" => Color::Rgb(104, 144, 240),
        "electric" => Color::Rgb(248, 208, 48),
        "grass" => Color::Rgb(120, 200, 80),
        "ice" => Color::Rgb(152, 216, 216),
        "fighting" => Color::Rgb(192, 48, 40),
        "poison" => Color::Rgb(160, 64, 160),
        "ground" => Color::Rgb(224, 192, 104),
        "flying" => Color::Rgb(168, 144, 240),
        "psychic" => Color::Rgb(248, 88, 136),
        "bug" => Color::Rgb(168, 184, 32),
        "rock" => Color::Rgb(184, 160, 56),
        "ghost" => Color::Rgb(112, 88, 152),
        "dragon" => Color::Rgb(112, 56, 248),
        "dark" => Color::Rgb(112, 88, 72),
        "steel" => Color::Rgb(184, 184, 208),
        "fairy" => Color::Rgb(238, 153, 172),
        _ => TEXT_DIM,
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, layout[0], state);
    render_body(frame, layout[1], state);
    render_footer(frame, layout[2], state);

    if state.search.active {
        render_search(frame, area, state);
    }
    if state.popup.is_some() {
        render_popup(frame, area, state);
    }
    if state.initial_loading {
        render_loading(frame, area, state);
    }
}

pub fn handle_event(event: &EventKind, state: &AppState) -> EventOutcome<Action> {
    match event {
        EventKind::Resize(width, height) => {
            EventOutcome::action(Action::UiTerminalResize(*width, *height)).with_render()
        }
        EventKind::Key(key) => handle_key(*key, state),
        EventKind::Scroll { delta, .. } => {
            if state.popup.is_some() || state.search.active {
                return EventOutcome::ignored();
            }
            let step = match state.focus {
                FocusArea::Grid => (*delta as i16) * (grid_columns(state) as i16),
                FocusArea::Tray => *delta as i16,
            };
            EventOutcome::action(Action::SelectionMove(step))
        }
        _ => EventOutcome::ignored(),
    }
}

fn handle_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    if key.kind != KeyEventKind::Press {
        return EventOutcome::ignored();
    }
    if state.popup.is_some() {
        return handle_popup_key(key, state);
    }
    if state.search.active {
        return handle_search_key(key);
    }
    match key.code {
        KeyCode::Char('q') => EventOutcome::action(Action::Quit),
        KeyCode::Char('/') if state.view == 0 => EventOutcome::action(Action::SearchStart),
        KeyCode::Char('r') => EventOutcome::action(Action::ViewNext),
        KeyCode::Char('R') => EventOutcome::action(Action::ViewPrev),
        KeyCode::Tab => EventOutcome::action(Action::FocusNext),
        _ => match state.focus {
            FocusArea::Grid => handle_grid_key(key, state),
            FocusArea::Tray => handle_tray_key(key, state),
        },
    }
}

fn handle_grid_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    let columns = grid_columns(state) as i16;
    let action = match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(Action::SelectionMove(-1)),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::SelectionMove(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-columns)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(columns)),
        KeyCode::PageDown | KeyCode::End => Some(Action::ScrollNearBottom),
        KeyCode::Enter => Some(Action::PopupOpen(state.selected)),
        KeyCode::Char('c') => Some(Action::Catch(state.selected)),
        KeyCode::Char('C') => Some(Action::ClearCaught),
        _ => None,
    };
    EventOutcome::from(action)
}

fn handle_tray_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectionMove(-1)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectionMove(1)),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::Release(state.tray_selected)),
        KeyCode::Char('C') => Some(Action::ClearCaught),
        _ => None,
    };
    EventOutcome::from(action)
}

fn handle_search_key(key: KeyEvent) -> EventOutcome<Action> {
    let action = match key.code {
        KeyCode::Esc => Some(Action::SearchCancel),
        KeyCode::Enter => Some(Action::SearchSubmit),
        KeyCode::Backspace => Some(Action::SearchBackspace),
        KeyCode::Up => Some(Action::SearchMove(-1)),
        KeyCode::Down => Some(Action::SearchMove(1)),
        KeyCode::Char(ch) => Some(Action::SearchInput(ch)),
        _ => None,
    };
    EventOutcome::from(action)
}

fn handle_popup_key(key: KeyEvent, state: &AppState) -> EventOutcome<Action> {
    let action = match key.code {
        KeyCode::Esc => Some(Action::PopupClose),
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('h') => Some(Action::PopupPrev),
        KeyCode::Right | KeyCode::Char('l') => Some(Action::PopupNext),
        KeyCode::Tab => Some(Action::PopupTabToggle),
        KeyCode::Char('c') => state
            .popup
            .as_ref()
            .map(|popup| Action::Catch(popup.index)),
        _ => None,
    };
    EventOutcome::from(action)
}

/// Cards per row for the current terminal width. The key handlers and the
/// grid renderer both derive from this so row jumps stay aligned.
fn grid_columns(state: &AppState) -> usize {
    let grid_width = state
        .terminal_size
        .0
        .saturating_sub(TRAY_WIDTH)
        .saturating_sub(2);
    ((grid_width / CARD_WIDTH) as usize).max(1)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" CATCHDEX ")
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(Style::default().fg(BORDER_DIM));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let line = Line::from(vec![
        Span::styled(
            state.view_label().to_ascii_uppercase(),
            Style::default()
                .fg(ACCENT_RED)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  Shown: "),
        Span::styled(
            format!("{}/{}", state.visible_len(), state.active_len()),
            Style::default().fg(ACCENT_GOLD),
        ),
        Span::raw("  |  Caught: "),
        Span::styled(
            state.caught.len().to_string(),
            Style::default().fg(ACCENT_GOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), layout[0]);

    let mut labels = vec!["All".to_string()];
    labels.extend(state.regions.iter().map(|region| region.label.clone()));
    let tabs = Tabs::new(labels)
        .select(state.view)
        .style(Style::default().fg(TEXT_DIM))
        .highlight_style(
            Style::default()
                .fg(ACCENT_RED)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, layout[1]);
}

fn render_body(frame: &mut Frame, area: Rect, state: &AppState) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(TRAY_WIDTH)])
        .split(area);
    render_grid(frame, layout[0], state);
    render_tray(frame, layout[1], state);
}

fn render_grid(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", state.view_label().to_ascii_uppercase()))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::Grid));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let records = state.active_records();
    let visible = state.visible_len().min(records.len());
    if visible == 0 {
        let text = if state.active_phase() == LoadPhase::InitialLoading {
            "Loading..."
        } else {
            "No Pokemon loaded."
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(TEXT_DIM))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let columns = grid_columns(state);
    let rows = ((inner.height / CARD_HEIGHT).max(1)) as usize;
    let selected_row = state.selected.min(visible - 1) / columns;
    let first_row = selected_row.saturating_sub(rows.saturating_sub(1));
    let start = first_row * columns;

    for (slot, index) in (start..visible).enumerate().take(columns * rows) {
        let col = (slot % columns) as u16;
        let row = (slot / columns) as u16;
        let card_area = Rect::new(
            inner.x + col * CARD_WIDTH,
            inner.y + row * CARD_HEIGHT,
            CARD_WIDTH,
            CARD_HEIGHT,
        );
        if card_area.right() > inner.right() || card_area.bottom() > inner.bottom() {
            continue;
        }
        let is_selected = index == state.selected && state.focus == FocusArea::Grid;
        let caught = state.is_caught(&display_name(&records[index].name));
        render_card(frame, card_area, &records[index], is_selected, caught);
    }
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    record: &PokemonRecord,
    is_selected: bool,
    caught: bool,
) {
    let accent = record
        .data
        .types
        .first()
        .map(|name| type_color(name))
        .unwrap_or(TEXT_DIM);
    let border = if is_selected {
        Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(accent)
    };
    let bg = if is_selected { BG_PANEL_ALT } else { BG_PANEL };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" #{:04} ", record.data.id))
        .style(Style::default().bg(bg).fg(TEXT_MAIN))
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mark = if caught { "* " } else { "" };
    let name_style = if is_selected {
        Style::default()
            .fg(ACCENT_GOLD)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(TEXT_MAIN)
            .add_modifier(Modifier::BOLD)
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("{mark}{}", format_name(&record.name)),
            name_style,
        )),
        Line::from(Span::styled(
            record.data.types.join(" / "),
            Style::default().fg(accent),
        )),
        Line::from(Span::styled(
            format!("HT {}  WT {}", record.data.height, record.data.weight),
            Style::default().fg(TEXT_DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn render_tray(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" CATCH BOX ({}) ", state.caught.len()))
        .style(Style::default().bg(BG_PANEL).fg(TEXT_MAIN))
        .border_style(focus_border(state, FocusArea::Tray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.caught.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                "Nothing caught yet.",
                Style::default().fg(TEXT_DIM),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press c on a card to catch it.",
                Style::default().fg(TEXT_DIM),
            )),
        ];
        frame.render_widget(
            Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let rows = (inner.height as usize).max(1);
    let start = state
        .tray_selected
        .min(state.caught.len() - 1)
        .saturating_sub(rows.saturating_sub(1));
    let mut lines = Vec::new();
    for (offset, entry) in state.caught.iter().enumerate().skip(start).take(rows) {
        let label = format!("{:02} {} #{:04}", offset + 1, entry.name, entry.data.id);
        let is_selected = offset == state.tray_selected && state.focus == FocusArea::Tray;
        lines.push(menu_line(&label, is_selected));
    }
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = state.message.clone().unwrap_or_else(|| {
        if state.initial_loading {
            "Loading Pokedex...".to_string()
        } else if state.catalog_phase == LoadPhase::BackgroundLoading {
            format!(
                "Loading full catalog... {}/{}",
                state.catalog.len(),
                state.catalog_total
            )
        } else if state.region_phase != LoadPhase::Idle {
            format!("Loading {}...", state.view_label())
        } else {
            String::new()
        }
    });
    let (left_hints, center_hints) = status_hints(state);
    let status_span = Span::styled(status, Style::default().fg(ACCENT_GOLD));
    let status_items = [StatusBarItem::span(status_span)];

    let style = StatusBarStyle {
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(BORDER_DIM),
                focused_style: Some(Style::default().fg(ACCENT_TEAL)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(BG_PANEL),
            fg: Some(TEXT_MAIN),
        },
        text: Style::default().fg(TEXT_DIM),
        hint_key: Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
        hint_label: Style::default().fg(TEXT_DIM),
        separator: Style::default().fg(TEXT_DIM),
    };

    let props = StatusBarProps {
        left: StatusBarSection::hints(&left_hints).with_separator("  "),
        center: StatusBarSection::hints(&center_hints).with_separator("  "),
        right: StatusBarSection::items(&status_items).with_separator("  "),
        style,
        is_focused: false,
    };
    let mut status_bar = StatusBar::new();
    Component::<Action>::render(&mut status_bar, frame, area, props);
}

fn status_hints(state: &AppState) -> (Vec<StatusBarHint<'static>>, Vec<StatusBarHint<'static>>) {
    if state.search.active {
        let left = vec![
            StatusBarHint::new("Enter", "Open"),
            StatusBarHint::new("Up/Down", "Pick"),
            StatusBarHint::new("Esc", "Cancel"),
        ];
        return (left, Vec::new());
    }
    if state.popup.is_some() {
        let left = vec![
            StatusBarHint::new("h/l", "Prev/Next"),
            StatusBarHint::new("Tab", "Stats/About"),
            StatusBarHint::new("c", "Catch"),
            StatusBarHint::new("Esc", "Close"),
        ];
        let center = vec![StatusBarHint::new("q", "Quit")];
        return (left, center);
    }

    let mut left = Vec::new();
    match state.focus {
        FocusArea::Grid => {
            left.extend([
                StatusBarHint::new("Arrows", "Move"),
                StatusBarHint::new("Enter", "Details"),
                StatusBarHint::new("c", "Catch"),
                StatusBarHint::new("PgDn", "More"),
            ]);
            if state.view == 0 {
                left.push(StatusBarHint::new("/", "Search"));
            }
        }
        FocusArea::Tray => {
            left.extend([
                StatusBarHint::new("j/k", "Move"),
                StatusBarHint::new("x", "Release"),
                StatusBarHint::new("C", "Release All"),
            ]);
        }
    }
    let center = vec![
        StatusBarHint::new("Tab", "Focus"),
        StatusBarHint::new("r/R", "Region"),
        StatusBarHint::new("q", "Quit"),
    ];
    (left, center)
}

fn render_search(frame: &mut Frame, area: Rect, state: &AppState) {
    let modal_area = centered_rect(48, 15, area);
    let mut render_content = |frame: &mut Frame, inner: Rect| {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(inner);

        let query = Line::from(vec![
            Span::styled("Find: ", Style::default().fg(TEXT_DIM)),
            Span::styled(
                format!("{}_", state.search.query),
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(query), layout[0]);

        if state.search.query.len() < 2 {
            frame.render_widget(
                Paragraph::new("Type at least two characters.")
                    .style(Style::default().fg(TEXT_DIM)),
                layout[1],
            );
        } else if state.search_results.is_empty() {
            frame.render_widget(
                Paragraph::new("No matches.").style(Style::default().fg(TEXT_DIM)),
                layout[1],
            );
        } else {
            let rows = (layout[1].height as usize).max(1);
            let start = state.search_selected.saturating_sub(rows.saturating_sub(1));
            let mut lines = Vec::new();
            for (pos, &index) in state
                .search_results
                .iter()
                .enumerate()
                .skip(start)
                .take(rows)
            {
                let Some(record) = state.catalog.get(index) else {
                    continue;
                };
                let label = format!("#{:04} {}", record.data.id, format_name(&record.name));
                lines.push(menu_line(&label, pos == state.search_selected));
            }
            frame.render_widget(Paragraph::new(Text::from(lines)), layout[1]);
        }

        let footer = Paragraph::new(Line::from(Span::styled(
            format!("{} match(es)", state.search_results.len()),
            Style::default().fg(TEXT_DIM),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(footer, layout[2]);
    };

    let props = ModalProps {
        is_open: true,
        is_focused: true,
        area: modal_area,
        style: overlay_style(ACCENT_TEAL),
        behavior: ModalBehavior {
            close_on_esc: true,
            close_on_backdrop: false,
        },
        on_close: search_close,
        render_content: &mut render_content,
    };
    let mut modal = Modal::new();
    modal.render(frame, area, props);
}

fn render_popup(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(popup) = state.popup.as_ref() else {
        return;
    };
    let Some(record) = state.popup_record() else {
        return;
    };
    let total = state.active_len();
    let modal_area = centered_rect(46, 16, area);
    let mut render_content = |frame: &mut Frame, inner: Rect| {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let caught_mark = if state.is_caught(&display_name(&record.name)) {
            " *"
        } else {
            ""
        };
        let title = Paragraph::new(Line::from(Span::styled(
            format!(
                "#{:04} {}{}",
                record.data.id,
                format_name(&record.name).to_ascii_uppercase(),
                caught_mark
            ),
            Style::default()
                .fg(ACCENT_RED)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(title, layout[0]);

        let tab_index = match popup.tab {
            PopupTab::Stats => 0,
            PopupTab::About => 1,
        };
        let tabs = Tabs::new(vec!["Stats", "About"])
            .select(tab_index)
            .style(Style::default().fg(TEXT_DIM))
            .highlight_style(
                Style::default()
                    .fg(ACCENT_TEAL)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, layout[1]);

        let body = match popup.tab {
            PopupTab::Stats => stats_text(record),
            PopupTab::About => about_text(record),
        };
        frame.render_widget(
            Paragraph::new(body)
                .style(Style::default().fg(TEXT_MAIN))
                .wrap(Wrap { trim: true }),
            layout[2],
        );

        let footer = Paragraph::new(Line::from(Span::styled(
            format!("{}/{}  h/l Navigate  Esc Close", popup.index + 1, total),
            Style::default().fg(TEXT_DIM),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(footer, layout[3]);
    };

    let props = ModalProps {
        is_open: true,
        is_focused: true,
        area: modal_area,
        style: overlay_style(ACCENT_GOLD),
        behavior: ModalBehavior {
            close_on_esc: true,
            close_on_backdrop: false,
        },
        on_close: popup_close,
        render_content: &mut render_content,
    };
    let mut modal = Modal::new();
    modal.render(frame, area, props);
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    let box_area = centered_rect(36, 5, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(BG_PANEL_ALT).fg(TEXT_MAIN))
        .border_style(Style::default().fg(ACCENT_RED));
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let lines = vec![
        Line::from(Span::styled(
            format!("{} Loading Pokedex...", spinner_frame(state.tick as u8)),
            Style::default()
                .fg(ACCENT_GOLD)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Fetching the first cards",
            Style::default().fg(TEXT_DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        inner,
    );
}

fn stats_text(record: &PokemonRecord) -> Text<'static> {
    if record.data.stats.is_empty() {
        return Text::from("No stats loaded.");
    }
    let lines = record
        .data
        .stats
        .iter()
        .map(|stat| {
            let label = shorten_stat(&stat.name);
            let bar_len = (stat.value as usize / 10).clamp(1, 20);
            let bar = "#".repeat(bar_len);
            Line::from(format!("{label:>4} {value:>3} {bar}", value = stat.value))
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

fn about_text(record: &PokemonRecord) -> Text<'static> {
    let mut lines = vec![
        Line::from(format!("Species: {}", format_name(&record.data.species))),
        Line::from(format!(
            "Height: {}  Weight: {}",
            record.data.height, record.data.weight
        )),
        Line::from(format!("Types: {}", record.data.types.join(" / "))),
    ];
    if let Some(url) = record.data.artwork_url.as_deref() {
        lines.push(Line::from(" "));
        lines.push(Line::from(Span::styled(
            format!("Artwork: {url}"),
            Style::default().fg(TEXT_DIM),
        )));
    }
    Text::from(lines)
}

fn overlay_style(accent: Color) -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(BORDER_DIM),
                focused_style: Some(Style::default().fg(accent)),
            }),
            padding: Padding::all(1),
            bg: Some(BG_PANEL_ALT),
            fg: Some(TEXT_MAIN),
        },
    }
}

fn search_close() -> Action {
    Action::SearchCancel
}

fn popup_close() -> Action {
    Action::PopupClose
}

fn focus_border(state: &AppState, area: FocusArea) -> Style {
    if state.focus == area {
        Style::default()
            .fg(ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(BORDER_DIM)
    }
}

fn menu_line(label: &str, is_selected: bool) -> Line<'static> {
    let style = if is_selected {
        Style::default()
            .fg(TEXT_MAIN)
            .bg(HIGHLIGHT_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(TEXT_MAIN)
    };
    Line::from(Span::styled(label.to_string(), style))
}

fn shorten_stat(name: &str) -> String {
    match name {
        "hp" => " HP".to_string(),
        "attack" => "ATK".to_string(),
        "defense" => "DEF".to_string(),
        "special-attack" => "SAT".to_string(),
        "special-defense" => "SDF".to_string(),
        "speed" => "SPD".to_string(),
        _ => name.to_ascii_uppercase(),
    }
}

fn spinner_frame(frame: u8) -> char {
    match frame % 4 {
        0 => '|',
        1 => '/',
        2 => '-',
        _ => '\\',
    }
}

fn format_name(name: &str) -> String {
    name.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
