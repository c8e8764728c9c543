//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle including event handling, state updates, and rendering.

use std::{
    mem,
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use orcganizer_protocol::{Card, CardDraft, CardPatch, Message, render_card_document};
use orcganizer_store::{
    ContainerKey, DragResult, DropLocation, ItemKind, TreeStore, drag, generate_quest_board_name,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tracing::{debug, info, warn};

use crate::{
    AppState, Focus,
    event::{event_to_message, poll_event},
    layout::{
        BOARD_STRIP_HEIGHT, HEADER_HEIGHT, MIN_HEIGHT, MIN_HEIGHT_WITH_HEADER, MIN_WIDTH,
        STATUS_BAR_HEIGHT, board_tabs, card_slots, column_inner, column_slots,
    },
    palette::next_color,
    state::{HoverStep, Mode, PendingAction, TextInput, TextTarget},
    terminal::AppTerminal,
    widgets::{
        description_area_dimensions, max_scroll_offset, render_board, render_board_strip,
        render_confirm, render_detail_panel, render_help_overlay, render_prompt,
        render_status_bar, render_status_bar_with_message, render_welcome,
        status_bar::mode_hints,
    },
};

/// Screen areas of one frame.
#[derive(Debug, Clone, Copy)]
struct Regions {
    header: Option<Rect>,
    strip: Rect,
    body: Rect,
    status: Rect,
}

/// What a click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Tab(usize),
    Column(usize),
    Card(usize, usize),
}

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Last known terminal area, used for click hit-testing.
    last_area: Rect,
    /// Whether the header was shown in the last render (affects click hit-testing).
    header_visible: bool,
}

impl App {
    /// Creates a new application over `store`.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::dummy::sample_tree;
    /// use orcganizer_store::{SequentialIds, TreeStore};
    /// use orcganizer_tui::App;
    ///
    /// let store = TreeStore::with_tree(sample_tree(), SequentialIds::new());
    /// let app = App::new(store);
    /// assert!(!app.state().is_welcome());
    /// ```
    #[must_use]
    pub fn new(store: TreeStore) -> Self {
        Self {
            state: AppState::new(store),
            should_quit: false,
            last_area: Rect::default(),
            header_visible: true,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, every message except `Quit` just
    /// dismisses it. Otherwise the message is interpreted according to the
    /// active mode.
    pub fn update(&mut self, msg: Message) {
        if msg == Message::Quit {
            self.should_quit = true;
            return;
        }
        if self.state.dismiss_help() {
            return;
        }

        match &self.state.mode {
            Mode::Normal => self.update_normal(msg),
            Mode::Drag(_) => self.update_drag(msg),
            Mode::Input(_) => self.update_input(msg),
            Mode::Confirm(_) => self.update_confirm(msg),
        }
    }

    /// Expires the pending undo once its window has closed.
    pub fn tick(&mut self, now: Instant) {
        if self.state.store.expire_undo(now) {
            debug!("undo window closed");
            self.state.status = None;
        }
    }

    fn update_normal(&mut self, msg: Message) {
        let detail = self.state.detail_visible;
        match msg {
            Message::ToggleHelp => self.state.toggle_help(),
            Message::NavigateLeft if !detail => self.state.navigate_left(),
            Message::NavigateRight if !detail => self.state.navigate_right(),
            Message::NavigateUp if detail => {
                self.state.scroll_detail(-1);
                self.clamp_scroll_to_content();
            }
            Message::NavigateDown if detail => {
                self.state.scroll_detail(1);
                self.clamp_scroll_to_content();
            }
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::NextBoard if !detail => self.state.next_board(),
            Message::PrevBoard if !detail => self.state.prev_board(),
            Message::Select => {
                if self.state.is_welcome() {
                    self.open_prompt(TextTarget::NewBoard, String::new());
                } else if !detail && self.state.selected_card().is_some() {
                    self.state.toggle_detail();
                }
            }
            Message::Escape => {
                self.state.status = None;
                if detail {
                    self.state.toggle_detail();
                } else {
                    self.state.clear_selection();
                }
            }
            Message::ClickAt { column, row } => self.handle_click(column, row),
            Message::GrabCard if !detail => self.grab(ItemKind::Card),
            Message::GrabColumn if !detail => self.grab(ItemKind::Column),
            Message::GrabBoard if !detail => self.grab(ItemKind::Board),
            Message::NewBoard => {
                let name = generate_quest_board_name(&mut rand::rng());
                self.open_prompt(TextTarget::NewBoard, name);
            }
            Message::NewCard => {
                if let Some((board, column)) = self.state.column_ids() {
                    self.open_prompt(TextTarget::NewCard { board, column }, String::new());
                }
            }
            Message::AddColumn => {
                if let Some(board) = self.state.current_board().map(|b| b.id.clone()) {
                    self.open_prompt(TextTarget::NewColumn { board }, String::new());
                }
            }
            Message::RenameBoard => {
                if let Some(board) = self.state.current_board() {
                    let target = TextTarget::BoardName {
                        board: board.id.clone(),
                    };
                    let name = board.name.clone();
                    self.open_prompt(target, name);
                }
            }
            Message::RenameColumn => {
                if let (Some((board, column)), Some(current)) =
                    (self.state.column_ids(), self.state.current_column())
                {
                    let title = current.title.clone();
                    self.open_prompt(TextTarget::ColumnTitle { board, column }, title);
                }
            }
            Message::EditTitle | Message::EditNotes => {
                if let (Some((board, column, card)), Some(current)) =
                    (self.state.card_ids(), self.state.selected_card())
                {
                    let (target, text) = if msg == Message::EditTitle {
                        (
                            TextTarget::CardTitle {
                                board,
                                column,
                                card,
                            },
                            current.title.clone(),
                        )
                    } else {
                        (
                            TextTarget::CardNotes {
                                board,
                                column,
                                card,
                            },
                            current.notes.clone(),
                        )
                    };
                    self.open_prompt(target, text);
                }
            }
            Message::DeleteCard => {
                if let (Some((board, column, card)), Some(current)) =
                    (self.state.card_ids(), self.state.selected_card())
                {
                    let title = current.title.clone();
                    self.state.mode = Mode::Confirm(PendingAction::DeleteCard {
                        board,
                        column,
                        card,
                        title,
                    });
                }
            }
            Message::DeleteColumn if !detail => {
                if let (Some((board, column)), Some(current)) =
                    (self.state.column_ids(), self.state.current_column())
                {
                    let title = current.title.clone();
                    self.state.mode = Mode::Confirm(PendingAction::DeleteColumn {
                        board,
                        column,
                        title,
                    });
                }
            }
            Message::DeleteBoard if !detail => {
                if let Some(board) = self.state.current_board() {
                    self.state.mode = Mode::Confirm(PendingAction::DeleteBoard {
                        board: board.id.clone(),
                        name: board.name.clone(),
                    });
                }
            }
            Message::ResetAll if !detail => {
                self.state.mode = Mode::Confirm(PendingAction::ResetAll);
            }
            Message::Undo => self.undo(),
            Message::SetPriority { value } => {
                self.edit_card(|_| CardPatch::new().priority(i64::from(value)));
            }
            Message::CycleIcon => self.edit_card(|card| CardPatch::new().icon(card.icon.next())),
            Message::ToggleTaskType => {
                self.edit_card(|card| CardPatch::new().task_type(card.task_type.toggled()));
            }
            Message::ToggleCardMinimized => {
                self.edit_card(|card| CardPatch::new().minimized(!card.minimized));
            }
            Message::RerollPattern => {
                if let Some((board, column, card)) = self.state.card_ids() {
                    self.state.store.reroll_pattern(&board, &column, &card);
                }
            }
            Message::PrintCard => self.print_selected(),
            Message::ToggleColumnMinimized if !detail => {
                if let Some((board, column)) = self.state.column_ids() {
                    self.state.store.toggle_column_minimized(&board, &column);
                }
            }
            Message::ToggleBoardMinimized if !detail => {
                if let Some(board) = self.state.current_board().map(|b| b.id.clone()) {
                    self.state.store.toggle_board_minimized(&board);
                }
            }
            Message::CycleColumnColor => {
                if let (Some((board, column)), Some(current)) =
                    (self.state.column_ids(), self.state.current_column())
                {
                    let color = next_color(&current.color);
                    self.state.store.set_column_color(&board, &column, color);
                }
            }
            Message::CycleBoardColor => {
                if let Some(board) = self.state.current_board() {
                    let id = board.id.clone();
                    let color = next_color(&board.header_color);
                    self.state.store.set_board_color(&id, color);
                }
            }
            _ => {}
        }
    }

    fn update_drag(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.move_hover(HoverStep::Up),
            Message::NavigateDown => self.state.move_hover(HoverStep::Down),
            Message::NavigateLeft => self.state.move_hover(HoverStep::Left),
            Message::NavigateRight => self.state.move_hover(HoverStep::Right),
            Message::PrevBoard => self.state.move_hover(HoverStep::PrevBoard),
            Message::NextBoard => self.state.move_hover(HoverStep::NextBoard),
            Message::ClickAt { column, row } => self.handle_drag_click(column, row),
            Message::Drop | Message::Select => {
                let Mode::Drag(session) = mem::take(&mut self.state.mode) else {
                    return;
                };
                let result = session.finish();
                if drag::commit(&mut self.state.store, &result) {
                    info!(kind = ?result.kind, "drag committed");
                    self.state.follow_drop(&result);
                    self.state.status = None;
                } else {
                    self.restore_drag_source(result);
                    self.state.status = Some("Nothing moved".to_string());
                }
            }
            Message::Escape | Message::Cancel => {
                let Mode::Drag(session) = mem::take(&mut self.state.mode) else {
                    return;
                };
                self.restore_drag_source(session.cancel());
            }
            _ => {}
        }
    }

    /// Puts the selection back on a dragged item that did not move.
    fn restore_drag_source(&mut self, result: DragResult) {
        let source = result.source.clone();
        self.state.follow_drop(&DragResult {
            destination: Some(source),
            ..result
        });
    }

    fn update_input(&mut self, msg: Message) {
        let Mode::Input(input) = &mut self.state.mode else {
            return;
        };
        match msg {
            Message::Input { ch } => input.push(ch),
            Message::Paste { text } => input.paste(&text),
            Message::Backspace => input.backspace(),
            Message::Newline => input.newline(),
            Message::SuggestName if input.target.suggests_names() => {
                input.replace(generate_quest_board_name(&mut rand::rng()));
            }
            Message::Confirm => self.submit_input(),
            Message::Cancel | Message::Escape => self.state.mode = Mode::Normal,
            _ => {}
        }
    }

    fn update_confirm(&mut self, msg: Message) {
        match msg {
            Message::Confirm => {
                if let Mode::Confirm(action) = mem::take(&mut self.state.mode) {
                    self.run_action(action);
                }
            }
            Message::Cancel | Message::Escape => self.state.mode = Mode::Normal,
            _ => {}
        }
    }

    fn open_prompt(&mut self, target: TextTarget, initial: String) {
        self.state.mode = Mode::Input(TextInput::new(target, initial));
    }

    fn grab(&mut self, kind: ItemKind) {
        if !self.state.begin_drag(kind) {
            self.state.status = Some("Nothing to grab".to_string());
        }
    }

    fn edit_card(&mut self, updater: impl FnOnce(&Card) -> CardPatch) {
        if let Some((board, column, card)) = self.state.card_ids() {
            self.state
                .store
                .update_card_with(&board, &column, &card, updater);
        }
    }

    /// Applies a confirmed text prompt.
    fn submit_input(&mut self) {
        let Mode::Input(mut input) = mem::take(&mut self.state.mode) else {
            return;
        };
        let text = if input.target.is_multiline() {
            input.buffer.trim_end().to_string()
        } else {
            input.buffer.trim().to_string()
        };
        if text.is_empty()
            && let Some(error) = input.target.blank_error()
        {
            input.error = Some(error.to_string());
            self.state.mode = Mode::Input(input);
            return;
        }

        let store = &mut self.state.store;
        match input.target {
            TextTarget::NewBoard => {
                let board = store.create_board(&text);
                self.state.show_board(0);
                self.state.status = Some(format!("Forged \"{}\". Press n to add a task", board.name));
            }
            TextTarget::BoardName { board } => {
                store.rename_board(&board, &text);
            }
            TextTarget::NewColumn { board } => {
                if let Some(column) = store.add_column(&board, &text)
                    && let Some(idx) = self
                        .state
                        .current_board()
                        .and_then(|b| b.column_index(&column.id))
                {
                    self.state.selected_column = idx;
                    self.state.selected_card = None;
                }
            }
            TextTarget::ColumnTitle { board, column } => {
                store.rename_column(&board, &column, &text);
            }
            TextTarget::NewCard { board, column } => {
                if let Some(card) = store.create_card(&board, &column, CardDraft::titled(text)) {
                    self.state.select_card(&column, &card.id);
                }
            }
            TextTarget::CardTitle {
                board,
                column,
                card,
            } => {
                store.update_card(&board, &column, &card, &CardPatch::new().title(text));
            }
            TextTarget::CardNotes {
                board,
                column,
                card,
            } => {
                store.update_card(&board, &column, &card, &CardPatch::new().notes(text));
            }
        }
        self.state.clamp_selection();
    }

    /// Runs a confirmed destructive action.
    fn run_action(&mut self, action: PendingAction) {
        let store = &mut self.state.store;
        match action {
            PendingAction::DeleteCard {
                board,
                column,
                card,
                ..
            } => {
                if let Some((card, _)) = store.delete_card(&board, &column, &card, Instant::now())
                {
                    self.state.status = Some(format!("Deleted \"{}\"", card.title));
                }
            }
            PendingAction::DeleteColumn { board, column, title } => {
                if store.delete_column(&board, &column) {
                    self.state.status = Some(format!("Deleted column \"{title}\""));
                }
            }
            PendingAction::DeleteBoard { board, name } => {
                if store.delete_board(&board) {
                    self.state.status = Some(format!("Deleted \"{name}\""));
                }
            }
            PendingAction::ResetAll => {
                store.reset();
                self.state.status = Some("Every board was cleared".to_string());
            }
        }
        self.state.clamp_selection();
    }

    fn undo(&mut self) {
        let now = Instant::now();
        let target = self
            .state
            .store
            .pending_undo(now)
            .map(|pending| (pending.board.clone(), pending.column.clone()));
        match (self.state.store.undo_delete(now), target) {
            (Some(card), Some((board, column))) => {
                if let Some(idx) = self.state.store.tree().board_index(&board) {
                    if idx != self.state.selected_board {
                        self.state.show_board(idx);
                    }
                    self.state.select_card(&column, &card.id);
                }
                self.state.status = Some(format!("Restored \"{}\"", card.title));
            }
            _ => self.state.status = Some("Nothing to undo".to_string()),
        }
    }

    fn print_selected(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        let result = write_card_document(card, &std::env::temp_dir()).and_then(|path| {
            open::that(&path).with_context(|| format!("opening {}", path.display()))?;
            Ok(path)
        });
        self.state.status = Some(match result {
            Ok(path) => format!("Printed to {}", path.display()),
            Err(err) => {
                warn!(error = %err, "printing failed");
                format!("Printing failed: {err}")
            }
        });
    }

    /// Computes the screen areas for `area` with the current header state.
    fn regions(&self, area: Rect) -> Regions {
        let header_height = if self.header_visible {
            HEADER_HEIGHT
        } else {
            0
        };
        let [header, strip, body, status] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Length(BOARD_STRIP_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .areas(area);
        Regions {
            header: self.header_visible.then_some(header),
            strip,
            body,
            status,
        }
    }

    /// Finds what is drawn at a screen position.
    fn hit_test(&self, column: u16, row: u16) -> Option<Hit> {
        let regions = self.regions(self.last_area);
        let position = (column, row).into();
        let tree = self.state.store.tree();

        if regions.strip.contains(position) {
            return board_tabs(tree, self.state.selected_board, regions.strip)
                .into_iter()
                .find(|(_, slot)| slot.contains(position))
                .map(|(idx, _)| Hit::Tab(idx));
        }
        if !regions.body.contains(position) {
            return None;
        }

        let board = self.state.current_board()?;
        if board.minimized {
            return None;
        }
        let (column_idx, slot) = column_slots(board, self.state.selected_column, regions.body)
            .into_iter()
            .find(|(_, slot)| slot.contains(position))?;
        let column_data = &board.columns[column_idx];
        if column_data.minimized {
            return Some(Hit::Column(column_idx));
        }
        let selected = if column_idx == self.state.selected_column {
            self.state.selected_card
        } else {
            None
        };
        Some(
            card_slots(column_data, selected, column_inner(slot))
                .into_iter()
                .find(|(_, card)| card.contains(position))
                .map_or(Hit::Column(column_idx), |(card_idx, _)| {
                    Hit::Card(column_idx, card_idx)
                }),
        )
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        // Only handle clicks when on the board view
        if self.state.focus != Focus::Board || self.state.detail_visible {
            return;
        }
        match self.hit_test(column, row) {
            Some(Hit::Tab(idx)) => self.state.show_board(idx),
            Some(Hit::Column(idx)) => {
                self.state.selected_column = idx;
                self.state.selected_card = None;
            }
            Some(Hit::Card(column_idx, card_idx)) => {
                self.state.selected_column = column_idx;
                self.state.selected_card = Some(card_idx);
                self.state.toggle_detail();
            }
            None => {}
        }
    }

    /// Previews the drop target under a click; clicks elsewhere clear it.
    fn handle_drag_click(&mut self, column: u16, row: u16) {
        let Some(session) = self.state.drag() else {
            return;
        };
        let kind = session.kind();
        let source = session.source().clone();
        let hit = self.hit_test(column, row);

        let destination = match (kind, hit, self.state.current_board()) {
            (ItemKind::Board, Some(Hit::Tab(idx)), _) => {
                Some(DropLocation::new(ContainerKey::Root, idx))
            }
            (ItemKind::Column, Some(Hit::Column(idx) | Hit::Card(idx, _)), Some(board)) => Some(
                DropLocation::new(ContainerKey::Board(board.id.clone()), idx),
            ),
            (ItemKind::Card, Some(Hit::Column(idx) | Hit::Card(idx, _)), Some(board)) => {
                let target_column = &board.columns[idx];
                let target = ContainerKey::column(&board.id, &target_column.id);
                let len = target_column.len();
                let last = if target == source.container {
                    len.saturating_sub(1)
                } else {
                    len
                };
                let index = match hit {
                    Some(Hit::Card(_, card_idx)) => card_idx.min(last),
                    _ => last,
                };
                Some(DropLocation::new(target, index))
            }
            _ => None,
        };
        self.state.preview_drop(destination);
    }

    /// Clamps the detail scroll offset to prevent scrolling past content.
    ///
    /// Uses the last known terminal area to compute the maximum valid scroll offset.
    fn clamp_scroll_to_content(&mut self) {
        let Some(card) = self.state.selected_card() else {
            return;
        };
        let body = self.regions(self.last_area).body;

        let Some((visible_height, width)) = description_area_dimensions(body) else {
            // Area too small, clamp to 0
            self.state.clamp_detail_scroll(0);
            return;
        };

        let max = max_scroll_offset(card, visible_height, width);
        self.state.clamp_detail_scroll(max);
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - If terminal is below minimum dimensions, shows a "terminal too small" message.
    /// - If terminal is tight (below `MIN_HEIGHT_WITH_HEADER`), hides the header to reclaim space.
    /// - Otherwise, renders normally with header.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        // Check if terminal is too small for any useful rendering
        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.header_visible = false;
            Self::render_terminal_too_small(frame, area);
            return;
        }

        self.header_visible = area.height >= MIN_HEIGHT_WITH_HEADER;
        let regions = self.regions(area);

        if let Some(header) = regions.header {
            Self::render_header(frame, header);
        }

        let state = &self.state;
        let buf = frame.buffer_mut();
        if state.is_welcome() {
            render_welcome(regions.body, buf);
        } else {
            render_board_strip(
                state.store.tree(),
                state.selected_board,
                state.drag(),
                regions.strip,
                buf,
            );
            match (state.detail_visible, state.selected_card(), state.current_board()) {
                (true, Some(card), _) => {
                    let column_title = state.current_column().map_or("", |c| c.title.as_str());
                    render_detail_panel(card, column_title, state.detail_scroll, regions.body, buf);
                }
                (_, _, Some(board)) => render_board(
                    board,
                    state.selected_column,
                    state.selected_card,
                    state.drag(),
                    regions.body,
                    buf,
                ),
                _ => {}
            }
        }

        let hints = mode_hints(&state.mode);
        match self.status_message(Instant::now()) {
            Some(message) => render_status_bar_with_message(&message, hints, regions.status, buf),
            None => render_status_bar(hints, regions.status, buf),
        }

        match &state.mode {
            Mode::Input(input) => render_prompt(input, area, buf),
            Mode::Confirm(action) => render_confirm(action, area, buf),
            Mode::Normal | Mode::Drag(_) => {}
        }

        // Render help overlay on top if visible
        if state.help_visible {
            render_help_overlay(area, buf);
        }
    }

    /// Returns the message for the status bar at `now`.
    ///
    /// While a deleted card can be restored, the message counts down the
    /// seconds left to undo.
    fn status_message(&self, now: Instant) -> Option<String> {
        if let Some(pending) = self.state.store.pending_undo(now) {
            let left = pending.expires_at.saturating_duration_since(now);
            let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            return Some(format!(
                "Deleted \"{}\". Press u to undo ({secs}s)",
                pending.card.title
            ));
        }
        if let Some(drag) = self.state.drag() {
            let what = match drag.kind() {
                ItemKind::Board => "board",
                ItemKind::Column => "column",
                ItemKind::Card => "task",
            };
            return Some(if drag.hover().is_some() {
                format!("Moving {what}")
            } else {
                format!("Moving {what}: no drop target")
            });
        }
        self.state.status.clone()
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });

        // Center the message vertically
        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Runs the main application loop.
    ///
    /// This function blocks until the user quits the application.
    /// It polls for events, updates state, and renders the UI.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orcganizer_store::{SequentialIds, TreeStore};
    /// use orcganizer_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(TreeStore::new(SequentialIds::new()));
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        loop {
            self.tick(Instant::now());

            // Render
            terminal.draw(|frame| self.view(frame))?;

            // Poll for events (keyboard and mouse)
            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event, &self.state.mode)
            {
                self.update(msg);
            }

            // Check for quit
            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Renders the header bar with title and help cue.
    fn render_header(frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // Split inner area: title left, help cue right
        let [title_area, help_area] = Layout::horizontal([
            Constraint::Min(0),
            Constraint::Length(17), // "Press ? for help" = 16 chars + padding
        ])
        .areas(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "orcganizer",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled("Quest boards", Style::default().fg(Color::White)),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }
}

/// Writes the printable document of `card` into `dir`.
///
/// The file is named after the card id, with anything but ASCII letters,
/// digits, `-` and `_` replaced.
fn write_card_document(card: &Card, dir: &Path) -> anyhow::Result<PathBuf> {
    let name: String = card
        .id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let path = dir.join(format!("orcganizer-{name}.html"));
    std::fs::write(&path, render_card_document(card))
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use orcganizer_protocol::dummy::sample_tree;
    use orcganizer_store::SequentialIds;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::test_utils::{buffer_to_string, position_of};

    fn sample_app() -> App {
        App::new(TreeStore::with_tree(sample_tree(), SequentialIds::new()))
    }

    fn empty_app() -> App {
        App::new(TreeStore::new(SequentialIds::new()))
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.update(Message::Input { ch });
        }
    }

    fn render_buffer(app: &mut App, width: u16, height: u16) -> Buffer {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        buffer_to_string(&render_buffer(app, width, height))
    }

    fn card_titles(app: &App, board: usize, column: &str) -> Vec<String> {
        let board = &app.state.store.tree().boards[board];
        board
            .column(column)
            .map(|c| c.cards.iter().map(|card| card.title.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn app_quit_message_sets_should_quit() {
        let mut app = sample_app();

        assert!(!app.should_quit());
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn app_navigation_updates_state() {
        let mut app = sample_app();

        app.update(Message::NavigateRight);
        assert_eq!(app.state.selected_column, 1);

        app.update(Message::NavigateLeft);
        assert_eq!(app.state.selected_column, 0);

        app.update(Message::NextBoard);
        assert_eq!(app.state.selected_board, 1);
    }

    #[test]
    fn app_select_does_nothing_without_card() {
        let mut app = sample_app();

        app.update(Message::Select);
        assert!(!app.state.detail_visible);
    }

    #[test]
    fn app_select_toggles_detail_with_card() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::Select);
        assert!(app.state.detail_visible);

        app.update(Message::Escape);
        assert!(!app.state.detail_visible);
    }

    #[test]
    fn app_help_dismisses_on_any_key() {
        let mut app = sample_app();

        app.update(Message::ToggleHelp);
        assert!(app.state.help_visible);

        // Navigation is swallowed by the overlay
        app.update(Message::NavigateRight);
        assert!(!app.state.help_visible);
        assert_eq!(app.state.selected_column, 0);
    }

    #[test]
    fn app_quit_works_with_help_visible() {
        let mut app = sample_app();

        app.update(Message::ToggleHelp);
        app.update(Message::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn welcome_begin_requires_a_name() {
        let mut app = empty_app();
        assert!(app.state.is_welcome());

        app.update(Message::Select);
        let Mode::Input(input) = &app.state.mode else {
            panic!("expected the board name prompt");
        };
        assert_eq!(input.target, TextTarget::NewBoard);
        assert!(input.buffer.is_empty());

        app.update(Message::Confirm);
        let Mode::Input(input) = &app.state.mode else {
            panic!("prompt should stay open");
        };
        assert_eq!(
            input.error.as_deref(),
            Some("enter quest name to Forge Quest board")
        );

        type_text(&mut app, "The Order of Flow");
        app.update(Message::Confirm);
        assert_eq!(app.state.mode, Mode::Normal);
        assert_eq!(app.state.current_board().map(|b| b.name.as_str()), Some("The Order of Flow"));
        assert_eq!(app.state.current_board().map(|b| b.columns.len()), Some(3));
    }

    #[test]
    fn new_board_prompt_is_prefilled_and_placed_first() {
        let mut app = sample_app();
        app.update(Message::NextBoard);

        app.update(Message::NewBoard);
        let Mode::Input(input) = &app.state.mode else {
            panic!("expected prompt");
        };
        assert!(input.buffer.starts_with("The "));

        app.update(Message::Confirm);
        assert_eq!(app.state.store.tree().len(), 3);
        assert_eq!(app.state.selected_board, 0);
        assert!(app.state.status.as_deref().is_some_and(|s| s.starts_with("Forged")));
    }

    #[test]
    fn suggest_name_replaces_text() {
        let mut app = sample_app();
        app.update(Message::NewBoard);
        app.update(Message::Backspace);
        app.update(Message::SuggestName);

        let Mode::Input(input) = &app.state.mode else {
            panic!("expected prompt");
        };
        assert!(input.buffer.starts_with("The "));
    }

    #[test]
    fn new_card_goes_first_and_is_selected() {
        let mut app = sample_app();

        app.update(Message::NewCard);
        type_text(&mut app, "Slay the dragon");
        app.update(Message::Confirm);

        assert_eq!(
            card_titles(&app, 0, "todo"),
            ["Slay the dragon", "Wire up task dialog", "Brew potions for the raid"]
        );
        assert_eq!(app.state.selected_card, Some(0));
    }

    #[test]
    fn pasted_title_creates_card() {
        let mut app = sample_app();
        app.update(Message::NavigateRight);

        app.update(Message::NewCard);
        app.update(Message::Paste {
            text: "Scout\nthe pass".to_string(),
        });
        app.update(Message::Confirm);

        assert_eq!(
            card_titles(&app, 0, "doing"),
            ["Scout the pass", "Refactor to multi-file"]
        );
    }

    #[test]
    fn cancel_closes_prompt_without_changes() {
        let mut app = sample_app();

        app.update(Message::NewCard);
        type_text(&mut app, "Never mind");
        app.update(Message::Cancel);

        assert_eq!(app.state.mode, Mode::Normal);
        assert_eq!(card_titles(&app, 0, "todo").len(), 2);
    }

    #[test]
    fn add_column_with_blank_title_is_numbered() {
        let mut app = sample_app();

        app.update(Message::AddColumn);
        app.update(Message::Confirm);

        let board = app.state.current_board().unwrap();
        assert_eq!(board.columns.last().unwrap().title, "Column 4");
        assert_eq!(app.state.selected_column, 3);
    }

    #[test]
    fn edit_notes_keeps_line_breaks() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::EditNotes);
        type_text(&mut app, " Quickly.");
        app.update(Message::Newline);
        type_text(&mut app, "Then rest.");
        app.update(Message::Confirm);

        assert_eq!(
            app.state.selected_card().unwrap().notes,
            "Connect dialog open state to the column's New Task button. Quickly.\nThen rest."
        );
    }

    #[test]
    fn card_shortcuts_edit_the_selected_card() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);
        let before = app.state.selected_card().unwrap().clone();

        app.update(Message::SetPriority { value: 5 });
        app.update(Message::CycleIcon);
        app.update(Message::ToggleTaskType);
        app.update(Message::RerollPattern);

        let after = app.state.selected_card().unwrap();
        assert_eq!(after.priority.value(), 5);
        assert_eq!(after.icon, before.icon.next());
        assert_eq!(after.task_type, before.task_type.toggled());
        assert_ne!(after.pattern_seed, before.pattern_seed);
        assert_ne!(after.pattern_type, before.pattern_type);
    }

    #[test]
    fn delete_card_asks_then_offers_undo() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::DeleteCard);
        assert!(matches!(app.state.mode, Mode::Confirm(PendingAction::DeleteCard { .. })));
        assert_eq!(card_titles(&app, 0, "todo").len(), 2);

        app.update(Message::Confirm);
        assert_eq!(card_titles(&app, 0, "todo"), ["Brew potions for the raid"]);
        let status = app.status_message(Instant::now()).unwrap();
        assert!(status.contains("Press u to undo"), "{status}");

        app.update(Message::Undo);
        assert_eq!(
            card_titles(&app, 0, "todo"),
            ["Wire up task dialog", "Brew potions for the raid"]
        );
        assert_eq!(app.state.selected_card, Some(0));
    }

    #[test]
    fn declining_keeps_the_card() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::DeleteCard);
        app.update(Message::Cancel);

        assert_eq!(app.state.mode, Mode::Normal);
        assert_eq!(card_titles(&app, 0, "todo").len(), 2);
    }

    #[test]
    fn tick_expires_undo() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);
        app.update(Message::DeleteCard);
        app.update(Message::Confirm);

        app.tick(Instant::now() + Duration::from_secs(60));
        app.update(Message::Undo);

        assert_eq!(card_titles(&app, 0, "todo").len(), 1);
        assert_eq!(app.state.status.as_deref(), Some("Nothing to undo"));
    }

    #[test]
    fn delete_column_discards_its_cards() {
        let mut app = sample_app();

        app.update(Message::DeleteColumn);
        app.update(Message::Confirm);

        let board = app.state.current_board().unwrap();
        assert_eq!(board.columns.len(), 2);
        assert_eq!(app.state.store.tree().card_count(), 3);
    }

    #[test]
    fn delete_board_and_reset() {
        let mut app = sample_app();

        app.update(Message::DeleteBoard);
        app.update(Message::Confirm);
        assert_eq!(app.state.store.tree().len(), 1);
        assert_eq!(app.state.current_board().unwrap().name, "The Guild of Quests");

        app.update(Message::ResetAll);
        app.update(Message::Confirm);
        assert!(app.state.is_welcome());
    }

    #[test]
    fn keyboard_drag_moves_card_to_next_column() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::GrabCard);
        assert!(app.state.drag().is_some());
        app.update(Message::NavigateRight);
        app.update(Message::Drop);

        assert_eq!(app.state.mode, Mode::Normal);
        assert_eq!(card_titles(&app, 0, "todo"), ["Brew potions for the raid"]);
        assert_eq!(
            card_titles(&app, 0, "doing"),
            ["Wire up task dialog", "Refactor to multi-file"]
        );
        assert_eq!(app.state.selected_column, 1);
        assert_eq!(app.state.selected_card, Some(0));
    }

    #[test]
    fn escape_cancels_drag_and_restores_selection() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::GrabCard);
        app.update(Message::NextBoard);
        assert_eq!(app.state.selected_board, 1);
        app.update(Message::Escape);

        assert_eq!(app.state.mode, Mode::Normal);
        assert_eq!(app.state.selected_board, 0);
        assert_eq!(app.state.selected_card, Some(0));
        assert_eq!(card_titles(&app, 0, "todo").len(), 2);
    }

    #[test]
    fn dropping_in_place_moves_nothing() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);

        app.update(Message::GrabCard);
        app.update(Message::Drop);

        assert_eq!(app.state.status.as_deref(), Some("Nothing moved"));
        assert_eq!(
            card_titles(&app, 0, "todo"),
            ["Wire up task dialog", "Brew potions for the raid"]
        );
    }

    #[test]
    fn column_and_board_drags() {
        let mut app = sample_app();

        app.update(Message::GrabColumn);
        app.update(Message::NavigateRight);
        app.update(Message::NavigateRight);
        app.update(Message::Drop);
        let titles: Vec<&str> = app
            .state
            .current_board()
            .unwrap()
            .columns
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(titles, ["Doing", "Done", "To Do"]);
        assert_eq!(app.state.selected_column, 2);

        app.update(Message::GrabBoard);
        app.update(Message::NextBoard);
        app.update(Message::Drop);
        assert_eq!(app.state.store.tree().boards[1].name, "The Fellowship of Focus");
        assert_eq!(app.state.selected_board, 1);
    }

    #[test]
    fn colors_and_minimize_toggles() {
        let mut app = sample_app();

        app.update(Message::CycleColumnColor);
        app.update(Message::CycleBoardColor);
        app.update(Message::ToggleColumnMinimized);

        let board = app.state.current_board().unwrap();
        assert_eq!(board.columns[0].color, "#155e75");
        assert_eq!(board.header_color, "#155e75");
        assert!(board.columns[0].minimized);

        app.update(Message::ToggleBoardMinimized);
        assert!(app.state.current_board().unwrap().minimized);
    }

    #[test]
    fn write_card_document_sanitizes_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let card = Card::from_draft("t/../1", "seed", CardDraft::titled("Scout"));

        let path = write_card_document(&card, dir.path()).unwrap();

        assert_eq!(path.file_name().unwrap(), "orcganizer-t____1.html");
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("Scout"));
    }

    // --- Mouse ---

    #[test]
    fn click_on_card_selects_and_opens_detail() {
        let mut app = sample_app();
        render(&mut app, 100, 30);

        // Header (3) + strip (1) + column border (1): first card starts at row 5.
        app.update(Message::ClickAt { column: 35, row: 6 });

        assert_eq!(app.state.selected_column, 1);
        assert_eq!(app.state.selected_card, Some(0));
        assert!(app.state.detail_visible);
    }

    #[test]
    fn click_on_tab_switches_board() {
        let mut app = sample_app();
        let buf = render_buffer(&mut app, 100, 30);
        let (column, row) = position_of(&buf, "The Guild of Quests").unwrap();

        app.update(Message::ClickAt { column, row });

        assert_eq!(app.state.selected_board, 1);
    }

    #[test]
    fn click_below_cards_selects_column() {
        let mut app = sample_app();
        render(&mut app, 100, 30);

        app.update(Message::ClickAt { column: 65, row: 20 });

        assert_eq!(app.state.selected_column, 2);
        assert_eq!(app.state.selected_card, None);
        assert!(!app.state.detail_visible);
    }

    #[test]
    fn click_ignored_when_detail_visible() {
        let mut app = sample_app();
        render(&mut app, 100, 30);
        app.update(Message::NavigateDown);
        app.update(Message::Select);

        app.update(Message::ClickAt { column: 65, row: 20 });

        assert_eq!(app.state.selected_column, 0);
    }

    #[test]
    fn click_during_drag_previews_target() {
        let mut app = sample_app();
        render(&mut app, 100, 30);
        app.update(Message::NavigateDown);
        app.update(Message::GrabCard);

        app.update(Message::ClickAt { column: 65, row: 20 });
        assert_eq!(
            app.state.drag().and_then(|d| d.hover()).cloned(),
            Some(DropLocation::new(ContainerKey::column("b-sample-1", "done"), 1))
        );

        // Outside any column clears the target; dropping then moves nothing.
        app.update(Message::ClickAt { column: 95, row: 20 });
        assert!(app.state.drag().is_some_and(|d| d.hover().is_none()));
        app.update(Message::Drop);
        assert_eq!(card_titles(&app, 0, "todo").len(), 2);
    }

    #[test]
    fn click_works_in_compact_mode() {
        let mut app = sample_app();
        render(&mut app, 80, 11);
        assert!(!app.header_visible);

        // Strip (1) + column border (1): first card starts at row 2.
        app.update(Message::ClickAt { column: 5, row: 3 });

        assert_eq!(app.state.selected_card, Some(0));
        assert!(app.state.detail_visible);
    }

    // --- Rendering ---

    #[test]
    fn view_shows_too_small_message() {
        let mut app = sample_app();

        let content = render(&mut app, 80, 8);
        assert!(!app.header_visible);
        assert!(content.contains("Terminal too small"));

        let content = render(&mut app, 30, 24);
        assert!(content.contains("Terminal"));
    }

    #[test]
    fn view_hides_header_in_compact_mode() {
        let mut app = sample_app();

        let content = render(&mut app, 80, 11);

        assert!(!app.header_visible);
        assert!(content.contains("The Fellowship of Focus"));
        assert!(content.contains("To Do (2)"));
    }

    #[test]
    fn view_shows_header_when_terminal_large_enough() {
        let mut app = sample_app();

        let content = render(&mut app, 100, 30);

        assert!(app.header_visible);
        assert!(content.contains("orcganizer - Quest boards"));
        assert!(content.contains("Press ? for help"));
        assert!(content.contains("Doing (1)"));
        assert!(content.contains("? Help"));
    }

    #[test]
    fn view_shows_welcome_without_boards() {
        let mut app = empty_app();
        let content = render(&mut app, 80, 24);
        assert!(content.contains("Welcome to your Quest board"));
    }

    #[test]
    fn view_renders_detail_and_overlays() {
        let mut app = sample_app();
        app.update(Message::NavigateDown);
        app.update(Message::Select);

        let content = render(&mut app, 100, 30);
        assert!(content.contains("Wire up task dialog"));
        assert!(content.contains("[Esc] Back to board"));

        app.update(Message::DeleteCard);
        let content = render(&mut app, 100, 30);
        assert!(content.contains("Delete task \"Wire up task dialog\"?"));

        app.update(Message::Cancel);
        app.update(Message::ToggleHelp);
        let content = render(&mut app, 100, 30);
        assert!(content.contains("Press any key to close"));
    }

    #[test]
    fn scroll_clamped_to_content() {
        let mut app = sample_app();
        render(&mut app, 100, 30);
        app.update(Message::NavigateDown);
        app.update(Message::Select);

        for _ in 0..50 {
            app.update(Message::NavigateDown);
        }
        assert_eq!(app.state.detail_scroll, 0);
    }
}
