use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::api::GalleryClient;
use crate::config::ClientConfig;

use super::mouse::{self, MouseState};
use super::state::AppState;
use super::ui::render;
use super::worker::ApiWorker;

/// Lines scrolled in the detail view per PageUp/PageDown.
const DETAIL_PAGE: u16 = 10;

/// Run the TUI application
#[instrument(skip_all, fields(server = %config.base_url()))]
pub fn run_tui(config: &ClientConfig) -> Result<()> {
    info!("starting TUI");

    let client = GalleryClient::new(config);
    let worker = ApiWorker::spawn(client);
    let mut state = AppState::new(worker, config.base_url());
    state.start();

    // Setup terminal
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Main loop
    let result = run_app(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("TUI closed");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let mut mouse_state = MouseState::new();

    loop {
        // Apply finished API calls, then fetch thumbnails for what is on screen
        state.poll_worker();
        state.request_thumbnails();

        // Force full terminal repaint after closing overlays; image protocol
        // content (kitty/sixel) gets destroyed by overlays and ratatui's diff
        // alone can't restore it.
        if state.force_redraw {
            state.force_redraw = false;
            terminal.clear()?;
        }

        terminal.draw(|frame| render(frame, state))?;

        // Responses arrive on the worker channel, so keep polling it while idle
        let timeout = Duration::from_millis(100);

        if event::poll(timeout)? {
            if let KeyAction::Quit = handle_event(event::read()?, state, &mut mouse_state) {
                return Ok(());
            }
        }

        // Drain all pending events to avoid lag during rapid navigation
        while event::poll(Duration::ZERO)? {
            if let KeyAction::Quit = handle_event(event::read()?, state, &mut mouse_state) {
                return Ok(());
            }
        }
    }
}

fn handle_event(event: Event, state: &mut AppState, mouse_state: &mut MouseState) -> KeyAction {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(key.code, state),
        Event::Mouse(mouse_event) => {
            mouse::handle_mouse(mouse_event, state, mouse_state);
            KeyAction::Continue
        }
        Event::Resize(_, _) => {
            state.force_redraw = true;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Quit,
    Continue,
}

/// Handle a key press. Overlays take keys first, topmost first.
fn handle_key(code: KeyCode, state: &mut AppState) -> KeyAction {
    if state.alert.is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
            state.dismiss_alert();
        }
        return KeyAction::Continue;
    }

    if state.confirm.is_some() {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => state.accept_confirm(),
            KeyCode::Char('n') | KeyCode::Esc => state.dismiss_confirm(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if let Some(ref mut dialog) = state.settings {
        match code {
            KeyCode::Esc => state.close_settings(),
            KeyCode::Enter => state.submit_settings(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => dialog.toggle_focus(),
            KeyCode::Backspace => dialog.focused_input().backspace(),
            KeyCode::Delete => dialog.focused_input().delete(),
            KeyCode::Left => dialog.focused_input().move_cursor_left(),
            KeyCode::Right => dialog.focused_input().move_cursor_right(),
            KeyCode::Home => dialog.focused_input().move_cursor_home(),
            KeyCode::End => dialog.focused_input().move_cursor_end(),
            KeyCode::Char(c) => dialog.focused_input().insert_char(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    if let Some(ref mut detail) = state.detail {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => state.close_detail(),
            KeyCode::Left | KeyCode::Char('h') => state.detail_prev(),
            KeyCode::Right | KeyCode::Char('l') => state.detail_next(),
            KeyCode::Down | KeyCode::Char('j') => detail.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => detail.scroll_up(1),
            KeyCode::PageDown => detail.scroll_down(DETAIL_PAGE),
            KeyCode::PageUp => detail.scroll_up(DETAIL_PAGE),
            KeyCode::Tab => detail.focus_next(),
            KeyCode::BackTab => detail.focus_prev(),
            KeyCode::Char('y') => state.copy_focused_entry(),
            _ => {}
        }
        return KeyAction::Continue;
    }

    // Handle help overlay: eat all keys except ? and Esc which close it
    if state.show_help {
        if matches!(code, KeyCode::Char('?') | KeyCode::Esc) {
            state.toggle_help();
        }
        return KeyAction::Continue;
    }

    if state.search.editing {
        let input = &mut state.search.input;
        match code {
            KeyCode::Esc => state.cancel_search(),
            KeyCode::Enter => state.submit_search(),
            KeyCode::Backspace => input.backspace(),
            KeyCode::Delete => input.delete(),
            KeyCode::Left => input.move_cursor_left(),
            KeyCode::Right => input.move_cursor_right(),
            KeyCode::Home => input.move_cursor_home(),
            KeyCode::End => input.move_cursor_end(),
            KeyCode::Char(c) => input.insert_char(c),
            _ => {}
        }
        return KeyAction::Continue;
    }

    // Clear status message on any key
    state.clear_status_message();

    let selecting = state.gallery.mode().is_selecting();
    match code {
        KeyCode::Char('q') => return KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => state.move_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_up(),
        KeyCode::PageDown => state.page_down(state.visible_rows()),
        KeyCode::PageUp => state.page_up(state.visible_rows()),
        KeyCode::Char('g') | KeyCode::Home => state.move_to_top(),
        KeyCode::Char('G') | KeyCode::End => state.move_to_bottom(),
        KeyCode::Enter => state.activate_selected(),
        KeyCode::Char(' ') if selecting => state.activate_selected(),
        KeyCode::Esc if selecting => state.exit_selection(),
        KeyCode::Char('v') => state.toggle_mode(),
        KeyCode::Char('/') => state.start_search(),
        KeyCode::Char('s') => state.cycle_sort(),
        KeyCode::Char('p') => state.cycle_platform(),
        KeyCode::Char('r') => state.reload(),
        KeyCode::Char('S') => state.request_scan(),
        KeyCode::Char('c') => state.open_settings(false),
        KeyCode::Char('?') => state.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}
