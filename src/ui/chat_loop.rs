use std::io;
use std::time::Duration;

use ratatui::{
    backend::CrosstermBackend,
    crossterm::{
        event::{
            self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
            KeyEventKind, KeyModifiers, MouseEventKind,
        },
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    Terminal,
};
use tokio::sync::mpsc;

use crate::commands::{process_input, CommandResult};
use crate::core::app::App;
use crate::ui::renderer::ui;

/// Run the interactive session: set up the terminal, drive the event loop,
/// and restore the terminal on the way out.
pub async fn run_chat(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Transcript viewport dimensions: full width, and the rows left over after
/// the input box (draft rows + borders) and the title line.
fn transcript_viewport(terminal_width: u16, terminal_height: u16, app: &App) -> (u16, u16) {
    let input_area = app.calculate_input_area_height(terminal_width) + 2;
    let available_height = terminal_height.saturating_sub(input_area).saturating_sub(1);
    (terminal_width, available_height)
}

/// Character-level draft edits. Control-modified keys are reserved for
/// shortcuts and never type into the draft.
fn apply_draft_edit(app: &mut App, key: &KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.conversation.insert_char(c);
        }
        KeyCode::Backspace => {
            app.conversation.delete_char();
        }
        _ => {}
    }
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    // Settled submissions come back over this channel; the busy flag
    // guarantees at most one is ever in flight.
    let (tx, mut rx) = mpsc::unbounded_channel::<Option<String>>();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let size = terminal.size().unwrap_or_default();
        let (width, height) = transcript_viewport(size.width, size.height, app);

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                        app.conversation.insert_newline();
                    }
                    KeyCode::Enter => {
                        let input = app.conversation.draft().to_string();
                        match process_input(app, &input) {
                            CommandResult::Continue => {
                                app.conversation.set_draft("");
                                if app.auto_scroll {
                                    app.scroll_to_bottom(width, height);
                                }
                            }
                            CommandResult::ProcessAsMessage(_) => {
                                // submit_draft is a no-op while busy or when
                                // the draft is blank; the draft survives.
                                if let Some(text) = app.submit_draft() {
                                    let client = app.client.clone();
                                    let tx = tx.clone();
                                    tokio::spawn(async move {
                                        let _ = tx.send(client.send_message(&text).await);
                                    });
                                    app.scroll_to_bottom(width, height);
                                }
                            }
                        }
                    }
                    KeyCode::Up => {
                        app.scroll_by(-1, width, height);
                    }
                    KeyCode::Down => {
                        app.scroll_by(1, width, height);
                    }
                    _ => {
                        apply_draft_edit(app, &key);
                    }
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.scroll_by(-3, width, height);
                    }
                    MouseEventKind::ScrollDown => {
                        app.scroll_by(3, width, height);
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Settle any completed submission
        while let Ok(reply) = rx.try_recv() {
            app.apply_reply(reply);
            if app.auto_scroll {
                app.scroll_to_bottom(width, height);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn viewport_accounts_for_input_box_and_title() {
        let app = create_test_app();
        // Empty draft: one input row + two border rows + one title row.
        let (width, height) = transcript_viewport(80, 24, &app);
        assert_eq!(width, 80);
        assert_eq!(height, 20);
    }

    #[test]
    fn viewport_shrinks_as_the_draft_grows() {
        let mut app = create_test_app();
        app.conversation.set_draft("one\ntwo\nthree");
        let (_, height) = transcript_viewport(80, 24, &app);
        assert_eq!(height, 18);
    }

    #[test]
    fn control_modified_characters_do_not_edit_the_draft() {
        let mut app = create_test_app();
        apply_draft_edit(
            &mut app,
            &KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
        );
        assert_eq!(app.conversation.draft(), "");

        apply_draft_edit(&mut app, &KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        // Uppercase input arrives with SHIFT set and must still type.
        apply_draft_edit(
            &mut app,
            &KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT),
        );
        assert_eq!(app.conversation.draft(), "aB");

        apply_draft_edit(
            &mut app,
            &KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
        );
        assert_eq!(app.conversation.draft(), "a");
    }
}
