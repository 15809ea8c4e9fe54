use crate::core::app::App;

pub enum CommandResult {
    /// Input was handled as a command; nothing goes to the endpoint.
    Continue,
    /// Not a command; submit it as a chat message.
    ProcessAsMessage(String),
}

const HELP_TEXT: &str = "Commands:
  /log [filename]  Enable transcript logging, or toggle pause/resume
  /help            Show this help
Keys:
  Enter            Send the message
  Alt+Enter        Insert a line break
  Up/Down/Mouse    Scroll through chat history
  Ctrl+C           Quit";

pub fn process_input(app: &mut App, input: &str) -> CommandResult {
    let trimmed = input.trim();

    if trimmed == "/help" {
        app.add_notice(HELP_TEXT);
        return CommandResult::Continue;
    }

    if trimmed == "/log" || trimmed.starts_with("/log ") {
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        match parts.len() {
            1 => {
                // Just "/log" - toggle logging if a file is set
                match app.logging.toggle_logging() {
                    Ok(message) => app.add_notice(message),
                    Err(e) => app.add_notice(format!("Error: {e}")),
                }
            }
            2 => {
                // "/log <filename>" - set log file and enable logging
                match app.logging.set_log_file(parts[1].to_string()) {
                    Ok(message) => app.add_notice(message),
                    Err(e) => app.add_notice(format!("Error setting log file: {e}")),
                }
            }
            _ => {
                app.add_notice(
                    "Usage: /log [filename] - Enable logging to file, or /log to toggle pause/resume",
                );
            }
        }
        return CommandResult::Continue;
    }

    // Not a command, process as a regular message
    CommandResult::ProcessAsMessage(input.to_string())
}
