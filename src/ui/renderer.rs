use ratatui::{
    layout::{Constraint, Direction, Layout},
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::core::app::App;

pub fn ui(f: &mut Frame, app: &App) {
    // Input area height tracks the draft's line count
    let input_area_height = app.calculate_input_area_height(f.area().width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(input_area_height + 2), // +2 for borders
        ])
        .split(f.area());

    let lines = app.build_display_lines();

    // Clamp the scroll offset against the wrapped line count
    let available_height = chunks[0].height.saturating_sub(1); // Account for title
    let total_wrapped_lines = app.calculate_wrapped_line_count(chunks[0].width);
    let max_offset = total_wrapped_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let title = format!(
        "Charla v{} - {} • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.client.endpoint(),
        app.logging.get_status_string()
    );

    let messages_paragraph = Paragraph::new(lines)
        .block(Block::default().title(Span::styled(title, app.theme.title_style)))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(messages_paragraph, chunks[0]);

    let input_title = if app.conversation.is_busy() {
        "Waiting for reply… (Alt+Enter for new line, /help for help, Ctrl+C to quit)"
    } else {
        "Type your message (Enter to send, Alt+Enter for new line, /help for help, Ctrl+C to quit)"
    };

    let input = Paragraph::new(app.conversation.draft())
        .style(app.theme.input_text_style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.theme.input_border_style)
                .title(Span::styled(input_title, app.theme.input_title_style)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(input, chunks[1]);

    // Cursor sits after the last draft line, inside the borders
    let last_line = app.conversation.draft().rsplit('\n').next().unwrap_or("");
    let cursor_row = app.conversation.draft().matches('\n').count() as u16;
    f.set_cursor_position((
        chunks[1].x + 1 + UnicodeWidthStr::width(last_line) as u16,
        chunks[1].y + 1 + cursor_row.min(input_area_height.saturating_sub(1)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::App;
    use crate::ui::theme::Theme;
    use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};

    fn draw(theme: Theme) -> Buffer {
        let app = App::new("http://chat.test/chat".to_string(), None, theme).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn find_symbol(buffer: &Buffer, row: u16, symbol: &str) -> u16 {
        (0..80)
            .find(|&x| buffer.cell((x, row)).unwrap().symbol() == symbol)
            .unwrap_or_else(|| panic!("no '{symbol}' in row {row}"))
    }

    // The light theme colors the input title differently from the input
    // border, so the buffer shows which style landed where.
    #[test]
    fn input_title_uses_the_theme_title_style() {
        let buffer = draw(Theme::light());

        // Empty draft: the input box is the bottom three rows, title on its
        // top border row.
        let title_x = find_symbol(&buffer, 21, "T");
        let cell = buffer.cell((title_x, 21)).unwrap();
        assert_eq!(cell.style().fg, Some(Color::DarkGray));

        // The border corner keeps the border style.
        let corner = buffer.cell((0, 21)).unwrap();
        assert_eq!(corner.style().fg, Some(Color::Black));
    }

    #[test]
    fn transcript_title_uses_the_theme_title_style() {
        let buffer = draw(Theme::light());
        let title_x = find_symbol(&buffer, 0, "C");
        let cell = buffer.cell((title_x, 0)).unwrap();
        assert_eq!(cell.style().fg, Some(Color::DarkGray));
    }
}
