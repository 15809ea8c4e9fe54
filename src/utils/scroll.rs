use std::collections::VecDeque;

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::core::message::Message;
use crate::ui::theme::Theme;

/// Handles display-line building and scroll-related calculations.
pub struct ScrollCalculator;

impl ScrollCalculator {
    /// Build display lines for all messages, one bubble per message with a
    /// blank spacing line after each.
    pub fn build_display_lines(messages: &VecDeque<Message>, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for msg in messages {
            Self::add_message_lines(&mut lines, msg, theme);
        }

        lines
    }

    /// The transient bubble shown while a reply is pending. Not backed by a
    /// message; the caller appends it only while the conversation is busy.
    pub fn pending_line(theme: &Theme, symbol: &str) -> Line<'static> {
        Line::from(Span::styled(
            symbol.to_string(),
            theme.pending_indicator_style,
        ))
    }

    fn add_message_lines(lines: &mut Vec<Line<'static>>, msg: &Message, theme: &Theme) {
        if msg.is_user() {
            // User bubbles: "You: " prefix, then the content. Multi-line
            // drafts keep their line breaks, indented under the prefix.
            let mut content_lines = msg.content.lines();
            let first = content_lines.next().unwrap_or("");
            lines.push(Line::from(vec![
                Span::styled("You: ", theme.user_prefix_style),
                Span::styled(first.to_string(), theme.user_text_style),
            ]));
            for content_line in content_lines {
                lines.push(Line::from(Span::styled(
                    content_line.to_string(),
                    theme.user_text_style,
                )));
            }
            lines.push(Line::from(""));
        } else if msg.is_app() {
            lines.push(Line::from(Span::styled(
                msg.content.clone(),
                theme.notice_text_style,
            )));
            lines.push(Line::from(""));
        } else if !msg.content.is_empty() {
            // Bot bubbles: no prefix, content split into lines for wrapping.
            for content_line in msg.content.lines() {
                if content_line.trim().is_empty() {
                    lines.push(Line::from(""));
                } else {
                    lines.push(Line::from(Span::styled(
                        content_line.to_string(),
                        theme.bot_text_style,
                    )));
                }
            }
            lines.push(Line::from(""));
        }
    }

    /// Calculate how many terminal rows the given lines occupy once wrapped.
    pub fn calculate_wrapped_line_count(lines: &[Line], terminal_width: u16) -> u16 {
        let mut total_wrapped_lines = 0u16;

        for line in lines {
            let line_text = line.to_string();
            // Trim to match ratatui's Wrap { trim: true } behavior.
            let trimmed_text = line_text.trim();

            if trimmed_text.is_empty() || terminal_width == 0 {
                total_wrapped_lines = total_wrapped_lines.saturating_add(1);
            } else {
                let wrapped_count = Self::calculate_word_wrapped_lines(trimmed_text, terminal_width);
                total_wrapped_lines = total_wrapped_lines.saturating_add(wrapped_count);
            }
        }

        total_wrapped_lines
    }

    /// Word-based wrapping to match ratatui's behavior, measured in display
    /// columns rather than chars so wide glyphs count properly.
    fn calculate_word_wrapped_lines(text: &str, terminal_width: u16) -> u16 {
        let mut current_line_len = 0;
        let mut line_count = 1u16;

        for word in text.split_whitespace() {
            let word_len = UnicodeWidthStr::width(word);

            if current_line_len > 0 && current_line_len + 1 + word_len > terminal_width as usize {
                line_count = line_count.saturating_add(1);
                current_line_len = word_len;
            } else {
                if current_line_len > 0 {
                    current_line_len += 1; // Space before the word
                }
                current_line_len += word_len;
            }
        }

        line_count
    }

    /// Rows a single line occupies under `Wrap { trim: false }`: leading
    /// whitespace stays on the line and counts against the width. The input
    /// box renders untrimmed, so its height reservation must too.
    pub fn calculate_untrimmed_wrapped_lines(text: &str, terminal_width: u16) -> u16 {
        if terminal_width == 0 {
            return 1;
        }
        let indent = UnicodeWidthStr::width(&text[..text.len() - text.trim_start().len()]);
        let mut current_line_len = 0usize;
        let mut line_count = 1u16;

        for (i, word) in text.split_whitespace().enumerate() {
            let mut word_len = UnicodeWidthStr::width(word);
            if i == 0 {
                word_len += indent;
            }

            if current_line_len > 0 && current_line_len + 1 + word_len > terminal_width as usize {
                line_count = line_count.saturating_add(1);
                current_line_len = word_len;
            } else {
                if current_line_len > 0 {
                    current_line_len += 1; // Space before the word
                }
                current_line_len += word_len;
            }
        }

        line_count
    }

    /// Scroll offset that puts the bottom of `lines` at the bottom of the
    /// viewport.
    pub fn calculate_scroll_to_bottom(
        lines: &[Line],
        terminal_width: u16,
        available_height: u16,
    ) -> u16 {
        let total = Self::calculate_wrapped_line_count(lines, terminal_width);
        total.saturating_sub(available_height)
    }

    /// Largest valid scroll offset for the given content.
    pub fn calculate_max_scroll_offset(
        lines: &[Line],
        terminal_width: u16,
        available_height: u16,
    ) -> u16 {
        Self::calculate_scroll_to_bottom(lines, terminal_width, available_height)
    }
}
