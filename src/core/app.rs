use std::time::Instant;

use ratatui::text::Line;

use crate::api::ChatClient;
use crate::core::conversation::ConversationStore;
use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;
use crate::utils::scroll::ScrollCalculator;

/// Runtime state for one chat session: the conversation, the endpoint
/// client, and the view's scroll/animation bookkeeping.
pub struct App {
    pub conversation: ConversationStore,
    pub client: ChatClient,
    pub logging: LoggingState,
    pub theme: Theme,
    pub scroll_offset: u16,
    pub auto_scroll: bool,
    pub pulse_start: Instant,
}

impl App {
    pub fn new(
        endpoint: String,
        log_file: Option<String>,
        theme: Theme,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState::new(log_file)?;

        Ok(App {
            conversation: ConversationStore::new(),
            client: ChatClient::new(endpoint),
            logging,
            theme,
            scroll_offset: 0,
            auto_scroll: true,
            pulse_start: Instant::now(),
        })
    }

    /// Display lines for the transcript area, including the transient
    /// pending bubble while a reply is in flight.
    pub fn build_display_lines(&self) -> Vec<Line<'static>> {
        let mut lines =
            ScrollCalculator::build_display_lines(self.conversation.messages(), &self.theme);
        if self.conversation.is_busy() {
            lines.push(ScrollCalculator::pending_line(
                &self.theme,
                self.pulse_symbol(),
            ));
        }
        lines
    }

    /// Pending-indicator glyph, pulsing at two cycles per second.
    pub fn pulse_symbol(&self) -> &'static str {
        let elapsed = self.pulse_start.elapsed().as_millis() as f32 / 1000.0;
        let pulse_phase = (elapsed * 2.0) % 2.0;
        let pulse_intensity = if pulse_phase < 1.0 {
            pulse_phase
        } else {
            2.0 - pulse_phase
        };

        if pulse_intensity < 0.33 {
            "○"
        } else if pulse_intensity < 0.66 {
            "◐"
        } else {
            "●"
        }
    }

    pub fn calculate_wrapped_line_count(&self, terminal_width: u16) -> u16 {
        let lines = self.build_display_lines();
        ScrollCalculator::calculate_wrapped_line_count(&lines, terminal_width)
    }

    pub fn calculate_max_scroll_offset(
        &self,
        available_height: u16,
        terminal_width: u16,
    ) -> u16 {
        let lines = self.build_display_lines();
        ScrollCalculator::calculate_max_scroll_offset(&lines, terminal_width, available_height)
    }

    /// Rows the input box content needs for the current draft (excluding
    /// borders), capped so a long draft cannot swallow the transcript.
    /// Counted untrimmed to match the input paragraph's `Wrap { trim: false }`.
    pub fn calculate_input_area_height(&self, terminal_width: u16) -> u16 {
        let inner_width = terminal_width.saturating_sub(2); // Borders
        let rows = self
            .conversation
            .draft()
            .split('\n')
            .map(|line| ScrollCalculator::calculate_untrimmed_wrapped_lines(line, inner_width))
            .fold(0u16, |acc, n| acc.saturating_add(n));
        rows.clamp(1, 6)
    }

    /// Append a client-side notice bubble and mirror it to the transcript
    /// log with the `##` notice prefix.
    pub fn add_notice(&mut self, text: impl Into<String>) {
        let text = text.into();
        if let Err(e) = self.logging.log_message(&format!("## {text}")) {
            tracing::debug!(error = %e, "failed to log notice");
        }
        self.conversation.push_notice(text);
    }

    /// Run the optimistic half of the submit protocol: append the user
    /// bubble, clear the draft, set busy, and hand back the text for the
    /// network step. `None` when the draft is blank or a reply is pending.
    pub fn submit_draft(&mut self) -> Option<String> {
        let text = self.conversation.begin_submission()?;
        if let Err(e) = self.logging.log_message(&format!("You: {text}")) {
            tracing::debug!(error = %e, "failed to log user message");
        }
        self.pulse_start = Instant::now();
        self.auto_scroll = true;
        Some(text)
    }

    /// Settle the in-flight submission with the service's reply, or with
    /// the fallback bubble when `reply` is `None`.
    pub fn apply_reply(&mut self, reply: Option<String>) {
        self.conversation.complete_submission(reply);
        if let Some(msg) = self.conversation.messages().back() {
            if let Err(e) = self.logging.log_message(&msg.content) {
                tracing::debug!(error = %e, "failed to log reply");
            }
        }
    }

    /// Scroll so the newest content is visible.
    pub fn scroll_to_bottom(&mut self, terminal_width: u16, available_height: u16) {
        let lines = self.build_display_lines();
        self.scroll_offset =
            ScrollCalculator::calculate_scroll_to_bottom(&lines, terminal_width, available_height);
    }

    /// Move the viewport by `delta` rows (negative is up). Scrolling up
    /// disables auto-scroll; landing back on the bottom re-enables it.
    pub fn scroll_by(&mut self, delta: i32, terminal_width: u16, available_height: u16) {
        let max_scroll = self.calculate_max_scroll_offset(available_height, terminal_width);
        let target = self.scroll_offset as i32 + delta;
        self.scroll_offset = target.clamp(0, max_scroll as i32) as u16;
        self.auto_scroll = self.scroll_offset >= max_scroll;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::FALLBACK_REPLY;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn submit_and_reply_drive_the_pending_bubble() {
        let mut app = create_test_app();
        app.conversation.set_draft("Hello");

        let before = app.build_display_lines().len();
        let text = app.submit_draft().expect("submission starts");
        assert_eq!(text, "Hello");

        // User bubble plus spacing plus the pending indicator.
        assert_eq!(app.build_display_lines().len(), before + 3);

        app.apply_reply(Some("Hi there".to_string()));
        assert!(!app.conversation.is_busy());
        // Pending bubble gone, bot bubble plus spacing in its place.
        assert_eq!(app.build_display_lines().len(), before + 4);
    }

    #[test]
    fn failed_reply_falls_back() {
        let mut app = create_test_app();
        app.conversation.set_draft("Hello");
        app.submit_draft();
        app.apply_reply(None);

        let last = app.conversation.messages().back().unwrap();
        assert!(last.is_bot());
        assert_eq!(last.content, FALLBACK_REPLY);
    }

    #[test]
    fn submit_is_gated_while_busy() {
        let mut app = create_test_app();
        app.conversation.set_draft("A");
        assert!(app.submit_draft().is_some());

        app.conversation.set_draft("B");
        assert!(app.submit_draft().is_none());
        assert_eq!(app.conversation.messages().len(), 1);
    }

    #[test]
    fn input_area_grows_with_draft_lines() {
        let mut app = create_test_app();
        assert_eq!(app.calculate_input_area_height(80), 1);

        app.conversation.set_draft("one\ntwo\nthree");
        assert_eq!(app.calculate_input_area_height(80), 3);

        app.conversation.set_draft("a\nb\nc\nd\ne\nf\ng\nh");
        assert_eq!(app.calculate_input_area_height(80), 6);
    }

    #[test]
    fn input_height_counts_leading_whitespace() {
        let mut app = create_test_app();
        // Inner width 10: the 4-column indent pushes "bb" onto a second row,
        // so the reservation must cover both.
        app.conversation.set_draft("    aaaa bb");
        assert_eq!(app.calculate_input_area_height(12), 2);
    }

    #[test]
    fn manual_scroll_toggles_auto_scroll() {
        let mut app = create_test_app();
        for i in 0..30 {
            app.conversation.push_notice(format!("notice {i}"));
        }
        app.scroll_to_bottom(80, 10);
        assert!(app.scroll_offset > 0);

        app.scroll_by(-3, 80, 10);
        assert!(!app.auto_scroll);

        app.scroll_by(3, 80, 10);
        assert!(app.auto_scroll);
    }
}
