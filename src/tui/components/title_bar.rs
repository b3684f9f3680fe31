//! # TitleBar Component
//!
//! Top bar: the application name, the current route rendered as the hash
//! it corresponds to on the original site (`#tour.html`), and a loading
//! indicator while fetches are in flight.
//!
//! Purely presentational — all props come in as struct fields, no internal
//! state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;

pub struct TitleBar {
    pub route: Option<String>,
    pub loading: bool,
}

impl TitleBar {
    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "docview",
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(route) = &self.route {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("#{route}"),
                Style::default().fg(Color::Cyan),
            ));
        }
        if self.loading {
            spans.push(Span::styled(
                " | Loading…",
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}
