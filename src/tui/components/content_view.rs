//! # Content View Component
//!
//! Scrollable pane over the content region. The rendered `Text` is cached
//! and keyed by the region's revision counter, so the HTML renderer (and
//! with it the syntect highlighting pass) runs exactly once per injected
//! fragment, not once per frame. Scroll position resets to the top on each
//! new fragment, the way a browser resets scroll on navigation.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::Color;
use ratatui::text::Text;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::shell::ContentRegion;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::html;

const PAGE_SCROLL: u16 = 10;

/// Persistent scroll + render-cache state for the content pane.
pub struct ContentViewState {
    pub scroll_state: ScrollViewState,
    /// Region revision the cache was rendered from.
    cached_rev: Option<u64>,
    cached: Text<'static>,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
}

impl Default for ContentViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentViewState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            cached_rev: None,
            cached: Text::default(),
            viewport_height: 0,
        }
    }

    /// Re-render the fragment if the region changed since the cache was
    /// built. This is the highlighter invocation point: once per load.
    fn ensure_rendered(&mut self, region: &ContentRegion) {
        if self.cached_rev != Some(region.rev()) {
            self.cached = html::render(region.html(), Color::Gray);
            self.cached_rev = Some(region.rev());
            self.scroll_state.set_offset(Position { x: 0, y: 0 });
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let current = self.scroll_state.offset();
        let y = current.y.saturating_add_signed(delta as i16);
        self.scroll_state.set_offset(Position { x: current.x, y });
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    fn clamp_scroll(&mut self, content_height: u16) {
        let max_y = content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for ContentViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-(PAGE_SCROLL as i32)),
            TuiEvent::ScrollPageDown => self.scroll_by(PAGE_SCROLL as i32),
            _ => return None,
        }
        Some(())
    }
}

/// Transient render wrapper over the content region.
pub struct ContentView<'a> {
    state: &'a mut ContentViewState,
    region: &'a ContentRegion,
}

impl<'a> ContentView<'a> {
    pub fn new(state: &'a mut ContentViewState, region: &'a ContentRegion) -> Self {
        Self { state, region }
    }
}

impl Component for ContentView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.ensure_rendered(self.region);
        self.state.viewport_height = area.height;

        // Reserve one column for the scrollbar.
        let content_width = area.width.saturating_sub(1);
        let paragraph = Paragraph::new(self.state.cached.clone())
            .wrap(ratatui::widgets::Wrap { trim: false });
        let content_height = (paragraph.line_count(content_width) as u16).max(1);

        self.state.clamp_scroll(content_height);

        let mut scroll_view = ScrollView::new(Size::new(content_width, content_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, content_width, content_height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_rebuilds_only_on_new_revision() {
        let mut state = ContentViewState::new();
        let mut region = ContentRegion::new();
        region.replace("<p>one</p>".to_string());

        state.ensure_rendered(&region);
        assert_eq!(state.cached_rev, Some(1));
        let first_lines = state.cached.lines.len();

        // Same revision: no re-render.
        state.ensure_rendered(&region);
        assert_eq!(state.cached.lines.len(), first_lines);

        region.replace("<p>one</p><p>two</p>".to_string());
        state.ensure_rendered(&region);
        assert_eq!(state.cached_rev, Some(2));
        assert!(state.cached.lines.len() > first_lines);
    }

    #[test]
    fn new_fragment_resets_scroll_to_top() {
        let mut state = ContentViewState::new();
        let mut region = ContentRegion::new();
        region.replace("<p>one</p>".to_string());
        state.ensure_rendered(&region);

        state.scroll_by(5);
        assert_eq!(state.scroll_state.offset().y, 5);

        region.replace("<p>two</p>".to_string());
        state.ensure_rendered(&region);
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn scroll_events_move_the_offset() {
        let mut state = ContentViewState::new();
        assert!(state.handle_event(&TuiEvent::ScrollDown).is_some());
        assert!(state.handle_event(&TuiEvent::ScrollPageDown).is_some());
        assert_eq!(state.scroll_state.offset().y, 1 + PAGE_SCROLL);

        assert!(state.handle_event(&TuiEvent::ScrollUp).is_some());
        assert_eq!(state.scroll_state.offset().y, PAGE_SCROLL);

        // Non-scroll events are not consumed.
        assert!(state.handle_event(&TuiEvent::Reload).is_none());
    }

    #[test]
    fn scroll_up_saturates_at_zero() {
        let mut state = ContentViewState::new();
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert_eq!(state.scroll_state.offset().y, 0);
    }
}
