//! # Navigation List Component
//!
//! The sidebar: one row per bound nav link. Two independent markers:
//!
//! - the **selected** marker (`▸`, bold) — which fragment is displayed,
//!   owned by the core `Selection` and passed in as a prop;
//! - the **focus** row (reversed) — where the keyboard cursor sits,
//!   pure presentation state owned here.
//!
//! Follows the persistent state + transient wrapper pattern:
//! `NavListState` lives in `TuiState`, `NavList` is created each frame
//! with borrowed state.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::shell::NavLink;

/// Persistent keyboard-focus state for the nav list.
pub struct NavListState {
    pub focused: usize,
    pub list_state: ListState,
}

impl Default for NavListState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavListState {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            focused: 0,
            list_state,
        }
    }

    pub fn focus_up(&mut self) {
        self.focused = self.focused.saturating_sub(1);
        self.list_state.select(Some(self.focused));
    }

    pub fn focus_down(&mut self, len: usize) {
        if len > 0 {
            self.focused = (self.focused + 1).min(len - 1);
            self.list_state.select(Some(self.focused));
        }
    }
}

/// Transient render wrapper for the nav sidebar.
pub struct NavList<'a> {
    state: &'a mut NavListState,
    links: &'a [NavLink],
    selected: Option<usize>,
}

impl<'a> NavList<'a> {
    pub fn new(state: &'a mut NavListState, links: &'a [NavLink], selected: Option<usize>) -> Self {
        Self {
            state,
            links,
            selected,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Contents ")
            .padding(Padding::horizontal(1));

        let items: Vec<ListItem> = self
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let marker = if self.selected == Some(i) { "▸ " } else { "  " };

                let mut style = if self.selected == Some(i) {
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                if i == self.state.focused {
                    style = style.add_modifier(Modifier::REVERSED);
                }

                ListItem::new(Line::from(vec![
                    Span::styled(marker, style),
                    Span::styled(link.label.clone(), style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_clamps_at_both_ends() {
        let mut state = NavListState::new();
        state.focus_up();
        assert_eq!(state.focused, 0);

        state.focus_down(3);
        state.focus_down(3);
        state.focus_down(3);
        assert_eq!(state.focused, 2);
    }

    #[test]
    fn focus_down_on_empty_list_is_noop() {
        let mut state = NavListState::new();
        state.focus_down(0);
        assert_eq!(state.focused, 0);
    }
}
