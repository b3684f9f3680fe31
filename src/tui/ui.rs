use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ContentView, NavList, TitleBar};

const SIDEBAR_WIDTH: u16 = 30;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [nav_area, content_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    let mut title_bar = TitleBar {
        route: app.router.current().map(|r| r.to_string()),
        loading: app.is_loading(),
    };
    title_bar.render(frame, title_area);

    NavList::new(&mut tui.nav_list, &app.shell.nav, app.selection.current())
        .render(frame, nav_area);

    ContentView::new(&mut tui.content, &app.shell.main).render(frame, content_area);

    let help = Line::styled(
        " ↑/↓ Focus  Enter Open  [ Back  ] Forward  r Reload  j/k Scroll  q Quit",
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(help, help_area);
}
