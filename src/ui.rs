pub mod screen;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::{ui::screen::current_screen, App, Tab};

const HORIZONTAL_MARGIN: u16 = 2;

pub fn ui(app: &mut App, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(1), // banner
            Constraint::Min(0),    // body
            Constraint::Length(1), // legend
        ])
        .split(f.area());

    render_header(app, f, chunks[0]);
    render_banner(app, f, chunks[1]);
    current_screen(&app.tab).render(app, f, chunks[2]);
    render_legend(app, f, chunks[3]);
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let style = if tab.needs_login() && !app.authed {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default()
            };
            Line::from(Span::styled(tab.to_string(), style))
        })
        .collect();

    let status = if app.authed { "online" } else { "(l)ogin" };

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .highlight_style(bold_style.fg(Color::Magenta))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" OVERDRIVE ", bold_style.fg(Color::Cyan)))
                .title_bottom(Line::from(format!(" {status} ")).alignment(Alignment::Right)),
        );

    f.render_widget(tabs, area);
}

fn render_banner(app: &App, f: &mut Frame, area: Rect) {
    if let Some(banner) = &app.banner {
        let widget = Paragraph::new(Span::styled(
            banner.text.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center);
        f.render_widget(widget, area);
    }
}

fn render_legend(app: &App, f: &mut Frame, area: Rect) {
    let legend = match app.tab {
        Tab::Training if app.controller.is_active() => {
            "(space) pause/resume / (d)one / (s)kip / (x) stop / (tab) switch / (esc)ape"
        }
        Tab::Training => "type MM:SS / (←/→) mood / (enter) start / (tab) switch / (esc)ape",
        Tab::History | Tab::Points => "(tab) switch / (esc)ape",
    };

    let widget = Paragraph::new(Span::styled(
        legend,
        Style::default().add_modifier(Modifier::ITALIC),
    ));
    f.render_widget(widget, area);
}
