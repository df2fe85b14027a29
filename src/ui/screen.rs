use overdrive::{
    duration::format_seconds,
    history::HistoryEntry,
    points::Metric,
    session::SessionPhase,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, Paragraph, Row, Table},
    Frame,
};

use crate::{App, Tab};

/// A UI Screen boundary: responsible for rendering one tab's body
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame, area: Rect);
}

/// Setup form, or the live session once one is running
pub struct TrainingScreen;

impl Screen for TrainingScreen {
    fn render(&self, app: &mut App, f: &mut Frame, area: Rect) {
        match app.controller.phase() {
            SessionPhase::Running | SessionPhase::Paused => render_session(app, f, area),
            // a finished session falls back to the setup form
            SessionPhase::Setup | SessionPhase::Completed => render_setup(app, f, area),
        }
    }
}

fn render_setup(app: &App, f: &mut Frame, area: Rect) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(2), // question
            Constraint::Length(3), // duration field
            Constraint::Length(1),
            Constraint::Length(1), // mood label
            Constraint::Length(3), // mood slider
            Constraint::Min(0),
        ])
        .split(area);

    let question = Paragraph::new(Span::styled(
        "How would you describe how you feel right now?",
        bold_style,
    ))
    .alignment(Alignment::Center);
    f.render_widget(question, chunks[1]);

    let seconds = app.duration.seconds();
    let planned = if seconds > 0 {
        format!("= {}", format_seconds(seconds as u64))
    } else {
        "nothing to run".to_string()
    };
    let field = Paragraph::new(Line::from(vec![
        Span::styled(app.duration.text().to_string(), bold_style),
        Span::styled("_", dim_style),
        Span::raw("  "),
        Span::styled(planned, dim_style),
    ]))
    .block(Block::default().borders(Borders::ALL).title(" Duration (MM:SS) "))
    .alignment(Alignment::Center);
    f.render_widget(field, chunks[2]);

    let mood_label = Paragraph::new(Span::styled(
        app.mood.label(),
        Style::default().fg(Color::Magenta).patch(bold_style),
    ))
    .alignment(Alignment::Center);
    f.render_widget(mood_label, chunks[4]);

    let slider = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" very unpleasant ")
                .title_top(Line::from(" very pleasant ").alignment(Alignment::Right)),
        )
        .gauge_style(Style::default().fg(Color::Magenta))
        .label(format!("{:+}", app.mood.value()))
        .ratio(app.mood.ratio());
    f.render_widget(slider, chunks[5]);
}

fn render_session(app: &App, f: &mut Frame, area: Rect) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1), // elapsed / total
            Constraint::Length(1),
            Constraint::Length(3), // progress
            Constraint::Length(1), // set index + pause flag
            Constraint::Min(0),
        ])
        .split(area);

    let timer = Paragraph::new(Span::styled(app.controller.elapsed_display(), bold_style))
        .alignment(Alignment::Center);
    f.render_widget(timer, chunks[1]);

    let progress_style = if app.controller.is_paused() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(progress_style)
        .label(format!(
            "{} left",
            format_seconds(app.controller.remaining_seconds())
        ))
        .ratio(app.controller.progress());
    f.render_widget(progress, chunks[3]);

    let mut status = vec![Span::styled(
        format!("Set {}", app.controller.current_set_index()),
        bold_style,
    )];
    if app.controller.is_paused() {
        status.push(Span::raw("   "));
        status.push(Span::styled(
            "PAUSED",
            Style::default().fg(Color::Yellow).patch(bold_style),
        ));
    }
    f.render_widget(
        Paragraph::new(Line::from(status)).alignment(Alignment::Center),
        chunks[4],
    );
}

/// Timeline of past sessions, newest first
pub struct HistoryScreen;

impl Screen for HistoryScreen {
    fn render(&self, app: &mut App, f: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            Cell::from("When"),
            Cell::from("Time"),
            Cell::from("Sets"),
            Cell::from("Status"),
            Cell::from("Mood"),
            Cell::from("Points"),
        ])
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows: Vec<Row> = app
            .history
            .newest_first()
            .into_iter()
            .map(present_row)
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(18),
                Constraint::Length(15),
                Constraint::Length(6),
                Constraint::Length(10),
                Constraint::Length(16),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Sessions ({}) ", app.history.len())),
        );

        f.render_widget(table, area);
    }
}

fn present_row(entry: &HistoryEntry) -> Row<'static> {
    let (status, status_color) = if entry.completed {
        ("done", Color::Green)
    } else {
        ("stopped", Color::Red)
    };

    Row::new(vec![
        Cell::from(entry.finished_at.format("%a %d %b %H:%M").to_string()),
        Cell::from(format!(
            "{} / {}",
            format_seconds(entry.elapsed_seconds),
            format_seconds(entry.planned_seconds)
        )),
        Cell::from(entry.sets.to_string()),
        Cell::from(status).style(Style::default().fg(status_color)),
        Cell::from(entry.mood.label()),
        Cell::from(format!("{:.0}", entry.points().total())),
    ])
}

/// Points per metric plus a few session statistics
pub struct PointsScreen;

impl Screen for PointsScreen {
    fn render(&self, app: &mut App, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(6)])
            .split(area);

        let score = app.history.total_points();
        let bars: Vec<Bar> = Metric::ALL
            .iter()
            .map(|metric| {
                let value = score.get(*metric);
                Bar::default()
                    .label(Line::from(metric.to_string()))
                    .value(value.round() as u64)
                    .text_value(format!("{value:.1}"))
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(" Points "))
            .bar_width(12)
            .bar_gap(4)
            .bar_style(Style::default().fg(Color::Magenta))
            .data(BarGroup::default().bars(&bars));
        f.render_widget(chart, chunks[0]);

        let history = &app.history;
        let duration_line = match (history.mean_elapsed_minutes(), history.elapsed_std_dev()) {
            (Some(mean), Some(sd)) => format!("{mean:.1} min avg   {sd:.1} sd"),
            _ => "no sessions yet".to_string(),
        };
        let mood_line = history
            .mean_mood()
            .map(|m| format!("usual mood: {}", m.label()))
            .unwrap_or_default();

        let stats = Paragraph::new(vec![
            Line::from(format!(
                "{} sessions   {} completed   {} trained",
                history.len(),
                history.completed_count(),
                format_seconds(history.total_elapsed_seconds())
            )),
            Line::from(duration_line),
            Line::from(mood_line),
            Line::from(format!("{:.1} points total", score.total())),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Stats "))
        .alignment(Alignment::Center);
        f.render_widget(stats, chunks[1]);
    }
}

/// Helper to construct the appropriate screen for the current tab
pub fn current_screen(tab: &Tab) -> Box<dyn Screen> {
    match tab {
        Tab::Training => Box::new(TrainingScreen),
        Tab::History => Box::new(HistoryScreen),
        Tab::Points => Box::new(PointsScreen),
    }
}
