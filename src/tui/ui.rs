//! UI rendering for the abacus.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, List, ListItem},
    style::{Color, Style, Modifier},
};
use crate::model::Controls;
use super::app::AbacusApp;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &AbacusApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let controls = app.controls();

    draw_header(frame, chunks[0], app, &controls);
    draw_rows(frame, chunks[1], app, &controls);
    draw_status(frame, chunks[2], app);
    draw_help(frame, chunks[3]);
}

/// Base and value, with their +/- controls greyed out when disabled.
fn draw_header(frame: &mut Frame, area: Rect, app: &AbacusApp, controls: &Controls) {
    let model = &app.model;

    let content = vec![
        Line::from(vec![
            control_span("[-]", controls.base_down),
            Span::raw(" Base: "),
            Span::styled(format!("{:>2}", model.base()), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            control_span("[+]", controls.base_up),
        ]),
        Line::from(vec![
            control_span("[↓]", controls.value_down),
            Span::raw(" Value: "),
            Span::styled(format!("{}", model.value()), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw(format!(" = {}₍{}₎", model.base().format_value(model.value()), model.base())),
            Span::raw(" "),
            control_span("[↑]", controls.value_up),
            Span::styled(format!("   max {}", model.max_value()), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(Block::default()
            .title(" Abacus ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

    frame.render_widget(paragraph, area);
}

/// One line per row, most significant at the top.
fn draw_rows(frame: &mut Frame, area: Rect, app: &AbacusApp, controls: &Controls) {
    let model = &app.model;
    let label_width = model.place_value(model.row_count() - 1).to_string().len();

    let items: Vec<ListItem> = model.rows()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, row)| {
            let selected = i == app.selected_row;
            let prefix = if selected { "▶ " } else { "  " };
            let rc = controls.rows[i];

            let line = Line::from(vec![
                Span::raw(prefix),
                Span::styled(
                    format!("{:>width$}×", model.place_value(i), width = label_width),
                    Style::default().fg(Color::Gray),
                ),
                Span::raw(" "),
                control_span("«+", rc.to_active),
                Span::raw(" "),
                Span::styled("●".repeat(row.active() as usize), Style::default().fg(Color::Green)),
                Span::raw(" │ "),
                Span::styled("○".repeat(row.inactive() as usize), Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                control_span("-»", rc.to_inactive),
                Span::styled(
                    format!("  {}", model.base().digit_char(row.active())),
                    Style::default().fg(Color::Yellow),
                ),
            ]);

            let style = if selected {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default()
            .title(" Rows ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)));

    frame.render_widget(list, area);
}

/// Draw status bar.
fn draw_status(frame: &mut Frame, area: Rect, app: &AbacusApp) {
    let status = Paragraph::new(app.status.clone())
        .style(Style::default().fg(Color::White))
        .block(Block::default()
            .title(" Status ")
            .borders(Borders::ALL));

    frame.render_widget(status, area);
}

/// Draw help panel.
fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Paragraph::new(vec![
        Line::from("↑→: +1  ↓←: -1  +/-: Base  x: Reset  q: Quit"),
        Line::from("j/k: Select row  a/A: Push one/all  d/D: Pull one/all"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .block(Block::default()
        .title(" Help ")
        .borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn control_span(text: &'static str, enabled: bool) -> Span<'static> {
    if enabled {
        Span::styled(text, Style::default().fg(Color::Cyan))
    } else {
        Span::styled(text, Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
    }
}
