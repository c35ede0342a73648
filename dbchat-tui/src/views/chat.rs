//! Chat history and input line view.

use crate::state::App;
use crate::theme::turn_role_color;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    render_history(f, app, chunks[0]);
    render_input(f, app, chunks[1]);
}

fn render_history(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let mut lines: Vec<Line> = Vec::new();
    if let Some(session) = &app.session {
        for turn in session.transcript().iter() {
            let color = turn_role_color(turn.role, &app.theme);
            lines.push(Line::from(Span::styled(
                format!("{}:", turn.role),
                Style::default().fg(color),
            )));
            for text_line in turn.content.lines() {
                lines.push(Line::from(Span::styled(
                    format!("  {}", text_line),
                    Style::default().fg(app.theme.text),
                )));
            }
            lines.push(Line::from(""));
        }
    }

    // Stick to the bottom unless the user scrolled up.
    let height = area.height.saturating_sub(2);
    let total = lines.len() as u16;
    let bottom = total.saturating_sub(height);
    let offset = bottom.saturating_sub(app.scroll);

    let history = Paragraph::new(lines)
        .block(Block::default().title("Conversation").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((offset, 0));
    f.render_widget(history, area);
}

fn render_input(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let (text, color) = if app.busy {
        ("Thinking...".to_string(), app.theme.text_dim)
    } else {
        (format!("{}█", app.input), app.theme.text)
    };
    let input = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .title("Type a message")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border_focus)),
        );
    f.render_widget(input, area);
}
