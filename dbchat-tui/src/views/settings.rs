//! Connection settings view.

use crate::state::{App, SettingsField};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: ratatui::layout::Rect) {
    let fields = SettingsField::all();
    let mut constraints: Vec<Constraint> = vec![Constraint::Length(4)];
    constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let intro = Paragraph::new(
        "Connect to a PostgreSQL database and start chatting. \
         Questions are answered by generating and running SQL.",
    )
    .style(Style::default().fg(app.theme.text_dim))
    .wrap(Wrap { trim: true })
    .block(Block::default().title("Settings").borders(Borders::ALL));
    f.render_widget(intro, chunks[0]);

    for (i, field) in fields.iter().enumerate() {
        let focused = app.settings.focus == *field;
        let border = if focused {
            app.theme.border_focus
        } else {
            app.theme.border
        };
        let value = if *field == SettingsField::Password {
            "*".repeat(app.settings.value(*field).chars().count())
        } else {
            app.settings.value(*field).to_string()
        };
        let text = if focused { format!("{}█", value) } else { value };
        let widget = Paragraph::new(text)
            .style(Style::default().fg(app.theme.text))
            .block(
                Block::default()
                    .title(field.label())
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(widget, chunks[i + 1]);
    }
}
