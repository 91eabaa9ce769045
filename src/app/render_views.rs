use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{App, chart::PieChart};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let left = format_total(self.pie.total_left());
        let done = format_total(self.pie.total_completed());
        let total = format_total(self.pie.total_count());
        let totals = format!("{left} left / {done} done / {total} total");

        let status = if self.paused { "paused" } else { "running" };
        let right = format!("{} changes, {}", self.count_changes.get(), status);

        let border_color = self
            .pie
            .categories()
            .get(self.selected_index)
            .map(|category| category.color)
            .unwrap_or(Color::White);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(vec![
                    Span::styled(
                        "task pie",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        " demo board",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ])
                .alignment(Alignment::Left),
            )
            .title(
                Line::from(Span::styled(
                    totals,
                    Style::default().fg(Color::White),
                ))
                .alignment(Alignment::Center),
            )
            .title(
                Line::from(Span::styled(right, Style::default().fg(Color::White)))
                    .alignment(Alignment::Right),
            )
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(size);
        f.render_widget(block, size);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(3)])
            .split(inner);

        let slices = self.pie.plan_slices();
        if slices.is_empty() {
            let placeholder = Paragraph::new("nothing to show").alignment(Alignment::Center);
            f.render_widget(placeholder, rows[0]);
        } else {
            f.render_widget(PieChart::new(&slices), rows[0]);
        }

        self.render_legend(f, rows[1]);
    }

    fn render_legend(&self, f: &mut Frame, area: Rect) {
        let categories = self.pie.categories();
        if categories.is_empty() || area.width == 0 {
            return;
        }

        let constraints = vec![Constraint::Ratio(1, categories.len() as u32); categories.len()];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (index, (category, column)) in categories.iter().zip(columns.iter()).enumerate() {
            let name_style = if index == self.selected_index {
                Style::default()
                    .fg(category.color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let bar_width = (column.width as usize).saturating_sub(2).max(1);
            let lines = vec![
                Line::from(Span::styled(
                    "▄".repeat(bar_width),
                    Style::default().fg(category.color),
                )),
                Line::from(Span::styled(
                    format_total(category.count),
                    Style::default().fg(Color::White),
                )),
                Line::from(Span::styled(category.name.as_str(), name_style)),
            ];

            let cell = Paragraph::new(lines).alignment(Alignment::Center);
            f.render_widget(cell, *column);
        }
    }
}

fn format_total(value: Option<f64>) -> String {
    match value {
        None => "?".to_string(),
        Some(v) if v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) => format!("{v:.1}"),
    }
}
