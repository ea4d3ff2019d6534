//! Control panel widget.
//!
//! Left column with the tray summary and the numbered macro list.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::DiceApp;

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

/// Renders the control panel into the given area.
pub fn render_control_panel(app: &DiceApp, area: Rect, buf: &mut Buffer) {
    let dice = &app.dice;
    let sorted = if dice.tray.is_sorted() { "yes" } else { "no" };

    let mut lines = vec![
        field("Dice: ", dice.tray.len().to_string()),
        field("Sum: ", dice.tray.sum().to_string()),
        field("Sorted: ", sorted.to_string()),
        field("Threshold: ", dice.threshold.value().to_string()),
        Line::from(vec![
            Span::styled("Successes: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                dice.successes().to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::styled(
            "Macros",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if dice.macros.is_empty() {
        lines.push(Line::styled(
            "  (m to define)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    for (i, m) in dice.macros.iter().enumerate() {
        // The first nine have a single-key shortcut.
        let key_style = if i < 9 {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), key_style),
            Span::styled(m.label(), Style::default().fg(Color::White)),
        ]));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Tray ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_app;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol().chars().next().unwrap_or(' '))
            .collect()
    }

    fn rendered(app: &DiceApp) -> Vec<String> {
        let area = Rect::new(0, 0, 30, 14);
        let mut buf = Buffer::empty(area);
        render_control_panel(app, area, &mut buf);
        (0..area.height).map(|y| row(&buf, y)).collect()
    }

    #[test]
    fn shows_sum_and_threshold() {
        let mut app = test_app();
        app.dice.tray.roll(4);
        let sum = app.dice.tray.sum();
        let text = rendered(&app).join("\n");
        assert!(text.contains(&format!("Sum: {sum}")), "{text}");
        assert!(text.contains("Threshold: 3"));
        assert!(text.contains("Sorted: no"));
        assert!(text.contains("(m to define)"));
    }

    #[test]
    fn lists_macros_with_labels() {
        let mut app = test_app();
        app.dice.macros.create_from_text("fireball", "8d6").unwrap();
        app.dice.macros.create_from_text("sword", "1d8").unwrap();
        let text = rendered(&app).join("\n");
        assert!(text.contains(" 1. fireball(8d6)"), "{text}");
        assert!(text.contains(" 2. sword(1d8)"));
        assert!(!text.contains("m to define"));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let app = test_app();
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        render_control_panel(&app, area, &mut buf);
    }
}
