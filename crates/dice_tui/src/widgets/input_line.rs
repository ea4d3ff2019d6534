//! Input line widget.
//!
//! Key hints in normal mode, otherwise the prompt and the text being typed.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::DiceApp;
use crate::state::InputMode;

const HINTS: [(&str, &str); 9] = [
    ("Space", "add"),
    ("r", "roll"),
    ("d", "remove"),
    ("s", "sort"),
    ("t", "threshold"),
    ("m", "macro"),
    ("#", "apply macro"),
    ("x", "delete macro"),
    ("?", "help"),
];

/// Renders the input line.
pub fn render_input_line(app: &DiceApp, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let key = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::DarkGray);

    let line = match app.ui.mode {
        InputMode::Normal => {
            let mut spans = vec![Span::styled(" q", key), Span::styled(":quit ", hint)];
            for (k, what) in HINTS {
                spans.push(Span::styled(k, key));
                spans.push(Span::styled(format!(":{what} "), hint));
            }
            Line::from(spans)
        }
        mode if mode.is_macro_number() => {
            let color = if mode == InputMode::DeleteMacro {
                Color::Red
            } else {
                Color::Yellow
            };
            Line::from(vec![
                Span::styled(
                    mode.prompt(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(app.ui.input.as_str(), Style::default().fg(Color::White)),
                Span::styled("█", Style::default().fg(Color::White)),
                Span::styled("  (Enter confirms, Esc cancels)", hint),
            ])
        }
        mode => Line::from(vec![
            Span::styled(
                format!("{}: ", mode.prompt()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(app.ui.input.as_str(), Style::default().fg(Color::White)),
            Span::styled("█", Style::default().fg(Color::White)),
        ]),
    };

    Widget::render(line, area, buf);
}
