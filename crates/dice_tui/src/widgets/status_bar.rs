//! Status bar widget.
//!
//! Single line showing the input mode, a short tray summary and the most
//! recent status message. Error messages are drawn in red.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::DiceApp;
use crate::state::InputMode;

/// Renders the status bar into the given area.
pub fn render_status_bar(app: &DiceApp, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }

    let (mode_str, mode_style) = match app.ui.mode {
        InputMode::Normal => ("NORMAL", Style::default().bg(Color::Blue).fg(Color::White)),
        InputMode::DeleteMacro => ("DELETE", Style::default().bg(Color::Red).fg(Color::White)),
        InputMode::ApplyMacro
        | InputMode::Threshold
        | InputMode::MacroName
        | InputMode::MacroRoll => {
            ("INPUT", Style::default().bg(Color::Yellow).fg(Color::Black))
        }
    };

    let tray = &app.dice.tray;
    let mut spans = vec![
        Span::styled(
            format!(" {mode_str} "),
            mode_style.add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} dice | sum {}", tray.len(), tray.sum()),
            Style::default().fg(Color::White),
        ),
    ];
    if let Some(status) = &app.ui.status {
        let color = if status.is_error {
            Color::LightRed
        } else {
            Color::Cyan
        };
        spans.push(Span::styled(
            format!(" | {}", status.text),
            Style::default().fg(color),
        ));
    }

    let bg_style = Style::default().bg(Color::DarkGray);
    for x in area.x..area.x + area.width {
        if x < buf.area().right() {
            buf.get_mut(x, area.y).set_style(bg_style);
        }
    }

    Widget::render(Line::from(spans), area, buf);
}
