//! Top-level rendering logic.
//!
//! Splits the terminal into panels and delegates to the widget modules,
//! then draws any popup on top.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::DiceApp;
use crate::widgets::{control_panel, dice_area, input_line, status_bar};

/// Renders the complete layout into the given frame.
///
/// Layout:
/// ```text
/// ┌────────────┬────────────────────────┐
/// │ Tray       │ Dice                   │
/// │ (24 cols)  │                        │
/// ├────────────┴────────────────────────┤
/// │ Status Bar                          │
/// ├─────────────────────────────────────┤
/// │ Input Line                          │
/// └─────────────────────────────────────┘
/// ```
pub fn render(app: &DiceApp, frame: &mut Frame) {
    let size = frame.size();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(10)])
        .split(vertical[0]);

    control_panel::render_control_panel(app, horizontal[0], frame.buffer_mut());
    dice_area::render_dice_area(app, horizontal[1], frame.buffer_mut());
    status_bar::render_status_bar(app, vertical[1], frame.buffer_mut());
    input_line::render_input_line(app, vertical[2], frame.buffer_mut());

    if app.ui.show_help {
        render_help_popup(frame);
    }
    if let Some(message) = &app.ui.error_popup {
        render_error_popup(frame, message);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(4));
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_help_popup(frame: &mut Frame) {
    let help_text = "\
Dice:
  Space      Add a die          d/Backspace  Remove a die
  r/Enter    Roll all dice      s            Toggle sorting
  t          Edit threshold

Macros:
  m          Define a macro (name, then roll like 4d6)
  1-9        Roll macro N       # then N     Roll macro N
  x then N   Delete macro N     (N is confirmed with Enter)

While typing, Enter confirms and Esc cancels.

  ?          Toggle help        q/Esc        Quit

Press ? to close";

    let popup_area = centered(frame.size(), 62, 18);
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false });

    frame.render_widget(popup, popup_area);
}

fn render_error_popup(frame: &mut Frame, message: &str) {
    let width = (message.chars().count() as u16).saturating_add(4).max(30);
    let popup_area = centered(frame.size(), width, 5);
    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(format!("{message}\n\npress any key"))
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    frame.render_widget(popup, popup_area);
}
