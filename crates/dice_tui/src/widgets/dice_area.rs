//! Dice area widget.
//!
//! Draws each die as its face art, left to right, wrapping into rows.
//! Dice at or above the threshold are highlighted. After a roll every die
//! is shifted sideways by the wiggle offset. An empty tray shows the
//! tutorial text instead.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::app::DiceApp;

/// Shown while the tray is empty.
pub const TUTORIAL_TEXT: [&str; 2] = ["Press space to add a dice", "r to roll the dice"];

/// Peak horizontal shake right after a roll, in cells.
pub const WIGGLE_AMPLITUDE: f32 = 2.0;

/// Blank columns between neighbouring dice.
const GAP: u16 = 1;

/// Renders the dice area into the given area.
pub fn render_dice_area(app: &DiceApp, area: Rect, buf: &mut Buffer) {
    let tray = &app.dice.tray;
    let block = Block::default()
        .title(format!(" Dice ({}) ", tray.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if tray.is_empty() {
        render_tutorial(inner, buf);
        return;
    }

    let face_w = app.faces.width().max(1);
    let face_h = app.faces.height().max(1);
    let per_row = (inner.width / (face_w + GAP)).max(1);
    let offset = app.wiggle_offset(WIGGLE_AMPLITUDE);
    let threshold = app.dice.threshold.value();

    let hit = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let miss = Style::default().fg(Color::White);

    for (i, die) in tray.dice().iter().enumerate() {
        let i = u16::try_from(i).unwrap_or(u16::MAX);
        let row = i / per_row;
        let col = i % per_row;
        let top = u32::from(inner.y) + u32::from(row) * u32::from(face_h);
        if top + u32::from(face_h) > u32::from(inner.bottom()) {
            break;
        }
        let base = i32::from(inner.x) + i32::from(col * (face_w + GAP));
        let max_x = i32::from(inner.right().saturating_sub(face_w)).max(i32::from(inner.x));
        let x = (base + offset).clamp(i32::from(inner.x), max_x) as u16;
        let style = if die.value >= threshold { hit } else { miss };

        for (dy, line) in app.faces.face(die.value).iter().enumerate() {
            let y = top as u16 + dy as u16;
            let room = usize::from(inner.right().saturating_sub(x));
            buf.set_stringn(x, y, line, room, style);
        }
    }
}

fn render_tutorial(inner: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = TUTORIAL_TEXT
        .iter()
        .map(|t| Line::styled(*t, Style::default().fg(Color::Green)))
        .collect();
    let height = (lines.len() as u16).min(inner.height);
    let area = Rect::new(
        inner.x,
        inner.y + (inner.height - height) / 2,
        inner.width,
        height,
    );
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}
