//! Placeholder bars shown while remote content is loading.

use crate::ui::motion::{ease_in_out, SHIMMER_PERIOD_TICKS};
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Relative widths of the placeholder rows.
const ROWS: &[f64] = &[0.92, 0.78, 0.55];
const SHINE_WIDTH: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, ticks: u64) {
    let lines: Vec<Line> = ROWS
        .iter()
        .take(area.height as usize)
        .map(|fraction| {
            let width = (f64::from(area.width) * fraction) as u16;
            bar_line(width, shine_offset(ticks, area.width))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Column where the shimmer highlight starts on this tick.
pub fn shine_offset(ticks: u64, width: u16) -> u16 {
    let span = f64::from(width) + f64::from(SHINE_WIDTH);
    let phase = (ticks % SHIMMER_PERIOD_TICKS) as f64 / SHIMMER_PERIOD_TICKS as f64;
    (ease_in_out(phase) * span) as u16
}

fn bar_line(width: u16, shine_at: u16) -> Line<'static> {
    let mut spans = Vec::new();
    let shine_start = shine_at.saturating_sub(SHINE_WIDTH).min(width);
    let shine_end = shine_at.min(width);
    if shine_start > 0 {
        spans.push(Span::styled(
            "▒".repeat(shine_start as usize),
            Theme::skeleton(),
        ));
    }
    if shine_end > shine_start {
        spans.push(Span::styled(
            "▓".repeat((shine_end - shine_start) as usize),
            Theme::skeleton_shine(),
        ));
    }
    if width > shine_end {
        spans.push(Span::styled(
            "▒".repeat((width - shine_end) as usize),
            Theme::skeleton(),
        ));
    }
    Line::from(spans)
}
