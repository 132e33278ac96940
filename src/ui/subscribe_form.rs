use crate::app::state::AppState;
use crate::subscribe::SubmitStatus;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};

const PLACEHOLDER: &str = "you@example.com";
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let enabled = state.form.accepts_input();
    let (border_style, border_type) = if enabled {
        (Theme::border_focused(), Theme::border_type_focused())
    } else {
        (Theme::border(), Theme::border_type())
    };

    let block = Block::default()
        .title(" Email ")
        .title_style(if enabled {
            Theme::title()
        } else {
            Theme::border()
        })
        .title_bottom(Line::from(" Enter to subscribe ").right_aligned())
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = &state.form.input;
    let text = if input.text.is_empty() && enabled {
        Span::styled(PLACEHOLDER, Theme::placeholder())
    } else if enabled {
        Span::styled(input.text.as_str(), Theme::input_text())
    } else {
        Span::styled(input.text.as_str(), Theme::input_disabled())
    };
    let line = Line::from(vec![
        Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)),
        text,
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    if enabled && inner.width > 0 {
        // Prompt chevron "❯ " is 2 columns.
        let prompt_offset = 2u16;
        let typed = u16::try_from(input.cursor_width()).unwrap_or(u16::MAX);
        let cursor_x = inner.x.saturating_add(prompt_offset).saturating_add(typed);
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}

pub fn render_message(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = state.form.status();
    let line = match status {
        SubmitStatus::Idle => Line::default(),
        SubmitStatus::Submitting => Line::from(Span::styled(
            format!(" {} Subscribing…", spinner_frame(state.ticks)),
            Theme::pending_message(),
        )),
        SubmitStatus::Success { message } => {
            Line::from(Span::styled(format!(" ✓ {}", message), Theme::success_message()))
        }
        SubmitStatus::Error { message } => {
            Line::from(Span::styled(format!(" ✗ {}", message), Theme::error_message()))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn spinner_frame(ticks: u64) -> &'static str {
    SPINNER[(ticks as usize / 2) % SPINNER.len()]
}
