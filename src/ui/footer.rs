use crate::app::state::AppState;
use crate::footer::{FooterLink, FooterLoad};
use crate::ui::skeleton;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINK_SEPARATOR: &str = "  ·  ";
const EXTERNAL_MARK: &str = " ↗";

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" About ")
        .title_style(Theme::title())
        .borders(Borders::TOP)
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.footer.load == FooterLoad::Loading && state.config.ui.animations {
        skeleton::render(frame, inner, state.ticks);
        return;
    }

    let content = &state.footer.content;
    let mut lines = vec![Line::from(Span::styled(
        content.content.clone(),
        Theme::body_text(),
    ))];

    if !content.links.is_empty() {
        lines.push(Line::default());
        lines.push(links_line(&content.links, inner.width));
    }

    for social in &content.social_media {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", social.platform), Theme::muted()),
            Span::styled(social.url.clone(), Theme::link()),
        ]));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Links share one row; each title gets an equal slice of the width.
fn links_line(links: &[FooterLink], width: u16) -> Line<'static> {
    let separators = LINK_SEPARATOR.width() * links.len().saturating_sub(1);
    let per_link = (width as usize).saturating_sub(separators) / links.len().max(1);

    let mut spans = Vec::new();
    for (i, link) in links.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(LINK_SEPARATOR, Theme::muted()));
        }
        let mark = if link.opens_new_window() {
            EXTERNAL_MARK
        } else {
            ""
        };
        let title = truncate_to_width(&link.title, per_link.saturating_sub(mark.width()));
        spans.push(Span::styled(title, Theme::link()));
        if !mark.is_empty() {
            spans.push(Span::styled(mark, Theme::muted()));
        }
    }
    Line::from(spans)
}

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
