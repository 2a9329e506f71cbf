//! Line-wise markdown rendering for the terminal.
//!
//! Covers the subset slides use: headings, paragraphs, bullet and numbered
//! lists, block quotes, horizontal rules, fenced code blocks and the inline
//! forms `code`, **bold**, *emphasis* and [links](url). Single underscores
//! are left alone so identifiers survive.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::highlight::{HighlightTheme, Highlighter};

const CODE_STYLE: Style = Style::new().fg(Color::Yellow);
const QUOTE_STYLE: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC);
const RULE_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Render markdown `text` into lines no wider than `width` for rules.
pub fn render(text: &str, width: u16, theme: &HighlightTheme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut fence: Option<Highlighter> = None;

    for raw in text.lines() {
        let trimmed = raw.trim_start();

        if let Some(info) = trimmed.strip_prefix("```") {
            fence = match fence {
                Some(_) => None,
                None => Some(Highlighter::for_language(info.trim())),
            };
            continue;
        }
        if let Some(highlighter) = &fence {
            let mut line = highlighter.to_line(raw, theme);
            line.spans.insert(0, Span::raw("  "));
            lines.push(line);
            continue;
        }

        lines.push(render_block_line(raw, trimmed, width));
    }

    lines
}

fn render_block_line(raw: &str, trimmed: &str, width: u16) -> Line<'static> {
    if trimmed.is_empty() {
        return Line::default();
    }

    if let Some((level, title)) = heading(trimmed) {
        let style = match level {
            1 => Style::new()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            2 => Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            _ => Style::new().add_modifier(Modifier::BOLD),
        };
        return Line::from(inline(title, style));
    }

    if is_rule(trimmed) {
        return Line::styled("─".repeat(usize::from(width.max(1))), RULE_STYLE);
    }

    if let Some(quoted) = trimmed.strip_prefix('>') {
        let mut spans = vec![Span::styled("│ ", QUOTE_STYLE)];
        spans.extend(inline(quoted.trim_start(), QUOTE_STYLE));
        return Line::from(spans);
    }

    let indent = raw.len() - trimmed.len();
    if let Some(item) = bullet(trimmed) {
        let mut spans = vec![Span::raw(format!("{}• ", " ".repeat(indent)))];
        spans.extend(inline(item, Style::new()));
        return Line::from(spans);
    }
    if let Some((number, item)) = numbered(trimmed) {
        let mut spans = vec![Span::raw(format!("{}{number}. ", " ".repeat(indent)))];
        spans.extend(inline(item, Style::new()));
        return Line::from(spans);
    }

    Line::from(inline(trimmed, Style::new()))
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level, rest));
    }
    rest.strip_prefix(' ').map(|title| (level, title.trim()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|&marker| compact.chars().all(|c| c == marker))
}

fn bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| line.strip_prefix(*marker))
}

fn numbered(line: &str) -> Option<(&str, &str)> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..]
        .strip_prefix(". ")
        .or_else(|| line[digits..].strip_prefix(") "))?;
    Some((&line[..digits], rest))
}

/// Split a line into spans for inline code, bold, emphasis and links.
fn inline(text: &str, base: Style) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let found = match c {
            '`' => delimited(rest, "`").map(|(inner, len)| (Span::styled(inner.to_string(), CODE_STYLE), len)),
            '*' | '_' if rest.starts_with("**") || rest.starts_with("__") => delimited(rest, &rest[..2])
                .map(|(inner, len)| (Span::styled(inner.to_string(), base.add_modifier(Modifier::BOLD)), len)),
            '*' => delimited(rest, "*")
                .map(|(inner, len)| (Span::styled(inner.to_string(), base.add_modifier(Modifier::ITALIC)), len)),
            '[' => link(rest).map(|(label, len)| {
                (
                    Span::styled(
                        label.to_string(),
                        base.fg(Color::LightBlue).add_modifier(Modifier::UNDERLINED),
                    ),
                    len,
                )
            }),
            _ => None,
        };

        match found {
            Some((span, len)) => {
                if !plain.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut plain), base));
                }
                spans.push(span);
                rest = &rest[len..];
            }
            None => {
                plain.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !plain.is_empty() {
        spans.push(Span::styled(plain, base));
    }
    spans
}

/// Content between a pair of `marker`s at the start of `text`, and the
/// consumed length.
fn delimited<'a>(text: &'a str, marker: &str) -> Option<(&'a str, usize)> {
    let body = &text[marker.len()..];
    let end = body.find(marker)?;
    if end == 0 {
        return None;
    }
    Some((&body[..end], marker.len() * 2 + end))
}

fn link(text: &str) -> Option<(&str, usize)> {
    let close = text.find("](")?;
    let end = text[close..].find(')')? + close;
    Some((&text[1..close], end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn render_default(text: &str) -> Vec<Line<'static>> {
        render(text, 10, &HighlightTheme::default())
    }

    #[test]
    fn headings_drop_markers() {
        let lines = render_default("# Title\n### Small");
        assert_eq!(plain(&lines[0]), "Title");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(plain(&lines[1]), "Small");
    }

    #[test]
    fn lists_and_quotes() {
        let lines = render_default("- one\n  * two\n3. three\n> wise");
        assert_eq!(plain(&lines[0]), "• one");
        assert_eq!(plain(&lines[1]), "  • two");
        assert_eq!(plain(&lines[2]), "3. three");
        assert_eq!(plain(&lines[3]), "│ wise");
    }

    #[test]
    fn rule_fills_width() {
        let lines = render_default("---");
        assert_eq!(plain(&lines[0]), "─".repeat(10));
    }

    #[test]
    fn fenced_code_keeps_text() {
        let lines = render_default("```python\n# comment\nx = 1\n```\nafter");
        assert_eq!(lines.len(), 3);
        assert_eq!(plain(&lines[0]), "  # comment");
        assert_eq!(plain(&lines[1]), "  x = 1");
        assert_eq!(plain(&lines[2]), "after");
    }

    #[test]
    fn inline_styles() {
        let spans = inline("run `ls` **now** or [docs](http://x)", Style::new());
        let texts: Vec<&str> = spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(texts, vec!["run ", "ls", " ", "now", " or ", "docs"]);
        assert_eq!(spans[1].style, CODE_STYLE);
        assert!(spans[3].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        let spans = inline("2 * 3 = 6", Style::new());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "2 * 3 = 6");
    }
}
