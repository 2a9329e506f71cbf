//! Drawing the presentation: header, slide body and footer.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use termdeck_core::{TableView, View};

use crate::ansi;
use crate::app::PresentationApp;
use crate::highlight::{HighlightTheme, Highlighter};
use crate::markdown;

const HEADER_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
const FOOTER_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::Rgb(40, 40, 40));
const STATUS_STYLE: Style = Style::new().fg(Color::Yellow).bg(Color::Rgb(40, 40, 40));
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const ZEBRA_STYLE: Style = Style::new().bg(Color::Rgb(35, 35, 35));

const KEY_HINTS: &str =
    " PgUp prev  PgDn next  . run  e edit  r reload  ^O shell  q quit";

/// Which bars surround the slide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub show_header: bool,
    pub show_footer: bool,
}

pub fn draw(frame: &mut Frame, app: &mut PresentationApp, chrome: Chrome) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(u16::from(chrome.show_header)),
        Constraint::Min(0),
        Constraint::Length(u16::from(chrome.show_footer)),
    ])
    .areas(frame.area());

    if chrome.show_header {
        draw_header(frame, app, header);
    }
    draw_body(frame, app, body);
    if chrome.show_footer {
        draw_footer(frame, app, footer);
    }
}

fn draw_header(frame: &mut Frame, app: &PresentationApp, area: Rect) {
    let title = Paragraph::new(Line::from(vec![Span::styled(
        format!(" {}", app.title()),
        HEADER_STYLE.add_modifier(Modifier::BOLD),
    )]))
    .style(HEADER_STYLE);
    frame.render_widget(title, area);

    let subtitle = Paragraph::new(format!("{} ", app.subtitle()))
        .style(HEADER_STYLE)
        .alignment(Alignment::Right);
    frame.render_widget(subtitle, area);
}

fn draw_body(frame: &mut Frame, app: &mut PresentationApp, area: Rect) {
    let inner = Rect {
        x: area.x.saturating_add(2),
        width: area.width.saturating_sub(4),
        y: area.y.saturating_add(1),
        height: area.height.saturating_sub(1),
    };

    let lines = match app.view() {
        Some(view) => view_lines(view, inner.width),
        None => Vec::new(),
    };

    let max_scroll = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_sub(inner.height);
    app.clamp_scroll(max_scroll);

    let paragraph = Paragraph::new(lines).scroll((app.scroll(), 0));
    frame.render_widget(paragraph, inner);
}

fn draw_footer(frame: &mut Frame, app: &PresentationApp, area: Rect) {
    frame.render_widget(Paragraph::new(KEY_HINTS).style(FOOTER_STYLE), area);

    if let Some(status) = app.status() {
        let status = Paragraph::new(format!("{status} "))
            .style(STATUS_STYLE)
            .alignment(Alignment::Right);
        frame.render_widget(status, area);
    }
}

/// Flatten a view into display lines for a body `width` cells wide.
pub fn view_lines(view: &View, width: u16) -> Vec<Line<'static>> {
    let theme = HighlightTheme::default();
    let mut lines = Vec::new();
    push_view(&mut lines, view, width, &theme);
    lines
}

fn push_view(lines: &mut Vec<Line<'static>>, view: &View, width: u16, theme: &HighlightTheme) {
    match view {
        View::Markdown { text, classes } => {
            let centered = classes
                .as_deref()
                .is_some_and(|c| c.split_whitespace().any(|class| class == "center"));
            for line in markdown::render(text, width, theme) {
                for wrapped in wrap(line, width) {
                    lines.push(if centered { wrapped.centered() } else { wrapped });
                }
            }
        }
        View::Code { language, code } => {
            let highlighter = Highlighter::for_language(language);
            lines.extend(code.lines().map(|line| highlighter.to_line(line, theme)));
        }
        View::Output { text, is_error } => {
            let text = text.trim_end_matches('\n');
            if *is_error {
                lines.extend(error_box(text, width));
            } else {
                lines.extend(ansi::to_lines(text, Style::new()));
            }
        }
        View::Text(text) => lines.extend(text.lines().map(|l| Line::raw(l.to_string()))),
        View::Table(table) => lines.extend(table_lines(table)),
        View::Column(children) => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::default());
                }
                push_view(lines, child, width, theme);
            }
        }
    }
}

/// Output lines framed in red.
fn error_box(text: &str, width: u16) -> Vec<Line<'static>> {
    let inner = usize::from(width.saturating_sub(4).max(1));
    let mut lines = vec![Line::styled(format!("┌{}┐", "─".repeat(inner + 2)), ERROR_STYLE)];

    for line in ansi::to_lines(text, Style::new()) {
        for wrapped in wrap(line, width.saturating_sub(4).max(1)) {
            let padding = inner.saturating_sub(wrapped.width());
            let mut spans = vec![Span::styled("│ ", ERROR_STYLE)];
            spans.extend(wrapped.spans);
            spans.push(Span::raw(" ".repeat(padding)));
            spans.push(Span::styled(" │", ERROR_STYLE));
            lines.push(Line::from(spans));
        }
    }

    lines.push(Line::styled(format!("└{}┘", "─".repeat(inner + 2)), ERROR_STYLE));
    lines
}

/// Aligned columns with a bold header and alternating row shading.
fn table_lines(table: &TableView) -> Vec<Line<'static>> {
    let widths: Vec<usize> = (0..table.num_columns())
        .map(|col| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(col))
                .chain(std::iter::once(&table.columns[col]))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{cell:<w$}")
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut lines = vec![Line::styled(
        format_row(&table.columns),
        Style::new().add_modifier(Modifier::BOLD),
    )];
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    lines.push(Line::styled("─".repeat(total), Style::new().fg(Color::DarkGray)));

    for (i, row) in table.rows.iter().enumerate() {
        let style = if i % 2 == 1 { ZEBRA_STYLE } else { Style::new() };
        lines.push(Line::styled(format_row(row), style));
    }
    lines
}

/// Word-wrap a styled line to `width` cells.
fn wrap(line: Line<'static>, width: u16) -> Vec<Line<'static>> {
    let width = usize::from(width.max(1));
    if line.width() <= width {
        return vec![line];
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in line.spans {
        for word in span.content.split_inclusive(' ') {
            let mut word = word.to_string();
            let mut word_width = Span::raw(word.as_str()).width();

            if current_width + word_width > width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
                word = word.trim_start().to_string();
                word_width = Span::raw(word.as_str()).width();
            }

            while word_width > width {
                let split = split_at_width(&word, width - current_width);
                let head: String = word[..split].to_string();
                word = word[split..].to_string();
                current.push(Span::styled(head, span.style));
                lines.push(Line::from(std::mem::take(&mut current)));
                current_width = 0;
                word_width = Span::raw(word.as_str()).width();
            }

            if !word.is_empty() {
                current_width += word_width;
                current.push(Span::styled(word, span.style));
            }
        }
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// Byte index of the longest prefix of `text` fitting in `width` cells.
fn split_at_width(text: &str, width: usize) -> usize {
    let mut used = 0;
    for (i, c) in text.char_indices() {
        let w = Span::raw(c.to_string()).width();
        if used + w > width && i > 0 {
            return i;
        }
        used += w;
    }
    text.len()
}
