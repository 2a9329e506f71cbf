//! ANSI escape handling for captured program output.
//!
//! SGR sequences (`ESC [ ... m`) become ratatui styles. Other control
//! sequences are dropped.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const ESC: char = '\x1b';

/// Convert text with ANSI escapes into styled lines.
///
/// Styles carry across line breaks, as they would on a terminal.
pub fn to_lines(text: &str, base: Style) -> Vec<Line<'static>> {
    let mut style = base;
    text.split('\n')
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            parse_line(line, base, &mut style)
        })
        .collect()
}

fn parse_line(line: &str, base: Style, style: &mut Style) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\t' {
            current.push_str("    ");
            continue;
        }
        if c != ESC {
            if !c.is_control() {
                current.push(c);
            }
            continue;
        }
        if chars.peek() != Some(&'[') {
            // Lone escape or a non-CSI sequence; skip its next character.
            chars.next();
            continue;
        }
        chars.next();

        let mut params = String::new();
        let mut terminator = None;
        for ch in chars.by_ref() {
            if ('\x40'..='\x7e').contains(&ch) {
                terminator = Some(ch);
                break;
            }
            params.push(ch);
        }

        if terminator == Some('m') {
            if !current.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut current), *style));
            }
            *style = apply_sgr(*style, base, &params);
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, *style));
    }
    Line::from(spans)
}

/// Apply one SGR parameter list to `style`.
pub fn apply_sgr(mut style: Style, base: Style, params: &str) -> Style {
    let codes: Vec<u16> = if params.is_empty() {
        vec![0]
    } else {
        params
            .split(';')
            .map(|p| p.parse().unwrap_or(0))
            .collect()
    };

    let mut iter = codes.into_iter();
    while let Some(code) = iter.next() {
        style = match code {
            0 => base,
            1 => style.add_modifier(Modifier::BOLD),
            2 => style.add_modifier(Modifier::DIM),
            3 => style.add_modifier(Modifier::ITALIC),
            4 => style.add_modifier(Modifier::UNDERLINED),
            7 => style.add_modifier(Modifier::REVERSED),
            9 => style.add_modifier(Modifier::CROSSED_OUT),
            22 => style.remove_modifier(Modifier::BOLD | Modifier::DIM),
            23 => style.remove_modifier(Modifier::ITALIC),
            24 => style.remove_modifier(Modifier::UNDERLINED),
            27 => style.remove_modifier(Modifier::REVERSED),
            29 => style.remove_modifier(Modifier::CROSSED_OUT),
            30..=37 => style.fg(basic_color(code - 30, false)),
            90..=97 => style.fg(basic_color(code - 90, true)),
            40..=47 => style.bg(basic_color(code - 40, false)),
            100..=107 => style.bg(basic_color(code - 100, true)),
            39 => Style { fg: base.fg, ..style },
            49 => Style { bg: base.bg, ..style },
            38 | 48 => match extended_color(&mut iter) {
                Some(color) if code == 38 => style.fg(color),
                Some(color) => style.bg(color),
                None => style,
            },
            _ => style,
        };
    }
    style
}

fn basic_color(index: u16, bright: bool) -> Color {
    match (index, bright) {
        (0, false) => Color::Black,
        (1, false) => Color::Red,
        (2, false) => Color::Green,
        (3, false) => Color::Yellow,
        (4, false) => Color::Blue,
        (5, false) => Color::Magenta,
        (6, false) => Color::Cyan,
        (7, false) => Color::Gray,
        (0, true) => Color::DarkGray,
        (1, true) => Color::LightRed,
        (2, true) => Color::LightGreen,
        (3, true) => Color::LightYellow,
        (4, true) => Color::LightBlue,
        (5, true) => Color::LightMagenta,
        (6, true) => Color::LightCyan,
        _ => Color::White,
    }
}

/// `5;n` (256-color) or `2;r;g;b` (truecolor) following a 38/48 code.
fn extended_color(iter: &mut impl Iterator<Item = u16>) -> Option<Color> {
    match iter.next()? {
        5 => u8::try_from(iter.next()?).ok().map(Color::Indexed),
        2 => {
            let r = u8::try_from(iter.next()?).ok()?;
            let g = u8::try_from(iter.next()?).ok()?;
            let b = u8::try_from(iter.next()?).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}
