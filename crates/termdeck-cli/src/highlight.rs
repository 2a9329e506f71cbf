//! Syntax highlighting for code slides
//!
//! A small line-based scanner that recognizes keywords, strings, comments and
//! numbers for the languages presentations commonly show. It does not try to
//! be a parser: every line is highlighted on its own.

use std::ops::Range;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Highlight category for token coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Language keywords
    Keyword,
    /// Capitalized names
    Type,
    /// Names followed by a call
    Function,
    /// Numeric literals
    Number,
    /// String and character literals
    String,
    /// Line comments
    Comment,
    /// Operators (+, -, =, etc.)
    Operator,
    /// Brackets and separators
    Punctuation,
    /// Other names
    Identifier,
}

impl HighlightKind {
    /// Get the style for this highlight kind based on theme
    #[must_use]
    pub fn style(self, theme: &HighlightTheme) -> Style {
        match self {
            Self::Keyword => Style::default().fg(theme.keyword).add_modifier(Modifier::BOLD),
            Self::Type => Style::default().fg(theme.type_name),
            Self::Function => Style::default().fg(theme.function),
            Self::Number => Style::default().fg(theme.number),
            Self::String => Style::default().fg(theme.string),
            Self::Comment => Style::default().fg(theme.comment).add_modifier(Modifier::ITALIC),
            Self::Operator => Style::default().fg(theme.operator),
            Self::Punctuation => Style::default().fg(theme.punctuation),
            Self::Identifier => Style::default().fg(theme.identifier),
        }
    }
}

/// Color theme for syntax highlighting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTheme {
    pub keyword: Color,
    pub type_name: Color,
    pub function: Color,
    pub number: Color,
    pub string: Color,
    pub comment: Color,
    pub operator: Color,
    pub punctuation: Color,
    pub identifier: Color,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl HighlightTheme {
    /// Dark theme (default)
    #[must_use]
    pub fn dark() -> Self {
        Self {
            keyword: Color::Rgb(196, 120, 209),
            type_name: Color::Rgb(97, 186, 209),
            function: Color::Rgb(153, 204, 102),
            number: Color::Rgb(222, 186, 117),
            string: Color::Rgb(204, 153, 102),
            comment: Color::Rgb(115, 140, 115),
            operator: Color::Rgb(171, 171, 171),
            punctuation: Color::Rgb(153, 153, 153),
            identifier: Color::Rgb(217, 217, 217),
        }
    }
}

/// Lexical conventions of one language family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Syntax {
    comments: &'static [&'static str],
    quotes: &'static [char],
    keywords: &'static [&'static str],
}

const PYTHON: Syntax = Syntax {
    comments: &["#"],
    quotes: &['"', '\''],
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "False", "finally", "for", "from", "global", "if", "import",
        "in", "is", "lambda", "None", "nonlocal", "not", "or", "pass", "raise", "return",
        "True", "try", "while", "with", "yield",
    ],
};

const SHELL: Syntax = Syntax {
    comments: &["#"],
    quotes: &['"', '\''],
    keywords: &[
        "case", "do", "done", "echo", "elif", "else", "esac", "export", "fi", "for", "function",
        "if", "in", "local", "return", "then", "until", "while",
    ],
};

const RUST: Syntax = Syntax {
    comments: &["//"],
    quotes: &['"'],
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "else", "enum", "false",
        "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
        "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
        "unsafe", "use", "where", "while",
    ],
};

const C_FAMILY: Syntax = Syntax {
    comments: &["//"],
    quotes: &['"', '\''],
    keywords: &[
        "break", "case", "catch", "class", "const", "continue", "default", "defer", "do",
        "else", "enum", "extends", "false", "final", "fn", "for", "fun", "func", "function",
        "go", "if", "import", "int", "interface", "let", "long", "new", "null", "package",
        "private", "pub", "public", "return", "static", "struct", "switch", "this", "throw",
        "true", "try", "type", "val", "var", "void", "when", "while",
    ],
};

const HASKELL: Syntax = Syntax {
    comments: &["--"],
    quotes: &['"'],
    keywords: &[
        "case", "class", "data", "deriving", "do", "else", "if", "import", "in", "instance",
        "let", "module", "of", "then", "type", "where",
    ],
};

const LISP: Syntax = Syntax {
    comments: &[";"],
    quotes: &['"'],
    keywords: &["begin", "cond", "define", "else", "if", "lambda", "let", "quote", "set"],
};

const RUBY: Syntax = Syntax {
    comments: &["#"],
    quotes: &['"', '\''],
    keywords: &[
        "begin", "class", "def", "do", "else", "elsif", "end", "ensure", "false", "if", "in",
        "module", "nil", "puts", "rescue", "return", "self", "true", "unless", "until", "when",
        "while", "yield",
    ],
};

const CONFIG: Syntax = Syntax {
    comments: &["#"],
    quotes: &['"', '\''],
    keywords: &["false", "null", "true"],
};

/// Per-language line highlighter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlighter {
    syntax: Option<Syntax>,
}

impl Highlighter {
    /// Highlighter for a language name. Unknown languages and `text` get none.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        let syntax = match language.to_ascii_lowercase().as_str() {
            "python" | "py" => Some(PYTHON),
            "shell" | "sh" | "bash" | "zsh" => Some(SHELL),
            "rust" | "rs" => Some(RUST),
            "c" | "cpp" | "c++" | "java" | "javascript" | "js" | "typescript" | "ts" | "go"
            | "kotlin" | "kt" | "zig" | "swift" | "csharp" => Some(C_FAMILY),
            "haskell" | "hs" => Some(HASKELL),
            "scheme" | "lisp" | "clojure" | "racket" => Some(LISP),
            "ruby" | "rb" => Some(RUBY),
            "toml" | "yaml" | "json" => Some(CONFIG),
            _ => None,
        };
        Self { syntax }
    }

    /// Classify the non-whitespace byte ranges of `line`.
    #[must_use]
    pub fn highlight_line(&self, line: &str) -> Vec<(Range<usize>, HighlightKind)> {
        let Some(syntax) = self.syntax else {
            return Vec::new();
        };

        let mut highlights = Vec::new();
        let mut chars = line.char_indices().peekable();

        while let Some(&(start, c)) = chars.peek() {
            let rest = &line[start..];

            if c.is_whitespace() {
                chars.next();
            } else if syntax.comments.iter().any(|prefix| rest.starts_with(*prefix)) {
                highlights.push((start..line.len(), HighlightKind::Comment));
                break;
            } else if syntax.quotes.contains(&c) {
                chars.next();
                let mut end = line.len();
                let mut escaped = false;
                for (i, ch) in chars.by_ref() {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == c {
                        end = i + ch.len_utf8();
                        break;
                    }
                }
                highlights.push((start..end, HighlightKind::String));
            } else if c.is_ascii_digit() {
                let end = consume_while(&mut chars, line, |ch| ch.is_ascii_alphanumeric() || ch == '.' || ch == '_');
                highlights.push((start..end, HighlightKind::Number));
            } else if is_word_char(c) {
                let end = consume_while(&mut chars, line, is_word_char);
                let word = &line[start..end];
                let kind = if syntax.keywords.iter().any(|keyword| *keyword == word) {
                    HighlightKind::Keyword
                } else if line[end..].trim_start().starts_with('(') {
                    HighlightKind::Function
                } else if word.starts_with(|ch: char| ch.is_uppercase()) {
                    HighlightKind::Type
                } else {
                    HighlightKind::Identifier
                };
                highlights.push((start..end, kind));
            } else {
                chars.next();
                let kind = if "+-*/%=<>!&|^~?:@$".contains(c) {
                    HighlightKind::Operator
                } else {
                    HighlightKind::Punctuation
                };
                highlights.push((start..start + c.len_utf8(), kind));
            }
        }

        highlights
    }

    /// Styled line ready for display.
    #[must_use]
    pub fn to_line(&self, line: &str, theme: &HighlightTheme) -> Line<'static> {
        let mut spans = Vec::new();
        let mut position = 0;

        for (range, kind) in self.highlight_line(line) {
            if range.start > position {
                spans.push(Span::raw(line[position..range.start].to_string()));
            }
            spans.push(Span::styled(line[range.clone()].to_string(), kind.style(theme)));
            position = range.end;
        }
        if position < line.len() {
            spans.push(Span::raw(line[position..].to_string()));
        }

        Line::from(spans)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn consume_while(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    predicate: impl Fn(char) -> bool,
) -> usize {
    while let Some(&(i, ch)) = chars.peek() {
        if !predicate(ch) {
            return i;
        }
        chars.next();
    }
    line.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(language: &str, line: &str) -> Vec<HighlightKind> {
        Highlighter::for_language(language)
            .highlight_line(line)
            .into_iter()
            .map(|(_, kind)| kind)
            .collect()
    }

    #[test]
    fn test_highlight_keywords() {
        assert_eq!(
            kinds("python", "def fib(n):"),
            vec![
                HighlightKind::Keyword,
                HighlightKind::Function,
                HighlightKind::Punctuation,
                HighlightKind::Identifier,
                HighlightKind::Punctuation,
                HighlightKind::Operator,
            ]
        );
    }

    #[test]
    fn test_highlight_mixed() {
        assert_eq!(
            kinds("rust", "let x = 42;"),
            vec![
                HighlightKind::Keyword,
                HighlightKind::Identifier,
                HighlightKind::Operator,
                HighlightKind::Number,
                HighlightKind::Punctuation,
            ]
        );
    }

    #[test]
    fn test_highlight_string_with_escape() {
        let line = r#"puts "a \" b" x"#;
        let highlights = Highlighter::for_language("ruby").highlight_line(line);
        assert_eq!(highlights[1], (5..13, HighlightKind::String));
        assert_eq!(highlights[2].1, HighlightKind::Identifier);
    }

    #[test]
    fn test_highlight_comment() {
        let highlights = Highlighter::for_language("haskell").highlight_line("fib 0 = 0 -- base");
        let (range, kind) = highlights.last().unwrap().clone();
        assert_eq!(kind, HighlightKind::Comment);
        assert_eq!(range, 10..17);
    }

    #[test]
    fn test_plain_text_is_not_highlighted() {
        assert!(kinds("text", "def x").is_empty());
        let line = Highlighter::for_language("text").to_line("def x", &HighlightTheme::default());
        assert_eq!(line.spans.len(), 1);
    }

    #[test]
    fn test_line_preserves_content() {
        let source = "    for (int i = 0; i < n; i++) { // loop";
        let line = Highlighter::for_language("c").to_line(source, &HighlightTheme::default());
        let rebuilt: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(rebuilt, source);
    }
}
