//! HTML fragment → ratatui `Text` renderer.
//!
//! Fragments returned by the server are small trusted HTML bodies:
//! headings, paragraphs, lists, emphasis, links, and `<pre><code
//! class="language-…">` blocks. This module walks the markup with a small
//! tag tokenizer and converts it into styled `Line`/`Span` values, running
//! syntect over recognized code blocks — the highlighter pass, invoked once
//! per injected fragment.
//!
//! Unknown tags (`div`, `span`, `img`, …) are transparent: their text flows
//! through with the current style.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::shell::decode_entities;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

static ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([a-zA-Z][a-zA-Z0-9_-]*)\s*=\s*"([^"]*)""#).expect("attribute pattern")
});

/// Render an HTML fragment into styled `Text` using docview's color scheme.
///
/// Returns owned text (`'static`) so callers aren't constrained by input
/// lifetime.
pub fn render(html: &str, base_fg: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg);
    for token in tokenize(html) {
        w.handle(token);
    }
    w.text
}

// ── Tokenizer ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Heading(u8),
    P,
    Br,
    Hr,
    Ul,
    Ol,
    Li,
    Pre,
    Code,
    Em,
    Strong,
    A,
    Blockquote,
    Other,
}

#[derive(Debug)]
enum Token<'a> {
    Open { tag: Tag, attrs: &'a str },
    Close(Tag),
    Text(&'a str),
}

fn tag_name(name: &str) -> Tag {
    match name {
        "h1" => Tag::Heading(1),
        "h2" => Tag::Heading(2),
        "h3" => Tag::Heading(3),
        "h4" => Tag::Heading(4),
        "h5" => Tag::Heading(5),
        "h6" => Tag::Heading(6),
        "p" => Tag::P,
        "br" => Tag::Br,
        "hr" => Tag::Hr,
        "ul" => Tag::Ul,
        "ol" => Tag::Ol,
        "li" => Tag::Li,
        "pre" => Tag::Pre,
        "code" => Tag::Code,
        "em" | "i" => Tag::Em,
        "strong" | "b" => Tag::Strong,
        "a" => Tag::A,
        "blockquote" => Tag::Blockquote,
        _ => Tag::Other,
    }
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        match rest.find('<') {
            None => {
                tokens.push(Token::Text(rest));
                break;
            }
            Some(lt) => {
                if lt > 0 {
                    tokens.push(Token::Text(&rest[..lt]));
                }
                rest = &rest[lt..];

                // Comments and doctype are skipped wholesale.
                if rest.starts_with("<!--") {
                    rest = rest.find("-->").map_or("", |end| &rest[end + 3..]);
                    continue;
                }
                if rest.starts_with("<!") {
                    rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
                    continue;
                }

                let Some(gt) = rest.find('>') else {
                    // Unterminated tag at the end: emit as text, best effort.
                    tokens.push(Token::Text(rest));
                    break;
                };
                let inner = &rest[1..gt];
                rest = &rest[gt + 1..];

                let (closing, inner) = match inner.strip_prefix('/') {
                    Some(i) => (true, i),
                    None => (false, inner),
                };
                let inner = inner.trim_end_matches('/');
                let name_end = inner
                    .find(|c: char| c.is_whitespace())
                    .unwrap_or(inner.len());
                let tag = tag_name(&inner[..name_end].to_ascii_lowercase());
                if closing {
                    tokens.push(Token::Close(tag));
                } else {
                    tokens.push(Token::Open {
                        tag,
                        attrs: &inner[name_end..],
                    });
                }
            }
        }
    }
    tokens
}

fn attr_value(attrs: &str, name: &str) -> Option<String> {
    ATTR.captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .map(|c| c[2].to_string())
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Per-line prefix spans (blockquote `│`, code block gutters).
    line_prefixes: Vec<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Active syntax highlighter for the current code block.
    highlighter: Option<HighlightLines<'static>>,
    /// Inside `<pre>`.
    in_pre: bool,
    /// Borders not yet emitted for the current `<pre>` (waiting for the
    /// code language, which arrives with the inner `<code>` tag).
    pre_pending: bool,
    /// Language token from the inner `<code class="language-…">`.
    pre_lang: Option<String>,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefixes: vec![],
            list_indices: vec![],
            highlighter: None,
            in_pre: false,
            pre_pending: false,
            pre_lang: None,
            link_url: None,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    /// Push a style that composes with the current one.
    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, line: Line<'static>) {
        let mut out = line;
        for pfx in self.line_prefixes.iter().rev().cloned() {
            out.spans.insert(0, pfx);
        }
        self.text.lines.push(out);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    fn line_has_content(&self) -> bool {
        self.text
            .lines
            .last()
            .is_some_and(|l| l.spans.iter().any(|s| !s.content.is_empty()))
    }

    // ── Token dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, token: Token<'_>) {
        match token {
            Token::Open { tag, attrs } => self.open(tag, attrs),
            Token::Close(tag) => self.close(tag),
            Token::Text(t) => self.text(t),
        }
    }

    fn open(&mut self, tag: Tag, attrs: &str) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Heading(level) => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
                self.push_style(heading_style(self.base_fg, level));
            }
            Tag::P => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Br => self.push_line(Line::default()),
            Tag::Hr => {
                self.blank_line_if_needed();
                self.push_line(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            Tag::Blockquote => {
                self.blank_line_if_needed();
                self.line_prefixes.push(Span::styled(
                    "│ ",
                    Style::default().fg(Color::DarkGray),
                ));
                self.push_style(
                    Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::DIM | Modifier::ITALIC),
                );
            }
            Tag::Pre => {
                if !self.text.lines.is_empty() {
                    self.push_line(Line::default());
                }
                self.in_pre = true;
                self.pre_pending = true;
                self.pre_lang = None;
            }
            Tag::Code => {
                if self.in_pre {
                    // Language comes from class="language-rust" style tokens.
                    self.pre_lang = attr_value(attrs, "class").and_then(|c| {
                        c.split_whitespace()
                            .find_map(|t| t.strip_prefix("language-").map(str::to_string))
                    });
                } else {
                    self.push_style(Style::default().fg(Color::White).bg(Color::DarkGray));
                }
            }
            Tag::Ul => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(None);
            }
            Tag::Ol => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                let start = attr_value(attrs, "start")
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(1);
                self.list_indices.push(Some(start));
            }
            Tag::Li => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
                }
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Em => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::A => {
                self.link_url = attr_value(attrs, "href");
                self.push_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                );
            }
            Tag::Other => {}
        }
    }

    fn close(&mut self, tag: Tag) {
        match tag {
            Tag::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            Tag::P => self.needs_newline = true,
            Tag::Blockquote => {
                self.line_prefixes.pop();
                self.pop_style();
                self.needs_newline = true;
            }
            Tag::Pre => {
                if !self.pre_pending {
                    self.highlighter = None;
                    self.line_prefixes.pop(); // remove │ prefix before bottom border
                    let bs = Style::default().fg(Color::DarkGray);
                    self.push_line(Line::from(Span::styled("╰──", bs)));
                }
                self.in_pre = false;
                self.pre_pending = false;
                self.pre_lang = None;
                self.needs_newline = true;
            }
            Tag::Code => {
                if !self.in_pre {
                    self.pop_style();
                }
            }
            Tag::Ul | Tag::Ol => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            Tag::Em | Tag::Strong => self.pop_style(),
            Tag::A => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.push_span(Span::raw(" ("));
                    self.push_span(Span::styled(
                        url,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ));
                    self.push_span(Span::raw(")"));
                }
            }
            Tag::Li | Tag::Br | Tag::Hr | Tag::Other => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        if self.in_pre {
            self.pre_text(&decoded);
            return;
        }

        // Outside <pre>, whitespace collapses the way a browser renders it.
        let words: Vec<&str> = decoded.split_whitespace().collect();
        if words.is_empty() {
            return;
        }
        let leading = decoded.starts_with(|c: char| c.is_whitespace());
        let trailing = decoded.ends_with(|c: char| c.is_whitespace());

        let mut content = words.join(" ");
        if leading && self.line_has_content() {
            content.insert(0, ' ');
        }
        if trailing {
            content.push(' ');
        }

        let style = self.style();
        self.push_span(Span::styled(content, style));
    }

    fn pre_text(&mut self, text: &str) {
        // Expand tabs → 4 spaces (ratatui renders \t as zero-width)
        let text = text.replace('\t', "    ");
        let text = text.strip_prefix('\n').unwrap_or(&text);

        if self.pre_pending {
            self.emit_pre_top_border();
        }

        // Syntax-highlighted code block — take highlighter out to avoid
        // double-mutable-borrow (highlight_line borrows it, push_line
        // borrows self)
        if self.highlighter.is_some() {
            let mut hl = self.highlighter.take().unwrap();
            for line in LinesWithEndings::from(text) {
                if let Ok(ranges) = hl.highlight_line(line, &SYNTAX_SET) {
                    let spans: Vec<Span<'static>> = ranges
                        .into_iter()
                        .filter_map(|(hl_style, frag)| {
                            let content = frag.trim_end_matches('\n').to_string();
                            if content.is_empty() {
                                return None;
                            }
                            let fg = Color::Rgb(
                                hl_style.foreground.r,
                                hl_style.foreground.g,
                                hl_style.foreground.b,
                            );
                            Some(Span::styled(content, Style::default().fg(fg)))
                        })
                        .collect();
                    if !spans.is_empty() {
                        self.push_line(Line::from(spans));
                    }
                }
            }
            self.highlighter = Some(hl);
            return;
        }

        // Plain code block (no highlighting available)
        let code_style = Style::default().fg(Color::White);
        for line in text.lines() {
            self.push_line(Line::from(Span::styled(line.to_owned(), code_style)));
        }
    }

    /// Top border: ╭── lang ──  or just ╭──, then the │ gutter prefix.
    fn emit_pre_top_border(&mut self) {
        let bs = Style::default().fg(Color::DarkGray);
        let lang = self.pre_lang.clone().unwrap_or_default();
        let top = if lang.is_empty() {
            Line::from(Span::styled("╭──", bs))
        } else {
            Line::from(vec![
                Span::styled("╭── ", bs),
                Span::styled(lang.clone(), bs.add_modifier(Modifier::BOLD)),
                Span::styled(" ──", bs),
            ])
        };
        self.push_line(top);
        self.line_prefixes.push(Span::styled("│ ", bs));

        if !lang.is_empty()
            && let Some(syn) = SYNTAX_SET.find_syntax_by_token(&lang)
        {
            let theme = &THEME_SET.themes["base16-ocean.dark"];
            self.highlighter = Some(HighlightLines::new(syn, theme));
        }
        self.pre_pending = false;
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

fn heading_style(base_fg: Color, level: u8) -> Style {
    match level {
        1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default().fg(base_fg).add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}
