//! Recognition of `!!!` admonition blocks in markdown source.
//!
//! An admonition starts at a marker line and owns every following line that is
//! blank or indented one level deeper than the marker:
//!
//! ```markdown
//! !!! warning "Title"
//!     Body paragraph.
//!
//!     Second paragraph.
//! ```
//!
//! The scanner works on byte offsets of the current text so the rewriter can
//! splice replacements in place and resume after them.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::kind::AdmonitionKinds;

/// Width of one indentation level in columns.
pub(crate) const INDENT_WIDTH: usize = 4;

/// Marker line: indentation, `!!!`, whitespace, kind token, remainder.
static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)!!![ \t]+([A-Za-z0-9_-]+)(.*)$").unwrap());

/// One located admonition in the scanned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AdmonitionMatch {
    /// Byte range from the start of the marker line to the end of the last body line.
    pub span: Range<usize>,
    /// Canonical lowercase kind.
    pub kind: String,
    /// Raw title text, continuation lines still indented.
    pub title: String,
    /// Raw body text, lines still indented.
    pub body: String,
    /// Column that body and title continuation lines are dedented to.
    pub indent: usize,
    /// Leading whitespace of the marker line.
    pub lead: String,
    /// Title opened a quote that was never closed.
    pub title_unterminated: bool,
}

impl AdmonitionMatch {
    /// Title with one indentation level removed, trimmed on both ends.
    pub fn dedented_title(&self) -> String {
        dedent(&self.title, self.indent).trim().to_owned()
    }

    /// Body with one indentation level removed, trailing whitespace trimmed.
    pub fn dedented_body(&self) -> String {
        dedent(&self.body, self.indent).trim_end().to_owned()
    }
}

/// Locates admonitions using a kind vocabulary.
pub(crate) struct Scanner<'a> {
    kinds: &'a AdmonitionKinds,
    skip_code_fences: bool,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(kinds: &'a AdmonitionKinds, skip_code_fences: bool) -> Self {
        Self {
            kinds,
            skip_code_fences,
        }
    }

    /// Find the first admonition whose marker line starts at or after `from`.
    ///
    /// `from` must be at a line boundary.
    pub(crate) fn find(&self, text: &str, from: usize) -> Option<AdmonitionMatch> {
        let mut fence = FenceTracker::default();

        for line in Lines::new(text, from) {
            if self.skip_code_fences {
                let was_fenced = fence.in_fence();
                if fence.update(line.content) || was_fenced {
                    continue;
                }
            }
            if let Some(marker) = self.parse_marker(line.content) {
                return Some(extract(text, &line, marker));
            }
        }
        None
    }

    fn parse_marker<'t>(&self, content: &'t str) -> Option<Marker<'t>> {
        let caps = MARKER_RE.captures(content)?;
        let kind = self.kinds.lookup(caps.get(2)?.as_str())?;
        let rest = caps.get(3).map_or("", |m| m.as_str());

        // `!!! note.` or `!!! note!` is not a marker for `note`
        if !(rest.is_empty() || rest.starts_with([' ', '\t', '"'])) {
            return None;
        }

        let title = match rest.trim_start().strip_prefix('"') {
            None => TitleStart::Absent,
            Some(quoted) => match quoted.find('"') {
                Some(end) => TitleStart::Closed(&quoted[..end]),
                None => TitleStart::Open(quoted),
            },
        };

        let lead = caps.get(1).map_or("", |m| m.as_str());
        Some(Marker {
            lead,
            indent: indent_columns(lead),
            kind: kind.to_owned(),
            title,
        })
    }
}

#[derive(Debug)]
struct Marker<'t> {
    lead: &'t str,
    indent: usize,
    kind: String,
    title: TitleStart<'t>,
}

/// Title as found on the marker line.
#[derive(Debug, PartialEq, Eq)]
enum TitleStart<'t> {
    Absent,
    Closed(&'t str),
    /// Opening quote without a closing one; the title may continue below.
    Open(&'t str),
}

fn extract(text: &str, marker_line: &Line<'_>, marker: Marker<'_>) -> AdmonitionMatch {
    let indent = marker.indent + INDENT_WIDTH;
    let mut end = marker_line.end;
    let mut title_unterminated = false;

    let title = match marker.title {
        TitleStart::Absent => String::new(),
        TitleStart::Closed(title) => title.to_owned(),
        TitleStart::Open(first) => {
            let continued = continue_title(text, first, marker_line.end, indent);
            if let Some((title, title_end)) = continued {
                end = title_end;
                title
            } else {
                title_unterminated = true;
                first.to_owned()
            }
        }
    };

    let body_start = end;
    for line in Lines::new(text, body_start) {
        if is_blank(line.content) {
            continue;
        }
        if indent_columns(line.content) < indent {
            break;
        }
        end = line.end;
    }

    AdmonitionMatch {
        span: marker_line.start..end,
        kind: marker.kind,
        title,
        body: text[body_start..end].to_owned(),
        indent,
        lead: marker.lead.to_owned(),
        title_unterminated,
    }
}

/// Collect title continuation lines up to the first closing quote.
///
/// Returns the joined title and the offset just past the closing line, or
/// `None` if the block ends before a closing quote appears.
fn continue_title(
    text: &str,
    first: &str,
    from: usize,
    indent: usize,
) -> Option<(String, usize)> {
    let mut parts = vec![first];
    for line in Lines::new(text, from) {
        if !is_blank(line.content) && indent_columns(line.content) < indent {
            return None;
        }
        if let Some(close) = line.content.find('"') {
            parts.push(&line.content[..close]);
            return Some((parts.join("\n"), line.end));
        }
        parts.push(line.content);
    }
    None
}

/// Remove up to `columns` of leading indentation from every line.
///
/// A tab that overshoots the target column leaves the excess as spaces.
pub(crate) fn dedent(text: &str, columns: usize) -> String {
    text.lines()
        .map(|line| dedent_line(line, columns))
        .collect::<Vec<_>>()
        .join("\n")
}

fn dedent_line(line: &str, columns: usize) -> String {
    let mut col = 0;
    let mut consumed = 0;
    for c in line.chars() {
        if col >= columns {
            break;
        }
        match c {
            ' ' => col += 1,
            '\t' => col += INDENT_WIDTH - col % INDENT_WIDTH,
            _ => break,
        }
        consumed += c.len_utf8();
    }

    let rest = &line[consumed..];
    if col > columns {
        format!("{}{rest}", " ".repeat(col - columns))
    } else {
        rest.to_owned()
    }
}

/// Indentation of `line` in columns, tabs advancing to the next multiple of four.
fn indent_columns(line: &str) -> usize {
    let mut col = 0;
    for c in line.chars() {
        match c {
            ' ' => col += 1,
            '\t' => col += INDENT_WIDTH - col % INDENT_WIDTH,
            _ => break,
        }
    }
    col
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// A line of text with its byte offsets.
#[derive(Debug)]
struct Line<'a> {
    /// Offset of the first byte.
    start: usize,
    /// Offset just past the line terminator (or end of text).
    end: usize,
    /// Content without `\n` / `\r\n`.
    content: &'a str,
}

struct Lines<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.pos..).filter(|rest| !rest.is_empty())?;
        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let raw = &rest[..len];
        let content = raw
            .strip_suffix('\n')
            .map_or(raw, |s| s.strip_suffix('\r').unwrap_or(s));

        let line = Line {
            start: self.pos,
            end: self.pos + len,
            content,
        };
        self.pos += len;
        Some(line)
    }
}

/// Fenced code block state while walking lines.
///
/// A fence is three or more backticks or tildes; it closes on a line of the
/// same character at least as long, followed only by whitespace.
#[derive(Debug, Default)]
struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line. Returns `true` if it opened or closed a fence.
    fn update(&mut self, line: &str) -> bool {
        let trimmed = line.trim_start();
        let Some(first) = trimmed.chars().next().filter(|c| matches!(c, '`' | '~')) else {
            return false;
        };
        let run = trimmed.chars().take_while(|&c| c == first).count();
        if run < 3 {
            return false;
        }

        match self.open {
            Some((ch, len)) => {
                let closes = ch == first && run >= len && trimmed[run..].trim().is_empty();
                if closes {
                    self.open = None;
                }
                closes
            }
            None => {
                self.open = Some((first, run));
                true
            }
        }
    }
}
