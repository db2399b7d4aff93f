//! Renders the small markdown subset produced by the assistant (bold spans,
//! bullet and numbered lists, paragraphs) into styled runs.

use crate::domain::{DocumentParagraph, ParagraphBlock, RenderedDocument, Run};

pub const BULLET_GLYPH: &str = "• ";
pub const NUMBERED_GLYPH: &str = "▪ ";

const BOLD_DELIMITER: u8 = b'*';

/// Splits `markdown` on blank lines into blocks and renders one paragraph per line.
pub fn render_markdown(markdown: &str) -> RenderedDocument {
    let blocks = markdown
        .split("\n\n")
        .map(|block| ParagraphBlock {
            paragraphs: block.lines().map(render_line).collect(),
        })
        .collect();

    RenderedDocument { blocks }
}

pub fn render_line(line: &str) -> DocumentParagraph {
    let mut runs = Vec::new();

    let body = if let Some(rest) = strip_bullet_marker(line) {
        runs.push(Run::plain(BULLET_GLYPH));
        rest
    } else if let Some(rest) = strip_numbered_marker(line) {
        runs.push(Run::plain(NUMBERED_GLYPH));
        rest
    } else {
        line
    };

    runs.extend(scan_bold_spans(body));
    DocumentParagraph::new(runs)
}

/// `- item` or `* item`, with optional leading indentation.
fn strip_bullet_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(['-', '*'])?;
    strip_required_whitespace(rest)
}

/// `12. item`, with optional leading indentation.
fn strip_numbered_marker(line: &str) -> Option<&str> {
    let rest = line.trim_start();
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    if digits_end == 0 {
        return None;
    }

    let rest = rest[digits_end..].strip_prefix('.')?;
    strip_required_whitespace(rest)
}

fn strip_required_whitespace(text: &str) -> Option<&str> {
    let trimmed = text.trim_start();
    (trimmed.len() < text.len()).then_some(trimmed)
}

#[derive(Clone, Copy)]
enum ScanState {
    OutsideBold,
    InsideBold { open: usize },
}

/// Only complete `**…**` pairs become bold; an unmatched opener stays literal.
fn scan_bold_spans(line: &str) -> Vec<Run> {
    let bytes = line.as_bytes();
    let mut runs = Vec::new();
    let mut state = ScanState::OutsideBold;
    let mut emitted = 0;
    let mut i = 0;

    // '*' is ASCII, so every delimiter index is a char boundary.
    while i + 1 < bytes.len() {
        if bytes[i] != BOLD_DELIMITER || bytes[i + 1] != BOLD_DELIMITER {
            i += 1;
            continue;
        }

        state = match state {
            ScanState::OutsideBold => ScanState::InsideBold { open: i },
            ScanState::InsideBold { open } => {
                if open > emitted {
                    runs.push(Run::plain(&line[emitted..open]));
                }
                runs.push(Run::bold(&line[open + 2..i]));
                emitted = i + 2;
                ScanState::OutsideBold
            }
        };
        i += 2;
    }

    if emitted < line.len() {
        runs.push(Run::plain(&line[emitted..]));
    }

    runs
}
