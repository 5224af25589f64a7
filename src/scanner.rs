//! Tag boundary scanner: a character-level state machine.
//!
//! A tag occurrence starts at ` @name` (the name must be preceded by a space
//! and followed by a space, a line break or the end of the text, so
//! `@paramx` never matches `@param`). It runs up to, but not including, the
//! next ` @` or the comment terminator `*/`. An ` @` inside an unclosed
//! `{@link ...}` / `{@tutorial ...}` marker is not a boundary.
//!
//! Values may span lines; line breaks are never boundaries by themselves.

/// One located tag occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    /// Byte offset of the space preceding `@name`.
    pub start: usize,
    /// Byte offset one past the last byte of the occurrence.
    pub end: usize,
    /// `body[start..end]`, decoration included.
    pub text: &'a str,
}

/// What stopped a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// A following ` @tag`.
    Tag,
    /// The `*/` comment terminator.
    CommentEnd,
    /// End of the input text.
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub at: usize,
    pub kind: BoundaryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    LinkMarker,
}

const LINK_OPENERS: [&[u8]; 2] = [b"{@link", b"{@tutorial"];

/// Find the first boundary at or after `from`.
pub fn boundary_from(body: &str, from: usize) -> Boundary {
    let bytes = body.as_bytes();
    let mut state = State::Text;
    let mut i = from;

    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(b"*/") {
            return Boundary {
                at: i,
                kind: BoundaryKind::CommentEnd,
            };
        }
        match state {
            State::Text => {
                if LINK_OPENERS.iter().any(|opener| rest.starts_with(opener)) {
                    state = State::LinkMarker;
                } else if rest.starts_with(b" @") {
                    return Boundary {
                        at: i,
                        kind: BoundaryKind::Tag,
                    };
                }
            }
            State::LinkMarker => {
                if bytes[i] == b'}' {
                    state = State::Text;
                }
            }
        }
        i += 1;
    }

    Boundary {
        at: bytes.len(),
        kind: BoundaryKind::Eof,
    }
}

/// Every non-overlapping occurrence of `tag` (with its `@`) in `body`.
///
/// A missing tag yields an empty vector.
pub fn scan<'a>(tag: &str, body: &'a str) -> Vec<Span<'a>> {
    let needle = format!(" {}", tag);
    let bytes = body.as_bytes();
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(rel) = body[from..].find(&needle) {
        let start = from + rel;
        let after = start + needle.len();

        // The name must end here: `@param` must not match `@params`.
        let value_start = match bytes.get(after) {
            Some(b' ' | b'\n') => after + 1,
            Some(b'\r') if bytes.get(after + 1) == Some(&b'\n') => after + 2,
            Some(b'\r') => after + 1,
            None => after,
            Some(_) => {
                from = after;
                continue;
            }
        };

        let end = boundary_from(body, value_start).at;
        spans.push(Span {
            start,
            end,
            text: &body[start..end],
        });
        from = end.max(value_start);
    }

    spans
}

/// Region of untagged leading text: from the `/**` opener to the first boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leading<'a> {
    /// Byte offset of `/**`.
    pub opener: usize,
    pub boundary: Boundary,
    /// `body[opener..boundary.at]`
    pub text: &'a str,
}

impl Leading<'_> {
    /// Opener and boundary share a line.
    pub fn is_single_line(&self) -> bool {
        !self.text.contains('\n')
    }
}

/// Locate the untagged text that opens the comment, if the comment has an opener.
pub fn leading(body: &str) -> Option<Leading<'_>> {
    let opener = body.find("/**")?;
    let boundary = boundary_from(body, opener + 3);
    Some(Leading {
        opener,
        boundary,
        text: &body[opener..boundary.at],
    })
}
