use std::fmt;

use crate::matches;

use super::Request;

/// A list-value grammar violation: unterminated quoted-string or an invalid
/// quoted-pair escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedField;

impl std::error::Error for MalformedField {}

impl fmt::Display for MalformedField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("malformed field value")
    }
}

/// Lazy iterator over the comma-separated items of a header list.
///
/// Walks the chain of same-type header occurrences as if their values were
/// one comma-joined sequence. Splits on top-level commas only: commas inside
/// a quoted-string do not split, and `\` inside quotes escapes the following
/// byte when it is HTAB, SP, a visible character or obs-text. Yielded items
/// have surrounding whitespace trimmed and are otherwise raw, quotes and
/// percent-escapes intact.
///
/// Per the RFC list-extension grammar, a trailing comma with nothing after it
/// yields one final empty item. Grammar violations yield a single
/// [`MalformedField`] error, after which the iterator is fused.
#[derive(Debug)]
pub struct HeaderItems<'a> {
    req: &'a Request,
    buf: &'a [u8],
    /// Current header index within the same-type chain.
    header: Option<usize>,
    /// Byte offset within the current header's value. May sit just past the
    /// end when the value closed with a comma: the empty member that comma
    /// implies is still due before the chain advances.
    offset: usize,
    done: bool,
}

impl<'a> HeaderItems<'a> {
    pub(crate) fn new(req: &'a Request, buf: &'a [u8], htype: super::HeaderType) -> Self {
        Self {
            req,
            buf,
            header: req.first(htype),
            offset: 0,
            done: false,
        }
    }

    fn fail(&mut self) -> Option<Result<&'a [u8], MalformedField>> {
        self.done = true;
        Some(Err(MalformedField))
    }
}

impl<'a> Iterator for HeaderItems<'a> {
    type Item = Result<&'a [u8], MalformedField>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let idx = self.header?;

        let value = self.req.headers[idx].value.resolve(self.buf);
        let start = self.offset;

        let mut i = start;
        let mut quoted = false;
        let mut comma = false;

        while i < value.len() {
            let byte = value[i];
            if quoted {
                match byte {
                    b'"' => quoted = false,
                    b'\\' => match value.get(i + 1) {
                        Some(&escaped) if matches::is_escapable(escaped) => i += 1,
                        _ => return self.fail(),
                    },
                    _ => {}
                }
            } else {
                match byte {
                    b'"' => quoted = true,
                    b',' => {
                        comma = true;
                        break;
                    }
                    _ => {}
                }
            }
            i += 1;
        }

        // a quoted-string cannot span a field line
        if quoted {
            return self.fail();
        }

        let item = trim_ows(&value[start..i]);

        if comma {
            // may land just past the end, in which case the next call
            // yields the empty member before moving along the chain
            self.offset = i + 1;
        } else {
            self.header = self.req.next_same(idx);
            self.offset = 0;
        }

        Some(Ok(item))
    }
}

fn trim_ows(mut item: &[u8]) -> &[u8] {
    while let [b' ' | b'\t', rest @ ..] = item {
        item = rest;
    }
    while let [rest @ .., b' ' | b'\t'] = item {
        item = rest;
    }
    item
}
