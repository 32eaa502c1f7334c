//! Resumable HTTP/1.1 request parser.
//!
//! [`feed`] appends whatever bytes arrived and drives an explicit state
//! machine as far as they allow. When a token is cut short the machine
//! returns [`Pending`] with its `(state, cursor, mark)` preserved, so the
//! next [`feed`] resumes exactly where parsing left off. Feeding the same
//! request in one call or one byte at a time produces an identical result.
//!
//! All grammar and semantic violations are terminal: the parser records the
//! error as its state and never resynchronizes.
//!
//! [`feed`]: ParseContext::feed
//! [`Pending`]: crate::FeedResult::Pending
mod error;
mod target;
mod finish;


pub use error::ParseError;

use bytes::Bytes;

use crate::common::{FeedResult, OutOfMemory};
use crate::log::{debug, error, warning};
use crate::request::{HeaderType, Request, Span};
use crate::{Method, Version, matches};

const HTTP_NAME: &[u8] = b"HTTP/";

// ===== State =====

/// Explicit machine state, persisted across suspensions together with the
/// cursor and mark. No implicit call-stack state survives a [`Pending`].
///
/// [`Pending`]: FeedResult::Pending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Method,
    Target,
    VersionName,
    VersionMajor,
    VersionPeriod,
    VersionMinor,
    LineCrlf,
    FieldName,
    FieldOws,
    FieldValue,
    Done,
    Error(ParseError),
}

impl State {
    const fn is_terminal(&self) -> bool {
        matches!(self, State::Done | State::Error(_))
    }
}

enum Step {
    Next,
    More,
}

// ===== ParseContext =====

/// Incremental parsing state plus the request being built.
///
/// One context per connection; [`feed`] is the only mutating entry point and
/// must not be called concurrently. Abandoning a parse is just dropping the
/// context. Spans are never handed out mid-parse: the buffer is frozen into
/// the [`Request`] only once parsing reaches a terminal state, so no span
/// can be invalidated by later growth.
///
/// [`feed`]: ParseContext::feed
#[derive(Debug, Default)]
pub struct ParseContext {
    state: State,
    /// Byte accumulator holding all bytes fed so far.
    buf: Vec<u8>,
    /// Read cursor into `buf`.
    pos: usize,
    /// Start offset of the in-progress token.
    mark: Option<usize>,
    req: Request,
}

impl Default for State {
    fn default() -> Self {
        State::Method
    }
}

impl ParseContext {
    /// Create an empty context bound to a fresh request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes and advance parsing as far as possible.
    ///
    /// Returns [`Pending`] when more bytes are required, [`Complete`] once a
    /// terminal state is reached; inspect [`error`] (or just call
    /// [`into_request`]) to tell done from failed.
    ///
    /// # Errors
    ///
    /// [`OutOfMemory`] only, when the accumulator cannot grow. That is a
    /// resource failure of the process, not bad input.
    ///
    /// [`Pending`]: FeedResult::Pending
    /// [`Complete`]: FeedResult::Complete
    /// [`error`]: ParseContext::error
    /// [`into_request`]: ParseContext::into_request
    pub fn feed(&mut self, bytes: &[u8]) -> Result<FeedResult, OutOfMemory> {
        self.append(bytes)?;

        while self.pos < self.buf.len() && !self.state.is_terminal() {
            let step = match self.state {
                State::Method => self.method(),
                State::Target => self.target(),
                State::VersionName => self.version_name(),
                State::VersionMajor => self.version_major(),
                State::VersionPeriod => self.version_period(),
                State::VersionMinor => self.version_minor(),
                State::LineCrlf => self.line_crlf(),
                State::FieldName => self.field_name(),
                State::FieldOws => self.field_ows(),
                State::FieldValue => self.field_value(),
                State::Done | State::Error(_) => unreachable!(),
            };

            if let Step::More = step {
                return Ok(FeedResult::Pending);
            }
        }

        if self.state.is_terminal() {
            Ok(FeedResult::Complete)
        } else {
            Ok(FeedResult::Pending)
        }
    }

    /// Returns `true` once the request head parsed to completion.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self.state, State::Done)
    }

    /// Returns the terminal parse error, if parsing failed.
    #[inline]
    pub const fn error(&self) -> Option<ParseError> {
        match self.state {
            State::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Consume the context, freezing the buffer into the completed request.
    ///
    /// # Errors
    ///
    /// The terminal [`ParseError`] if parsing failed, or
    /// [`ParseError::Incomplete`] if the context never reached a terminal
    /// state. Fields populated before an error are not contractually
    /// complete and must not be used for routing.
    pub fn into_request(self) -> Result<Request, ParseError> {
        match self.state {
            State::Done => {
                let mut req = self.req;
                req.buffer = Bytes::from(self.buf);
                Ok(req)
            }
            State::Error(err) => Err(err),
            _ => Err(ParseError::Incomplete),
        }
    }

    fn append(&mut self, bytes: &[u8]) -> Result<(), OutOfMemory> {
        if let Err(err) = self.buf.try_reserve(bytes.len()) {
            error!("accumulator cannot grow by {} bytes: {err}", bytes.len());
            return Err(err.into());
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn fail(&mut self, err: ParseError) -> Step {
        warning!("parse failed: {err}");
        self.mark = None;
        self.state = State::Error(err);
        Step::Next
    }

    // ===== Request line =====

    /// method = token, terminated by SP
    fn method(&mut self) -> Step {
        let mark = *self.mark.get_or_insert(self.pos);

        while matches::is_token(self.buf[self.pos]) {
            self.pos += 1;
            if self.pos >= self.buf.len() {
                return Step::More;
            }
        }

        if self.buf[self.pos] != b' ' || self.pos == mark {
            return self.fail(ParseError::InvalidMethod);
        }

        self.req.method = Method::from_bytes(&self.buf[mark..self.pos]);
        self.mark = None;
        self.pos += 1;
        self.state = State::Target;
        Step::Next
    }

    /// Scan the request-target to the SP delimiter, then resolve its form
    /// against the complete span.
    fn target(&mut self) -> Step {
        let mark = *self.mark.get_or_insert(self.pos);

        loop {
            let byte = self.buf[self.pos];
            if byte == b' ' {
                break;
            }
            if !matches::is_target(byte) {
                return self.fail(ParseError::InvalidTarget);
            }
            self.pos += 1;
            if self.pos >= self.buf.len() {
                return Step::More;
            }
        }

        if self.pos == mark {
            return self.fail(ParseError::InvalidTarget);
        }

        self.req.raw_target = Span::new(mark, self.pos - mark);
        self.mark = None;
        self.pos += 1;

        if let Err(err) = target::resolve(&mut self.req, &self.buf) {
            return self.fail(err);
        }

        self.state = State::VersionName;
        Step::Next
    }

    /// HTTP-version = "HTTP/" DIGIT "." DIGIT
    fn version_name(&mut self) -> Step {
        if self.pos + HTTP_NAME.len() > self.buf.len() {
            return Step::More;
        }
        if &self.buf[self.pos..self.pos + HTTP_NAME.len()] != HTTP_NAME {
            return self.fail(ParseError::InvalidVersion);
        }
        self.pos += HTTP_NAME.len();
        self.state = State::VersionMajor;
        Step::Next
    }

    fn version_major(&mut self) -> Step {
        let byte = self.buf[self.pos];
        if !byte.is_ascii_digit() {
            return self.fail(ParseError::InvalidVersion);
        }
        self.req.version = Version::new(byte - b'0', 0);
        self.pos += 1;
        self.state = State::VersionPeriod;
        Step::Next
    }

    fn version_period(&mut self) -> Step {
        if self.buf[self.pos] != b'.' {
            return self.fail(ParseError::InvalidVersion);
        }
        self.pos += 1;
        self.state = State::VersionMinor;
        Step::Next
    }

    fn version_minor(&mut self) -> Step {
        let byte = self.buf[self.pos];
        if !byte.is_ascii_digit() {
            return self.fail(ParseError::InvalidVersion);
        }
        self.req.version = Version::new(self.req.version.major(), byte - b'0');
        self.pos += 1;
        self.state = State::LineCrlf;
        Step::Next
    }

    fn line_crlf(&mut self) -> Step {
        if self.buf[self.pos] != b'\r' {
            return self.fail(ParseError::InvalidSeparator);
        }
        if self.pos + 2 > self.buf.len() {
            return Step::More;
        }
        if self.buf[self.pos + 1] != b'\n' {
            return self.fail(ParseError::InvalidSeparator);
        }
        self.pos += 2;
        self.state = State::FieldName;
        Step::Next
    }

    // ===== Field lines =====

    /// field-name = token, terminated by ":". A bare CRLF here ends the
    /// header block and triggers the post-processing pass.
    fn field_name(&mut self) -> Step {
        if self.mark.is_none() && self.buf[self.pos] == b'\r' {
            if self.pos + 2 > self.buf.len() {
                return Step::More;
            }
            if self.buf[self.pos + 1] != b'\n' {
                return self.fail(ParseError::InvalidSeparator);
            }
            self.pos += 2;
            return match finish::run(&mut self.req, &self.buf) {
                Ok(()) => {
                    debug!(
                        "parsed {} {} with {} headers",
                        self.req.method(),
                        self.req.version(),
                        self.req.headers.len(),
                    );
                    self.state = State::Done;
                    Step::Next
                }
                Err(err) => self.fail(err),
            };
        }

        let mark = *self.mark.get_or_insert(self.pos);

        while matches::is_token(self.buf[self.pos]) {
            self.pos += 1;
            if self.pos >= self.buf.len() {
                return Step::More;
            }
        }

        if self.buf[self.pos] != b':' || self.pos == mark {
            return self.fail(ParseError::InvalidHeaderName);
        }

        // case-insensitive by construction: the name is lowercased over the
        // owning buffer before any matching happens
        self.buf[mark..self.pos].make_ascii_lowercase();
        let name = Span::new(mark, self.pos - mark);
        let htype = HeaderType::from_bytes(name.resolve(&self.buf));
        self.req.push_header(name, htype);

        self.mark = None;
        self.pos += 1;
        self.state = State::FieldOws;
        Step::Next
    }

    /// Skip optional whitespace between ":" and the field value.
    fn field_ows(&mut self) -> Step {
        while matches!(self.buf[self.pos], b' ' | b'\t') {
            self.pos += 1;
            if self.pos >= self.buf.len() {
                return Step::More;
            }
        }
        self.state = State::FieldValue;
        Step::Next
    }

    /// field-value bytes to CRLF, trailing OWS stripped from the span.
    fn field_value(&mut self) -> Step {
        let mark = *self.mark.get_or_insert(self.pos);

        loop {
            let byte = self.buf[self.pos];
            if byte == b'\r' {
                break;
            }
            if !matches::is_field_value(byte) {
                return self.fail(ParseError::InvalidHeaderValue);
            }
            self.pos += 1;
            if self.pos >= self.buf.len() {
                return Step::More;
            }
        }

        if self.pos + 2 > self.buf.len() {
            return Step::More;
        }
        if self.buf[self.pos + 1] != b'\n' {
            return self.fail(ParseError::InvalidSeparator);
        }

        let mut end = self.pos;
        while end > mark && matches!(self.buf[end - 1], b' ' | b'\t') {
            end -= 1;
        }
        if end == mark {
            return self.fail(ParseError::InvalidHeaderValue);
        }

        self.req.set_last_value(Span::new(mark, end - mark));
        self.mark = None;
        self.pos += 2;
        self.state = State::FieldName;
        Step::Next
    }
}
