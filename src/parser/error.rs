use std::fmt;

/// HTTP parsing error.
///
/// All variants are terminal: once recorded the parser never resumes, and
/// the caller maps the variant to a protocol response (typically 400).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid character in the method token, or an empty method.
    InvalidMethod,
    /// Request-target violates the grammar of its form.
    InvalidTarget,
    /// Malformed percent-encoded triplet in path or query.
    InvalidEscape,
    /// Port is not decimal digits or does not fit 16 bits.
    InvalidPort,
    /// HTTP-version deviates from `HTTP/` DIGIT `.` DIGIT.
    InvalidVersion,
    /// CR not followed by LF, or a stray line terminator.
    InvalidSeparator,
    /// Invalid character in a header name, or an empty name.
    InvalidHeaderName,
    /// Invalid character in a header value, or an empty value.
    InvalidHeaderValue,
    /// A list-valued header (`Transfer-Encoding`, `Connection`, `Expect`)
    /// violates the list grammar: an unterminated quoted-string or a bad
    /// quoted-pair escape.
    MalformedList,
    /// HTTP/1.1 request without a `Host` header, the target is ambiguous.
    MissingHost,
    /// Both `Content-Length` and `Transfer-Encoding` present. Always
    /// rejected, never tie-broken: this is the request-smuggling vector.
    AmbiguousFraming,
    /// A transfer-coding other than a single `chunked`.
    UnsupportedCoding,
    /// Chunked transfer-encoding requested on HTTP/1.0.
    ChunkedInHttp10,
    /// `Content-Length` is not all decimal digits, does not fit the target
    /// width, or appears more than once.
    InvalidContentLength,
    /// The input ended before parsing reached a terminal state. Only
    /// reported by [`into_request`], never recorded as a parser state.
    ///
    /// [`into_request`]: crate::ParseContext::into_request
    Incomplete,
}

impl std::error::Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidMethod => f.write_str("invalid method"),
            Self::InvalidTarget => f.write_str("invalid request target"),
            Self::InvalidEscape => f.write_str("invalid percent-encoding"),
            Self::InvalidPort => f.write_str("invalid port"),
            Self::InvalidVersion => f.write_str("invalid version"),
            Self::InvalidSeparator => f.write_str("invalid separator"),
            Self::InvalidHeaderName => f.write_str("invalid header name"),
            Self::InvalidHeaderValue => f.write_str("invalid header value"),
            Self::MalformedList => f.write_str("malformed list-valued header"),
            Self::MissingHost => f.write_str("missing host header"),
            Self::AmbiguousFraming => {
                f.write_str("both content-length and transfer-encoding present")
            }
            Self::UnsupportedCoding => f.write_str("unsupported transfer-coding"),
            Self::ChunkedInHttp10 => f.write_str("chunked transfer-encoding on http/1.0"),
            Self::InvalidContentLength => f.write_str("invalid content-length"),
            Self::Incomplete => f.write_str("request ended before completing"),
        }
    }
}
