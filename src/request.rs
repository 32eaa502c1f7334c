//! The parsed request and its header index.
use bytes::Bytes;

use crate::{Method, Version};

mod items;

#[cfg(test)]
mod test;

pub use items::{HeaderItems, MalformedField};

/// Sentinel for "no index", used by the same-type chains and the field index.
pub(crate) const NONE: usize = usize::MAX;

// ===== Span =====

/// A buffer-relative `(offset, len)` view into the accumulated bytes.
///
/// Spans are resolved lazily against the current buffer, so accumulator
/// growth can never invalidate one. The default span is empty and doubles as
/// "unset".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub(crate) const fn new(offset: usize, len: usize) -> Span {
        Span { offset, len }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn resolve<'b>(&self, buf: &'b [u8]) -> &'b [u8] {
        &buf[self.offset..self.offset + self.len]
    }
}

// ===== TargetForm =====

/// The resolved form of the request-target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetForm {
    /// Parsing did not reach the request-target.
    #[default]
    Unresolved,
    /// A target beginning with `/`, the direct-to-server case.
    Origin,
    /// A full `http`/`https` URI, the proxy case.
    Absolute,
    /// Historically used by `CONNECT`; never produced, `CONNECT` is
    /// unsupported.
    Authority,
    /// The literal `*`, valid for `OPTIONS`.
    Asterisk,
}

// ===== HeaderType =====

macro_rules! header_types {
    ($($variant:ident = $name:literal;)*) => {
        /// Semantic classification of a header name.
        ///
        /// Classification expects the name already lowercased, which the
        /// parser guarantees by normalizing names in place.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(usize)]
        pub enum HeaderType {
            /// Any header name outside the known set. Unknown headers are
            /// still stored and indexed.
            Unknown,
            $($variant,)*
        }

        impl HeaderType {
            pub(crate) const COUNT: usize = {
                let mut n = 1;
                $(
                    let _ = $name;
                    n += 1;
                )*
                n
            };

            /// Classify a lowercased header name.
            pub fn from_bytes(name: &[u8]) -> HeaderType {
                match name {
                    $(
                        n if n == $name.as_bytes() => Self::$variant,
                    )*
                    _ => Self::Unknown,
                }
            }

            /// Canonical lowercase name, empty string for `Unknown`.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    Self::Unknown => "",
                    $(
                        Self::$variant => $name,
                    )*
                }
            }
        }
    };
}

header_types! {
    Accept = "accept";
    AcceptCharset = "accept-charset";
    AcceptEncoding = "accept-encoding";
    AcceptLanguage = "accept-language";
    Authorization = "authorization";
    CacheControl = "cache-control";
    Connection = "connection";
    ContentEncoding = "content-encoding";
    ContentLanguage = "content-language";
    ContentLength = "content-length";
    ContentLocation = "content-location";
    ContentMd5 = "content-md5";
    ContentRange = "content-range";
    ContentType = "content-type";
    Date = "date";
    Expect = "expect";
    Expires = "expires";
    From = "from";
    Host = "host";
    IfMatch = "if-match";
    IfModifiedSince = "if-modified-since";
    IfNoneMatch = "if-none-match";
    IfRange = "if-range";
    IfUnmodifiedSince = "if-unmodified-since";
    MaxForwards = "max-forwards";
    Pragma = "pragma";
    ProxyAuthorization = "proxy-authorization";
    Range = "range";
    Referer = "referer";
    Te = "te";
    Trailer = "trailer";
    TransferEncoding = "transfer-encoding";
    Upgrade = "upgrade";
    UserAgent = "user-agent";
    Vary = "vary";
    Via = "via";
    Warning = "warning";
}

// ===== Header =====

/// A single parsed header line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Header {
    pub name: Span,
    pub value: Span,
    pub htype: HeaderType,
    /// Index of the next header with the same type, or [`NONE`].
    pub next_same_type: usize,
}

/// Per-type first/last/count index over the header list.
///
/// Gives O(1) membership and count, and O(count) same-type iteration through
/// the `next_same_type` chain, without rescanning the list.
#[derive(Debug)]
pub(crate) struct FieldIndex {
    heads: [usize; HeaderType::COUNT],
    tails: [usize; HeaderType::COUNT],
    count: [usize; HeaderType::COUNT],
}

impl Default for FieldIndex {
    fn default() -> Self {
        Self {
            heads: [NONE; HeaderType::COUNT],
            tails: [NONE; HeaderType::COUNT],
            count: [0; HeaderType::COUNT],
        }
    }
}

// ===== Request =====

/// A parsed HTTP/1.1 request head.
///
/// Produced by [`ParseContext::into_request`]. All span accessors borrow from
/// the frozen input buffer, which lives as long as the request.
///
/// [`ParseContext::into_request`]: crate::ParseContext::into_request
#[derive(Debug)]
pub struct Request {
    pub(crate) buffer: Bytes,

    pub(crate) method: Method,
    pub(crate) version: Version,

    pub(crate) target_form: TargetForm,
    pub(crate) raw_target: Span,
    pub(crate) scheme: Span,
    pub(crate) authority: Span,
    pub(crate) host: Span,
    pub(crate) path: Span,
    pub(crate) query: Span,
    /// 0 if unspecified.
    pub(crate) port: u16,

    pub(crate) headers: Vec<Header>,
    pub(crate) index: FieldIndex,

    pub(crate) te_chunked: bool,
    pub(crate) keep_alive: bool,
    pub(crate) expect_100: bool,
    pub(crate) upgrade: bool,

    /// -1 if unknown, i.e. chunked transfer-encoding.
    pub(crate) content_length: i64,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            buffer: Bytes::new(),
            method: Method::UNKNOWN,
            version: Version::default(),
            target_form: TargetForm::Unresolved,
            raw_target: Span::default(),
            scheme: Span::default(),
            authority: Span::default(),
            host: Span::default(),
            path: Span::default(),
            query: Span::default(),
            port: 0,
            headers: Vec::new(),
            index: FieldIndex::default(),
            te_chunked: false,
            keep_alive: true,
            expect_100: false,
            upgrade: false,
            content_length: 0,
        }
    }
}

impl Request {
    /// Returns the request method.
    #[inline]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Returns the protocol version from the request line.
    #[inline]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// Returns the resolved request-target form.
    #[inline]
    pub const fn target_form(&self) -> TargetForm {
        self.target_form
    }

    /// Returns the request-target exactly as received.
    #[inline]
    pub fn raw_target(&self) -> &[u8] {
        self.raw_target.resolve(&self.buffer)
    }

    /// Returns the scheme, empty unless the target was absolute-form.
    #[inline]
    pub fn scheme(&self) -> &[u8] {
        self.scheme.resolve(&self.buffer)
    }

    /// Returns host plus optional `:port` as one span, empty unless the
    /// target was absolute-form.
    #[inline]
    pub fn authority(&self) -> &[u8] {
        self.authority.resolve(&self.buffer)
    }

    /// Returns the effective host, from the target or the `Host` header.
    #[inline]
    pub fn host(&self) -> &[u8] {
        self.host.resolve(&self.buffer)
    }

    /// Returns the path, still percent-encoded. Empty for asterisk-form.
    #[inline]
    pub fn path(&self) -> &[u8] {
        self.path.resolve(&self.buffer)
    }

    /// Returns the query without the leading `?`, empty when absent.
    #[inline]
    pub fn query(&self) -> &[u8] {
        self.query.resolve(&self.buffer)
    }

    /// Returns the port from an absolute-form target, 0 if unspecified.
    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns `true` if the message body uses chunked transfer-encoding.
    #[inline]
    pub const fn is_chunked(&self) -> bool {
        self.te_chunked
    }

    /// Returns `false` only when the request asked for `Connection: close`.
    #[inline]
    pub const fn keep_alive(&self) -> bool {
        self.keep_alive
    }

    /// Returns `true` if the request sent `Expect: 100-continue`.
    #[inline]
    pub const fn expect_100(&self) -> bool {
        self.expect_100
    }

    /// Returns `true` if the request asked for a protocol upgrade.
    #[inline]
    pub const fn is_upgrade(&self) -> bool {
        self.upgrade
    }

    /// Returns the declared body length, `-1` when unknown (chunked).
    #[inline]
    pub const fn content_length(&self) -> i64 {
        self.content_length
    }

    /// Returns the value of the first header of the given type.
    #[inline]
    pub fn header(&self, htype: HeaderType) -> Option<&[u8]> {
        let idx = self.first(htype)?;
        Some(self.headers[idx].value.resolve(&self.buffer))
    }

    /// Returns the value of the first header matching `name`,
    /// ASCII case-insensitively.
    pub fn header_by_name(&self, name: &[u8]) -> Option<&[u8]> {
        self.headers
            .iter()
            .find(|h| h.name.resolve(&self.buffer).eq_ignore_ascii_case(name))
            .map(|h| h.value.resolve(&self.buffer))
    }

    /// Returns how many headers of the given type are present. O(1).
    #[inline]
    pub fn header_count(&self, htype: HeaderType) -> usize {
        self.index.count[htype as usize]
    }

    /// Iterate all headers in insertion order as `(name, value)` pairs.
    #[inline]
    pub fn headers(&self) -> Headers<'_> {
        Headers {
            req: self,
            next: 0,
        }
    }

    /// Iterate the comma-separated items of every header of the given type,
    /// as if their values were one comma-joined sequence.
    ///
    /// See [`HeaderItems`] for the splitting rules.
    #[inline]
    pub fn items(&self, htype: HeaderType) -> HeaderItems<'_> {
        HeaderItems::new(self, &self.buffer, htype)
    }

    // ===== internal =====

    /// Append a header with an empty value and thread it into the per-type
    /// chain. The value span is filled in by [`set_last_value`] once the
    /// field-value line completes.
    ///
    /// [`set_last_value`]: Request::set_last_value
    pub(crate) fn push_header(&mut self, name: Span, htype: HeaderType) {
        let idx = self.headers.len();
        self.headers.push(Header {
            name,
            value: Span::default(),
            htype,
            next_same_type: NONE,
        });

        let t = htype as usize;
        match self.index.tails[t] {
            NONE => self.index.heads[t] = idx,
            tail => self.headers[tail].next_same_type = idx,
        }
        self.index.tails[t] = idx;
        self.index.count[t] += 1;
    }

    pub(crate) fn set_last_value(&mut self, value: Span) {
        if let Some(last) = self.headers.last_mut() {
            last.value = value;
        }
    }

    /// Index of the first header of the given type, if any. O(1).
    pub(crate) fn first(&self, htype: HeaderType) -> Option<usize> {
        match self.index.heads[htype as usize] {
            NONE => None,
            head => Some(head),
        }
    }

    /// Index of the next header with the same type as `idx`, if any.
    pub(crate) fn next_same(&self, idx: usize) -> Option<usize> {
        match self.headers[idx].next_same_type {
            NONE => None,
            next => Some(next),
        }
    }
}

// ===== Headers =====

/// Insertion-order iterator over all parsed headers.
#[derive(Debug)]
pub struct Headers<'a> {
    req: &'a Request,
    next: usize,
}

impl<'a> Iterator for Headers<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        let header = self.req.headers.get(self.next)?;
        self.next += 1;
        Some((
            header.name.resolve(&self.req.buffer),
            header.value.resolve(&self.req.buffer),
        ))
    }
}
