use std::{fmt, str::FromStr};

/// HTTP Method.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Method(Inner);

// https://datatracker.ietf.org/doc/html/rfc9110#section-9
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
enum Inner {
    #[default]
    Unknown,
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    Trace,
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        str::fmt(self.as_str(), f)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Method {
    /// Any method outside the supported set.
    ///
    /// An unknown method is not a parse error, the caller decides whether to
    /// reject it, typically with a 501.
    pub const UNKNOWN: Method = Method(Inner::Unknown);

    forward! {
        /// The `GET` method requests a representation of the specified resource.
        pub const GET: Get = b"GET";
        /// The `HEAD` method asks for a response identical to a GET request, but without a
        /// response body.
        pub const HEAD: Head = b"HEAD";
        /// The `POST` method submits an entity to the specified resource.
        pub const POST: Post = b"POST";
        /// The `PUT` method replaces all current representations of the target resource with the
        /// request content.
        pub const PUT: Put = b"PUT";
        /// The `DELETE` method deletes the specified resource.
        pub const DELETE: Delete = b"DELETE";
        /// The `OPTIONS` method describes the communication options for the target resource.
        pub const OPTIONS: Options = b"OPTIONS";
        /// The `TRACE` method performs a message loop-back test along the path to the target
        /// resource.
        pub const TRACE: Trace = b"TRACE";
    }

    /// Returns `true` for any method other than [`UNKNOWN`].
    ///
    /// [`UNKNOWN`]: Method::UNKNOWN
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self.0, Inner::Unknown)
    }
}

// ===== Error =====

/// An error when trying to parse [`Method`] from a string.
#[derive(Debug)]
pub struct UnknownMethod;

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = Self::from_bytes(s.as_bytes());
        if method.is_known() { Ok(method) } else { Err(UnknownMethod) }
    }
}

impl std::error::Error for UnknownMethod {}

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown method")
    }
}

// ===== Macros =====

macro_rules! forward {
    ($($(#[$doc:meta])* pub const $name:ident: $variant:ident = $val:literal;)*) => {
        $(
            $(#[$doc])*
            pub const $name: Method = Method(Inner::$variant);
        )*

        /// Create [`Method`] from bytes.
        ///
        /// Matching is exact and case-sensitive, anything else yields
        /// [`UNKNOWN`][Method::UNKNOWN].
        pub const fn from_bytes(src: &[u8]) -> Method {
            match src {
                $(
                    $val => Self::$name,
                )*
                _ => Self::UNKNOWN,
            }
        }
        /// Returns string representation.
        pub const fn as_str(&self) -> &'static str {
            match self.0 {
                Inner::Unknown => "UNKNOWN",
                $(
                    Inner::$variant => stringify!($name),
                )*
            }
        }
    };
}

use forward;
