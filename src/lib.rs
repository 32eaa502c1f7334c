//! Incremental HTTP/1.1 Request Parser.
//!
//! The parser is a resumable state machine fed raw connection bytes. Callers
//! own the read loop: [`feed`] consumes whatever arrived, advances as far as
//! possible, and returns [`Pending`] when it runs out of bytes mid token,
//! preserving its position so the next call resumes in place.
//!
//! ```no_run
//! use aster::{FeedResult, ParseContext};
//!
//! let mut ctx = ParseContext::new();
//!
//! loop {
//!     let bytes: &[u8] = todo!("read from the connection");
//!     match ctx.feed(bytes).unwrap() {
//!         FeedResult::Pending => continue,
//!         FeedResult::Complete => break,
//!     }
//! }
//!
//! let req = ctx.into_request().unwrap();
//! assert_eq!(req.path(), b"/");
//! ```
//!
//! [`feed`]: ParseContext::feed
//! [`Pending`]: FeedResult::Pending
#![warn(missing_debug_implementations)]

mod log;
mod matches;

mod common;
mod method;
mod version;

pub mod request;
pub mod parser;

pub use common::{FeedResult, OutOfMemory};
pub use method::Method;
pub use version::Version;

pub use request::{HeaderItems, HeaderType, MalformedField, Request, TargetForm};
pub use parser::{ParseContext, ParseError};
