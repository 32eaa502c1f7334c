//! Post-processing pass over the complete header block.
//!
//! Runs exactly once, in a fixed order: host resolution, framing
//! disambiguation, then connection flags.
use super::ParseError;
use crate::Version;
use crate::request::{HeaderItems, HeaderType, Request};

pub(super) fn run(req: &mut Request, buf: &[u8]) -> Result<(), ParseError> {
    host(req)?;
    framing(req, buf)?;
    connection(req, buf)
}

/// An HTTP/1.1 request without a `Host` header has an ambiguous target. The
/// header fills the host span unless absolute-form already did.
fn host(req: &mut Request) -> Result<(), ParseError> {
    let first = req.first(HeaderType::Host);

    if req.version == Version::HTTP_11 && first.is_none() {
        return Err(ParseError::MissingHost);
    }

    if req.host.is_empty()
        && let Some(idx) = first
    {
        req.host = req.headers[idx].value;
    }

    Ok(())
}

/// Content-Length vs. Transfer-Encoding. Both at once is the
/// request-smuggling vector and is always an error, regardless of order.
fn framing(req: &mut Request, buf: &[u8]) -> Result<(), ParseError> {
    let te_count = req.header_count(HeaderType::TransferEncoding);
    let cl_count = req.header_count(HeaderType::ContentLength);

    if te_count > 0 && cl_count > 0 {
        return Err(ParseError::AmbiguousFraming);
    }

    if te_count > 0 {
        // chunked is undefined in HTTP/1.0
        if req.version == Version::HTTP_10 {
            return Err(ParseError::ChunkedInHttp10);
        }

        let mut items = HeaderItems::new(req, buf, HeaderType::TransferEncoding);
        match items.next() {
            Some(Ok(item)) if item.eq_ignore_ascii_case(b"chunked") => {}
            Some(Err(_)) => return Err(ParseError::MalformedList),
            _ => return Err(ParseError::UnsupportedCoding),
        }
        // any additional coding is unsupported, not silently ignored
        if items.next().is_some() {
            return Err(ParseError::UnsupportedCoding);
        }

        req.te_chunked = true;
        req.content_length = -1;
        return Ok(());
    }

    match cl_count {
        0 => req.content_length = 0,
        1 => {
            let Some(idx) = req.first(HeaderType::ContentLength) else {
                return Err(ParseError::InvalidContentLength);
            };
            let value = req.headers[idx].value.resolve(buf);

            let mut length: i64 = 0;
            for byte in value {
                if !byte.is_ascii_digit() {
                    return Err(ParseError::InvalidContentLength);
                }
                length = length
                    .checked_mul(10)
                    .and_then(|length| length.checked_add((byte - b'0') as i64))
                    .ok_or(ParseError::InvalidContentLength)?;
            }
            req.content_length = length;
        }
        // duplicates are the same smuggling vector the mutual-exclusion
        // rule exists for
        _ => return Err(ParseError::InvalidContentLength),
    }

    Ok(())
}

/// Keep-alive defaults on; `Connection: close` clears it, `upgrade` sets
/// the upgrade flag, and `Expect: 100-continue` sets `expect_100`.
fn connection(req: &mut Request, buf: &[u8]) -> Result<(), ParseError> {
    let mut keep_alive = true;
    let mut upgrade = false;

    for item in HeaderItems::new(req, buf, HeaderType::Connection) {
        let item = item.map_err(|_| ParseError::MalformedList)?;
        if item.eq_ignore_ascii_case(b"close") {
            keep_alive = false;
        } else if item.eq_ignore_ascii_case(b"upgrade") {
            upgrade = true;
        }
    }

    let mut expect_100 = false;
    for item in HeaderItems::new(req, buf, HeaderType::Expect) {
        let item = item.map_err(|_| ParseError::MalformedList)?;
        if item.eq_ignore_ascii_case(b"100-continue") {
            expect_100 = true;
        }
    }

    req.keep_alive = keep_alive;
    req.upgrade = upgrade;
    req.expect_100 = expect_100;
    Ok(())
}
