//! Request-target form resolver.
//!
//! Runs once the complete target span is resident, classifying by the first
//! byte: `*` is asterisk-form, `/` is origin-form, anything else must be an
//! absolute-form `http`/`https` URI. Authority-form is unsupported along
//! with `CONNECT`. Sub-fields are recorded as spans into the raw target, no
//! percent-decoding is performed.
use super::ParseError;
use crate::matches;
use crate::request::{Request, Span, TargetForm};

pub(super) fn resolve(req: &mut Request, buf: &[u8]) -> Result<(), ParseError> {
    let span = req.raw_target;
    let target = span.resolve(buf);

    match target[0] {
        b'*' => {
            // asterisk-form is exactly one byte
            if target.len() != 1 {
                return Err(ParseError::InvalidTarget);
            }
            req.target_form = TargetForm::Asterisk;
            Ok(())
        }
        b'/' => {
            req.target_form = TargetForm::Origin;
            let (path, query) = path_query(target, 0)?;
            req.path = Span::new(span.offset + path.0, path.1);
            req.query = Span::new(span.offset + query.0, query.1);
            Ok(())
        }
        _ => absolute(req, buf),
    }
}

/// absolute-URI, restricted to a literal `http://` or `https://` scheme,
/// URI-host, optional decimal port, path-abempty and optional query.
fn absolute(req: &mut Request, buf: &[u8]) -> Result<(), ParseError> {
    let span = req.raw_target;
    let target = span.resolve(buf);

    let scheme_len = if target.starts_with(b"http://") {
        b"http".len()
    } else if target.starts_with(b"https://") {
        b"https".len()
    } else {
        return Err(ParseError::InvalidTarget);
    };

    req.target_form = TargetForm::Absolute;
    req.scheme = Span::new(span.offset, scheme_len);

    let host_start = scheme_len + b"://".len();
    let mut pos = host_start;

    if target.get(pos) == Some(&b'[') {
        // IP-literal, contents restricted to hex digits, ":" and "."
        pos += 1;
        while pos < target.len() && matches::is_ipv6(target[pos]) {
            pos += 1;
        }
        if pos == host_start + 1 || target.get(pos) != Some(&b']') {
            return Err(ParseError::InvalidTarget);
        }
        pos += 1;
    } else {
        while pos < target.len() {
            match target[pos] {
                b'%' => {
                    pct(target, pos)?;
                    pos += 3;
                }
                byte if matches::is_regname(byte) => pos += 1,
                _ => break,
            }
        }
    }

    if pos == host_start {
        return Err(ParseError::InvalidTarget);
    }
    if target.get(pos) == Some(&b'@') {
        // deprecated userinfo syntax
        return Err(ParseError::InvalidTarget);
    }

    req.host = Span::new(span.offset + host_start, pos - host_start);

    if target.get(pos) == Some(&b':') {
        pos += 1;
        let port_start = pos;
        let mut port: u16 = 0;
        while let Some(byte) = target.get(pos).filter(|byte| byte.is_ascii_digit()) {
            port = port
                .checked_mul(10)
                .and_then(|port| port.checked_add((byte - b'0') as u16))
                .ok_or(ParseError::InvalidPort)?;
            pos += 1;
        }
        if pos == port_start {
            return Err(ParseError::InvalidPort);
        }
        req.port = port;
    }

    req.authority = Span::new(span.offset + host_start, pos - host_start);

    match target.get(pos) {
        None | Some(b'/' | b'?') => {
            let (path, query) = path_query(target, pos)?;
            req.path = Span::new(span.offset + path.0, path.1);
            req.query = Span::new(span.offset + query.0, query.1);
            Ok(())
        }
        Some(_) => Err(ParseError::InvalidTarget),
    }
}

/// Validate `path [ "?" query ]` from `at`, returning both as
/// `(start, len)` relative to the target.
fn path_query(
    target: &[u8],
    at: usize,
) -> Result<((usize, usize), (usize, usize)), ParseError> {
    let mut pos = at;

    while pos < target.len() {
        match target[pos] {
            b'?' => break,
            b'%' => {
                pct(target, pos)?;
                pos += 3;
            }
            byte if matches::is_path(byte) => pos += 1,
            _ => return Err(ParseError::InvalidTarget),
        }
    }
    let path = (at, pos - at);

    let mut query = (pos, 0);
    if pos < target.len() {
        pos += 1;
        let query_start = pos;
        while pos < target.len() {
            match target[pos] {
                b'%' => {
                    pct(target, pos)?;
                    pos += 3;
                }
                byte if matches::is_query(byte) => pos += 1,
                _ => return Err(ParseError::InvalidTarget),
            }
        }
        query = (query_start, pos - query_start);
    }

    Ok((path, query))
}

/// pct-encoded = "%" HEXDIG HEXDIG
fn pct(target: &[u8], at: usize) -> Result<(), ParseError> {
    match target.get(at + 1..at + 3) {
        Some([hi, lo]) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => Ok(()),
        _ => Err(ParseError::InvalidEscape),
    }
}
