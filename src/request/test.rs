use crate::parser::ParseContext;
use crate::request::{HeaderType, MalformedField, Request};

fn request(raw: &[u8]) -> Request {
    let mut ctx = ParseContext::new();
    assert!(ctx.feed(raw).unwrap().is_complete(), "fixture did not complete");
    ctx.into_request().unwrap()
}

macro_rules! items {
    ($req:expr, $htype:ident, [$($item:literal),*]) => {
        let items: Vec<_> = $req
            .items(HeaderType::$htype)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(items, [$(&$item[..]),*]);
    };
    (#[err] $req:expr, $htype:ident) => {
        let err = $req
            .items(HeaderType::$htype)
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(err, MalformedField);
    };
}

#[test]
fn test_items_split() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept-Encoding: gzip, deflate, br, zstd\r\n\r\n");
    items!(req, AcceptEncoding, [b"gzip", b"deflate", b"br", b"zstd"]);
}

#[test]
fn test_items_chain_same_type() {
    // repeated headers read as one comma-joined sequence
    let req = request(
        b"GET / HTTP/1.1\r\n\
          Host: h\r\n\
          Accept-Encoding: gzip, deflate\r\n\
          Accept: */*\r\n\
          Accept-Encoding: br\r\n\
          \r\n",
    );

    assert_eq!(req.header_count(HeaderType::AcceptEncoding), 2);
    items!(req, AcceptEncoding, [b"gzip", b"deflate", b"br"]);

    // first-occurrence lookup is unaffected by the chain
    assert_eq!(req.header(HeaderType::AcceptEncoding), Some(&b"gzip, deflate"[..]));
}

#[test]
fn test_items_quoted_comma() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: a, \"b, c\", d\r\n\r\n");
    items!(req, Accept, [b"a", b"\"b, c\"", b"d"]);
}

#[test]
fn test_items_quoted_escape() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: \"a\\\"b\", c\r\n\r\n");
    items!(req, Accept, [b"\"a\\\"b\"", b"c"]);

    // escaped quote does not close the string
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: \"a\\\", b\"\r\n\r\n");
    items!(req, Accept, [b"\"a\\\", b\""]);
}

#[test]
fn test_items_trailing_comma() {
    // RFC list-extension grammar: one final empty item
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: gzip,\r\n\r\n");
    items!(req, Accept, [b"gzip", b""]);
}

#[test]
fn test_items_comma_at_chain_boundary() {
    // `a,` + `b` reads as the joined sequence `a,,b`, the empty member
    // at the boundary included
    let req = request(
        b"GET / HTTP/1.1\r\n\
          Host: h\r\n\
          Accept: a,\r\n\
          Accept: b\r\n\
          \r\n",
    );
    items!(req, Accept, [b"a", b"", b"b"]);
}

#[test]
fn test_items_empty_members() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: a,,b\r\n\r\n");
    items!(req, Accept, [b"a", b"", b"b"]);
}

#[test]
fn test_items_absent() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\n\r\n");
    assert!(req.items(HeaderType::Te).next().is_none());
    assert_eq!(req.header_count(HeaderType::Te), 0);
}

#[test]
fn test_items_unterminated_quote() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: \"abc\r\n\r\n");
    items!(#[err] req, Accept);
}

#[test]
fn test_items_invalid_escape() {
    // backslash at the end of the value has no escapable target
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: \"a\\\r\n\r\n");
    items!(#[err] req, Accept);
}

#[test]
fn test_items_fused_after_error() {
    let req = request(b"GET / HTTP/1.1\r\nHost: h\r\nAccept: \"abc\r\n\r\n");
    let mut items = req.items(HeaderType::Accept);
    assert_eq!(items.next(), Some(Err(MalformedField)));
    assert_eq!(items.next(), None);
}

#[test]
fn test_header_type_classification() {
    assert_eq!(HeaderType::from_bytes(b"host"), HeaderType::Host);
    assert_eq!(HeaderType::from_bytes(b"transfer-encoding"), HeaderType::TransferEncoding);
    assert_eq!(HeaderType::from_bytes(b"x-custom"), HeaderType::Unknown);
    // classification expects pre-lowercased names
    assert_eq!(HeaderType::from_bytes(b"Host"), HeaderType::Unknown);

    assert_eq!(HeaderType::Host.as_str(), "host");
    assert_eq!(HeaderType::IfModifiedSince.as_str(), "if-modified-since");
    assert_eq!(HeaderType::Unknown.as_str(), "");
}
