use std::io;

use aster::{FeedResult, ParseContext};
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const SERVER: &str = "aster/0.1.0";

const INDEX: &str = "<!DOCTYPE html>\
    <html><head><title>aster</title></head>\
    <body><h1>It works</h1></body></html>";

const NOT_FOUND: &str = "<!DOCTYPE html>\
    <html><head><title>Not Found</title></head>\
    <body><h1>Not Found</h1></body></html>";

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    log::info!("listening on {}", listener.local_addr()?);

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(ok) => ok,
            Err(err) => {
                log::error!("accept: {err}");
                continue;
            }
        };

        tokio::spawn(async move {
            log::debug!("{peer} connected");
            if let Err(err) = handle(stream).await {
                log::error!("{peer}: {err}");
            }
        });
    }
}

async fn handle(mut stream: TcpStream) -> io::Result<()> {
    let mut ctx = ParseContext::new();
    let mut buf = [0u8; 1024];

    let reply = loop {
        let read = stream.read(&mut buf).await?;
        if read == 0 {
            // peer closed mid-request, into_request reports it as an error
            break respond(ctx);
        }
        match ctx.feed(&buf[..read]) {
            Ok(FeedResult::Pending) => {}
            Ok(FeedResult::Complete) => break respond(ctx),
            Err(err) => {
                log::error!("feed: {err}");
                return Ok(());
            }
        }
    };

    stream.write_all(&reply).await?;
    stream.shutdown().await
}

fn respond(ctx: ParseContext) -> BytesMut {
    match ctx.into_request() {
        Ok(req) => {
            log::info!(
                "> {} {}",
                req.method(),
                String::from_utf8_lossy(req.raw_target()),
            );
            if !req.method().is_known() {
                response("501 Not Implemented", "")
            } else if req.path() == b"/" {
                response("200 OK", INDEX)
            } else {
                response("404 Not Found", NOT_FOUND)
            }
        }
        Err(err) => {
            log::info!("> rejected: {err}");
            response("400 Bad Request", "")
        }
    }
}

fn response(status: &str, body: &str) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256 + body.len());
    buf.extend_from_slice(b"HTTP/1.1 ");
    buf.extend_from_slice(status.as_bytes());
    buf.extend_from_slice(b"\r\nServer: ");
    buf.extend_from_slice(SERVER.as_bytes());
    buf.extend_from_slice(b"\r\nContent-Length: ");
    buf.extend_from_slice(itoa::Buffer::new().format(body.len()).as_bytes());
    buf.extend_from_slice(b"\r\nConnection: close\r\n\r\n");
    buf.extend_from_slice(body.as_bytes());
    buf
}
