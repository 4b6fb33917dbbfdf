use std::net::SocketAddr;
use std::path::PathBuf;

use async_std::net::TcpStream;
use async_std::prelude::*;
use async_std::task;

use petrel::config::ServerConfig;
use petrel::net::server::Server;

async fn start_server(directory: Option<PathBuf>) -> SocketAddr {
    let config = ServerConfig {
        port: 0,
        directory,
        ..ServerConfig::default()
    };

    let server = Server::init(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    task::spawn(server.run());
    addr
}

async fn roundtrip(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    response
}

#[async_std::test]
async fn test_echo_over_tcp() {
    let addr = start_server(None).await;

    let response = roundtrip(addr, b"GET /echo/abc HTTP/1.1\r\nHost: x\r\n\r\n").await;

    let text = String::from_utf8(response).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"), "got: {text}");
    assert!(text.contains("Content-Length: 3\r\n"));
    assert!(text.ends_with("\r\n\r\nabc"));
}

#[async_std::test]
async fn test_root_liveness_over_tcp() {
    let addr = start_server(None).await;

    let response = roundtrip(addr, b"GET / HTTP/1.1\r\n\r\n").await;

    let text = String::from_utf8(response).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Length: 0\r\n"));
}

#[async_std::test]
async fn test_file_upload_and_download_over_tcp() {
    let dir = tempfile::tempdir().unwrap();
    let addr = start_server(Some(dir.path().canonicalize().unwrap())).await;

    let post = roundtrip(
        addr,
        b"POST /files/note.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    )
    .await;
    assert!(String::from_utf8(post).unwrap().starts_with("HTTP/1.1 201 Created\r\n"));

    let get = roundtrip(addr, b"GET /files/note.txt HTTP/1.1\r\n\r\n").await;
    let text = String::from_utf8(get).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.ends_with("\r\n\r\nhello"));
}

#[async_std::test]
async fn test_fragmented_request_over_tcp() {
    let addr = start_server(None).await;
    let raw: &[u8] = b"GET /echo/frag HTTP/1.1\r\nHost: x\r\n\r\n";

    let mut stream = TcpStream::connect(addr).await.unwrap();
    for chunk in raw.chunks(3) {
        stream.write_all(chunk).await.unwrap();
        stream.flush().await.unwrap();
    }

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();
    let text = String::from_utf8(response).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.ends_with("\r\n\r\nfrag"));
}

#[async_std::test]
async fn test_duplicate_request_line_over_tcp() {
    let addr = start_server(None).await;

    let response = roundtrip(addr, b"GET / HTTP/1.1\r\nGET / HTTP/1.1\r\n").await;

    let text = String::from_utf8(response).unwrap();
    assert!(text.starts_with("HTTP/1.1 400 Bad Request\r\n"));
}
