//! TCP listener and per-connection driver.
//!
//! This module owns only the networking concerns: accepting connections,
//! reading raw bytes, and writing the serialized response back. Protocol
//! semantics live in the [`Connection`] state machine and below; the server
//! just pumps bytes into it until it reports `Dispatched` or `Closed`.
//!
//! Every accepted connection gets its own task and its own `Connection`;
//! there is no mutable state shared between connections. The configuration
//! and the file store are immutable after startup and shared via `Arc`.
//! Reads and writes are bounded by the configured timeouts, so a client
//! that stalls mid-request cannot hold its task open forever.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_std::future;
use async_std::net::{TcpListener, TcpStream};
use async_std::prelude::*;
use async_std::task;

use crate::config::ServerConfig;
use crate::handler::files::FileStore;
use crate::http::connection::{Connection, Phase};

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
    store: Arc<FileStore>,
}

impl Server {
    /// Binds the configured address and prepares the shared context.
    pub async fn init(config: ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind((config.address, config.port)).await?;
        let store = Arc::new(FileStore::new(config.directory.clone()));

        Ok(Self {
            listener,
            config: Arc::new(config),
            store,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop; runs until the listener fails. Each client is handled
    /// on its own task.
    pub async fn run(self) -> std::io::Result<()> {
        tracing::info!(addr = %self.local_addr()?, "listening");

        while let Ok((stream, addr)) = self.listener.accept().await {
            let config = Arc::clone(&self.config);
            let store = Arc::clone(&self.store);
            task::spawn(async move {
                if let Err(err) = Self::handle_client(stream, addr, config, store).await {
                    tracing::warn!(peer = %addr, error = %err, "connection error");
                }
            });
        }

        Ok(())
    }

    /// Pumps bytes from the socket into the connection state machine, then
    /// writes back whatever it dispatched. A read timeout closes the
    /// connection without a response.
    async fn handle_client(
        mut stream: TcpStream,
        addr: SocketAddr,
        config: Arc<ServerConfig>,
        store: Arc<FileStore>,
    ) -> std::io::Result<()> {
        let mut conn = Connection::new(addr.to_string(), &config, store);
        let mut buffer = vec![0u8; config.buffer_size];

        loop {
            let read = future::timeout(config.read_timeout, stream.read(&mut buffer)).await;
            match read {
                Err(_) => {
                    tracing::warn!(peer = %addr, "read timed out");
                    return Ok(());
                }
                Ok(Ok(0)) => {
                    conn.remote_closed();
                    break;
                }
                Ok(Ok(n)) => {
                    if conn.feed(&buffer[..n]) == Phase::Dispatched {
                        break;
                    }
                }
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Ok(Err(e)) => return Err(e),
            }
        }

        // A connection the remote closed early has nothing to flush.
        let bytes = conn.response_bytes();
        if !bytes.is_empty() {
            write_timed(&mut stream, bytes, config.write_timeout).await?;
        }
        conn.finish();

        Ok(())
    }
}

async fn write_timed(
    stream: &mut TcpStream,
    bytes: &[u8],
    limit: Duration,
) -> std::io::Result<()> {
    let write = async {
        stream.write_all(bytes).await?;
        stream.flush().await
    };

    future::timeout(limit, write)
        .await
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "write timed out"))?
}
