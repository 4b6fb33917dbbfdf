use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use petrel::config::ServerConfig;
use petrel::net::server::Server;

#[derive(Parser, Debug)]
#[command(name = "petrel", about = "A small HTTP/1.1 echo and file server")]
struct Cli {
    /// Serve files from DIR on the /files/ routes
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    address: Option<IpAddr>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// TOML config file; CLI flags override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,
}

#[async_std::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::from_file(path),
        None => ServerConfig::default(),
    };

    if cli.directory.is_some() {
        config.directory = cli.directory;
    }
    if let Some(address) = cli.address {
        config.address = address;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    // Pin the base directory down before accepting connections; containment
    // checks compare against this canonical form.
    if let Some(dir) = config.directory.take() {
        let canonical = dir.canonicalize().map_err(|err| {
            tracing::error!(dir = %dir.display(), error = %err, "invalid serving directory");
            err
        })?;
        config.directory = Some(canonical);
    }

    let server = Server::init(config).await?;
    server.run().await
}
