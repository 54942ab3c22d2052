use std::{io, net::SocketAddrV4, path::PathBuf};

use clap::Parser;
use rdcl_site::{
    core::settings::{Settings, DEFAULT_SETTINGS_PATH},
    server::start_server,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "rdcl-site", version, about = "Content backend for the RDCL site")]
struct Cli {
    /// Settings file; defaults apply when it does not exist.
    #[arg(long, default_value = DEFAULT_SETTINGS_PATH)]
    settings: PathBuf,

    /// Overrides the bind address from the settings file.
    #[arg(long)]
    addr: Option<SocketAddrV4>,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.settings).map_err(|error| {
        error!("Settings load error: {}", error);
        io::Error::other(error)
    })?;
    if let Some(addr) = cli.addr {
        settings.ipv4_addr = *addr.ip();
        settings.port = addr.port();
    }

    start_server(settings).await
}
