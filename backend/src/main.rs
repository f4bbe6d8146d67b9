//! Backend entry-point: wires the REST endpoints and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;

mod server;

use server::ServerConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, ServerConfig::new(bind_addr))?;
    server.await
}
