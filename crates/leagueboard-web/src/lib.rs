//! leagueboard-web - Web frontend for leagueboard using Axum
//!
//! The page is rendered on the server: selecting a week submits `?week=N`
//! and the whole dashboard is derived again for that week.

pub mod api;
pub mod chart;
pub mod page;
pub mod router;

pub use router::create_router;

use anyhow::Result;
use leagueboard_core::DataStore;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server
pub async fn run(store: Arc<DataStore>, host: IpAddr, port: u16) -> Result<()> {
    let router = create_router(store);

    let addr = SocketAddr::new(host, port);
    let listener = TcpListener::bind(addr).await?;

    info!("Web server listening on http://{}", addr);
    println!("Web server listening on http://{}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
