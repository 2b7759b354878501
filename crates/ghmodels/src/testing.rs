//! In-process HTTP doubles for client tests.

use axum::Router;
use tokio::net::TcpListener;

use crate::{ClientConfig, ModelsClient};

/// Serves `router` on an ephemeral port and returns a client pointed at it.
pub(crate) async fn spawn_client(router: Router) -> ModelsClient {
    spawn_client_with(router, ClientConfig::default()).await
}

/// Like [`spawn_client`], starting from the given configuration.
pub(crate) async fn spawn_client_with(router: Router, config: ClientConfig) -> ModelsClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let config = config.with_base_url(format!("http://{address}"));
    ModelsClient::with_config("test-token", config).unwrap()
}

/// Returns a base URL on which nothing is listening.
pub(crate) async fn refused_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}")
}
