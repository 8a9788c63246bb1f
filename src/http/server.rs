//! HTTP server startup logic.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid port {0:?}")]
    InvalidAddress(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Bind the configured port on every interface and serve `app`.
///
/// This function blocks until the listener fails; it never returns `Ok` in
/// normal operation.
pub async fn start_server(app: Router, config: &Config) -> Result<(), ServerError> {
    let listener = bind(config.bind_addr()?).await?;

    serve(listener, app).await
}

/// Bind `addr`, retrying on the IPv4 wildcard when an IPv6 socket cannot be
/// created at all. A port that is taken or forbidden is never retried.
async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    match TcpListener::bind(addr).await {
        Ok(listener) => Ok(listener),
        Err(err) if addr.is_ipv6() && ipv6_unavailable(&err) => {
            let fallback = Config::fallback_addr(addr);
            tracing::warn!(error = %err, %fallback, "IPv6 unavailable, listening on IPv4 only");
            TcpListener::bind(fallback)
                .await
                .map_err(|source| ServerError::Bind {
                    addr: fallback,
                    source,
                })
        }
        Err(source) => Err(ServerError::Bind { addr, source }),
    }
}

fn ipv6_unavailable(err: &io::Error) -> bool {
    !matches!(
        err.kind(),
        io::ErrorKind::AddrInUse | io::ErrorKind::PermissionDenied
    )
}

/// Serve `app` on an already bound listener.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Listening");
    }

    axum::serve(listener, app).await?;

    Ok(())
}
