//! Ephemeral in-process HTTP server.

use std::net::{IpAddr, SocketAddr};

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::RouteTable;
use crate::error::{HarnessError, HarnessResult};

/// An axum server bound to an ephemeral local port.
///
/// Must be started from inside a tokio runtime. Dropping the server signals
/// shutdown without waiting for it.
#[derive(Debug)]
pub struct TestServer {
    addr: SocketAddr,
    base_url: String,
    routes: RouteTable,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl TestServer {
    /// Binds `host:0` and starts serving `routes`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Bind`] if no port can be bound on `host`.
    pub async fn start(host: IpAddr, routes: RouteTable) -> HarnessResult<Self> {
        let bind_error = |source| HarnessError::Bind { host, source };

        let listener = TcpListener::bind(SocketAddr::new(host, 0))
            .await
            .map_err(bind_error)?;
        let addr = listener.local_addr().map_err(bind_error)?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let app = routes.clone().into_service();

        let task = tokio::spawn(async move {
            let signal = async {
                // A dropped sender also means shut down.
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(signal)
                .await
            {
                warn!(error = %e, "test server stopped with an error");
            }
        });

        info!(%addr, "test server listening");

        Ok(Self {
            addr,
            base_url: format!("http://{addr}"),
            routes,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }

    /// Base URL requests are resolved against, e.g. `http://127.0.0.1:41234`.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Bound socket address.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// The routing table this server dispatches to.
    #[must_use]
    pub const fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns true until [`shutdown`](Self::shutdown) has been called.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.shutdown.is_some()
    }

    /// Signals shutdown and hands back the server task to await.
    ///
    /// Returns `None` when the server was already shut down.
    pub fn shutdown(&mut self) -> Option<JoinHandle<()>> {
        let sender = self.shutdown.take()?;
        let _ = sender.send(());
        self.task.take()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(sender) = self.shutdown.take() {
            let _ = sender.send(());
        }
    }
}
