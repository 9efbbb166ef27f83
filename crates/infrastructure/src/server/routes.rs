//! Mutable routing table shared between the caller and the running server.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::response::Response;
use axum::routing::MethodRouter;
use parking_lot::RwLock;
use tower::ServiceExt;

/// Routes served by the test server.
///
/// The server dispatches every request through a snapshot of this table, so
/// routes registered after the server started are picked up by the next
/// request.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    router: Arc<RwLock<Router>>,
}

impl RouteTable {
    /// Creates an empty table. Every request answers 404 until routes are added.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or overlaps an existing route,
    /// exactly like [`Router::route`]. The table is left unchanged.
    pub fn route(&self, path: &str, method_router: MethodRouter) {
        let mut router = self.router.write();
        let next = router.clone().route(path, method_router);
        *router = next;
    }

    /// Merges every route of `other` into the table.
    ///
    /// # Panics
    ///
    /// Panics on overlapping routes, exactly like [`Router::merge`]. The table
    /// is left unchanged.
    pub fn merge(&self, other: Router) {
        let mut router = self.router.write();
        let next = router.clone().merge(other);
        *router = next;
    }

    /// Returns a copy of the current routes.
    #[must_use]
    pub fn snapshot(&self) -> Router {
        self.router.read().clone()
    }

    /// Answers one request with the current routes.
    pub async fn dispatch(&self, request: Request) -> Response {
        match self.snapshot().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }

    /// Wraps the table in a router that forwards every request to it.
    pub(crate) fn into_service(self) -> Router {
        Router::new().fallback(forward).with_state(self)
    }
}

async fn forward(State(routes): State<RouteTable>, request: Request) -> Response {
    routes.dispatch(request).await
}
