//! In-process test server: a routing table the caller fills and an axum
//! server on an ephemeral port that serves it.

mod routes;
mod test_server;

pub use routes::RouteTable;
pub use test_server::TestServer;
