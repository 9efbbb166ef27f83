//! Response-side types: what a test receives.

mod spec;

pub use spec::{ResponseSpec, StatusCode};
