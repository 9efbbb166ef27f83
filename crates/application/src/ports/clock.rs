//! Clock port for wall-clock timestamps

use chrono::{DateTime, Utc};

/// Port for reading the current wall-clock time.
///
/// Reports are stamped through this trait so their output can be pinned in
/// tests. Round-trip timing does not use it.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
