//! Request-side types: what a test sends.

mod body;
mod content_type;
mod method;
mod outgoing;
mod spec;

pub use body::JsonBody;
pub use content_type::ContentType;
pub use method::HttpMethod;
pub use outgoing::OutgoingRequest;
pub use spec::TestRequestSpec;
