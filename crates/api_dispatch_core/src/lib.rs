//! Event dispatch and reliable delivery primitives.
//!
//! This crate owns the request router, the response envelope, the failure
//! taxonomy, the append-only log writer, and the remote invocation helpers.
//! Remote systems are reached only through the port traits declared next to
//! each helper; it intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod envelope;
pub mod event;
pub mod failure;
pub mod fatal;
pub mod log_stream;
pub mod remote;
pub mod router;

pub use envelope::{ApiGatewayResponse, ResponseEnvelope};
pub use event::{Event, InvocationContext, RouteKey};
pub use failure::{Failure, HandlerResult, RemoteError, StatusCode};
pub use router::{handler_fn, Handler, Route, Router};
