//! Exact-match request routing.
//!
//! The route table is fixed once the [`Router`] is built. Each inbound event is
//! dispatched exactly once; there is no retry at this layer.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;

use crate::envelope::ResponseEnvelope;
use crate::event::{Event, RouteKey};
use crate::failure::{Failure, HandlerResult};

pub trait Handler: Send + Sync {
    fn invoke(&self, event: &Event) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Event) -> HandlerResult + Send + Sync,
{
    fn invoke(&self, event: &Event) -> HandlerResult {
        self(event)
    }
}

/// Pins a closure to the handler signature so its argument and error types infer.
pub fn handler_fn<F>(f: F) -> F
where
    F: Fn(&Event) -> HandlerResult + Send + Sync,
{
    f
}

/// One entry of the route table.
pub struct Route {
    pub key: RouteKey,
    pub handler: Box<dyn Handler>,
}

impl Route {
    pub fn new(verb: &str, path: &str, handler: impl Handler + 'static) -> Self {
        Self {
            key: RouteKey::new(verb, path),
            handler: Box::new(handler),
        }
    }
}

pub struct Router {
    name: String,
    routes: BTreeMap<RouteKey, Box<dyn Handler>>,
}

impl Router {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            routes: BTreeMap::new(),
        }
    }

    pub fn from_routes(name: impl Into<String>, routes: impl IntoIterator<Item = Route>) -> Self {
        routes
            .into_iter()
            .fold(Self::new(name), |router, route| router.with_route(route))
    }

    /// Registers a route. A later route with the same key replaces the earlier one.
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.insert(route.key, route.handler);
        self
    }

    pub fn route(self, verb: &str, path: &str, handler: impl Handler + 'static) -> Self {
        self.with_route(Route::new(verb, path, handler))
    }

    pub fn dispatch(&self, event: &Event) -> ResponseEnvelope {
        let key = event.route_key();
        let request_id = event.context().request_id.as_str();

        let Some(handler) = self.routes.get(&key) else {
            tracing::info!(router = %self.name, route = %key, request_id, "route not found");
            return ResponseEnvelope::failure(&Failure::not_found("route not found"));
        };

        tracing::info!(router = %self.name, route = %key, request_id, "dispatching event");
        match invoke_guarded(handler.as_ref(), event) {
            Ok(value) => ResponseEnvelope::success(value),
            Err(failure @ Failure::Expected { .. }) => {
                tracing::info!(
                    router = %self.name,
                    route = %key,
                    request_id,
                    status = failure.status().as_u16(),
                    "handler reported failure: {failure}"
                );
                ResponseEnvelope::failure(&failure)
            }
            Err(Failure::Fault(detail)) => {
                tracing::error!(
                    router = %self.name,
                    route = %key,
                    request_id,
                    "handler fault"
                );
                ResponseEnvelope::failure_unexpected(&detail)
            }
        }
    }
}

/// Dispatches against an ad-hoc table built from `routes`.
pub fn dispatch(routes: impl IntoIterator<Item = Route>, event: &Event) -> ResponseEnvelope {
    Router::from_routes("adhoc", routes).dispatch(event)
}

fn invoke_guarded(handler: &dyn Handler, event: &Event) -> Result<Value, Failure> {
    panic::catch_unwind(AssertUnwindSafe(|| handler.invoke(event)))
        .unwrap_or_else(|payload| Err(Failure::fault(panic_detail(payload.as_ref()))))
}

fn panic_detail(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("handler panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("handler panicked: {message}")
    } else {
        "handler panicked".to_string()
    }
}
