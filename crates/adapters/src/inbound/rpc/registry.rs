//! Declarative method registration with role gating.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use application::context::GenericRequest;
use application::ports::outbound::Clock;
use domain::auth::claims::Claims;
use domain::identity::role::Role;

/// Failures raised by the dispatch gate itself, before or instead of
/// the business operation. The transport maps these to wire status
/// codes.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("unknown method {service}.{method}")]
    UnknownMethod { service: String, method: String },
    #[error("caller lacks a required role")]
    Forbidden,
    #[error("malformed request payload")]
    Decode(#[from] serde_json::Error),
}

pub type HandlerFuture =
    Pin<Box<dyn Future<Output = Result<Vec<u8>, RpcError>> + Send>>;

/// Handler invoked once the role gate has passed: decodes the payload,
/// runs the operation and returns the serialized response envelope.
pub type Handler =
    Box<dyn Fn(GenericRequest, Vec<u8>) -> HandlerFuture + Send + Sync>;

/// One registered method: its role allow-list and its handler.
///
/// An empty allow-list means the method is open to any caller.
pub struct RpcEndpoint {
    pub roles: &'static [Role],
    pub handler: Handler,
}

/// Table binding `(service, method)` pairs to endpoints.
///
/// Role gating lives here, in one auditable place: a caller holding
/// none of an endpoint's listed roles never reaches its handler.
pub struct Registry {
    clock: Arc<dyn Clock>,
    endpoints: HashMap<String, RpcEndpoint>,
}

impl Registry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock, endpoints: HashMap::new() }
    }

    fn key(service: &str, method: &str) -> String {
        format!("{service}.{method}")
    }

    /// Register an endpoint under `service`/`method`.
    pub fn register(
        &mut self,
        service: &'static str,
        method: &'static str,
        endpoint: RpcEndpoint,
    ) {
        self.endpoints.insert(Self::key(service, method), endpoint);
    }

    /// Look up the endpoint, enforce its role allow-list, then run the
    /// handler with a freshly stamped request context.
    pub async fn dispatch(
        &self,
        service: &str,
        method: &str,
        claims: Claims,
        payload: Vec<u8>,
    ) -> Result<Vec<u8>, RpcError> {
        let endpoint = self
            .endpoints
            .get(&Self::key(service, method))
            .ok_or_else(|| RpcError::UnknownMethod {
                service: service.to_string(),
                method: method.to_string(),
            })?;

        let permitted = endpoint.roles.is_empty()
            || endpoint.roles.iter().any(|role| claims.has_role(*role));
        if !permitted {
            tracing::warn!(service, method, "caller rejected by role gate");
            return Err(RpcError::Forbidden);
        }

        tracing::trace!(service, method, "dispatching");
        let request = GenericRequest::new(claims, self.clock.now());
        (endpoint.handler)(request, payload).await
    }
}
