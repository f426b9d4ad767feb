use std::net::IpAddr;

use poem::Request;
use poem_openapi::auth::{Bearer, BearerAuthorization};

use crate::providers::TokenProvider;
use crate::types::internal::auth::Claims;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carries what the workflows need for logging: where the request came from
/// and, when a valid access token was presented, who sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// IP address of the client making the request
    pub ip_address: Option<IpAddr>,

    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Full JWT claims if a valid bearer token was presented
    pub claims: Option<Claims>,

    /// Source of the request
    pub source: RequestSource,

    /// Actor who initiated the operation
    pub actor_id: String,
}

impl RequestContext {
    /// Create a RequestContext for CLI operations
    ///
    /// # Arguments
    /// * `command_name` - Name of the CLI command being executed
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            claims: None,
            source: RequestSource::CLI,
            actor_id: format!("cli:{}", command_name),
        }
    }

    /// Create an anonymous API context, mostly useful in tests
    pub fn anonymous() -> Self {
        Self {
            ip_address: None,
            request_id: RequestId::new(),
            claims: None,
            source: RequestSource::API,
            actor_id: "anonymous".to_string(),
        }
    }

    /// Build the context for an incoming HTTP request
    ///
    /// A bearer token is optional. An invalid or expired token leaves the
    /// context anonymous rather than failing the request.
    pub fn from_request(req: &Request, token_provider: &TokenProvider) -> Self {
        let mut ctx = Self::anonymous();
        ctx.ip_address = Self::extract_ip_address(req);

        if let Ok(bearer) = Bearer::from_request(req) {
            if let Ok(claims) = token_provider.validate_jwt(&bearer.token) {
                ctx = ctx.with_auth(claims);
            }
        }

        tracing::trace!("Request context created: {:?}", ctx);
        ctx
    }

    /// Extract IP address from request headers
    ///
    /// Checks X-Forwarded-For, X-Real-IP, and falls back to remote address.
    fn extract_ip_address(req: &Request) -> Option<IpAddr> {
        if let Some(forwarded) = req.header("X-Forwarded-For") {
            if let Some(ip) = forwarded.split(',').next() {
                return ip.trim().parse().ok();
            }
        }

        if let Some(real_ip) = req.header("X-Real-IP") {
            return real_ip.parse().ok();
        }

        req.remote_addr().as_socket_addr().map(|addr| addr.ip())
    }

    /// Set authentication state with claims
    pub fn with_auth(mut self, claims: Claims) -> Self {
        self.actor_id = claims.sub.clone();
        self.claims = Some(claims);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.claims.is_some()
    }
}
