use axum::http::HeaderMap;

use crate::models::Actor;

/// Resolves the current actor from request headers. Authentication
/// itself happens upstream; this service only consumes the result.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Option<Actor>;
}

/// Trusts identity headers set by an authenticating reverse proxy.
/// Administrative rights are granted by a bearer token checked against
/// the configured admin token.
pub struct ProxyHeaderIdentity {
    admin_token: String,
}

impl ProxyHeaderIdentity {
    pub fn new(admin_token: String) -> Self {
        Self { admin_token }
    }
}

impl IdentityProvider for ProxyHeaderIdentity {
    fn resolve(&self, headers: &HeaderMap) -> Option<Actor> {
        let uid = header_str(headers, "x-user-id")?;
        let email = header_str(headers, "x-user-email").unwrap_or_default();
        let display_name = header_str(headers, "x-user-name").unwrap_or_else(|| email.clone());

        let bearer = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let token = bearer.strip_prefix("Bearer ").unwrap_or("");
        let is_admin = !self.admin_token.is_empty() && token == self.admin_token;

        Some(Actor {
            uid,
            email,
            display_name,
            is_admin,
        })
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
