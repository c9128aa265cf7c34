//! Identity middleware for protected endpoints.
//!
//! The bracket service runs behind the festival's auth gateway, which
//! authenticates users and forwards who they are in trusted headers. This
//! middleware reads those headers, builds an [`Identity`], and injects it
//! into request extensions for downstream handlers.
//!
//! # Request Headers
//!
//! ```text
//! X-User-Id: 7d7f9f1e-8c7b-4a57-9e53-0e4c7a3b6f21
//! X-User-Role: captain
//! ```
//!
//! # Behavior
//!
//! - **Success**: Both headers present and valid → [`Identity`] injected →
//!   next handler runs
//! - **Missing header**: Returns `401 Unauthorized`
//! - **Malformed id or unknown role**: Returns `401 Unauthorized`
//!
//! # Extracting the Identity
//!
//! In handler functions, extract the identity from request extensions:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use esports_brackets::auth::Identity;
//!
//! async fn protected_handler(Extension(identity): Extension<Identity>) -> String {
//!     format!("Authenticated as {}", identity.user_id)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use esports_brackets::auth::{Identity, Role};
use uuid::Uuid;

/// Header carrying the authenticated user id
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity middleware that validates gateway headers and injects [`Identity`].
pub async fn identity_middleware(
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok());

    let role = request
        .headers()
        .get(USER_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(Role::parse);

    match (user_id, role) {
        (Some(user_id), Some(role)) => {
            request
                .extensions_mut()
                .insert(Identity::new(user_id, role));
            Ok(next.run(request).await)
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}
