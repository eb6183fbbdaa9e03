//! Bearer-token gate in front of the relay endpoints.
//!
//! The embedding page receives the expected token out of band (alongside
//! the widget bootstrap); handlers behind the gate never see a request
//! that fails the check. The token lives in a mode-0600 file under the
//! data directory and is generated on first start.

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use rand::RngCore;

use crate::error::ApiError;
use crate::state::AppState;

/// Random bytes per generated token; hex-encoded on disk and on the wire.
const TOKEN_BYTES: usize = 16;

/// Generate a fresh random token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Read the token from `path`, or generate one and persist it with
/// owner-only permissions.
///
/// Persistence failure is logged and the in-memory token is still used, so
/// the server comes up either way; the token just won't survive a restart.
pub fn load_or_generate_token(path: &std::path::Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(contents) if !contents.trim().is_empty() => {
            tracing::info!(path = %path.display(), "API token loaded");
            contents.trim().to_string()
        }
        _ => {
            let token = generate_token();
            match persist_token(path, &token) {
                Ok(()) => tracing::info!(path = %path.display(), "API token generated"),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to persist API token")
                }
            }
            token
        }
    }
}

fn persist_token(path: &std::path::Path, token: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, token)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

/// Middleware validating `Authorization: Bearer <token>` on protected
/// routes.
pub async fn require_auth(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match bearer_token(&req) {
        Some(presented) if presented == state.api_token => next.run(req).await,
        Some(_) => ApiError::Unauthorized("Invalid bearer token".to_string()).into_response(),
        None => ApiError::Unauthorized("Missing bearer token".to_string()).into_response(),
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
