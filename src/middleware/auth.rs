use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Error;
use crate::middleware::policy::Caller;
use crate::models::user::User;
use crate::utils::token::decode_token;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub account_id: i64,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Caller {
            user_id: user.id,
            account_id: user.account_id,
            roles: user.effective_roles(),
        }
    }
}

fn reject(code: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

/// Resolves the bearer token into a [`Caller`] request extension. The
/// subject is loaded from the store on every request, so account and roles
/// are the current ones and tokens of deleted users stop working.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return reject("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return reject("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return reject("unsupported_scheme");
    };

    let config = crate::config::get_config();
    let claims = match decode_token(token.trim(), &config.jwt_secret) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "rejected bearer token");
            return reject("invalid_token");
        }
    };
    let Some(user_id) = claims.user_id() else {
        return reject("invalid_token");
    };

    let user = match state.user_service.get_by_id(user_id).await {
        Ok(user) => user,
        Err(Error::NotFound(_)) => {
            tracing::debug!(user_id, "bearer token for unknown user");
            return reject("unknown_user");
        }
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(Caller::from(&user));
    next.run(req).await
}
