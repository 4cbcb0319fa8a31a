use crate::dto::auth_dto::{LoginPayload, LoginResponse};
use crate::error::{Error, Result};
use crate::services::user_service::UserService;
use crate::utils::{crypto::verify_password_blocking, time::now, token::issue_token};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt_secret: String,
    ttl_minutes: i64,
}

impl AuthService {
    pub fn new(users: UserService, jwt_secret: String, ttl_minutes: i64) -> Self {
        Self {
            users,
            jwt_secret,
            ttl_minutes,
        }
    }

    /// Exchanges email and password for a bearer token. Unknown emails and
    /// wrong passwords are indistinguishable to the caller.
    pub async fn login(&self, payload: LoginPayload) -> Result<LoginResponse> {
        let Some(user) = self.users.find_by_email(payload.email.trim()).await? else {
            tracing::info!("login rejected: unknown email");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password_blocking(payload.password, user.password.clone()).await? {
            tracing::info!(user_id = user.id, "login rejected: wrong password");
            return Err(Error::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let (token, expires_at) = issue_token(&user, &self.jwt_secret, self.ttl_minutes, now())?;
        tracing::info!(user_id = user.id, "user logged in");

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_at,
        })
    }
}
