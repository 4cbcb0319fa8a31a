use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::user::User;

/// Signs an HS256 bearer token for `user`, valid for `ttl_minutes`.
pub fn issue_token(
    user: &User,
    secret: &str,
    ttl_minutes: i64,
    now: DateTime<Utc>,
) -> Result<(String, DateTime<Utc>)> {
    let expires_at = now + Duration::minutes(ttl_minutes.max(1));
    let claims = Claims {
        sub: user.id.to_string(),
        account_id: user.account_id,
        roles: user.effective_roles(),
        exp: expires_at.timestamp() as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{ROLE_ADMIN, ROLE_USER};

    fn admin() -> User {
        let now = Utc::now();
        User {
            id: 42,
            email: "estelle.test@email.com".into(),
            password: String::new(),
            first_name: "Estelle".into(),
            last_name: "Test".into(),
            roles: vec![ROLE_ADMIN.into()],
            account_id: 3,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_token_decodes_to_effective_claims() {
        let (token, expires_at) = issue_token(&admin(), "secret", 30, Utc::now()).unwrap();
        let claims = decode_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.account_id, 3);
        assert_eq!(claims.roles, vec![ROLE_ADMIN.to_string(), ROLE_USER.to_string()]);
        assert_eq!(claims.exp, expires_at.timestamp() as usize);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = issue_token(&admin(), "secret", 30, Utc::now()).unwrap();
        assert!(decode_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let issued = Utc::now() - Duration::hours(3);
        let (token, _) = issue_token(&admin(), "secret", 60, issued).unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
