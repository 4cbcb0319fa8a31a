use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::replace;

/// Role every user carries, assigned or not.
pub const ROLE_USER: &str = "ROLE_USER";
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Stored user. Never serialized directly; responses go through
/// `UserResponse`, which has no password field.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2 PHC string.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// Explicitly assigned roles, as stored.
    pub roles: Vec<String>,
    pub account_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Option<Vec<String>>,
    pub account_id: Option<i64>,
}

impl User {
    pub fn effective_roles(&self) -> Vec<String> {
        effective_roles(&self.roles)
    }

    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }

    /// Applies `changes` and refreshes `updated_at` when a tracked field
    /// actually changed. Returns whether anything changed.
    pub fn apply_changes(&mut self, changes: UserChanges, now: DateTime<Utc>) -> bool {
        let mut changed = false;

        if let Some(email) = changes.email {
            changed |= replace(&mut self.email, email);
        }
        if let Some(password) = changes.password {
            changed |= replace(&mut self.password, password);
        }
        if let Some(first_name) = changes.first_name {
            changed |= replace(&mut self.first_name, first_name);
        }
        if let Some(last_name) = changes.last_name {
            changed |= replace(&mut self.last_name, last_name);
        }
        if let Some(roles) = changes.roles {
            changed |= replace(&mut self.roles, normalize_roles(roles));
        }
        if let Some(account_id) = changes.account_id {
            changed |= replace(&mut self.account_id, account_id);
        }

        if changed {
            self.updated_at = now;
        }
        changed
    }
}

/// Trims, drops empty tags, dedups and sorts assigned roles.
pub fn normalize_roles<I, S>(roles: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    roles
        .into_iter()
        .map(|r| r.as_ref().trim().to_string())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Stored roles plus the base role.
pub fn effective_roles(roles: &[String]) -> Vec<String> {
    let mut roles = normalize_roles(roles);
    if !roles.iter().any(|r| r == ROLE_USER) {
        roles.push(ROLE_USER.to_string());
        roles.sort();
    }
    roles
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user(roles: &[&str]) -> User {
        let created = Utc::now() - Duration::hours(5);
        User {
            id: 7,
            email: "joe.cook@gmail.com".into(),
            password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            first_name: "Joe".into(),
            last_name: "Cook".into(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            account_id: 1,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn base_role_is_always_present() {
        assert_eq!(user(&[]).effective_roles(), vec![ROLE_USER.to_string()]);
        assert_eq!(
            user(&[ROLE_ADMIN]).effective_roles(),
            vec![ROLE_ADMIN.to_string(), ROLE_USER.to_string()]
        );
    }

    #[test]
    fn base_role_is_not_duplicated() {
        let roles = user(&[ROLE_USER, " ROLE_USER ", "ROLE_EDITOR", ""]).effective_roles();
        assert_eq!(roles, vec!["ROLE_EDITOR".to_string(), ROLE_USER.to_string()]);
    }

    #[test]
    fn role_change_refreshes_updated_at() {
        let mut u = user(&[]);
        let created = u.created_at;
        let now = Utc::now();

        assert!(u.apply_changes(
            UserChanges {
                roles: Some(vec![ROLE_ADMIN.to_string()]),
                ..Default::default()
            },
            now,
        ));
        assert!(u.is_admin());
        assert_eq!(u.updated_at, now);
        assert_eq!(u.created_at, created);
    }

    #[test]
    fn unchanged_fields_leave_updated_at_alone() {
        let mut u = user(&["ROLE_EDITOR"]);
        let before = u.updated_at;

        assert!(!u.apply_changes(
            UserChanges {
                email: Some("joe.cook@gmail.com".into()),
                roles: Some(vec!["ROLE_EDITOR".into(), "ROLE_EDITOR".into()]),
                account_id: Some(1),
                ..Default::default()
            },
            Utc::now(),
        ));
        assert_eq!(u.updated_at, before);
    }
}
