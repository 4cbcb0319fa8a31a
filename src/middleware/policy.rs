//! Authorization rules for user creation and deletion.
//!
//! The decision is a pure function of the authenticated caller and the
//! targeted record, evaluated before any payload validation.

use crate::error::{Error, Result};
use crate::models::user::ROLE_ADMIN;

/// The authenticated principal behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub user_id: i64,
    pub account_id: i64,
    pub roles: Vec<String>,
}

impl Caller {
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r == ROLE_ADMIN)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Create a user under `account_id`. `grants_admin` is set when the
    /// payload assigns the administrator role.
    CreateUser { account_id: i64, grants_admin: bool },
    DeleteUser { user_id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(&'static str),
}

pub fn evaluate(caller: &Caller, action: Action) -> Decision {
    if caller.is_admin() {
        return Decision::Allow;
    }

    match action {
        Action::CreateUser { account_id, .. } if account_id != caller.account_id => Decision::Deny(
            "Sorry, you can only create users belonging to your own Account.",
        ),
        Action::CreateUser {
            grants_admin: true,
            ..
        } => Decision::Deny("Only administrators can grant the administrator role."),
        Action::CreateUser { .. } => Decision::Allow,
        Action::DeleteUser { user_id } if user_id == caller.user_id => Decision::Allow,
        Action::DeleteUser { .. } => Decision::Deny("Sorry, you can only delete your own user."),
    }
}

/// [`evaluate`] as a `Result`, denying with [`Error::Forbidden`].
pub fn authorize(caller: &Caller, action: Action) -> Result<()> {
    match evaluate(caller, action) {
        Decision::Allow => Ok(()),
        Decision::Deny(reason) => {
            tracing::info!(
                caller = caller.user_id,
                account = caller.account_id,
                ?action,
                "access denied"
            );
            Err(Error::Forbidden(reason.to_string()))
        }
    }
}
