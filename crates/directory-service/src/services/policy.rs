//! Authorization policy
//!
//! A single function decides whether a caller may invoke a procedure. It runs
//! before any payload validation or storage access, whatever the transport.

use std::fmt;

use directory_core::entities::User;

use super::error::{ServiceError, ServiceResult};

/// Resolved identity of the party making a call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Caller {
    #[default]
    Anonymous,
    User(User),
}

impl Caller {
    /// The signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("anonymous"),
            Self::User(user) => write!(f, "{} ({})", user.open_id, user.role),
        }
    }
}

/// Access level a procedure requires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Admin,
}

/// Every remotely callable procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    MembersList,
    MembersGetById,
    MembersGetFilterOptions,
    MembersCreate,
    MembersUpdate,
    MembersDelete,
    AuthMe,
}

impl Procedure {
    /// Dotted procedure name, as used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::MembersList => "members.list",
            Self::MembersGetById => "members.getById",
            Self::MembersGetFilterOptions => "members.getFilterOptions",
            Self::MembersCreate => "members.create",
            Self::MembersUpdate => "members.update",
            Self::MembersDelete => "members.delete",
            Self::AuthMe => "auth.me",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::MembersCreate | Self::MembersUpdate | Self::MembersDelete => Access::Admin,
            Self::MembersList
            | Self::MembersGetById
            | Self::MembersGetFilterOptions
            | Self::AuthMe => Access::Public,
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Allow or deny `caller` for `procedure`
pub fn authorize(caller: &Caller, procedure: Procedure) -> ServiceResult<()> {
    match procedure.access() {
        Access::Public => Ok(()),
        Access::Admin if caller.is_admin() => Ok(()),
        Access::Admin => Err(ServiceError::forbidden("Admin access required")),
    }
}
