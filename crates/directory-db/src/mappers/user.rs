//! User model -> entity mapper

use directory_core::entities::{Role, User};
use tracing::warn;

use crate::models::UserModel;

/// Convert UserModel to User entity
///
/// Unknown role strings fall back to the least privileged role.
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        let role = model.role.parse::<Role>().unwrap_or_else(|_| {
            warn!(open_id = %model.open_id, role = %model.role, "Unknown role in users table");
            Role::User
        });

        User {
            id: model.id,
            open_id: model.open_id,
            name: model.name,
            email: model.email,
            login_method: model.login_method,
            role,
            created_at: model.created_at,
            updated_at: model.updated_at,
            last_signed_in: model.last_signed_in,
        }
    }
}
