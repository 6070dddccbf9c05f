//! Request extractors: bearer principal and admin key.

mod admin_key;
mod principal;

pub use admin_key::{require_admin_key, AdminKey, ADMIN_KEY_HEADER};
pub use principal::CurrentUser;
