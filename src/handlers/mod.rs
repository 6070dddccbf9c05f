//! HTTP handlers: user-facing operations under `/api` and generic admin tables under `/admin`.

pub mod admin;
pub mod board;
pub mod bookmark;
pub mod event;
pub mod review;
pub mod user;

use crate::error::AppError;
use uuid::Uuid;

pub(crate) fn parse_id(id_str: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id_str).map_err(|_| AppError::BadRequest("invalid uuid".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_rejects_garbage() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("42"), Err(AppError::BadRequest(_))));
    }
}
