//! Accounts: signup, profile and password updates, withdrawal.

use super::validation::{RequestValidator, Validate};
use crate::auth::hash_password;
use crate::entities::{Payment, User};
use crate::error::AppError;
use crate::message::Message;
use crate::repository::Repository;
use crate::store::FindOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserInput {
    pub email: String,
    pub pwd: String,
    pub nick_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl Validate for CreateUserInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::email("email", &self.email)?;
        RequestValidator::password("pwd", &self.pwd)?;
        RequestValidator::text("nickName", &self.nick_name, 30)?;
        if let Some(phone) = &self.phone {
            RequestValidator::phone("phone", phone)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserOutput {
    pub id: Uuid,
    pub email: String,
    pub nick_name: String,
    pub create_at: DateTime<Utc>,
}

impl From<User> for CreateUserOutput {
    fn from(u: User) -> Self {
        CreateUserOutput {
            id: u.id,
            email: u.email,
            nick_name: u.nick_name,
            create_at: u.create_at,
        }
    }
}

/// Profile fields a user may change on their own account.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInput {
    pub nick_name: Option<String>,
    pub phone: Option<String>,
}

impl Validate for UpdateUserInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::optional_text("nickName", self.nick_name.as_deref(), 30)?;
        if let Some(phone) = &self.phone {
            RequestValidator::phone("phone", phone)?;
        }
        Ok(())
    }
}

impl UpdateUserInput {
    fn apply(self, user: &mut User) {
        if let Some(nick_name) = self.nick_name {
            user.nick_name = nick_name;
        }
        if let Some(phone) = self.phone {
            user.phone = Some(phone);
        }
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UpdatePwdInput {
    pub pwd: String,
}

#[derive(Clone)]
pub struct UserService {
    users: Repository<User>,
    payments: Repository<Payment>,
}

impl UserService {
    pub fn new(users: Repository<User>, payments: Repository<Payment>) -> Self {
        UserService { users, payments }
    }

    /// Existing, live user or the `USER_UNVALID` conflict.
    pub fn check_valid_user(user: Option<User>) -> Result<User, AppError> {
        user.ok_or(AppError::Conflict(Message::USER_UNVALID))
    }

    pub async fn find_login_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        self.users.find_one(id, false).await
    }

    pub async fn find_payments(&self, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        self.payments
            .find_all_by(&FindOptions::new().filter("user_id", user_id))
            .await
    }

    pub async fn create_user(&self, input: CreateUserInput) -> Result<CreateUserOutput, AppError> {
        input.validate()?;
        let taken = self
            .users
            .find_by(&FindOptions::new().filter("email", input.email.as_str()).with_deleted())
            .await?;
        if taken.is_some() {
            return Err(AppError::Conflict(Message::USER_ALREADY_EXIST));
        }
        let hash = hash_password(&input.pwd)?;
        let user = self
            .users
            .save(User::new(input.email, input.nick_name, hash, input.phone))
            .await
            .map_err(|e| e.on_unique_violation(Message::USER_ALREADY_EXIST))?;
        Ok(user.into())
    }

    pub async fn update_pwd(&self, id: Uuid, pwd: &str) -> Result<bool, AppError> {
        RequestValidator::password("pwd", pwd)?;
        let Some(mut user) = self.users.find_one(id, false).await? else {
            return Ok(false);
        };
        user.pwd = hash_password(pwd)?;
        self.users.save(user).await?;
        Ok(true)
    }

    pub async fn update_login_user(&self, id: Uuid, input: UpdateUserInput) -> Result<bool, AppError> {
        input.validate()?;
        let Some(mut user) = self.users.find_one(id, false).await? else {
            return Ok(false);
        };
        input.apply(&mut user);
        self.users.save(user).await?;
        Ok(true)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.users.soft_delete(id).await? > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::verify_password;

    fn service() -> (UserService, Repository<User>, Repository<Payment>) {
        let users: Repository<User> = Repository::in_memory();
        let payments: Repository<Payment> = Repository::in_memory();
        (UserService::new(users.clone(), payments.clone()), users, payments)
    }

    fn signup(email: &str) -> CreateUserInput {
        CreateUserInput {
            email: email.into(),
            pwd: "password-1".into(),
            nick_name: "reader".into(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn create_user_hashes_password_and_rejects_duplicates() {
        let (svc, users, _) = service();
        let out = svc.create_user(signup("a@novel.io")).await.unwrap();
        assert_eq!(out.email, "a@novel.io");

        let stored = users.find_one(out.id, false).await.unwrap().unwrap();
        assert_ne!(stored.pwd, "password-1");
        assert!(verify_password("password-1", &stored.pwd));

        let err = svc.create_user(signup("a@novel.io")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(Message::USER_ALREADY_EXIST)));
    }

    #[tokio::test]
    async fn create_user_validates_input() {
        let (svc, users, _) = service();
        let err = svc.create_user(signup("not-an-email")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(users.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_pwd_and_profile() {
        let (svc, users, _) = service();
        let out = svc.create_user(signup("a@novel.io")).await.unwrap();

        assert!(svc.update_pwd(out.id, "new-password").await.unwrap());
        let stored = users.find_one(out.id, false).await.unwrap().unwrap();
        assert!(verify_password("new-password", &stored.pwd));

        let input = UpdateUserInput {
            nick_name: Some("writer".into()),
            phone: None,
        };
        assert!(svc.update_login_user(out.id, input).await.unwrap());
        let stored = users.find_one(out.id, false).await.unwrap().unwrap();
        assert_eq!(stored.nick_name, "writer");

        assert!(!svc.update_pwd(Uuid::new_v4(), "new-password").await.unwrap());
        assert!(!svc.update_login_user(Uuid::new_v4(), UpdateUserInput::default()).await.unwrap());
    }

    #[tokio::test]
    async fn soft_deleted_user_is_no_longer_found() {
        let (svc, _, _) = service();
        let out = svc.create_user(signup("a@novel.io")).await.unwrap();
        assert!(svc.soft_delete(out.id).await.unwrap());
        assert!(!svc.soft_delete(out.id).await.unwrap());
        assert!(svc.find_login_user(out.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn payments_are_scoped_to_user() {
        let (svc, _, payments) = service();
        let me = Uuid::new_v4();
        payments.save(Payment::new(me, "imp_1".into(), 1000, "PAID".into())).await.unwrap();
        payments.save(Payment::new(Uuid::new_v4(), "imp_2".into(), 500, "PAID".into())).await.unwrap();
        let mine = svc.find_payments(me).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].imp_uid, "imp_1");
    }

    #[test]
    fn check_valid_user_maps_absence_to_conflict() {
        assert!(matches!(
            UserService::check_valid_user(None),
            Err(AppError::Conflict(Message::USER_UNVALID))
        ));
    }
}
