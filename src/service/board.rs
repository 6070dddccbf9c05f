use super::validation::{RequestValidator, Validate};
use super::UserService;
use crate::auth::Principal;
use crate::entities::{Board, User};
use crate::error::AppError;
use crate::message::Message;
use crate::repository::Repository;
use crate::store::FindOptions;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

const TITLE_MAX: usize = 100;
const CONTENTS_MAX: usize = 10_000;

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct CreateBoardInput {
    pub title: String,
    pub contents: String,
}

impl Validate for CreateBoardInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::text("title", &self.title, TITLE_MAX)?;
        RequestValidator::text("contents", &self.contents, CONTENTS_MAX)
    }
}

#[derive(Clone, Debug, Deserialize, ToSchema)]
pub struct UpdateBoardInput {
    pub id: Uuid,
    pub title: Option<String>,
    pub contents: Option<String>,
}

impl Validate for UpdateBoardInput {
    fn validate(&self) -> Result<(), AppError> {
        RequestValidator::optional_text("title", self.title.as_deref(), TITLE_MAX)?;
        RequestValidator::optional_text("contents", self.contents.as_deref(), CONTENTS_MAX)
    }
}

impl UpdateBoardInput {
    fn apply(self, board: &mut Board) {
        if let Some(title) = self.title {
            board.title = title;
        }
        if let Some(contents) = self.contents {
            board.contents = contents;
        }
    }
}

#[derive(Clone)]
pub struct BoardService {
    boards: Repository<Board>,
    users: Repository<User>,
}

impl BoardService {
    pub fn new(boards: Repository<Board>, users: Repository<User>) -> Self {
        BoardService { boards, users }
    }

    async fn owned(&self, user_id: Uuid, board_id: Uuid) -> Result<Option<Board>, AppError> {
        self.boards
            .find_by(&FindOptions::by_id(board_id).filter("user_id", user_id))
            .await
    }

    pub async fn find_all(&self) -> Result<Vec<Board>, AppError> {
        self.boards.find_all().await
    }

    /// Boards written by the caller.
    pub async fn find_board(&self, principal: &Principal) -> Result<Vec<Board>, AppError> {
        self.boards
            .find_all_by(&FindOptions::new().filter("user_id", principal.id))
            .await
    }

    pub async fn create_board(&self, user_id: Uuid, input: CreateBoardInput) -> Result<Board, AppError> {
        input.validate()?;
        let user = UserService::check_valid_user(self.users.find_one(user_id, false).await?)?;
        self.boards
            .save(Board::new(user.id, input.title, input.contents))
            .await
    }

    pub async fn update_board(&self, user_id: Uuid, input: UpdateBoardInput) -> Result<Board, AppError> {
        input.validate()?;
        UserService::check_valid_user(self.users.find_one(user_id, false).await?)?;
        let mut board = self
            .owned(user_id, input.id)
            .await?
            .ok_or(AppError::Conflict(Message::BOARD_FIND_ONE_FAILED))?;
        input.apply(&mut board);
        self.boards.save(board).await
    }

    /// Only the author's own live board is deleted.
    pub async fn soft_delete(&self, user_id: Uuid, board_id: Uuid) -> Result<Message, AppError> {
        let affected = match self.owned(user_id, board_id).await? {
            Some(board) => self.boards.soft_delete(board.id).await?,
            None => 0,
        };
        Ok(if affected > 0 {
            Message::BOARD_SOFT_DELETE_SUCCESSED
        } else {
            Message::BOARD_SOFT_DELETE_FAILED
        })
    }
}
