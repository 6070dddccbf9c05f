//! Message catalog: fixed human-readable contents for mutation results and conflict errors.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum Message {
    USER_UNVALID,
    USER_ALREADY_EXIST,
    USER_UPDATE_PWD_SUCCESSED,
    USER_UPDATE_PWD_FAILED,
    USER_UPDATE_INFO_SUCCESSED,
    USER_UPDATE_INFO_FAILED,
    USER_SOFT_DELETE_SUCCESSED,
    USER_SOFT_DELETE_FAILED,
    BOARD_FIND_ONE_FAILED,
    BOARD_SOFT_DELETE_SUCCESSED,
    BOARD_SOFT_DELETE_FAILED,
    NOVEL_INDEX_UNVALID,
    NOVEL_INDEX_REVIEW_SOFT_DELETE_SUCCESSED,
    NOVEL_INDEX_REVIEW_SOFT_DELETE_FAILED,
    BOOKMARK_ALREADY_EXIST,
    BOOKMARK_UNVALID,
    BOOKMARK_SOFT_DELETE_SUCCESSED,
    BOOKMARK_SOFT_DELETE_FAILED,
    NOVEL_CATEGORY_ALREADY_EXIST,
    NOVEL_CATEGORY_UNVALID,
    EVENT_UNVALID,
}

impl Message {
    /// Catalog key, e.g. `NOVEL_INDEX_UNVALID`. Stable across releases; clients match on it.
    pub fn code(self) -> &'static str {
        match self {
            Message::USER_UNVALID => "USER_UNVALID",
            Message::USER_ALREADY_EXIST => "USER_ALREADY_EXIST",
            Message::USER_UPDATE_PWD_SUCCESSED => "USER_UPDATE_PWD_SUCCESSED",
            Message::USER_UPDATE_PWD_FAILED => "USER_UPDATE_PWD_FAILED",
            Message::USER_UPDATE_INFO_SUCCESSED => "USER_UPDATE_INFO_SUCCESSED",
            Message::USER_UPDATE_INFO_FAILED => "USER_UPDATE_INFO_FAILED",
            Message::USER_SOFT_DELETE_SUCCESSED => "USER_SOFT_DELETE_SUCCESSED",
            Message::USER_SOFT_DELETE_FAILED => "USER_SOFT_DELETE_FAILED",
            Message::BOARD_FIND_ONE_FAILED => "BOARD_FIND_ONE_FAILED",
            Message::BOARD_SOFT_DELETE_SUCCESSED => "BOARD_SOFT_DELETE_SUCCESSED",
            Message::BOARD_SOFT_DELETE_FAILED => "BOARD_SOFT_DELETE_FAILED",
            Message::NOVEL_INDEX_UNVALID => "NOVEL_INDEX_UNVALID",
            Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_SUCCESSED => "NOVEL_INDEX_REVIEW_SOFT_DELETE_SUCCESSED",
            Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_FAILED => "NOVEL_INDEX_REVIEW_SOFT_DELETE_FAILED",
            Message::BOOKMARK_ALREADY_EXIST => "BOOKMARK_ALREADY_EXIST",
            Message::BOOKMARK_UNVALID => "BOOKMARK_UNVALID",
            Message::BOOKMARK_SOFT_DELETE_SUCCESSED => "BOOKMARK_SOFT_DELETE_SUCCESSED",
            Message::BOOKMARK_SOFT_DELETE_FAILED => "BOOKMARK_SOFT_DELETE_FAILED",
            Message::NOVEL_CATEGORY_ALREADY_EXIST => "NOVEL_CATEGORY_ALREADY_EXIST",
            Message::NOVEL_CATEGORY_UNVALID => "NOVEL_CATEGORY_UNVALID",
            Message::EVENT_UNVALID => "EVENT_UNVALID",
        }
    }

    pub fn contents(self) -> &'static str {
        match self {
            Message::USER_UNVALID => "user does not exist",
            Message::USER_ALREADY_EXIST => "a user with this email already exists",
            Message::USER_UPDATE_PWD_SUCCESSED => "password updated",
            Message::USER_UPDATE_PWD_FAILED => "failed to update password",
            Message::USER_UPDATE_INFO_SUCCESSED => "user info updated",
            Message::USER_UPDATE_INFO_FAILED => "failed to update user info",
            Message::USER_SOFT_DELETE_SUCCESSED => "user deleted",
            Message::USER_SOFT_DELETE_FAILED => "failed to delete user",
            Message::BOARD_FIND_ONE_FAILED => "board does not exist",
            Message::BOARD_SOFT_DELETE_SUCCESSED => "board deleted",
            Message::BOARD_SOFT_DELETE_FAILED => "failed to delete board",
            Message::NOVEL_INDEX_UNVALID => "episode does not exist",
            Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_SUCCESSED => "review deleted",
            Message::NOVEL_INDEX_REVIEW_SOFT_DELETE_FAILED => "failed to delete review",
            Message::BOOKMARK_ALREADY_EXIST => "bookmark already exists",
            Message::BOOKMARK_UNVALID => "bookmark does not exist",
            Message::BOOKMARK_SOFT_DELETE_SUCCESSED => "bookmark deleted",
            Message::BOOKMARK_SOFT_DELETE_FAILED => "failed to delete bookmark",
            Message::NOVEL_CATEGORY_ALREADY_EXIST => "novel category already exists",
            Message::NOVEL_CATEGORY_UNVALID => "novel category does not exist",
            Message::EVENT_UNVALID => "event does not exist",
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.contents())
    }
}
