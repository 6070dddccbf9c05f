//! Mutation result envelope shared by resolvers.

use crate::message::Message;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `{ isSuccess, contents }` returned by mutations that report success or failure with a
/// catalog message instead of the mutated row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResultMessage {
    pub is_success: bool,
    pub contents: String,
}

impl ResultMessage {
    pub fn new(is_success: bool, success: Message, failure: Message) -> Self {
        let message = if is_success { success } else { failure };
        ResultMessage {
            is_success,
            contents: message.contents().to_string(),
        }
    }

    /// For services that already picked the catalog entry.
    pub fn from_message(is_success: bool, message: Message) -> Self {
        ResultMessage {
            is_success,
            contents: message.contents().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_contents_by_outcome() {
        let ok = ResultMessage::new(true, Message::USER_UPDATE_PWD_SUCCESSED, Message::USER_UPDATE_PWD_FAILED);
        assert!(ok.is_success);
        assert_eq!(ok.contents, Message::USER_UPDATE_PWD_SUCCESSED.contents());

        let failed = ResultMessage::new(false, Message::USER_UPDATE_PWD_SUCCESSED, Message::USER_UPDATE_PWD_FAILED);
        assert!(!failed.is_success);
        assert_eq!(failed.contents, Message::USER_UPDATE_PWD_FAILED.contents());
    }

    #[test]
    fn serializes_camel_case() {
        let v = serde_json::to_value(ResultMessage::from_message(true, Message::BOARD_SOFT_DELETE_SUCCESSED)).unwrap();
        assert_eq!(v["isSuccess"], serde_json::Value::Bool(true));
        assert!(v["contents"].is_string());
    }
}
