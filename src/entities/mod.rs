//! Row types, one per table.

mod board;
mod bookmark;
mod event;
mod file;
mod novel;
mod payment;
mod report;
mod user;
mod verification;

pub use board::Board;
pub use bookmark::Bookmark;
pub use event::Event;
pub use file::FileEntity;
pub use novel::{NovelCategory, NovelIndex, NovelIndexReview};
pub use payment::Payment;
pub use report::Report;
pub use user::User;
pub use verification::{AuthEmail, AuthPhone};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::SqlValue;
    use crate::store::Entity;

    fn assert_values_match_columns<E: Entity>(row: &E) {
        assert_eq!(row.values().len(), E::TABLE.columns.len(), "table {}", E::TABLE.name);
        assert_eq!(E::TABLE.columns[0], "id");
        assert_eq!(row.column_value("id"), Some(SqlValue::Uuid(Some(row.id()))));
        assert!(E::TABLE.has_column(E::TABLE.order_by));
        assert_eq!(E::TABLE.soft_delete, E::TABLE.has_column("delete_at"));
    }

    #[test]
    fn every_entity_lists_values_in_column_order() {
        let user = User::new("a@b.c".into(), "nick".into(), "hash".into(), None);
        assert_values_match_columns(&user);
        assert_values_match_columns(&Board::new(user.id, "t".into(), "c".into()));
        let episode = NovelIndex::new(Some(user.id), "ep".into(), "body".into(), 1);
        assert_values_match_columns(&episode);
        assert_values_match_columns(&NovelCategory::new("fantasy".into()));
        assert_values_match_columns(&NovelIndexReview::new(user.id, episode.id, "good".into(), 5));
        assert_values_match_columns(&Bookmark::new(user.id, episode.id, 3));
        let now = chrono::Utc::now();
        assert_values_match_columns(&Event::new(None, "e".into(), "c".into(), true, now, now));
        assert_values_match_columns(&FileEntity::new("a.png".into(), "/a".into(), "http://x/a.png".into()));
        assert_values_match_columns(&Report::new(Some(user.id), episode.id, "spam".into()));
        assert_values_match_columns(&AuthEmail::new(Some(user.id), "a@b.c".into(), "123456".into()));
        assert_values_match_columns(&AuthPhone::new(Some(user.id), "01012345678".into(), "123456".into()));
        assert_values_match_columns(&Payment::new(user.id, "imp_1".into(), 1000, "PAID".into()));
    }

    #[test]
    fn user_hash_is_not_serialized() {
        let user = User::new("a@b.c".into(), "nick".into(), "secret-hash".into(), None);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("pwd").is_none());
        assert_eq!(json["nickName"], "nick");
        assert!(json["deleteAt"].is_null());
    }

    #[test]
    fn event_is_ongoing_only_inside_window() {
        let now = chrono::Utc::now();
        let hour = chrono::Duration::hours(1);
        let ev = Event::new(None, "e".into(), "c".into(), true, now - hour, now + hour);
        assert!(ev.is_ongoing(now));
        assert!(!ev.is_ongoing(now + hour * 2));
        let off = Event::new(None, "e".into(), "c".into(), false, now - hour, now + hour);
        assert!(!off.is_ongoing(now));
    }
}
