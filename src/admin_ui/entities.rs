//! Admin panel tables: row shapes as the admin endpoints return them, and their descriptors.

use super::descriptor::{ColumnSet, EntityDescriptor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The `user` relation attached to admin rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Uuid,
    pub email: String,
    pub nick_name: String,
}

/// The `novelIndex` relation attached to admin rows.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelIndexRef {
    pub id: Uuid,
    pub title: String,
    pub episode: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub email: String,
    pub token: String,
    pub is_auth: bool,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub phone: String,
    pub token: String,
    pub is_auth: bool,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserColumn {
    pub id: Uuid,
    pub email: String,
    pub nick_name: String,
    pub phone: Option<String>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub title: String,
    pub contents: String,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub novel_index: Option<NovelIndexRef>,
    pub page: i32,
    pub is_boolean: bool,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub title: String,
    pub contents: String,
    pub is_event: bool,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileColumn {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub url: String,
    pub create_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportColumn {
    pub id: Uuid,
    pub user: Option<UserRef>,
    pub target_id: Uuid,
    pub contents: String,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelCategoryColumn {
    pub id: Uuid,
    pub name: String,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
    pub delete_at: Option<DateTime<Utc>>,
}

fn dummy_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

fn dummy_user() -> Option<UserRef> {
    Some(UserRef {
        id: Uuid::nil(),
        email: "dummy@email.com".into(),
        nick_name: "dummy".into(),
    })
}

pub fn email_entity() -> EntityDescriptor<EmailColumn> {
    let columns = ColumnSet::new(&["id", "user", "email", "token", "isAuth", "createAt", "updateAt"])
        .option("user", "email");
    EntityDescriptor {
        name: "Email verification",
        dummy_data: vec![EmailColumn {
            id: Uuid::nil(),
            user: dummy_user(),
            email: "dummy@email.com".into(),
            token: "000000".into(),
            is_auth: false,
            create_at: dummy_time(),
            update_at: dummy_time(),
        }],
        base_url: "/admin/entity/authEmail",
        be_url: "/admin/email",
        list: columns.clone(),
        show: columns,
    }
}

pub fn phone_entity() -> EntityDescriptor<PhoneColumn> {
    let columns = ColumnSet::new(&["id", "user", "phone", "token", "isAuth", "createAt", "updateAt"])
        .option("user", "email");
    EntityDescriptor {
        name: "Phone verification",
        dummy_data: vec![PhoneColumn {
            id: Uuid::nil(),
            user: dummy_user(),
            phone: "010-0000-0000".into(),
            token: "000000".into(),
            is_auth: false,
            create_at: dummy_time(),
            update_at: dummy_time(),
        }],
        base_url: "/admin/entity/authPhone",
        be_url: "/admin/phone",
        list: columns.clone(),
        show: columns,
    }
}

pub fn user_entity() -> EntityDescriptor<UserColumn> {
    EntityDescriptor {
        name: "Users",
        dummy_data: vec![UserColumn {
            id: Uuid::nil(),
            email: "dummy@email.com".into(),
            nick_name: "dummy".into(),
            phone: None,
            create_at: dummy_time(),
            update_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/user",
        be_url: "/admin/user",
        list: ColumnSet::new(&["id", "email", "nickName", "createAt", "deleteAt"]),
        show: ColumnSet::new(&["id", "email", "nickName", "phone", "createAt", "updateAt", "deleteAt"]),
    }
}

pub fn board_entity() -> EntityDescriptor<BoardColumn> {
    EntityDescriptor {
        name: "Boards",
        dummy_data: vec![BoardColumn {
            id: Uuid::nil(),
            user: dummy_user(),
            title: "dummy title".into(),
            contents: "dummy contents".into(),
            create_at: dummy_time(),
            update_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/board",
        be_url: "/admin/board",
        list: ColumnSet::new(&["id", "user", "title", "createAt", "deleteAt"]).option("user", "nickName"),
        show: ColumnSet::new(&["id", "user", "title", "contents", "createAt", "updateAt", "deleteAt"])
            .option("user", "email"),
    }
}

pub fn bookmark_entity() -> EntityDescriptor<BookmarkColumn> {
    let columns = ColumnSet::new(&["id", "user", "novelIndex", "page", "isBoolean", "createAt", "deleteAt"])
        .option("user", "email")
        .option("novelIndex", "title");
    EntityDescriptor {
        name: "Bookmarks",
        dummy_data: vec![BookmarkColumn {
            id: Uuid::nil(),
            user: dummy_user(),
            novel_index: Some(NovelIndexRef {
                id: Uuid::nil(),
                title: "dummy episode".into(),
                episode: 1,
            }),
            page: 1,
            is_boolean: true,
            create_at: dummy_time(),
            update_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/bookmark",
        be_url: "/admin/bookmark",
        list: columns.clone(),
        show: columns,
    }
}

pub fn event_entity() -> EntityDescriptor<EventColumn> {
    EntityDescriptor {
        name: "Events",
        dummy_data: vec![EventColumn {
            id: Uuid::nil(),
            user: None,
            title: "dummy event".into(),
            contents: "dummy contents".into(),
            is_event: true,
            start_at: dummy_time(),
            end_at: dummy_time(),
            create_at: dummy_time(),
            update_at: dummy_time(),
        }],
        base_url: "/admin/entity/event",
        be_url: "/admin/event",
        list: ColumnSet::new(&["id", "title", "isEvent", "startAt", "endAt"]),
        show: ColumnSet::new(&[
            "id", "user", "title", "contents", "isEvent", "startAt", "endAt", "createAt", "updateAt",
        ])
        .option("user", "email"),
    }
}

pub fn file_entity() -> EntityDescriptor<FileColumn> {
    let columns = ColumnSet::new(&["id", "name", "path", "url", "createAt", "deleteAt"]);
    EntityDescriptor {
        name: "Files",
        dummy_data: vec![FileColumn {
            id: Uuid::nil(),
            name: "dummy.png".into(),
            path: "uploads/dummy.png".into(),
            url: "https://cdn.example.com/uploads/dummy.png".into(),
            create_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/file",
        be_url: "/admin/file",
        list: columns.clone(),
        show: columns,
    }
}

pub fn report_entity() -> EntityDescriptor<ReportColumn> {
    EntityDescriptor {
        name: "Reports",
        dummy_data: vec![ReportColumn {
            id: Uuid::nil(),
            user: dummy_user(),
            target_id: Uuid::nil(),
            contents: "dummy report".into(),
            create_at: dummy_time(),
            update_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/report",
        be_url: "/admin/report",
        list: ColumnSet::new(&["id", "user", "targetId", "createAt", "deleteAt"]).option("user", "email"),
        show: ColumnSet::new(&["id", "user", "targetId", "contents", "createAt", "updateAt", "deleteAt"])
            .option("user", "email"),
    }
}

pub fn novel_category_entity() -> EntityDescriptor<NovelCategoryColumn> {
    let columns = ColumnSet::new(&["id", "name", "createAt", "updateAt", "deleteAt"]);
    EntityDescriptor {
        name: "Novel categories",
        dummy_data: vec![NovelCategoryColumn {
            id: Uuid::nil(),
            name: "dummy".into(),
            create_at: dummy_time(),
            update_at: dummy_time(),
            delete_at: None,
        }],
        base_url: "/admin/entity/novelCategory",
        be_url: "/admin/novel-category",
        list: columns.clone(),
        show: columns,
    }
}

/// Navigation entries: display name and admin-UI route.
pub fn descriptors() -> Vec<(&'static str, &'static str)> {
    macro_rules! nav {
        ($($f:ident),* $(,)?) => {
            vec![$({ let d = $f(); (d.name, d.base_url) }),*]
        };
    }
    nav![
        email_entity,
        phone_entity,
        user_entity,
        board_entity,
        bookmark_entity,
        event_entity,
        file_entity,
        report_entity,
        novel_category_entity,
    ]
}
