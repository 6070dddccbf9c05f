//! User-facing routes under `/api`.

use crate::handlers::{board, bookmark, event, review, user};
use crate::state::AppState;
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user",
            get(user::fetch_login_user)
                .patch(user::update_login_user)
                .delete(user::delete_login_user),
        )
        .route("/user/payments", get(user::fetch_payments_in_user))
        .route("/user/pwd", patch(user::update_user_pwd))
        .route("/signup", post(user::create_user))
        .route(
            "/boards",
            get(board::fetch_boards)
                .post(board::create_board)
                .patch(board::update_board),
        )
        .route("/boards/mine", get(board::fetch_login_user_boards))
        .route("/boards/:id", delete(board::delete_board))
        .route(
            "/bookmarks",
            get(bookmark::fetch_bookmarks).post(bookmark::create_bookmark),
        )
        .route("/bookmarks/:id", delete(bookmark::delete_bookmark))
        .route(
            "/reviews",
            post(review::create_episode_review).patch(review::update_episode_review),
        )
        .route("/reviews/:id", delete(review::delete_episode_review))
        .route("/events", get(event::fetch_events))
}
