//! Resource services: existence and ownership checks, then one repository write.

mod board;
mod bookmark;
mod event;
mod novel_category;
mod review;
mod user;
mod validation;

pub use board::{BoardService, CreateBoardInput, UpdateBoardInput};
pub use bookmark::{BookmarkService, CreateBookmarkInput};
pub use event::{CreateEventInput, EventService, UpdateEventInput};
pub use novel_category::{NovelCategoryInput, NovelCategoryService};
pub use review::{CreateReviewInput, NovelIndexReviewService, UpdateReviewInput};
pub use user::{CreateUserInput, CreateUserOutput, UpdatePwdInput, UpdateUserInput, UserService};
pub use validation::{RequestValidator, Validate};
