//! HTTP request handlers organized by resource type

pub mod auth;
pub mod health;
pub mod pagination;
pub mod users;

pub use auth::{login_handler, me_handler};
pub use health::health_handler;
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
