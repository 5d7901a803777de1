//! HTML template rendering handlers.

mod admin;
mod index;
mod not_found;

pub use admin::{admin_delete_handler, admin_handler};
pub use index::index_handler;
pub use not_found::{not_found_handler, not_found_page};
