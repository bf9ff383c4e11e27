//! Terminal profile card with view and edit modes.
//!
//! [`session::ProfileEditSession`] holds the committed profile and the draft of
//! an open edit, validating fields as they change and on save.

pub mod cli;
pub mod error;
pub mod menu;
pub mod notify;
pub mod picture;
pub mod profile;
pub mod render;
pub mod session;
pub mod storage;
pub mod validation;
