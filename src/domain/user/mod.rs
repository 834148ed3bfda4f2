//! User domain module.
//!
//! A user is looked up by its unique name at login, proves its identity with
//! a password, and is shown to clients only through its exposed form.

mod entity;

pub use entity::{ExposedUser, User};
