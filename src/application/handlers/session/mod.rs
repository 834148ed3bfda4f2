//! Session handlers.

mod authenticate_user;

pub use authenticate_user::{AuthenticateUserCommand, AuthenticateUserHandler, AuthenticationError};
