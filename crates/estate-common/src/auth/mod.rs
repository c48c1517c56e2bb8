//! Credential and token utilities

mod email;
mod password;
mod token;

pub use email::is_valid_email_format;
pub use password::{hash_password, validate_password_strength, verify_password};
pub use token::generate_session_token;
