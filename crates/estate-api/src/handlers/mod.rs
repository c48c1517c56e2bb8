//! Request handlers organized by domain

pub mod auth;
pub mod favorites;
pub mod health;
pub mod properties;
