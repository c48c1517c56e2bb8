//! Entity ↔ model mappers

mod favorite;
mod property;
mod session;
mod user;
