//! Client core of the Maternity Care web application: the site header and
//! the community blog views, written against injected API, storage, session
//! and host collaborators.

mod error;

pub mod api;
pub mod blog;
pub mod config;
pub mod filter;
pub mod header;
pub mod host;
pub mod image;
pub mod misc;
pub mod model;
pub mod reminder;
pub mod route;
pub mod session;
pub mod slot;
pub mod storage;
pub mod tag;
pub mod user;
pub mod user_blog;

#[cfg(test)]
mod testing;

pub use error::*;
