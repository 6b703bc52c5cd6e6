//! An asynchronous client for the Threads API: OAuth authorization, publishing, and reading
//! threads, replies, profiles and insights.

pub mod auth;
pub mod client;
pub mod config;
mod id;
pub mod insights;
pub mod limit;
pub mod media;
pub mod publish;
pub mod reply;
pub mod request;
pub mod request_data;
pub mod request_options;
pub mod response;
mod time;
pub mod user;

pub use auth::{AccessToken, Unauthenticated};
pub use client::{ApiError, AsyncClient, Error, ErrorKind};
pub use config::ClientConfig;
