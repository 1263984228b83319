//! Types shared between the backend and its API clients.

pub mod api;
pub mod models;

pub use api::{GoogleLoginRequest, TokenResponse, UserInfoResponse};
pub use models::User;
