//! JWT authentication with Google OAuth2 login.
//!
//! This module provides:
//! - JWT signing and validation (`jwt`)
//! - the single token-to-user resolution policy (`authenticator`)
//! - bearer-token extraction and the `CurrentUser` extractor (`extract`)
//! - the ambient-context middleware (`middleware`)
//! - the Google login exchange and user-info handlers (`handlers`)

mod authenticator;
mod directory;
mod extract;
mod google;
mod handlers;
mod jwt;
mod middleware;
pub mod types;

pub use authenticator::{AuthFailure, TokenAuthenticator};
pub use directory::{PgUserDirectory, UserDirectory};
pub use extract::{bearer_token, CurrentUser};
pub use google::GoogleOAuthClient;
pub use handlers::{login_with_google, user_info};
pub use jwt::{TokenValidation, TokenVerifier};
pub use middleware::attach_principal;
