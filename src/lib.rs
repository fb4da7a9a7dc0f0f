//! Client-side auth session: a durable bearer token resolved into the
//! current user through an HTTP+JSON backend.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod navigation;
pub mod storage;
pub mod types;

pub use api::{AuthBackend, HttpBackend};
pub use config::AuthConfig;
pub use controller::{AuthController, SessionState};
pub use error::AuthError;
pub use navigation::{History, Navigator, Route};
pub use storage::{FileStorage, MemoryStorage, Storage, TOKEN_KEY};
pub use types::{Credentials, User};
