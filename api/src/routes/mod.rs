pub mod auth;
pub mod documents;
pub mod health;

pub use auth::AppState;
