//! HTTP handlers for HarvestGuard

pub mod auth;
pub mod crop;
pub mod health;
pub mod preferences;
pub mod risk;
pub mod scanner;
pub mod weather;

pub use auth::*;
pub use crop::*;
pub use health::*;
pub use preferences::*;
pub use risk::*;
pub use scanner::*;
pub use weather::*;
