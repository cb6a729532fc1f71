//! Business logic services for HarvestGuard

pub mod auth;
pub mod crop;
pub mod risk;
pub mod scanner;
pub mod session;
pub mod storage;
pub mod weather;

pub use auth::IdentityStore;
pub use crop::CropStore;
pub use scanner::ScannerService;
pub use session::AppSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use weather::WeatherService;
