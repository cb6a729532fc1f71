//! Domain models for HarvestGuard

mod crop;
mod forecast;
mod risk;
mod scanner;
mod user;

pub use crop::*;
pub use forecast::*;
pub use risk::*;
pub use scanner::*;
pub use user::*;
