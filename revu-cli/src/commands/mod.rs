//! CLI command implementations

pub mod context;
pub mod review;
pub mod secrets;

pub use context::ContextArgs;
pub use review::ReviewArgs;
pub use secrets::SecretsArgs;
