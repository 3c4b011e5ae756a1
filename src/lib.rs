// csvbump - operator manifest release bump
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::layout::ManifestLayout;
pub use models::version::Version;
pub use services::descriptor_cloner::clone_descriptor;
pub use services::upgrader::upgrade;
pub use services::version_bumper::bump_package_version;
pub use utils::error::{Result, UpgradeError};
