// Models module for data structures
pub mod layout;
pub mod report;
pub mod version;
