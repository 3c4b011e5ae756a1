// Services module for the upgrade steps
pub mod descriptor_cloner;
pub mod upgrader;
pub mod version_bumper;
