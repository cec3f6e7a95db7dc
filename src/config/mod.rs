//! Tool configuration loaded from `.pwvault.toml`.

pub mod settings;

pub use settings::Settings;
