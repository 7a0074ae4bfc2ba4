//! Command implementations.

pub mod config;
pub mod dashboard;
pub mod rules;
pub mod validate;

pub use self::config::execute_config;
pub use self::dashboard::execute_dashboard;
pub use self::rules::execute_rules;
pub use self::validate::execute_validate;
