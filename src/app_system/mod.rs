//! System orchestration, startup, and shutdown logic.

pub mod restaurant_system;
pub mod tracing;

pub use restaurant_system::*;
pub use self::tracing::*;
