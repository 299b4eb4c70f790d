//! A service for greeting the world.

/// The greeting every caller receives.
pub const GREETING: &str = "Hello World!";

/// Returns the greeting.
pub fn hello_world() -> String {
    GREETING.to_string()
}
