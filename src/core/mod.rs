//! Domain logic, free of any HTTP concerns.

pub mod greeting;
