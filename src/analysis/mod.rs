pub mod aggregate;
pub mod components;
pub mod phase;
pub mod types;
