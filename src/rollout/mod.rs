pub mod browser;
pub mod components;
pub mod revisions;
pub mod types;

pub use components::Rollout;
