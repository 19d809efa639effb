pub mod canvas;
pub mod components;
pub mod spec;
