pub mod component;
pub mod project;
