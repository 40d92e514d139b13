pub mod prelude;

pub mod article;
pub mod project;
pub mod step;
pub mod tutorial;
