pub mod app_state;
pub mod extract;
pub mod rest;
