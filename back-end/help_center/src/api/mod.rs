pub mod dto;
pub mod openapi;
pub mod servers;
