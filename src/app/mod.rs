pub mod pillars;
pub mod service;
