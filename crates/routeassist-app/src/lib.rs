//! Application service layer - use cases, config, data gateway, export

pub mod app;
pub mod config;
pub mod export;
pub mod gateway;
pub mod repository;
