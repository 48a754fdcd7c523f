//! RouteAssist domain layer
//!
//! Pure models and services. Nothing in this crate touches the network,
//! the filesystem or a clock on its own; adapters are plugged in through
//! the traits in [`repository`].

pub mod model;
pub mod repository;
pub mod service;
