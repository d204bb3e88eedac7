//! Domain layer for neocargo: models, repository traits, and the
//! pure services behind quoting and driver/vehicle assignment.

pub mod model;
pub mod repository;
pub mod service;
