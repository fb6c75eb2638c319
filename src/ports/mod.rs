//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the core and infrastructure.
//! The traits are owned by the core and implemented by adapters.

pub mod repository;

pub use repository::CacheRepository;
