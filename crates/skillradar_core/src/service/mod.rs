//! Core use-case services.
//!
//! # Responsibility
//! - Compose registry, store and cascade rules into session-level APIs.
//! - Keep presentation layers decoupled from collection internals.

pub mod first_run;
pub mod tracker_service;
