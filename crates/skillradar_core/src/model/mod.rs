//! Domain model for skills, snapshots and scores.
//!
//! # Responsibility
//! - Define the value types shared by stores, reconciler and projection.
//!
//! # Invariants
//! - Skill and snapshot ids are allocated monotonically and never reused.
//! - Every stored score is within `[0, 5]`.

pub mod score;
pub mod skill;
pub mod snapshot;
