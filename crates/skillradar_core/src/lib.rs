//! Core state model for Skill Radar.
//! This crate is the single source of truth for skill/snapshot invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod projection;
pub mod reconcile;
pub mod service;
pub mod store;
pub mod transfer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, CoreConfig, ImportPolicy};
pub use logging::{
    default_log_level, init_logging, init_logging_from_config, logging_status, LoggingError,
};
pub use model::score::{Score, ScoreError};
pub use model::skill::{Skill, SkillId};
pub use model::snapshot::{ScoreMap, Snapshot, SnapshotId};
pub use projection::{chart_rows, project, series_key, ProjectionPoint, ProjectionRow};
pub use service::first_run::{FirstRunDraft, SKILL_SUGGESTIONS};
pub use service::tracker_service::{SnapshotView, TrackerService};
pub use store::skill_registry::SkillRegistry;
pub use store::snapshot_store::SnapshotStore;
pub use store::{StoreError, StoreResult};
pub use transfer::{
    decode_document, encode_document, validate_document, ImportReport, SnapshotRecord,
    TrackerDocument, TransferError, TransferResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
