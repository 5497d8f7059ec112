pub mod dto;
pub mod services;

pub use dto::{AppliedResult, FailurePhase, FailureReason, ReconciliationFailure};
pub use services::{CoverOutcome, CoverReplacer, MediaSetReconciler, StagedCover};
