pub mod cover_replacer;
pub mod media_set_reconciler;

pub use cover_replacer::{CoverOutcome, CoverReplacer, StagedCover};
pub use media_set_reconciler::MediaSetReconciler;
