//! Crash-safe persistence for the pending queue and run state.
//!
//! Both files are read once at pipeline start and written once at pipeline
//! end. Writes replace the whole document via a temp-file rename so a
//! crash mid-write never leaves a truncated file behind. Concurrent runs
//! against the same files are unsafe (last-writer-wins); serializing runs
//! is the caller's concern.

mod queue;
mod state;

pub use queue::{merge_records, PendingQueueStore};
pub use state::StateStore;

use std::path::Path;

/// Writes `contents` to `path` atomically: full write to a sibling temp
/// file, then rename over the target.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}
