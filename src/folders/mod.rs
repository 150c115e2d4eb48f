mod access;
mod engine;
mod service;

pub use access::ensure_owner;
pub use service::{CascadeSummary, CopyOutcome, FolderService};
