//! Hierarchical bookmark folders: per-user folder trees with soft delete,
//! an append-only audit trail, cascading delete, deep copy, and nested
//! hierarchy reads, stored in SQLite.

pub mod collaborators;
pub mod config;
pub mod db;
pub mod error;
pub mod folders;
mod utils;

pub use collaborators::{BookmarkService, SqliteBookmarkService, SqliteTagService, TagService};
pub use config::Config;
pub use db::{
    models::{
        Bookmark, BookmarkCreateDto, BookmarkDto, Folder, FolderDto, FolderHierarchyDto,
        FolderHistory, FolderStatus, FolderUpdateDto, FoldersCreateDto, Tag, TagDto,
    },
    Database,
};
pub use error::{ServiceError, ServiceResult};
pub use folders::{CascadeSummary, CopyOutcome, FolderService};
pub use utils::logging::init_logging;
