use std::sync::Arc;

use serde::Serialize;

use super::engine::Engine;
use crate::{
    collaborators::{BookmarkService, SqliteBookmarkService, SqliteTagService, TagService},
    db::{
        models::{Folder, FolderDto, FolderHierarchyDto, FolderUpdateDto, FoldersCreateDto},
        Database,
    },
    error::ServiceResult,
    log_info,
};

const ENABLE_LOGS: bool = true;

/// Counts of what a cascade touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeSummary {
    pub folders: usize,
    pub bookmarks: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyOutcome {
    /// The newly created root of the copy.
    pub root: Folder,
    pub folders: usize,
    pub bookmarks: usize,
}

/// Entry point for folder tree operations. Every call runs in one SQLite
/// transaction on the database worker: either all folder, history and
/// bookmark writes of the call commit, or none do.
#[derive(Clone)]
pub struct FolderService {
    db: Database,
    tags: Arc<dyn TagService>,
    bookmarks: Arc<dyn BookmarkService>,
}

impl FolderService {
    pub fn new(
        db: Database,
        tags: Arc<dyn TagService>,
        bookmarks: Arc<dyn BookmarkService>,
    ) -> Self {
        Self {
            db,
            tags,
            bookmarks,
        }
    }

    /// Service wired to the tag and bookmark tables of the same database.
    pub fn with_sqlite_collaborators(db: Database) -> Self {
        Self::new(
            db,
            Arc::new(SqliteTagService),
            Arc::new(SqliteBookmarkService),
        )
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    async fn run<F, T>(&self, task: F) -> ServiceResult<T>
    where
        F: FnOnce(&Engine<'_>) -> ServiceResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let tags = Arc::clone(&self.tags);
        let bookmarks = Arc::clone(&self.bookmarks);
        self.db
            .transaction(move |tx| {
                let engine = Engine::new(tx, tags.as_ref(), bookmarks.as_ref());
                task(&engine)
            })
            .await
    }

    /// Active folder by id; `NotFound` when missing or deleted.
    pub async fn get_by_folder_id(&self, folder_id: i64) -> ServiceResult<Folder> {
        self.run(move |engine| engine.get_by_folder_id(folder_id))
            .await
    }

    /// Creates every folder of the batch or none of them.
    pub async fn create_folders(
        &self,
        input: FoldersCreateDto,
        user_id: i64,
    ) -> ServiceResult<Vec<Folder>> {
        let created = self
            .run(move |engine| engine.create_folders(input, user_id))
            .await?;
        log_info!("Created {} folder(s) for user {}", created.len(), user_id);
        Ok(created)
    }

    pub async fn update_folder(
        &self,
        folder_id: i64,
        input: FolderUpdateDto,
        user_id: i64,
    ) -> ServiceResult<Folder> {
        let folder = self
            .run(move |engine| engine.update_folder(folder_id, input, user_id))
            .await?;
        log_info!("Updated folder {} for user {}", folder.folder_id, user_id);
        Ok(folder)
    }

    /// Soft deletes the folder, every active descendant, and all of their
    /// bookmarks.
    pub async fn delete_folder(&self, folder_id: i64, user_id: i64) -> ServiceResult<CascadeSummary> {
        let summary = self
            .run(move |engine| engine.delete_folder(folder_id, user_id))
            .await?;
        log_info!(
            "Deleted folder {} with {} folder(s) and {} bookmark(s)",
            folder_id,
            summary.folders,
            summary.bookmarks
        );
        Ok(summary)
    }

    /// Duplicates the active subtree rooted at `parent_folder_id` as a new
    /// root owned by `user_id`.
    pub async fn copy_parent_folder(
        &self,
        parent_folder_id: i64,
        user_id: i64,
    ) -> ServiceResult<CopyOutcome> {
        let outcome = self
            .run(move |engine| engine.copy_parent_folder(parent_folder_id, user_id))
            .await?;
        log_info!(
            "Copied folder {} into {} for user {} ({} folder(s), {} bookmark(s))",
            parent_folder_id,
            outcome.root.folder_id,
            user_id,
            outcome.folders,
            outcome.bookmarks
        );
        Ok(outcome)
    }

    pub async fn get_folder_hierarchy_by_parent_folder_id(
        &self,
        parent_folder_id: i64,
    ) -> ServiceResult<FolderHierarchyDto> {
        self.run(move |engine| engine.hierarchy_by_parent_folder_id(parent_folder_id))
            .await
    }

    pub async fn get_folder_hierarchy_by_user_id(
        &self,
        user_id: i64,
    ) -> ServiceResult<FolderHierarchyDto> {
        self.run(move |engine| engine.hierarchy_by_user_id(user_id))
            .await
    }

    /// The user's root folders without children or bookmarks.
    pub async fn get_root_folders_by_user_id(&self, user_id: i64) -> ServiceResult<Vec<FolderDto>> {
        self.run(move |engine| engine.root_folders_by_user_id(user_id))
            .await
    }
}
