#![allow(dead_code)]

use anyhow::Result;
use bookmark_folders::{
    Bookmark, BookmarkCreateDto, BookmarkService, Database, Folder, FolderService,
    FolderUpdateDto, FoldersCreateDto, SqliteBookmarkService,
};
use tempfile::TempDir;

pub const OWNER: i64 = 1;
pub const OTHER: i64 = 2;

/// Service backed by a throwaway database. The service is declared first so
/// the worker thread shuts down before the directory is removed.
pub struct Harness {
    pub service: FolderService,
    _dir: TempDir,
}

impl Harness {
    pub fn db(&self) -> &Database {
        self.service.database()
    }
}

pub fn harness() -> Result<Harness> {
    let dir = TempDir::new()?;
    let db = Database::new(dir.path().join("folders.db"))?;
    Ok(Harness {
        service: FolderService::with_sqlite_collaborators(db),
        _dir: dir,
    })
}

pub async fn create_one(
    service: &FolderService,
    entry: FolderUpdateDto,
    user_id: i64,
) -> Result<Folder> {
    let mut created = service
        .create_folders(
            FoldersCreateDto {
                folders: vec![entry],
            },
            user_id,
        )
        .await?;
    Ok(created.remove(0))
}

pub async fn add_bookmark(
    db: &Database,
    folder_id: i64,
    user_id: i64,
    name: &str,
) -> Result<Bookmark> {
    let input = BookmarkCreateDto {
        folder_id,
        bookmark_name: name.to_string(),
        bookmark_url: format!("https://example.com/{name}"),
    };
    let bookmark = db
        .transaction(move |tx| SqliteBookmarkService.create_bookmark(tx, input, user_id))
        .await?;
    Ok(bookmark)
}

/// A → B → C owned by `user_id`, one bookmark in each.
pub async fn abc_tree(harness: &Harness, user_id: i64) -> Result<(Folder, Folder, Folder)> {
    let service = &harness.service;
    let a = create_one(service, FolderUpdateDto::root("A"), user_id).await?;
    let b = create_one(service, FolderUpdateDto::child(a.folder_id, "B"), user_id).await?;
    let c = create_one(service, FolderUpdateDto::child(b.folder_id, "C"), user_id).await?;

    for folder in [&a, &b, &c] {
        add_bookmark(
            harness.db(),
            folder.folder_id,
            user_id,
            &format!("bm-{}", folder.folder_name),
        )
        .await?;
    }

    Ok((a, b, c))
}
