use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use anyhow::Result;
use bookmark_folders::{
    db::{models::NewFolder, repositories::folders},
    Bookmark, BookmarkCreateDto, BookmarkService, CascadeSummary, Folder, FolderService,
    FolderStatus, FolderUpdateDto, ServiceError, ServiceResult, SqliteBookmarkService,
    SqliteTagService,
};
use rusqlite::Connection;

mod common;

use common::{abc_tree, add_bookmark, create_one, harness, OTHER, OWNER};

#[tokio::test]
async fn deleting_a_chain_removes_every_folder_and_bookmark() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let (a, b, c) = abc_tree(&harness, OWNER).await?;
    assert_eq!(harness.db().count_active_bookmarks(OWNER).await?, 3);

    let summary = service.delete_folder(a.folder_id, OWNER).await?;

    assert_eq!(
        summary,
        CascadeSummary {
            folders: 3,
            bookmarks: 3
        }
    );
    assert_eq!(harness.db().count_active_bookmarks(OWNER).await?, 0);
    for folder in [&a, &b, &c] {
        assert!(service.get_by_folder_id(folder.folder_id).await.unwrap_err().is_not_found());
        let history = harness.db().list_folder_history(folder.folder_id).await?;
        assert_eq!(history.last().map(|h| h.status), Some(FolderStatus::Deleted));
    }

    let stored = harness.db().list_folders_by_user(OWNER).await?;
    assert!(stored.iter().all(|folder| folder.status == FolderStatus::Deleted));
    assert!(stored.iter().all(|folder| folder.updated_by == Some(OWNER)));
    Ok(())
}

#[tokio::test]
async fn deleting_a_branch_leaves_siblings_alone() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let root = create_one(service, FolderUpdateDto::root("Root"), OWNER).await?;
    let doomed = create_one(service, FolderUpdateDto::child(root.folder_id, "Doomed"), OWNER).await?;
    let kept = create_one(service, FolderUpdateDto::child(root.folder_id, "Kept"), OWNER).await?;
    add_bookmark(harness.db(), doomed.folder_id, OWNER, "doomed").await?;
    add_bookmark(harness.db(), kept.folder_id, OWNER, "kept").await?;

    service.delete_folder(doomed.folder_id, OWNER).await?;

    assert!(service.get_by_folder_id(root.folder_id).await.is_ok());
    assert!(service.get_by_folder_id(kept.folder_id).await.is_ok());
    assert_eq!(harness.db().list_active_bookmarks(kept.folder_id).await?.len(), 1);
    assert!(harness.db().list_active_bookmarks(doomed.folder_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn only_the_owner_can_delete() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let (a, _, _) = abc_tree(&harness, OWNER).await?;

    let err = service.delete_folder(a.folder_id, OTHER).await.unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(harness.db().count_active_bookmarks(OWNER).await?, 3);
    assert!(service.get_by_folder_id(a.folder_id).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn deep_chain_is_deleted_without_recursion() -> Result<()> {
    const DEPTH: usize = 3_000;

    let harness = harness()?;
    let root_id = harness
        .db()
        .transaction(|tx| {
            let now = chrono::Utc::now();
            let mut parent: Option<Folder> = None;
            let mut root_id = None;
            for depth in 0..DEPTH {
                let folder = folders::insert(
                    tx,
                    NewFolder::new(parent.as_ref(), OWNER, None, format!("level-{depth}"), now),
                )?;
                root_id.get_or_insert(folder.folder_id);
                parent = Some(folder);
            }
            root_id.ok_or_else(|| ServiceError::bad_request("empty chain"))
        })
        .await?;

    let summary = harness.service.delete_folder(root_id, OWNER).await?;

    assert_eq!(summary.folders, DEPTH);
    let stored = harness.db().list_folders_by_user(OWNER).await?;
    assert!(stored.iter().all(|folder| folder.status == FolderStatus::Deleted));
    assert_eq!(harness.db().count_folder_history().await? as usize, DEPTH);
    Ok(())
}

/// Bookmark collaborator that fails after a fixed number of deletions.
struct FlakyBookmarks {
    inner: SqliteBookmarkService,
    deletions_left: AtomicUsize,
}

impl BookmarkService for FlakyBookmarks {
    fn find_all_by_folder(&self, conn: &Connection, folder: &Folder) -> ServiceResult<Vec<Bookmark>> {
        self.inner.find_all_by_folder(conn, folder)
    }

    fn create_bookmark(
        &self,
        conn: &Connection,
        input: BookmarkCreateDto,
        user_id: i64,
    ) -> ServiceResult<Bookmark> {
        self.inner.create_bookmark(conn, input, user_id)
    }

    fn delete_bookmark(&self, conn: &Connection, bookmark_id: i64, user_id: i64) -> ServiceResult<()> {
        let left = self.deletions_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(ServiceError::Internal(anyhow::anyhow!("bookmark store unavailable")));
        }
        self.deletions_left.store(left - 1, Ordering::SeqCst);
        self.inner.delete_bookmark(conn, bookmark_id, user_id)
    }
}

#[tokio::test]
async fn collaborator_failure_rolls_back_the_whole_cascade() -> Result<()> {
    let harness = harness()?;
    let (a, b, c) = abc_tree(&harness, OWNER).await?;
    let history_before = harness.db().count_folder_history().await?;

    let flaky = FolderService::new(
        harness.db().clone(),
        Arc::new(SqliteTagService),
        Arc::new(FlakyBookmarks {
            inner: SqliteBookmarkService,
            deletions_left: AtomicUsize::new(2),
        }),
    );

    let err = flaky.delete_folder(a.folder_id, OWNER).await.unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));

    for folder in [&a, &b, &c] {
        assert!(harness.service.get_by_folder_id(folder.folder_id).await.is_ok());
    }
    assert_eq!(harness.db().count_active_bookmarks(OWNER).await?, 3);
    assert_eq!(harness.db().count_folder_history().await?, history_before);
    Ok(())
}
