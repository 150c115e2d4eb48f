use anyhow::Result;
use bookmark_folders::{FolderStatus, FolderUpdateDto, FoldersCreateDto};

mod common;

use common::{create_one, harness, OTHER, OWNER};

#[tokio::test]
async fn create_rename_tag_and_delete_leaves_audit_trail() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let tag = harness.db().create_tag("reading").await?;

    let work = create_one(service, FolderUpdateDto::root("Work"), OWNER).await?;
    assert_eq!(work.tag_id, None);
    assert!(work.is_root());

    let updated = service
        .update_folder(
            work.folder_id,
            FolderUpdateDto::root("Work2").with_tag(tag.tag_id),
            OWNER,
        )
        .await?;
    assert_eq!(updated.folder_name, "Work2");
    assert_eq!(updated.tag_id, Some(tag.tag_id));

    service.delete_folder(work.folder_id, OWNER).await?;

    let err = service.get_by_folder_id(work.folder_id).await.unwrap_err();
    assert!(err.is_not_found());

    let history = harness.db().list_folder_history(work.folder_id).await?;
    assert_eq!(history.len(), 3);
    let deletion = history.last().unwrap();
    assert_eq!(deletion.status, FolderStatus::Deleted);
    assert_eq!(deletion.folder_name, "Work2");
    assert_eq!(deletion.tag_id, Some(tag.tag_id));
    assert_eq!(history[0].folder_name, "Work");
    assert_eq!(history[0].status, FolderStatus::Active);
    Ok(())
}

#[tokio::test]
async fn batch_create_writes_one_history_row_per_folder() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let parent = create_one(service, FolderUpdateDto::root("Parent"), OWNER).await?;

    let created = service
        .create_folders(
            FoldersCreateDto {
                folders: vec![
                    FolderUpdateDto::child(parent.folder_id, "One"),
                    FolderUpdateDto::child(parent.folder_id, "Two"),
                    FolderUpdateDto::root("Three"),
                ],
            },
            OWNER,
        )
        .await?;

    assert_eq!(created.len(), 3);
    assert_eq!(created[0].parent_folder_id, Some(parent.folder_id));
    assert_eq!(created[2].parent_folder_id, None);
    assert!(created.iter().all(|folder| folder.user_id == OWNER));
    assert_eq!(harness.db().count_folder_history().await?, 4);
    Ok(())
}

#[tokio::test]
async fn unknown_tag_resolves_to_no_tag() -> Result<()> {
    let harness = harness()?;
    let folder = create_one(
        &harness.service,
        FolderUpdateDto::root("Untagged").with_tag(999),
        OWNER,
    )
    .await?;

    assert_eq!(folder.tag_id, None);
    Ok(())
}

#[tokio::test]
async fn blank_name_rejects_whole_batch() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;

    let err = service
        .create_folders(
            FoldersCreateDto {
                folders: vec![FolderUpdateDto::root("Fine"), FolderUpdateDto::root("   ")],
            },
            OWNER,
        )
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert!(harness.db().list_folders_by_user(OWNER).await?.is_empty());
    assert_eq!(harness.db().count_folder_history().await?, 0);
    Ok(())
}

#[tokio::test]
async fn missing_parent_rolls_back_earlier_entries() -> Result<()> {
    let harness = harness()?;

    let err = harness
        .service
        .create_folders(
            FoldersCreateDto {
                folders: vec![FolderUpdateDto::root("Kept?"), FolderUpdateDto::child(404, "Orphan")],
            },
            OWNER,
        )
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(harness.db().list_folders_by_user(OWNER).await?.is_empty());
    assert_eq!(harness.db().count_folder_history().await?, 0);
    Ok(())
}

#[tokio::test]
async fn cannot_create_under_someone_elses_folder() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let theirs = create_one(service, FolderUpdateDto::root("Theirs"), OTHER).await?;

    let err = service
        .create_folders(
            FoldersCreateDto {
                folders: vec![FolderUpdateDto::child(theirs.folder_id, "Intruder")],
            },
            OWNER,
        )
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert!(harness.db().list_folders_by_user(OWNER).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_rejects_blank_name_without_mutation() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let folder = create_one(service, FolderUpdateDto::root("Stable"), OWNER).await?;

    let err = service
        .update_folder(folder.folder_id, FolderUpdateDto::root(""), OWNER)
        .await
        .unwrap_err();

    assert!(err.is_bad_request());
    assert_eq!(service.get_by_folder_id(folder.folder_id).await?, folder);
    assert_eq!(harness.db().list_folder_history(folder.folder_id).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn update_rejects_foreign_target_and_foreign_parent() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let mine = create_one(service, FolderUpdateDto::root("Mine"), OWNER).await?;
    let theirs = create_one(service, FolderUpdateDto::root("Theirs"), OTHER).await?;

    let err = service
        .update_folder(theirs.folder_id, FolderUpdateDto::root("Taken"), OWNER)
        .await
        .unwrap_err();
    assert!(err.is_bad_request());

    let err = service
        .update_folder(
            mine.folder_id,
            FolderUpdateDto::child(theirs.folder_id, "Moved"),
            OWNER,
        )
        .await
        .unwrap_err();
    assert!(err.is_bad_request());

    assert_eq!(service.get_by_folder_id(mine.folder_id).await?, mine);
    assert_eq!(service.get_by_folder_id(theirs.folder_id).await?, theirs);
    Ok(())
}

#[tokio::test]
async fn update_can_move_between_parents_and_back_to_root() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let left = create_one(service, FolderUpdateDto::root("Left"), OWNER).await?;
    let right = create_one(service, FolderUpdateDto::root("Right"), OWNER).await?;
    let child = create_one(service, FolderUpdateDto::child(left.folder_id, "Child"), OWNER).await?;

    let moved = service
        .update_folder(
            child.folder_id,
            FolderUpdateDto::child(right.folder_id, "Child"),
            OWNER,
        )
        .await?;
    assert_eq!(moved.parent_folder_id, Some(right.folder_id));
    assert_eq!(moved.updated_by, Some(OWNER));

    let rooted = service
        .update_folder(child.folder_id, FolderUpdateDto::root("Child"), OWNER)
        .await?;
    assert!(rooted.is_root());
    Ok(())
}

#[tokio::test]
async fn update_refuses_to_create_a_cycle() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let top = create_one(service, FolderUpdateDto::root("Top"), OWNER).await?;
    let mid = create_one(service, FolderUpdateDto::child(top.folder_id, "Mid"), OWNER).await?;
    let low = create_one(service, FolderUpdateDto::child(mid.folder_id, "Low"), OWNER).await?;

    let err = service
        .update_folder(top.folder_id, FolderUpdateDto::child(low.folder_id, "Top"), OWNER)
        .await
        .unwrap_err();
    assert!(err.is_bad_request());

    let err = service
        .update_folder(top.folder_id, FolderUpdateDto::child(top.folder_id, "Top"), OWNER)
        .await
        .unwrap_err();
    assert!(err.is_bad_request());

    assert!(service.get_by_folder_id(top.folder_id).await?.is_root());
    Ok(())
}

#[tokio::test]
async fn update_of_deleted_folder_is_not_found() -> Result<()> {
    let harness = harness()?;
    let service = &harness.service;
    let folder = create_one(service, FolderUpdateDto::root("Gone"), OWNER).await?;
    service.delete_folder(folder.folder_id, OWNER).await?;

    let err = service
        .update_folder(folder.folder_id, FolderUpdateDto::root("Back"), OWNER)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = service.delete_folder(folder.folder_id, OWNER).await.unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}
