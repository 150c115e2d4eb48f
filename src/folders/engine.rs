//! Folder tree operations that run inside one open transaction.
//!
//! Tree walks (cascade delete, copy, hierarchy build) all use an explicit
//! heap-allocated work-list so deep trees cannot overflow the thread stack.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use super::{
    access::ensure_owner,
    service::{CascadeSummary, CopyOutcome},
};
use crate::{
    collaborators::{BookmarkService, TagService},
    db::{
        helpers::is_blank,
        models::{
            BookmarkCreateDto, BookmarkDto, Folder, FolderDto, FolderHierarchyDto,
            FolderUpdateDto, FoldersCreateDto, NewFolder, NewFolderHistory,
        },
        repositories::{folder_history, folders},
    },
    error::{ServiceError, ServiceResult},
};

/// A hierarchy node still being filled, plus the children not yet visited.
/// `pending` is kept reversed so `pop` yields children in ascending id order.
struct Frame {
    node: FolderDto,
    pending: Vec<Folder>,
}

pub(super) struct Engine<'a> {
    conn: &'a Connection,
    tags: &'a dyn TagService,
    bookmarks: &'a dyn BookmarkService,
    now: DateTime<Utc>,
}

impl<'a> Engine<'a> {
    pub(super) fn new(
        conn: &'a Connection,
        tags: &'a dyn TagService,
        bookmarks: &'a dyn BookmarkService,
    ) -> Self {
        Self {
            conn,
            tags,
            bookmarks,
            now: Utc::now(),
        }
    }

    pub(super) fn get_by_folder_id(&self, folder_id: i64) -> ServiceResult<Folder> {
        folders::find_active_by_id(self.conn, folder_id)?
            .ok_or_else(|| ServiceError::folder_not_found(folder_id))
    }

    /// `None` means the folder is, or becomes, a root.
    fn get_parent_folder(
        &self,
        parent_folder_id: Option<i64>,
        user_id: i64,
    ) -> ServiceResult<Option<Folder>> {
        let Some(parent_folder_id) = parent_folder_id else {
            return Ok(None);
        };

        let parent = self.get_by_folder_id(parent_folder_id)?;
        ensure_owner(parent.user_id, user_id)?;
        Ok(Some(parent))
    }

    fn insert_folder_with_history(&self, folder: NewFolder) -> ServiceResult<Folder> {
        let saved = folders::insert(self.conn, folder)?;
        folder_history::save(self.conn, &NewFolderHistory::create(&saved, self.now))?;
        Ok(saved)
    }

    fn save_folder_with_history(&self, folder: &Folder) -> ServiceResult<()> {
        folders::save(self.conn, folder)?;
        folder_history::save(self.conn, &NewFolderHistory::create(folder, self.now))?;
        Ok(())
    }

    /// Validates the whole batch before writing, then issues one bulk folder
    /// insert followed by one bulk history insert.
    pub(super) fn create_folders(
        &self,
        input: FoldersCreateDto,
        user_id: i64,
    ) -> ServiceResult<Vec<Folder>> {
        if input.folders.iter().any(|entry| is_blank(&entry.folder_name)) {
            return Err(ServiceError::bad_request("folder name is required"));
        }

        let mut pending = Vec::with_capacity(input.folders.len());
        for entry in input.folders {
            let parent = self.get_parent_folder(entry.parent_folder_id, user_id)?;
            let tag = self.tags.get_tag(self.conn, entry.tag_id)?;
            pending.push(NewFolder::new(
                parent.as_ref(),
                user_id,
                tag.as_ref(),
                entry.folder_name,
                self.now,
            ));
        }

        let saved = folders::insert_all(self.conn, pending)?;
        let history: Vec<NewFolderHistory> = saved
            .iter()
            .map(|folder| NewFolderHistory::create(folder, self.now))
            .collect();
        folder_history::save_all(self.conn, &history)?;

        Ok(saved)
    }

    pub(super) fn update_folder(
        &self,
        folder_id: i64,
        input: FolderUpdateDto,
        user_id: i64,
    ) -> ServiceResult<Folder> {
        if is_blank(&input.folder_name) {
            return Err(ServiceError::bad_request("folder name is required"));
        }

        let mut folder = self.get_by_folder_id(folder_id)?;
        ensure_owner(folder.user_id, user_id)?;

        let parent = self.get_parent_folder(input.parent_folder_id, user_id)?;
        if let Some(parent) = &parent {
            self.ensure_not_within(parent, folder.folder_id)?;
        }
        let tag = self.tags.get_tag(self.conn, input.tag_id)?;

        folder.update(
            parent.as_ref(),
            tag.as_ref(),
            input.folder_name,
            user_id,
            self.now,
        );
        self.save_folder_with_history(&folder)?;

        Ok(folder)
    }

    /// Fails when `candidate_parent` is `folder_id` itself or sits below it,
    /// since moving there would detach the subtree into a cycle.
    fn ensure_not_within(&self, candidate_parent: &Folder, folder_id: i64) -> ServiceResult<()> {
        let mut seen = HashSet::new();
        let mut cursor = Some(candidate_parent.clone());

        while let Some(current) = cursor {
            if current.folder_id == folder_id {
                return Err(ServiceError::bad_request(
                    "a folder cannot be moved into itself or its descendants",
                ));
            }
            if !seen.insert(current.folder_id) {
                break;
            }
            cursor = match current.parent_folder_id {
                Some(parent_id) => folders::find_active_by_id(self.conn, parent_id)?,
                None => None,
            };
        }

        Ok(())
    }

    /// Pre-order cascade: children are queued first, then the folder's
    /// bookmarks are deleted, then the folder itself is marked deleted.
    pub(super) fn delete_folder(&self, folder_id: i64, user_id: i64) -> ServiceResult<CascadeSummary> {
        let folder = self.get_by_folder_id(folder_id)?;
        ensure_owner(folder.user_id, user_id)?;

        let mut summary = CascadeSummary::default();
        let mut stack = vec![folder];

        while let Some(mut current) = stack.pop() {
            stack.extend(folders::find_active_sub_folders(self.conn, current.folder_id)?);

            for bookmark in self.bookmarks.find_all_by_folder(self.conn, &current)? {
                self.bookmarks
                    .delete_bookmark(self.conn, bookmark.bookmark_id, user_id)?;
                summary.bookmarks += 1;
            }

            current.delete(user_id, self.now);
            self.save_folder_with_history(&current)?;
            summary.folders += 1;
        }

        Ok(summary)
    }

    /// Copies the active subtree under `parent_folder_id` into a new root
    /// owned by `user_id`, bookmarks included.
    pub(super) fn copy_parent_folder(
        &self,
        parent_folder_id: i64,
        user_id: i64,
    ) -> ServiceResult<CopyOutcome> {
        let source = self.get_by_folder_id(parent_folder_id)?;
        let root = self.insert_folder_with_history(NewFolder::copy_of(&source, None, user_id, self.now))?;

        let mut outcome = CopyOutcome {
            root: root.clone(),
            folders: 1,
            bookmarks: 0,
        };
        let mut stack = vec![(source, root)];

        while let Some((source, copy)) = stack.pop() {
            for bookmark in self.bookmarks.find_all_by_folder(self.conn, &source)? {
                self.bookmarks.create_bookmark(
                    self.conn,
                    BookmarkCreateDto::copy_of(&bookmark, copy.folder_id),
                    user_id,
                )?;
                outcome.bookmarks += 1;
            }

            for child in folders::find_active_sub_folders(self.conn, source.folder_id)? {
                let child_copy = self.insert_folder_with_history(NewFolder::copy_of(
                    &child,
                    Some(&copy),
                    user_id,
                    self.now,
                ))?;
                outcome.folders += 1;
                stack.push((child, child_copy));
            }
        }

        Ok(outcome)
    }

    pub(super) fn hierarchy_by_parent_folder_id(
        &self,
        parent_folder_id: i64,
    ) -> ServiceResult<FolderHierarchyDto> {
        let root = self.get_by_folder_id(parent_folder_id)?;
        Ok(FolderHierarchyDto {
            roots: vec![self.build_tree(&root)?],
        })
    }

    pub(super) fn hierarchy_by_user_id(&self, user_id: i64) -> ServiceResult<FolderHierarchyDto> {
        let mut roots = Vec::new();
        for root in folders::find_by_user_id_and_folder_is_null(self.conn, user_id)? {
            roots.push(self.build_tree(&root)?);
        }
        Ok(FolderHierarchyDto { roots })
    }

    pub(super) fn root_folders_by_user_id(&self, user_id: i64) -> ServiceResult<Vec<FolderDto>> {
        let mut roots = Vec::new();
        for root in folders::find_by_user_id_and_folder_is_null(self.conn, user_id)? {
            let tag = self.tags.get_tag(self.conn, root.tag_id)?;
            roots.push(FolderDto::new(&root, tag));
        }
        Ok(roots)
    }

    /// Resolves the tag, bookmarks and active children of one folder. Each
    /// visited node costs its own bookmark query.
    fn open_frame(&self, folder: &Folder) -> ServiceResult<Frame> {
        let tag = self.tags.get_tag(self.conn, folder.tag_id)?;
        let mut node = FolderDto::new(folder, tag);
        node.bookmarks = self
            .bookmarks
            .find_all_by_folder(self.conn, folder)?
            .into_iter()
            .map(BookmarkDto::from)
            .collect();

        let mut pending = folders::find_active_sub_folders(self.conn, folder.folder_id)?;
        pending.reverse();

        Ok(Frame { node, pending })
    }

    /// Depth-first build. A frame is closed once its pending children are
    /// exhausted and its node is moved into the parent frame.
    fn build_tree(&self, root: &Folder) -> ServiceResult<FolderDto> {
        let mut stack = vec![self.open_frame(root)?];

        while let Some(frame) = stack.last_mut() {
            match frame.pending.pop() {
                Some(child) => {
                    let child_frame = self.open_frame(&child)?;
                    stack.push(child_frame);
                }
                None => {
                    let Some(finished) = stack.pop() else {
                        break;
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.node.sub_folders.push(finished.node),
                        None => return Ok(finished.node),
                    }
                }
            }
        }

        Err(ServiceError::Internal(anyhow::anyhow!(
            "hierarchy traversal for folder {} ended without a root",
            root.folder_id
        )))
    }
}
