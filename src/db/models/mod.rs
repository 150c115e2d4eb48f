pub mod bookmark;
pub mod folder;
pub mod folder_history;
pub mod hierarchy;
pub mod tag;

pub use bookmark::{Bookmark, BookmarkCreateDto};
pub use folder::{Folder, FolderStatus, FolderUpdateDto, FoldersCreateDto, NewFolder};
pub use folder_history::{FolderHistory, NewFolderHistory};
pub use hierarchy::{BookmarkDto, FolderDto, FolderHierarchyDto, TagDto};
pub use tag::Tag;
