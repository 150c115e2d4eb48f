pub mod bookmarks;
pub mod folder_history;
pub mod folders;
pub mod tags;
