use rusqlite::Connection;

use super::TagService;
use crate::{
    db::{models::Tag, repositories::tags},
    error::ServiceResult,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteTagService;

impl TagService for SqliteTagService {
    fn get_tag(&self, conn: &Connection, tag_id: Option<i64>) -> ServiceResult<Option<Tag>> {
        match tag_id {
            Some(tag_id) => Ok(tags::find_by_id(conn, tag_id)?),
            None => Ok(None),
        }
    }
}
