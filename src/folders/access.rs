use crate::{
    error::{ServiceError, ServiceResult},
    log_warn,
};

const ENABLE_LOGS: bool = true;

/// Single ownership check shared by every folder and bookmark operation.
pub fn ensure_owner(owner_user_id: i64, requesting_user_id: i64) -> ServiceResult<()> {
    if owner_user_id != requesting_user_id {
        log_warn!(
            "User {requesting_user_id} tried to access a resource owned by user {owner_user_id}"
        );
        return Err(ServiceError::bad_request("resource is not accessible to this user"));
    }
    Ok(())
}
