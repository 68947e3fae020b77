/// Service layer
///
/// Business invariants and per-operation orchestration over the repository
/// and mapping layers. Services are composed explicitly: each one is
/// constructed with the repositories it needs (`Arc<dyn ...Repository>`),
/// no container involved.
///
/// Contract conventions shared by all three services:
///
/// - `get_*` fails with `NotFound` on miss; `find_*` returns `Ok(None)`
/// - all field validation and business checks run before any write; the
///   storage transaction plus the unique indexes are the only rollback
///   mechanism
/// - a nil UUID passed as an identifier is an `InvalidArgument`, not a
///   lookup miss

pub mod project;
pub mod task;
pub mod user;

pub use project::ProjectService;
pub use task::TaskService;
pub use user::UserService;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};

/// Rejects nil UUIDs at the service boundary
pub(crate) fn require_id(id: Uuid, what: &str) -> ServiceResult<Uuid> {
    if id.is_nil() {
        return Err(ServiceError::InvalidArgument(format!("{} must not be nil", what)));
    }
    Ok(id)
}
