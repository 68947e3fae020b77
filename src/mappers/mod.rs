/// Entity <-> DTO conversion
///
/// Three functions per entity:
///
/// - `new_*`: builds the insert record from a create input. Relationship
///   ids come in as separate arguments because the service resolves and
///   ownership-checks them first; the mapper has no repository access.
/// - `to_response`: flattens the entity for the wire. Relationship
///   references stay id scalars.
/// - `apply_update`: in-place partial update, one explicit `if let Some`
///   per field. A `None` field means "leave unchanged", never "clear".
///
/// List conversion reuses `to_response` per element; an empty slice maps to
/// an empty vec.

pub mod project;
pub mod task;
pub mod user;
