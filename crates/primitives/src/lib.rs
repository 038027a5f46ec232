//! Basic data-loading primitives.
//!
//! These are the value types shared by the token registry and the token
//! implementations: format [`Revision`]s, the closed set of [`EntityKind`]
//! tags that tokens are registered against, case-folded lookup keys, and the
//! in-memory object store that tokens mutate while a data set is loaded.

pub mod folded;
pub mod kind;
pub mod object;
pub mod revision;
pub mod store;

pub use folded::Folded;
pub use kind::EntityKind;
pub use object::{AttrValue, CdomObject, EqModControl, ObjectId, ObjectKey};
pub use revision::{Revision, RevisionParseError};
pub use store::{ObjectContainer, ObjectStore};
