//! Data models for the NY DOS public inquiry API.
//!
//! Request types serialize to the exact payloads the registry expects;
//! response types model only the fields the crawler reads and ignore the rest.

mod entity;
mod enums;
mod search;

pub use entity::{EntityIdentifier, EntityRecordRequest};
pub use enums::{EntityStatus, EntityType, SearchByType, SearchExpression};
pub use search::{EntitySummary, ListPaginationInfo, SearchRequest, SearchResponse};
