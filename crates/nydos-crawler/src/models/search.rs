//! Entity search request and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EntityStatus, EntityType, SearchByType, SearchExpression};
use crate::config::api;

/// Body of a `GetComplexSearchMatchingEntities` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Substring searched for.
    pub search_value: String,

    /// Field matched against.
    pub search_by_type_indicator: SearchByType,

    /// Match mode.
    pub search_expression_indicator: SearchExpression,

    /// Status filter.
    pub entity_status_indicator: EntityStatus,

    /// Entity types included.
    pub entity_type_indicator: Vec<EntityType>,

    /// Result window.
    pub list_pagination_info: ListPaginationInfo,
}

impl SearchRequest {
    /// Entities of any status and any searched type whose name contains `term`,
    /// first result window only.
    #[must_use]
    pub fn name_contains(term: impl Into<String>) -> Self {
        Self {
            search_value: term.into(),
            search_by_type_indicator: SearchByType::EntityName,
            search_expression_indicator: SearchExpression::Contains,
            entity_status_indicator: EntityStatus::AllStatuses,
            entity_type_indicator: EntityType::SEARCHED.to_vec(),
            list_pagination_info: ListPaginationInfo::default(),
        }
    }
}

/// Inclusive, 1-based record window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaginationInfo {
    /// First record.
    pub list_start_record: u32,

    /// Last record.
    pub list_end_record: u32,
}

impl Default for ListPaginationInfo {
    fn default() -> Self {
        Self { list_start_record: api::LIST_START_RECORD, list_end_record: api::LIST_END_RECORD }
    }
}

/// Search endpoint response. Only the result list is modelled.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching entities; absent or null means none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub entity_search_result_list: Vec<EntitySummary>,
}

/// One search hit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySummary {
    /// Registry identifier as sent by the API, normally a decimal string.
    /// Bare numbers are kept as their decimal text; null or any other type is empty.
    #[serde(rename = "dosID", default, deserialize_with = "lenient_id")]
    pub dos_id: String,

    /// Registered name.
    #[serde(default)]
    pub entity_name: Option<String>,

    /// Entity type label.
    #[serde(default)]
    pub entity_type: Option<String>,

    /// Entity status label.
    #[serde(default)]
    pub entity_status: Option<String>,
}

/// Decodes hits one by one so a malformed hit costs only itself.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EntitySummary>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let list: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(list
        .unwrap_or_default()
        .into_iter()
        .filter_map(|hit| match serde_json::from_value(hit) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed search hit");
                None
            }
        })
        .collect())
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
