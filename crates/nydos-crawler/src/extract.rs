//! Identifier extraction from raw search responses.

use crate::models::{EntityIdentifier, SearchResponse};

/// Parse a raw search response body.
pub fn parse_search_response(body: &[u8]) -> Result<SearchResponse, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Identifiers of every hit, in response order. Hits whose `dosID` is not a
/// non-negative integer are skipped with a warning.
#[must_use]
pub fn identifiers_from(response: &SearchResponse) -> Vec<EntityIdentifier> {
    response
        .entity_search_result_list
        .iter()
        .filter_map(|hit| match hit.dos_id.parse::<EntityIdentifier>() {
            Ok(id) => Some(id),
            Err(e) => {
                tracing::warn!(error = %e, name = ?hit.entity_name, "Skipping search hit");
                None
            }
        })
        .collect()
}

/// Lenient extraction: a body that is empty or not a search response yields no
/// identifiers rather than an error.
#[must_use]
pub fn extract_identifiers(body: &[u8]) -> Vec<EntityIdentifier> {
    match parse_search_response(body) {
        Ok(response) => identifiers_from(&response),
        Err(e) => {
            tracing::warn!(error = %e, bytes = body.len(), "Unparseable search response");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[EntityIdentifier]) -> Vec<u64> {
        values.iter().map(|id| id.value()).collect()
    }

    #[test]
    fn test_drops_unparseable_and_keeps_order() {
        let body = br#"{"entitySearchResultList":[{"dosID":"123"},{"dosID":"abc"},{"dosID":"456"}]}"#;
        assert_eq!(ids(&extract_identifiers(body)), vec![123, 456]);
    }

    #[test]
    fn test_empty_body() {
        assert!(extract_identifiers(b"").is_empty());
    }

    #[test]
    fn test_malformed_body() {
        assert!(extract_identifiers(b"{ not json").is_empty());
        assert!(extract_identifiers(b"<html>502 Bad Gateway</html>").is_empty());
    }

    #[test]
    fn test_wrong_top_level_type() {
        assert!(extract_identifiers(b"[1,2,3]").is_empty());
    }

    #[test]
    fn test_hit_without_id_is_skipped() {
        let body = br#"{"entitySearchResultList":[{"entityName":"NO ID INC"},{"dosID":"9"}]}"#;
        assert_eq!(ids(&extract_identifiers(body)), vec![9]);
    }

    #[test]
    fn test_null_id_skips_only_that_hit() {
        let body = br#"{"entitySearchResultList":[{"dosID":"123"},{"dosID":null},{"dosID":"456"}]}"#;
        assert_eq!(ids(&extract_identifiers(body)), vec![123, 456]);
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let body = br#"{"entitySearchResultList":[{"dosID":"123"},{"dosID":789},{"dosID":"456"}]}"#;
        assert_eq!(ids(&extract_identifiers(body)), vec![123, 789, 456]);
    }

    #[test]
    fn test_negative_or_fractional_numeric_id_is_skipped() {
        let body = br#"{"entitySearchResultList":[{"dosID":-5},{"dosID":1.5},{"dosID":"8"}]}"#;
        assert_eq!(ids(&extract_identifiers(body)), vec![8]);
    }

    #[test]
    fn test_parse_is_strict() {
        assert!(parse_search_response(b"").is_err());
        assert!(parse_search_response(br#"{"entitySearchResultList":[]}"#).is_ok());
    }
}
