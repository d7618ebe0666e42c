//! Wire format snapshots of the request payloads.

use nydos_crawler::models::{EntityIdentifier, EntityRecordRequest, SearchRequest};

#[test]
fn test_search_request_snapshot() {
    insta::assert_json_snapshot!(SearchRequest::name_contains("xyz"), @r#"
    {
      "searchValue": "xyz",
      "searchByTypeIndicator": "EntityName",
      "searchExpressionIndicator": "Contains",
      "entityStatusIndicator": "AllStatuses",
      "entityTypeIndicator": [
        "Corporation",
        "LimitedLiabilityCompany",
        "LimitedPartnership",
        "LimitedLiabilityPartnership"
      ],
      "listPaginationInfo": {
        "listStartRecord": 1,
        "listEndRecord": 50
      }
    }
    "#);
}

#[test]
fn test_entity_record_request_snapshot() {
    insta::assert_json_snapshot!(EntityRecordRequest::by_id(EntityIdentifier::new(123)), @r#"
    {
      "SearchID": "123",
      "EntityName": "",
      "AssumedNameFlag": "false"
    }
    "#);
}
