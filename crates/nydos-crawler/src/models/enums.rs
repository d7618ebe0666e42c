//! Fixed indicator values of the search payload.

use serde::{Deserialize, Serialize};

/// Which field the search value is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchByType {
    /// Registered entity name.
    #[default]
    EntityName,
}

/// How the search value is matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchExpression {
    /// Name contains the search value anywhere.
    #[default]
    Contains,
}

/// Entity status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityStatus {
    /// Active and inactive entities alike.
    #[default]
    AllStatuses,
}

/// Entity type filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityType {
    /// Business corporation.
    Corporation,
    /// LLC.
    LimitedLiabilityCompany,
    /// LP.
    LimitedPartnership,
    /// LLP.
    LimitedLiabilityPartnership,
}

impl EntityType {
    /// Types every search asks for, in wire order.
    pub const SEARCHED: [Self; 4] = [
        Self::Corporation,
        Self::LimitedLiabilityCompany,
        Self::LimitedPartnership,
        Self::LimitedLiabilityPartnership,
    ];
}
