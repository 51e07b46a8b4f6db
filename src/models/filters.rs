use super::enums::Gender;

/// Storage-level patient filter. Applied in SQL before pagination.
#[derive(Debug, Default, Clone)]
pub struct DemographicFilter {
    pub gender: Option<Gender>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
}
