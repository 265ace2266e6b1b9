//! Aggregation queries
//!
//! Two independent grouped queries, each producing one row per entity:
//!
//! 1. Criteria counts (`CriteriaAggregate`), only entities with at least one
//!    criterion, ordered by `total_criteria` descending
//! 2. Enrollment counts (`EnrollmentAggregate`), every entity, ordered by
//!    `total_enrollments` descending
//!
//! Ties are broken by entity id so repeated runs return identical order.

mod criteria;
mod enrollment;

pub use criteria::{load_criteria, CriteriaAggregate, CRITERIA_QUERY};
pub use enrollment::{load_enrollment, EnrollmentAggregate, ENROLLMENT_QUERY};

use serde::{Deserialize, Serialize};

/// An organizational unit that owns criteria and classes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
}

impl Entity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
