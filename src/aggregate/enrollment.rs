//! Enrollment and class counts per entity

use serde::{Deserialize, Serialize};

use crate::errors::DashboardResult;
use crate::source::QuerySource;

use super::Entity;

/// Grouped enrollment counts through the class relation.
///
/// No HAVING clause: entities without classes come back with zero counts.
pub const ENROLLMENT_QUERY: &str = "
    SELECT
        e.id AS entidade_id,
        e.nome AS nome_entidade,
        COUNT(DISTINCT m.id) AS total_matriculas,
        COUNT(DISTINCT t.id) AS total_turmas
    FROM
        entidades e
    LEFT JOIN
        turmas t ON t.entidade_id = e.id
    LEFT JOIN
        matriculas m ON m.turma_id = t.id
    GROUP BY
        e.id, e.nome
    ORDER BY
        total_matriculas DESC, e.id ASC
";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentAggregate {
    pub entity: Entity,
    pub total_enrollments: u64,
    pub total_classes: u64,
}

/// Runs the enrollment aggregation and decodes its rows
pub fn load_enrollment<S: QuerySource + ?Sized>(
    source: &S,
) -> DashboardResult<Vec<EnrollmentAggregate>> {
    let table = source.run(ENROLLMENT_QUERY)?;

    table
        .rows()
        .map(|row| {
            Ok(EnrollmentAggregate {
                entity: Entity::new(row.id("entidade_id")?, row.text("nome_entidade")?),
                total_enrollments: row.count("total_matriculas")?,
                total_classes: row.count("total_turmas")?,
            })
        })
        .collect()
}
