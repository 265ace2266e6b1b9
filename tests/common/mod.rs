//! Shared fixture: a SQLite database with the evaluation schema in a
//! temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use critmetrics::source::SqliteSource;
use rusqlite::{params, Connection};
use tempfile::TempDir;

pub const SCHEMA: &str = "
    CREATE TABLE entidades (
        id INTEGER PRIMARY KEY,
        nome TEXT NOT NULL
    );
    CREATE TABLE criterios_avaliativos (
        id INTEGER PRIMARY KEY,
        entidade_id INTEGER NOT NULL REFERENCES entidades(id),
        formula_personalizada TEXT,
        criterio_calculo_grupo_id INTEGER,
        possui_criterios_grupos BOOLEAN NOT NULL DEFAULT 0,
        possui_recuperacao_paralela BOOLEAN NOT NULL DEFAULT 0,
        possui_recuperacao_semestral BOOLEAN NOT NULL DEFAULT 0
    );
    CREATE TABLE turmas (
        id INTEGER PRIMARY KEY,
        entidade_id INTEGER NOT NULL REFERENCES entidades(id)
    );
    CREATE TABLE matriculas (
        id INTEGER PRIMARY KEY,
        turma_id INTEGER NOT NULL REFERENCES turmas(id)
    );
";

/// Flags of one evaluation criterion
#[derive(Debug, Clone, Copy, Default)]
pub struct Criterion {
    pub formula: bool,
    pub group: bool,
    pub parallel: bool,
    pub semester: bool,
}

impl Criterion {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn formula() -> Self {
        Self {
            formula: true,
            ..Self::default()
        }
    }

    pub fn group() -> Self {
        Self {
            group: true,
            ..Self::default()
        }
    }

    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    pub fn with_semester(mut self) -> Self {
        self.semester = true;
        self
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub db: PathBuf,
    conn: Connection,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("school.db");
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        Self { dir, db, conn }
    }

    pub fn entity(&self, id: i64, name: &str) -> &Self {
        self.conn
            .execute("INSERT INTO entidades (id, nome) VALUES (?1, ?2)", params![id, name])
            .unwrap();
        self
    }

    pub fn criteria(&self, entity: i64, criterion: Criterion, count: usize) -> &Self {
        for _ in 0..count {
            self.conn
                .execute(
                    "INSERT INTO criterios_avaliativos (
                        entidade_id, formula_personalizada, criterio_calculo_grupo_id,
                        possui_criterios_grupos, possui_recuperacao_paralela, possui_recuperacao_semestral
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        entity,
                        criterion.formula.then_some("(N1 + N2) / 2"),
                        criterion.group.then_some(1i64),
                        criterion.group,
                        criterion.parallel,
                        criterion.semester,
                    ],
                )
                .unwrap();
        }
        self
    }

    /// Adds one class with `enrollments` enrollments
    pub fn class(&self, entity: i64, enrollments: usize) -> &Self {
        self.conn
            .execute("INSERT INTO turmas (entidade_id) VALUES (?1)", params![entity])
            .unwrap();
        let class_id = self.conn.last_insert_rowid();
        for _ in 0..enrollments {
            self.conn
                .execute("INSERT INTO matriculas (turma_id) VALUES (?1)", params![class_id])
                .unwrap();
        }
        self
    }

    pub fn execute(&self, sql: &str) -> &Self {
        self.conn.execute_batch(sql).unwrap();
        self
    }

    pub fn source(&self) -> SqliteSource {
        SqliteSource::open_lazy(&self.db)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Deterministic pseudo-random sequence for generated datasets
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}
