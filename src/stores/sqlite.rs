//! SQLite-backed section store with vector search via `sqlite-vec`.
//!
//! Section rows live in a plain `sections` table; their vectors live in a
//! `vec0` virtual table linked by rowid. Similarity search runs entirely in
//! SQL with `vec_distance_cosine`.

use std::mem::transmute;
use std::os::raw::c_char;
use std::path::Path;
use std::sync::Once;

use async_trait::async_trait;
use tokio_rusqlite::{Connection, ffi};

use super::{SectionRecord, SectionStore};
use crate::types::PipelineError;

#[derive(Clone)]
pub struct SqliteSectionStore {
    conn: Connection,
    dimensions: usize,
}

impl SqliteSectionStore {
    /// Opens (or creates) a store at `path` with the given embedding width.
    pub async fn open(path: impl AsRef<Path>, dimensions: usize) -> Result<Self, PipelineError> {
        register_sqlite_vec()?;
        let conn = Connection::open(path)
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))?;
        Self::init(conn, dimensions).await
    }

    /// Opens an in-memory store, mainly for tests.
    pub async fn open_in_memory(dimensions: usize) -> Result<Self, PipelineError> {
        register_sqlite_vec()?;
        let conn = Connection::open_in_memory()
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))?;
        Self::init(conn, dimensions).await
    }

    async fn init(conn: Connection, dimensions: usize) -> Result<Self, PipelineError> {
        conn.call(move |conn| {
            // Fails fast if the vec extension did not load.
            conn.query_row("select vec_version()", [], |row| row.get::<_, String>(0))?;
            conn.execute(
                "CREATE TABLE IF NOT EXISTS sections (
                    id TEXT PRIMARY KEY,
                    section_id TEXT,
                    section_name TEXT,
                    page INTEGER,
                    content TEXT
                )",
                [],
            )?;
            conn.execute(
                "CREATE INDEX IF NOT EXISTS idx_sections_section_id ON sections(section_id)",
                [],
            )?;
            conn.execute(
                &format!(
                    "CREATE VIRTUAL TABLE IF NOT EXISTS sections_embeddings \
                     USING vec0(embedding float[{dimensions}])"
                ),
                [],
            )?;
            Ok(())
        })
        .await
        .map_err(|err| PipelineError::Storage(err.to_string()))?;
        Ok(Self { conn, dimensions })
    }

    /// Width of the vectors this store was created with.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[async_trait]
impl SectionStore for SqliteSectionStore {
    async fn insert_sections(&self, records: Vec<SectionRecord>) -> Result<(), PipelineError> {
        // Serialize vectors up front so the closure stays free of serde errors.
        let mut rows = Vec::with_capacity(records.len());
        for record in records {
            let Some(embedding) = record.embedding.as_ref() else {
                continue;
            };
            let embedding_json = serde_json::to_string(embedding)
                .map_err(|err| PipelineError::Storage(err.to_string()))?;
            rows.push((record, embedding_json));
        }
        if rows.is_empty() {
            return Ok(());
        }

        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                for (record, embedding_json) in &rows {
                    tx.execute(
                        "INSERT INTO sections (id, section_id, section_name, page, content) \
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                        (
                            &record.id,
                            &record.section_id,
                            &record.section_name,
                            &record.page,
                            &record.content,
                        ),
                    )?;
                    let rowid = tx.last_insert_rowid();
                    tx.execute(
                        "INSERT INTO sections_embeddings (rowid, embedding) VALUES (?1, ?2)",
                        (rowid, embedding_json),
                    )?;
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))
    }

    async fn get_by_section_id(
        &self,
        section_id: &str,
    ) -> Result<Vec<SectionRecord>, PipelineError> {
        let section_id = section_id.to_string();
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, section_id, section_name, page, content \
                     FROM sections WHERE section_id = ?1 ORDER BY rowid",
                )?;
                let rows = stmt.query_map([&section_id], |row| {
                    Ok(SectionRecord {
                        id: row.get(0)?,
                        section_id: row.get(1)?,
                        section_name: row.get(2)?,
                        page: row.get(3)?,
                        content: row.get(4)?,
                        embedding: None,
                    })
                })?;
                let mut results = Vec::new();
                for row in rows {
                    results.push(row?);
                }
                Ok(results)
            })
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))
    }

    async fn search_similar(
        &self,
        query_embedding: &[f32],
        top_k: usize,
    ) -> Result<Vec<(SectionRecord, f32)>, PipelineError> {
        let embedding_json = serde_json::to_string(query_embedding)
            .map_err(|err| PipelineError::Storage(err.to_string()))?;
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT s.id, s.section_id, s.section_name, s.page, s.content, \
                     vec_distance_cosine(e.embedding, vec_f32(?)) as distance \
                     FROM sections s \
                     JOIN sections_embeddings e ON e.rowid = s.rowid \
                     ORDER BY distance ASC \
                     LIMIT {top_k}"
                ))?;
                let rows = stmt.query_map([&embedding_json], |row| {
                    let record = SectionRecord {
                        id: row.get(0)?,
                        section_id: row.get(1)?,
                        section_name: row.get(2)?,
                        page: row.get(3)?,
                        content: row.get(4)?,
                        embedding: None,
                    };
                    let distance: f32 = row.get(5)?;
                    Ok((record, 1.0 - distance))
                })?;
                let mut results = Vec::new();
                for row in rows {
                    results.push(row?);
                }
                Ok(results)
            })
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        self.conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM sections", [], |row| row.get(0))?;
                Ok(count as usize)
            })
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))
    }

    async fn clear(&self) -> Result<usize, PipelineError> {
        self.conn
            .call(|conn| {
                let removed = conn.execute("DELETE FROM sections", [])?;
                conn.execute("DELETE FROM sections_embeddings", [])?;
                Ok(removed)
            })
            .await
            .map_err(|err| PipelineError::Storage(err.to_string()))
    }
}

fn register_sqlite_vec() -> Result<(), PipelineError> {
    use std::sync::Mutex;

    static INIT: Once = Once::new();
    static INIT_RESULT: Mutex<Option<Result<(), String>>> = Mutex::new(None);

    INIT.call_once(|| {
        let result = unsafe {
            type SqliteExtensionInit = unsafe extern "C" fn(
                *mut ffi::sqlite3,
                *mut *mut c_char,
                *const ffi::sqlite3_api_routines,
            ) -> i32;

            let init: unsafe extern "C" fn() = sqlite_vec::sqlite3_vec_init;
            let init_fn: SqliteExtensionInit =
                transmute::<unsafe extern "C" fn(), SqliteExtensionInit>(init);
            let rc = ffi::sqlite3_auto_extension(Some(init_fn));
            if rc != 0 {
                Err(format!(
                    "failed to register sqlite-vec extension (code {rc})"
                ))
            } else {
                Ok(())
            }
        };
        *INIT_RESULT.lock().expect("init result mutex poisoned") = Some(result);
    });

    INIT_RESULT
        .lock()
        .expect("init result mutex poisoned")
        .clone()
        .expect("init was called but result not set")
        .map_err(PipelineError::Storage)
}
