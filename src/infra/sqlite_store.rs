use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use rusqlite::{params, Connection};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::domain::model::entity::BookEntity;
use crate::domain::repository::BookDao;

const CREATE_BOOKS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS books (
    id             TEXT PRIMARY KEY NOT NULL,
    title          TEXT NOT NULL,
    author         TEXT NOT NULL,
    description    TEXT NOT NULL,
    thumbnail_url  TEXT NOT NULL,
    published_date TEXT NOT NULL,
    page_count     INTEGER NOT NULL,
    categories     TEXT NOT NULL
);";

#[derive(Debug, thiserror::Error)]
pub enum SqliteStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("connection lock poisoned")]
    Poisoned,
}

/// SQLiteによるBookDao実装。
/// 書き込みのたびに変更カウンタを進め、ライブクエリ購読者に再取得を促す。
pub struct SqliteBookDao {
    conn: Arc<Mutex<Connection>>,
    changes: Arc<watch::Sender<u64>>,
}

impl SqliteBookDao {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteStoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "store opened");
        Self::bootstrap(conn)
    }

    pub fn open_in_memory() -> Result<Self, SqliteStoreError> {
        let conn = Connection::open_in_memory()?;
        debug!("in-memory store opened");
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self, SqliteStoreError> {
        conn.execute_batch(CREATE_BOOKS_TABLE)?;
        let (changes, _) = watch::channel(0);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            changes: Arc::new(changes),
        })
    }
}

fn notify_changed(changes: &watch::Sender<u64>) {
    changes.send_modify(|version| *version = version.wrapping_add(1));
}

#[async_trait]
impl BookDao for SqliteBookDao {
    type Error = SqliteStoreError;

    async fn insert_book(&self, entity: BookEntity) -> Result<(), Self::Error> {
        let conn = Arc::clone(&self.conn);
        let changes = Arc::clone(&self.changes);
        // futureのdrop後も書き込みは完了する。変更通知は同じblockingタスク内で送る。
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| SqliteStoreError::Poisoned)?;
            conn.execute(
                "INSERT OR REPLACE INTO books
                 (id, title, author, description, thumbnail_url, published_date, page_count, categories)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entity.id,
                    entity.title,
                    entity.author,
                    entity.description,
                    entity.thumbnail_url,
                    entity.published_date,
                    entity.page_count,
                    entity.categories,
                ],
            )?;
            drop(conn);
            notify_changed(&changes);
            Ok::<_, SqliteStoreError>(())
        })
        .await??;

        Ok(())
    }

    fn get_all_books(&self) -> BoxStream<'static, Result<Vec<BookEntity>, Self::Error>> {
        let conn = Arc::clone(&self.conn);
        let rx = self.changes.subscribe();

        // 初回は即座に全件、以降は変更通知ごとに全件。Senderがdropされたら終了。
        stream::unfold((conn, rx, true), |(conn, mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = select_all(Arc::clone(&conn)).await;
            if let Ok(rows) = &snapshot {
                debug!(count = rows.len(), "live query emitted");
            }
            Some((snapshot, (conn, rx, false)))
        })
        .boxed()
    }
}

async fn select_all(conn: Arc<Mutex<Connection>>) -> Result<Vec<BookEntity>, SqliteStoreError> {
    tokio::task::spawn_blocking(move || {
        let conn = conn.lock().map_err(|_| SqliteStoreError::Poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, title, author, description, thumbnail_url, published_date, page_count, categories
             FROM books ORDER BY title, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(BookEntity {
                id: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                description: row.get(3)?,
                thumbnail_url: row.get(4)?,
                published_date: row.get(5)?,
                page_count: row.get(6)?,
                categories: row.get(7)?,
            })
        })?;
        let entities = rows.collect::<Result<Vec<_>, _>>()?;
        Ok::<_, SqliteStoreError>(entities)
    })
    .await?
}
