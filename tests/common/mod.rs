//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::StreamExt;
use tokio::sync::watch;

use bookshelf_repo::application::repository::BookRepository;
use bookshelf_repo::domain::model::book::Book;
use bookshelf_repo::domain::model::entity::BookEntity;
use bookshelf_repo::domain::model::response::{BookItem, BookResponse, VolumeInfo};
use bookshelf_repo::domain::repository::{BookDao, BookSearchApi};

// =============================================================================
// FakeSearchApi — 固定レスポンスを返す検索API
// =============================================================================

#[derive(Debug, Clone, thiserror::Error)]
#[error("search unavailable: {0}")]
pub struct FakeSearchError(pub String);

/// 受け取ったクエリを記録し、設定済みの結果を返す。
#[derive(Clone)]
pub struct FakeSearchApi {
    result: Result<BookResponse, FakeSearchError>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeSearchApi {
    pub fn returning(response: BookResponse) -> Self {
        Self {
            result: Ok(response),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(FakeSearchError(message.into())),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookSearchApi for FakeSearchApi {
    type Error = FakeSearchError;

    async fn search_books(&self, query: &str) -> Result<BookResponse, Self::Error> {
        self.queries.lock().unwrap().push(query.to_string());
        self.result.clone()
    }
}

// =============================================================================
// InMemoryDao — ライブクエリ付きインメモリ永続化
// =============================================================================

#[derive(Debug, Clone, thiserror::Error)]
#[error("in-memory store error: {0}")]
pub struct InMemoryError(pub String);

/// ファイルI/O不要のBookDao。
/// `scripted` を与えるとライブクエリの代わりにその列をそのまま流して終了する。
#[derive(Clone)]
pub struct InMemoryDao {
    rows: Arc<Mutex<Vec<BookEntity>>>,
    inserted: Arc<Mutex<Vec<BookEntity>>>,
    changes: Arc<watch::Sender<u64>>,
    scripted: Option<Vec<Result<Vec<BookEntity>, InMemoryError>>>,
    fail_writes: bool,
}

impl InMemoryDao {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            rows: Arc::new(Mutex::new(Vec::new())),
            inserted: Arc::new(Mutex::new(Vec::new())),
            changes: Arc::new(changes),
            scripted: None,
            fail_writes: false,
        }
    }

    pub fn scripted(snapshots: Vec<Result<Vec<BookEntity>, InMemoryError>>) -> Self {
        Self {
            scripted: Some(snapshots),
            ..Self::new()
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    /// insert_bookに渡された引数（呼び出し順）
    pub fn inserted(&self) -> Vec<BookEntity> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<BookEntity> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookDao for InMemoryDao {
    type Error = InMemoryError;

    async fn insert_book(&self, entity: BookEntity) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(InMemoryError("disk full".into()));
        }
        self.inserted.lock().unwrap().push(entity.clone());
        {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|row| row.id == entity.id) {
                Some(row) => *row = entity,
                None => rows.push(entity),
            }
        }
        self.changes.send_modify(|v| *v += 1);
        Ok(())
    }

    fn get_all_books(&self) -> BoxStream<'static, Result<Vec<BookEntity>, Self::Error>> {
        if let Some(snapshots) = &self.scripted {
            return stream::iter(snapshots.clone()).boxed();
        }

        let rows = Arc::clone(&self.rows);
        let rx = self.changes.subscribe();
        stream::unfold((rows, rx, true), |(rows, mut rx, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let snapshot = rows.lock().unwrap().clone();
            Some((Ok(snapshot), (rows, rx, false)))
        })
        .boxed()
    }
}

// =============================================================================
// Fixtures
// =============================================================================

pub fn repo_with(
    api: FakeSearchApi,
    dao: InMemoryDao,
) -> BookRepository<FakeSearchApi, InMemoryDao> {
    BookRepository::new(api, dao)
}

/// 検索APIの1件分（全フィールドあり）
pub fn test_item() -> BookItem {
    BookItem {
        id: "test_id".into(),
        volume_info: VolumeInfo {
            title: Some("Test Book".into()),
            authors: Some(vec!["Test Author".into()]),
            description: Some("Test Description".into()),
            published_date: Some("2024".into()),
            page_count: Some(100),
            categories: Some(vec!["Fiction".into()]),
            image_links: None,
        },
    }
}

pub fn test_book() -> Book {
    Book {
        id: "test_id".into(),
        title: "Test Book".into(),
        author: "Test Author".into(),
        description: "Test Description".into(),
        thumbnail_url: "test_url".into(),
        published_date: "2024".into(),
        page_count: 100,
        categories: vec!["Fiction".into(), "Drama".into()],
    }
}

pub fn test_entity() -> BookEntity {
    BookEntity {
        id: "test_id".into(),
        title: "Test Book".into(),
        author: "Test Author".into(),
        description: "Test Description".into(),
        thumbnail_url: "test_url".into(),
        published_date: "2024".into(),
        page_count: 100,
        categories: "Fiction,Drama".into(),
    }
}
