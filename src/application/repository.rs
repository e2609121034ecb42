use futures::stream::BoxStream;
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::domain::mapper;
use crate::domain::model::book::Book;
use crate::domain::model::entity::BookEntity;
use crate::domain::repository::{BookDao, BookSearchApi};

use super::error::RepositoryError;

/// 検索・保存済み一覧・保存の公開窓口。
/// 状態を持たない。永続状態は `BookDao`、検索結果はその場限り。
pub struct BookRepository<A: BookSearchApi, D: BookDao> {
    api: A,
    dao: D,
}

impl<A: BookSearchApi, D: BookDao> BookRepository<A, D> {
    pub fn new(api: A, dao: D) -> Self {
        Self { api, dao }
    }

    /// 検索してBook列を返す。順序は検索APIの順。
    /// API側の失敗はそのままエラーとして返す（空Vecで代用しない）。
    pub async fn search_books(&self, query: &str) -> Result<Vec<Book>, RepositoryError> {
        debug!(query_len = query.len(), "search_books: start");

        let response = self.api.search_books(query).await.map_err(|e| {
            warn!(error = %e, "search_books: failed");
            RepositoryError::Search(Box::new(e))
        })?;

        let books = mapper::response_to_domain(&response);
        info!(count = books.len(), "search_books: ok");
        Ok(books)
    }

    /// 保存済みBookのライブストリーム。
    /// 下位のスナップショット1件につき1件を、同じ順序で流す。
    pub fn get_saved_books(&self) -> BoxStream<'static, Result<Vec<Book>, RepositoryError>> {
        self.dao
            .get_all_books()
            .map(map_snapshot::<D::Error>)
            .boxed()
    }

    /// Bookを保存する。同じidで再保存すると上書き。
    pub async fn save_book(&self, book: &Book) -> Result<(), RepositoryError> {
        self.dao
            .insert_book(mapper::to_entity(book))
            .await
            .map_err(|e| {
                warn!(book_id = %book.id, error = %e, "save_book: failed");
                RepositoryError::Storage(Box::new(e))
            })?;

        info!(book_id = %book.id, "save_book: ok");
        Ok(())
    }
}

fn map_snapshot<E>(snapshot: Result<Vec<BookEntity>, E>) -> Result<Vec<Book>, RepositoryError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match snapshot {
        Ok(entities) => Ok(entities.iter().map(mapper::entity_to_domain).collect()),
        Err(e) => {
            warn!(error = %e, "get_saved_books: snapshot failed");
            Err(RepositoryError::Storage(Box::new(e)))
        }
    }
}
