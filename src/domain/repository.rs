use async_trait::async_trait;
use futures::stream::BoxStream;

use super::model::entity::BookEntity;
use super::model::response::BookResponse;

/// 検索APIの抽象。Infra層が実装する。
#[async_trait]
pub trait BookSearchApi: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// クエリはそのまま渡す（空文字列の扱いも実装側に委ねる）。
    async fn search_books(&self, query: &str) -> Result<BookResponse, Self::Error>;
}

/// 保存済みBookの永続化の抽象。Infra層が実装する。
#[async_trait]
pub trait BookDao: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `id` をキーとするupsert。同じidの既存行は置き換える。
    async fn insert_book(&self, entity: BookEntity) -> Result<(), Self::Error>;

    /// ライブクエリ。購読開始時と変更のたびに全件のスナップショットを流す。
    /// 購読側がdropするまで終了しない。
    fn get_all_books(&self) -> BoxStream<'static, Result<Vec<BookEntity>, Self::Error>>;
}
