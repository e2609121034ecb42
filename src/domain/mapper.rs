//! レスポンス / ドメイン / 永続化レコード間の変換。
//!
//! 全関数は純粋かつ失敗しない。欠落フィールドは既定値（空文字列・0・空Vec）になる。

use super::model::book::Book;
use super::model::entity::BookEntity;
use super::model::response::{BookItem, BookResponse};

/// 永続化時のカテゴリ区切り文字
pub const CATEGORY_SEPARATOR: &str = ",";

/// 検索結果1件をBookに変換する。
pub fn item_to_domain(item: &BookItem) -> Book {
    let info = &item.volume_info;
    let thumbnail_url = info
        .image_links
        .as_ref()
        .and_then(|links| links.thumbnail.as_ref().or(links.small_thumbnail.as_ref()))
        .cloned()
        .unwrap_or_default();

    Book {
        id: item.id.clone(),
        title: info.title.clone().unwrap_or_default(),
        author: info
            .authors
            .as_ref()
            .and_then(|authors| authors.first())
            .cloned()
            .unwrap_or_default(),
        description: info.description.clone().unwrap_or_default(),
        thumbnail_url,
        published_date: info.published_date.clone().unwrap_or_default(),
        page_count: info.page_count.unwrap_or(0),
        categories: info.categories.clone().unwrap_or_default(),
    }
}

/// レスポンス全体をBook列に変換する。`items` 欠落は空Vec（エラーではない）。
pub fn response_to_domain(response: &BookResponse) -> Vec<Book> {
    response
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(item_to_domain)
        .collect()
}

pub fn entity_to_domain(entity: &BookEntity) -> Book {
    Book {
        id: entity.id.clone(),
        title: entity.title.clone(),
        author: entity.author.clone(),
        description: entity.description.clone(),
        thumbnail_url: entity.thumbnail_url.clone(),
        published_date: entity.published_date.clone(),
        page_count: entity.page_count,
        categories: split_categories(&entity.categories),
    }
}

pub fn to_entity(book: &Book) -> BookEntity {
    BookEntity {
        id: book.id.clone(),
        title: book.title.clone(),
        author: book.author.clone(),
        description: book.description.clone(),
        thumbnail_url: book.thumbnail_url.clone(),
        published_date: book.published_date.clone(),
        page_count: book.page_count,
        categories: join_categories(&book.categories),
    }
}

/// 空文字列は `[""]` ではなく空Vecになる。
pub fn split_categories(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(CATEGORY_SEPARATOR)
        .map(String::from)
        .collect()
}

pub fn join_categories(categories: &[String]) -> String {
    categories.join(CATEGORY_SEPARATOR)
}

impl From<BookItem> for Book {
    fn from(item: BookItem) -> Self {
        item_to_domain(&item)
    }
}

impl From<BookEntity> for Book {
    fn from(entity: BookEntity) -> Self {
        entity_to_domain(&entity)
    }
}

impl From<Book> for BookEntity {
    fn from(book: Book) -> Self {
        to_entity(&book)
    }
}
