use serde::{Deserialize, Serialize};

/// 保存済みBookの行表現。`books` テーブルの列と1対1に対応する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntity {
    /// 主キー
    pub id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub thumbnail_url: String,
    pub published_date: String,
    pub page_count: u32,
    /// カテゴリ列をカンマ連結した文字列。
    /// カテゴリ名自体にカンマを含む場合は復元できない。
    pub categories: String,
}
