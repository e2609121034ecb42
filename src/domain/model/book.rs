use serde::{Deserialize, Serialize};

/// Book — 呼び出し側が扱う唯一のBook表現。
/// 検索結果・保存済みレコードのどちらもこの形に変換してから渡す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// カタログ内で一意。検索結果と保存済みレコードの結合キー。
    pub id: String,
    pub title: String,
    /// 表示用の著者名（複数著者は先頭の1名に縮約済み）
    pub author: String,
    pub description: String,
    pub thumbnail_url: String,
    /// 自由形式（"2024" / "2024-03-01" など）。日付としてはパースしない。
    pub published_date: String,
    pub page_count: u32,
    pub categories: Vec<String>,
}
