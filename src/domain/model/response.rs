use serde::{Deserialize, Serialize};

/// 検索API（volumes）のレスポンス。
/// `items` が欠落している場合は「結果なし」を意味する。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    #[serde(default)]
    pub items: Option<Vec<BookItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookItem {
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

/// 全フィールドが欠落し得る。欠落はMapperで既定値に置き換える。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default)]
    pub small_thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
