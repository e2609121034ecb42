//! 設定の読み込み。
//!
//! 既定値 ← TOMLファイル（任意）← `BOOKSHELF_*` 環境変数 の順に上書きする。
//! ネストしたキーは `__` で区切る（例: `BOOKSHELF_API__API_KEY`）。

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "BOOKSHELF_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub store: StoreSettings,
    /// `RUST_LOG` 未設定時のフィルタ
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    pub path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            store: StoreSettings::default(),
            log_level: "info".into(),
        }
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://www.googleapis.com/books/v1".into(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("bookshelf.db"),
        }
    }
}

impl Settings {
    /// 設定を読み込む。`file` が存在しなければ既定値と環境変数のみ。
    pub fn load(file: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(file)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
    }

    fn figment(file: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Settings::default()));
        match file {
            Some(path) => figment.merge(Toml::file(path)),
            None => figment,
        }
    }
}
