//! bookshelf-repo
//!
//! 検索API（リモート）と保存済みBook（ローカル）を単一のドメインモデルで扱うデータアクセス層。

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod interface;
pub mod logging;
