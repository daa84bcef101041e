//! # ステータス照会の結果
//!
//! バックエンドの稼働状態を表す。`status` が 0 のときのみ健全とみなす。
//!
//! ```rust
//! use geoapi_domain::StatusResult;
//!
//! let ok = StatusResult::ok();
//! assert!(ok.is_healthy());
//!
//! let failed = StatusResult::database_unavailable();
//! assert!(!failed.is_healthy());
//! assert_eq!(failed.status, 700);
//! ```

use chrono::{DateTime, Utc};

/// アプリケーションバージョン（Cargo.toml から取得）
pub const SOFTWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// ステータス照会の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResult {
    /// ステータスコード（0 = 正常）
    pub status:           i32,
    /// 人間向けのメッセージ
    pub message:          String,
    /// サーバーのバージョン
    pub software_version: String,
    /// データベーススキーマのバージョン（取得できた場合のみ）
    pub database_version: Option<String>,
    /// データの最終更新日時（取得できた場合のみ）
    pub data_updated:     Option<DateTime<Utc>>,
}

impl StatusResult {
    /// 正常
    pub const OK: i32 = 0;
    /// データベースに接続できない
    pub const DATABASE_UNAVAILABLE: i32 = 700;

    /// 任意のステータスコードで作成する
    pub fn new(status: i32, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            software_version: SOFTWARE_VERSION.to_string(),
            database_version: None,
            data_updated: None,
        }
    }

    pub fn ok() -> Self {
        Self::new(Self::OK, "OK")
    }

    pub fn database_unavailable() -> Self {
        Self::new(Self::DATABASE_UNAVAILABLE, "Database connection failed")
    }

    pub fn with_data_updated(mut self, data_updated: Option<DateTime<Utc>>) -> Self {
        self.data_updated = data_updated;
        self
    }

    pub fn with_database_version(mut self, database_version: Option<String>) -> Self {
        self.database_version = database_version;
        self
    }

    /// 健全性インジケータ
    pub fn is_healthy(&self) -> bool {
        self.status == Self::OK
    }
}
