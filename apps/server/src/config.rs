//! # サーバー設定
//!
//! 環境変数からプロセスの設定を読み込む。
//! データベースなどプロジェクト単位の設定は
//! [`ProjectSettings`](geoapi_infra::ProjectSettings) が扱う。
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `GEOAPI_HOST` | `0.0.0.0` | バインドアドレス |
//! | `GEOAPI_PORT` | `8088` | ポート番号 |
//! | `GEOAPI_PROJECT_DIR` | `.` | プロジェクトディレクトリ |

use std::{env, path::PathBuf};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8088;
const DEFAULT_PROJECT_DIR: &str = ".";

/// サーバー設定の読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEOAPI_PORT は有効なポート番号である必要があります: {0:?}")]
    InvalidPort(String),
}

/// サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host:        String,
    /// ポート番号
    pub port:        u16,
    /// プロジェクトディレクトリ
    pub project_dir: PathBuf,
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// キーから値を引く関数で設定を構築する
    ///
    /// テストでプロセスの環境変数を書き換えずに済むよう分離している。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("GEOAPI_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: lookup("GEOAPI_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            project_dir: lookup("GEOAPI_PROJECT_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_PROJECT_DIR), PathBuf::from),
        })
    }
}
