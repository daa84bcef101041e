//! # GeoAPI インフラ層
//!
//! HTTP フロントエンドから利用するバックエンド照会の実装を提供する。
//!
//! ## 責務
//!
//! - **プロジェクト設定**: プロジェクトディレクトリの `.env` と環境変数の合成
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **バックエンド照会**: [`StatusApi`] トレイトとその PostgreSQL 実装
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールの作成
//! - [`error`] - インフラ層エラー定義
//! - [`settings`] - プロジェクト設定の読み込み
//! - [`status_api`] - ステータス照会
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use geoapi_infra::{PostgresStatusApi, ProjectSettings, StatusApi};
//!
//! let settings = ProjectSettings::load(project_dir, None)?;
//! let api = PostgresStatusApi::from_settings(&settings)?;
//! let status = api.status().await?;
//! ```

pub mod db;
pub mod error;
pub mod settings;
pub mod status_api;

pub use error::{InfraError, InfraErrorKind};
pub use settings::{DatabaseSettings, ProjectSettings};
pub use status_api::{PostgresStatusApi, StatusApi};
