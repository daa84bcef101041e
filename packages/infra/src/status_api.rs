//! # ステータス照会
//!
//! HTTP フロントエンドが `/status` で公開するバックエンド照会。
//!
//! データベースに到達できない場合はエラーではなく、
//! 異常を示す [`StatusResult`]（ステータスコード 700）を返す。
//! 稼働状態の報告そのものがこの照会の目的であるため。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use geoapi_domain::StatusResult;
use sqlx::PgPool;

use crate::{db, error::InfraError, settings::ProjectSettings};

/// ステータス照会のインターフェース
///
/// ハンドラはこのトレイト経由でバックエンドを呼び出す。
/// テストではスタブ実装に差し替える。
#[async_trait]
pub trait StatusApi: Send + Sync {
    /// バックエンドの稼働状態を取得する
    async fn status(&self) -> Result<StatusResult, InfraError>;
}

/// PostgreSQL を照会する [`StatusApi`] 実装
#[derive(Debug, Clone)]
pub struct PostgresStatusApi {
    pool: PgPool,
}

impl PostgresStatusApi {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// プロジェクト設定から遅延接続のプールを作成して構築する
    pub fn from_settings(settings: &ProjectSettings) -> Result<Self, InfraError> {
        Ok(Self::new(db::create_lazy_pool(&settings.database)?))
    }

    async fn query_status(&self) -> Result<StatusResult, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;

        let data_updated: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT lastimportdate FROM import_status LIMIT 1")
                .fetch_optional(&mut *conn)
                .await?
                .flatten();

        let database_version: Option<String> =
            sqlx::query_scalar("SELECT value FROM geoapi_properties WHERE property = $1")
                .bind("database_version")
                .fetch_optional(&mut *conn)
                .await?
                .flatten();

        Ok(StatusResult::ok()
            .with_data_updated(data_updated)
            .with_database_version(database_version))
    }
}

#[async_trait]
impl StatusApi for PostgresStatusApi {
    #[tracing::instrument(skip_all)]
    async fn status(&self) -> Result<StatusResult, InfraError> {
        match self.query_status().await {
            Ok(result) => Ok(result),
            Err(e) => {
                tracing::warn!(error = %e, "ステータス照会でデータベースに接続できませんでした");
                Ok(StatusResult::database_unavailable())
            }
        }
    }
}
