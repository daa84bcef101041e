//! # PostgreSQL データベース接続管理
//!
//! 接続プールは遅延接続で作成する。アプリケーションの構築時には
//! データベースへ接続せず、最初の照会で初めて接続を確立する。
//! これにより、データベース停止中でもサーバーは起動し、
//! ステータス照会で異常を報告できる。

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{error::InfraError, settings::DatabaseSettings};

/// PostgreSQL 接続プールを遅延接続で作成する
///
/// 接続 URL の構文が不正な場合のみエラーを返す。
///
/// ```rust,ignore
/// use geoapi_infra::{db, settings::DatabaseSettings};
///
/// let pool = db::create_lazy_pool(&DatabaseSettings::default())?;
/// ```
pub fn create_lazy_pool(settings: &DatabaseSettings) -> Result<PgPool, InfraError> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.pool_size)
        .acquire_timeout(settings.connect_timeout)
        .connect_lazy(&settings.url)?;
    Ok(pool)
}
