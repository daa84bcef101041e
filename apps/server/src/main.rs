//! # GeoAPI サーバー
//!
//! バックエンドの稼働状態などを HTTP で公開するフロントエンド。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `GEOAPI_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `GEOAPI_PORT` | No | ポート番号（デフォルト: `8088`） |
//! | `GEOAPI_PROJECT_DIR` | No | プロジェクトディレクトリ（デフォルト: `.`） |
//! | `LOG_FORMAT` | No | `json` で JSON ログ、それ以外は pretty |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,geoapi=debug`） |
//!
//! データベース接続はプロジェクトディレクトリの `.env` と環境変数から
//! 読み込む（[`geoapi_infra::ProjectSettings`] を参照）。
//!
//! ## 起動方法
//!
//! ```bash
//! GEOAPI_PROJECT_DIR=/srv/geoapi cargo run -p geoapi-server
//! ```

use std::net::SocketAddr;

use anyhow::Context as _;
use geoapi_server::{app_builder::get_application, config::ServerConfig};
use geoapi_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("geoapi-server");
    init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "geoapi-server").entered();

    // 設定読み込み
    let config = ServerConfig::from_env().context("サーバー設定の読み込みに失敗しました")?;

    tracing::info!(
        "GeoAPI サーバーを起動します: {}:{} (project_dir: {})",
        config.host,
        config.port,
        config.project_dir.display()
    );

    let app = get_application(&config.project_dir, None)
        .context("アプリケーションの構築に失敗しました")?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("GeoAPI サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
