//! # GeoAPI HTTP サーバー
//!
//! バックエンドの照会結果を HTTP で公開するフロントエンド。
//!
//! ## リクエストの流れ
//!
//! ```text
//! request ─▶ negotiate_format ─▶ handler ─▶ StatusApi ─▶ render ─▶ response
//!                 │
//!                 └─ 未サポートの format → 400（ハンドラは実行されない）
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - フォーマッタ登録・ルート定義・ミドルウェアの組み立て
//! - [`config`] - サーバー設定（環境変数からの読み込み）
//! - [`error`] - API エラー / 起動エラーと HTTP レスポンスへの変換
//! - [`formatter`] - フォーマッタの契約とレジストリ
//! - [`handler`] - HTTP ハンドラ
//! - [`middleware`] - フォーマットネゴシエーション
//! - [`response`] - 結果からレスポンスボディと Content-Type を生成

pub mod app_builder;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod middleware;
pub mod response;
