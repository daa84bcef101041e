//! # HTTP リクエストハンドラ
//!
//! ハンドラはネゴシエーション済みの [`RequestContext`](crate::middleware::RequestContext)
//! を受け取り、`format` パラメータを自分では検証しない。
//!
//! ## ハンドラ一覧
//!
//! - `status`: バックエンドの稼働状態

pub mod status;

pub use status::{STATUS_ROUTE, StatusState, status};
