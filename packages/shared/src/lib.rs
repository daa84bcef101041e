//! # GeoAPI 共有ユーティリティ
//!
//! ワークスペース全体で使用される共通ユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - 他のすべてのクレート（domain, infra, server）から依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum など Web フレームワークへの依存は持たない

pub mod error_response;
pub mod observability;

pub use error_response::ErrorResponse;
