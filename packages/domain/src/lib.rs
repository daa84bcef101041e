//! # GeoAPI ドメイン層
//!
//! バックエンドが返す結果型と、その出力表現（フォーマット）を定義する。
//!
//! ## モジュール構成
//!
//! - [`format`] - 出力フォーマットと結果型タグ
//! - [`status`] - ステータス照会の結果
//! - [`result`] - レンダリング対象となる結果の閉じた集合
//!
//! ## 依存関係
//!
//! ```text
//! server → infra → domain
//!    ↘              ↑
//!      ─────────────┘
//! ```
//!
//! ドメイン層は HTTP やデータベースの詳細を知らない。

pub mod format;
pub mod result;
pub mod status;

pub use format::{Format, ResultType};
pub use result::ApiResult;
pub use status::StatusResult;
