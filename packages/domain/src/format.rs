//! # 出力フォーマットと結果型
//!
//! ## Format
//!
//! クライアントが `format` クエリパラメータで要求する出力表現の識別子。
//! 任意の文字列を受け取れるよう文字列の Newtype として表現し、
//! 組み込みのフォーマットは定数として提供する。
//!
//! ## ResultType
//!
//! バックエンドが返す結果の形状を識別するタグ。フォーマッタ登録の
//! キーとして使用する。起動時に確定する閉じた集合であるため enum で表現する。
//!
//! ```rust
//! use geoapi_domain::{Format, ResultType};
//!
//! let requested = Format::new("json");
//! assert_eq!(requested, Format::JSON);
//! assert_eq!(ResultType::Status.to_string(), "Status");
//! ```

use std::borrow::Cow;

use derive_more::Display;
use strum::{EnumIter, IntoStaticStr};

/// 出力フォーマット識別子
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct Format(Cow<'static, str>);

impl Format {
    /// プレーンテキスト
    pub const TEXT: Format = Format(Cow::Borrowed("text"));
    /// XML
    pub const XML: Format = Format(Cow::Borrowed("xml"));
    /// JSON
    pub const JSON: Format = Format(Cow::Borrowed("json"));

    /// リクエストなどで受け取った文字列から作成する
    ///
    /// 妥当性は検証しない。サポート可否の判定はフォーマッタの責務。
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Format {
    fn from(value: &'static str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

/// 結果型タグ
///
/// バリアントを追加した場合、対応するフォーマッタの登録も必要になる。
/// 登録漏れはアプリケーション起動時に検出される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, EnumIter, IntoStaticStr)]
pub enum ResultType {
    /// ステータス照会の結果
    Status,
}
