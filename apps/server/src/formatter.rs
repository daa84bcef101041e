//! # フォーマッタ
//!
//! 結果型ごとに、対応する出力フォーマットとレンダリング処理を提供する。
//!
//! ## 登録
//!
//! [`FormatterRegistry`] は結果型タグ（[`ResultType`]）をキーに、
//! 結果型ごとにちょうど 1 つのフォーマッタを保持する。起動時に構築し、
//! `Arc` で共有した後は変更しない。リクエスト処理中は読み取りのみのため
//! ロックは不要。
//!
//! ```rust
//! use geoapi_domain::{Format, ResultType};
//! use geoapi_server::formatter::FormatterRegistry;
//!
//! let registry = FormatterRegistry::v1().unwrap();
//! let formatter = registry.lookup(ResultType::Status).unwrap();
//! assert!(formatter.supports_format(&Format::JSON));
//! ```

pub mod status;

use std::{collections::HashMap, sync::Arc};

use geoapi_domain::{ApiResult, Format, ResultType};
use strum::IntoEnumIterator;
use thiserror::Error;

pub use status::StatusFormatter;

/// 結果を特定のフォーマットへ変換するフォーマッタ
///
/// 設定以外の状態を持たず、複数のリクエストから同時に参照される。
pub trait Formatter: Send + Sync {
    /// このフォーマッタが扱う結果型
    fn result_type(&self) -> ResultType;

    /// サポートするフォーマット（宣言順）
    fn list_formats(&self) -> &[Format];

    /// フォーマットをサポートしているか
    fn supports_format(&self, format: &Format) -> bool {
        self.list_formats().contains(format)
    }

    /// 結果を指定フォーマットの文字列にレンダリングする
    fn render(&self, result: &ApiResult, format: &Format) -> Result<String, FormatError>;
}

/// レンダリングエラー
#[derive(Debug, Error)]
pub enum FormatError {
    /// フォーマッタがサポートしないフォーマットが指定された
    #[error("フォーマット {0} はサポートされていません")]
    UnsupportedFormat(Format),

    /// JSON の生成に失敗した
    #[error("JSON の生成に失敗しました: {0}")]
    Json(#[from] serde_json::Error),

    /// XML の生成に失敗した
    #[error("XML の生成に失敗しました: {0}")]
    Xml(String),
}

/// フォーマッタ登録エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// 結果型のフォーマッタが登録されていない
    #[error("結果型 {0} のフォーマッタが登録されていません")]
    MissingFormatter(ResultType),

    /// 同じ結果型に 2 つ目のフォーマッタを登録しようとした
    #[error("結果型 {0} のフォーマッタが既に登録されています")]
    DuplicateFormatter(ResultType),

    /// 登録キーとフォーマッタの結果型が一致しない
    #[error("結果型 {registered} のキーに {actual} 用のフォーマッタが渡されました")]
    MismatchedFormatter {
        registered: ResultType,
        actual:     ResultType,
    },
}

/// 結果型ごとのフォーマッタを保持するレジストリ
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: HashMap<ResultType, Arc<dyn Formatter>>,
}

impl FormatterRegistry {
    /// 空のレジストリを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 既知のすべての結果型について v1 フォーマッタを登録したレジストリを作成する
    pub fn v1() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for result_type in ResultType::iter() {
            registry.register(result_type, create_v1_formatter(result_type))?;
        }
        Ok(registry)
    }

    /// フォーマッタを登録する
    pub fn register(
        &mut self,
        result_type: ResultType,
        formatter: Arc<dyn Formatter>,
    ) -> Result<(), RegistryError> {
        if formatter.result_type() != result_type {
            return Err(RegistryError::MismatchedFormatter {
                registered: result_type,
                actual:     formatter.result_type(),
            });
        }
        if self.formatters.contains_key(&result_type) {
            return Err(RegistryError::DuplicateFormatter(result_type));
        }

        self.formatters.insert(result_type, formatter);
        Ok(())
    }

    /// 結果型に対応するフォーマッタを取得する
    pub fn lookup(&self, result_type: ResultType) -> Result<Arc<dyn Formatter>, RegistryError> {
        self.formatters
            .get(&result_type)
            .cloned()
            .ok_or(RegistryError::MissingFormatter(result_type))
    }
}

fn create_v1_formatter(result_type: ResultType) -> Arc<dyn Formatter> {
    match result_type {
        ResultType::Status => Arc::new(StatusFormatter),
    }
}
