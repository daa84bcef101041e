//! # サーバーのエラー定義
//!
//! リクエスト処理中のエラー（[`ApiError`]）と、起動時のエラー（[`StartupError`]）。
//!
//! | エラー | ステータス | ボディ |
//! |--------|------------|--------|
//! | 未サポートのフォーマット | 400 | `text/plain` の使用方法メッセージ |
//! | バックエンド・レンダリング失敗 | 500 | RFC 9457 Problem Details（JSON） |

use std::path::PathBuf;

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use geoapi_domain::{Format, ResultType};
use geoapi_infra::InfraError;
use geoapi_shared::ErrorResponse;
use itertools::Itertools;
use thiserror::Error;

use crate::formatter::{FormatError, RegistryError};

/// リクエスト処理中のエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// `format` パラメータがフォーマッタの対応外
    #[error("Parameter 'format' must be one of: {}", .supported.iter().join(", "))]
    UnsupportedFormat { supported: Vec<Format> },

    /// バックエンド照会の失敗
    #[error("バックエンド照会に失敗しました: {0}")]
    Backend(#[from] InfraError),

    /// レンダリングの失敗
    #[error("レスポンスのレンダリングに失敗しました: {0}")]
    Render(#[from] FormatError),

    /// フォーマッタの取得失敗
    #[error("フォーマッタを取得できませんでした: {0}")]
    Registry(#[from] RegistryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::UnsupportedFormat { .. } => (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                self.to_string(),
            )
                .into_response(),
            ApiError::Backend(ref e) => {
                tracing::error!(
                    error.category = "infrastructure",
                    error.kind = "backend",
                    span_trace = %e.span_trace(),
                    "{}",
                    self
                );
                internal_error_response()
            }
            ApiError::Render(_) => {
                tracing::error!(error.category = "application", error.kind = "render", "{}", self);
                internal_error_response()
            }
            ApiError::Registry(_) => {
                tracing::error!(error.category = "application", error.kind = "registry", "{}", self);
                internal_error_response()
            }
        }
    }
}

fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error()),
    )
        .into_response()
}

/// アプリケーション構築時のエラー
///
/// 設定不備はリクエストを受け付ける前にここで検出する。
#[derive(Debug, Error)]
pub enum StartupError {
    /// ルートの結果型にフォーマッタが無い
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// ルートの既定フォーマットをフォーマッタがサポートしない
    #[error(
        "ルート {path} の既定フォーマット {format} は結果型 {result_type} のフォーマッタでサポートされていません（サポート: {supported}）"
    )]
    UnsupportedDefaultFormat {
        path:        &'static str,
        result_type: ResultType,
        format:      Format,
        supported:   String,
    },

    /// プロジェクト設定の読み込み失敗
    #[error("プロジェクト設定を読み込めませんでした: {0}")]
    Settings(#[from] InfraError),

    /// プロジェクトディレクトリが存在しない
    #[error("プロジェクトディレクトリが存在しません: {}", .0.display())]
    ProjectDirNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_未サポートのフォーマットは400のテキストになる() {
        let err = ApiError::UnsupportedFormat {
            supported: vec![Format::TEXT, Format::XML, Format::JSON],
        };

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            body_of(response).await,
            "Parameter 'format' must be one of: text, xml, json"
        );
    }

    #[tokio::test]
    async fn test_レンダリング失敗は500のproblem_detailsになる() {
        let err = ApiError::Render(FormatError::UnsupportedFormat(Format::new("csv")));

        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body_of(response).await).unwrap();
        assert_eq!(json["status"], 500);
        assert_eq!(json["type"], "https://geoapi.example.com/errors/internal-error");
    }
}
