//! # フォーマットネゴシエーションミドルウェア
//!
//! ハンドラの実行前に `format` クエリパラメータを解決・検証する。
//! `format` パラメータの検証はここでのみ行い、ハンドラは再検証しない。
//!
//! ## 手順
//!
//! 1. ルートの結果型に対応するフォーマッタをレジストリから取得する
//! 2. `format` パラメータを読む。無い（または空の）場合はルートの既定フォーマットを使う
//! 3. フォーマッタがサポートしない場合は 400 を返し、ハンドラを実行しない
//! 4. フォーマッタとフォーマットを [`RequestContext`] としてリクエストに付与する
//!
//! ## 使い方
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let negotiation = NegotiationState {
//!     registry: registry.clone(),
//!     route:    RouteDescriptor::new(ResultType::Status, Format::TEXT),
//! };
//!
//! Router::new()
//!     .route("/status", get(status))
//!     .route_layer(from_fn_with_state(negotiation, negotiate_format))
//! ```

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Query, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use geoapi_domain::{Format, ResultType};

use crate::{
    error::ApiError,
    formatter::{Formatter, FormatterRegistry},
};

/// ルートの型付きメタデータ
///
/// ルート登録時に確定し、ネゴシエーションミドルウェアに渡される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// ハンドラが返す結果型
    pub result_type:    ResultType,
    /// `format` パラメータが無い場合に使うフォーマット
    pub default_format: Format,
}

impl RouteDescriptor {
    pub const fn new(result_type: ResultType, default_format: Format) -> Self {
        Self {
            result_type,
            default_format,
        }
    }
}

/// リクエストごとのネゴシエーション結果
///
/// ミドルウェアがリクエストごとに生成し、ハンドラが `Extension` で受け取る。
/// リクエスト間で共有されることはない。
#[derive(Clone)]
pub struct RequestContext {
    formatter: Arc<dyn Formatter>,
    format:    Format,
}

impl RequestContext {
    pub fn new(formatter: Arc<dyn Formatter>, format: Format) -> Self {
        Self { formatter, format }
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn format(&self) -> &Format {
        &self.format
    }
}

/// ネゴシエーションミドルウェアの状態
#[derive(Clone)]
pub struct NegotiationState {
    pub registry: Arc<FormatterRegistry>,
    pub route:    RouteDescriptor,
}

/// フォーマットを解決する
///
/// `requested` が `None` の場合はルートの既定フォーマットを使う。
pub fn negotiate(
    formatter: Arc<dyn Formatter>,
    route: &RouteDescriptor,
    requested: Option<&str>,
) -> Result<RequestContext, ApiError> {
    let format = match requested {
        Some(value) => Format::new(value),
        None => route.default_format.clone(),
    };

    if !formatter.supports_format(&format) {
        return Err(ApiError::UnsupportedFormat {
            supported: formatter.list_formats().to_vec(),
        });
    }

    Ok(RequestContext::new(formatter, format))
}

/// クエリパラメータから `format` の値を取り出す
///
/// 複数指定された場合は最初の値を使う。空の値は指定なしとみなす。
fn requested_format(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, value)| key == "format" && !value.is_empty())
        .map(|(_, value)| value.as_str())
}

/// フォーマットネゴシエーションミドルウェア
pub async fn negotiate_format(
    State(state): State<NegotiationState>,
    Query(params): Query<Vec<(String, String)>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let formatter = match state.registry.lookup(state.route.result_type) {
        Ok(formatter) => formatter,
        Err(e) => return ApiError::from(e).into_response(),
    };

    let context = match negotiate(formatter, &state.route, requested_format(&params)) {
        Ok(context) => context,
        Err(e) => {
            tracing::info!(
                path = %request.uri().path(),
                requested = ?requested_format(&params),
                "未サポートのフォーマットが要求されました"
            );
            return e.into_response();
        }
    };

    tracing::debug!(format = %context.format(), "フォーマットを決定しました");
    request.extensions_mut().insert(context);

    next.run(request).await
}
