//! # ステータスハンドラ
//!
//! `GET /status` でバックエンドの稼働状態を返す。
//!
//! 既定フォーマットは `text`。`text` で異常を返す場合は
//! 監視ツールが本文を読まずに検知できるよう HTTP 500 にする。
//! `xml` / `json` ではステータスコードを本文に含めるため 200 のまま返す。

use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use geoapi_domain::{ApiResult, Format, ResultType, StatusResult};
use geoapi_infra::StatusApi;

use crate::{
    error::ApiError,
    middleware::{RequestContext, RouteDescriptor},
    response,
};

/// `/status` ルートのメタデータ
pub const STATUS_ROUTE: RouteDescriptor = RouteDescriptor::new(ResultType::Status, Format::TEXT);

/// ステータスハンドラの State
pub struct StatusState {
    pub api: Arc<dyn StatusApi>,
}

/// バックエンドの稼働状態を返す
#[tracing::instrument(skip_all)]
pub async fn status(
    State(state): State<Arc<StatusState>>,
    Extension(context): Extension<RequestContext>,
) -> Result<Response, ApiError> {
    let result = state.api.status().await?;
    let status_code = status_code_for(context.format(), &result);

    if !result.is_healthy() {
        tracing::warn!(
            status = result.status,
            message = %result.message,
            "バックエンドが異常を報告しました"
        );
    }

    let rendered = response::render(&context, &ApiResult::from(result))?;
    Ok((status_code, rendered).into_response())
}

fn status_code_for(format: &Format, result: &StatusResult) -> StatusCode {
    if *format == Format::TEXT && !result.is_healthy() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    }
}
