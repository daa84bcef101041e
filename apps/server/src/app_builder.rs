//! # アプリケーション構築
//!
//! フォーマッタ登録・State の初期化・ルーター構築を担当する。
//! `main.rs` はプロセス設定とサーバー起動に集中する。
//!
//! ## 起動時の検証
//!
//! ルーターを返す前に、登録するすべてのルートについて以下を検証する。
//! いずれかが満たされない場合はリクエストを受け付ける前に失敗する。
//!
//! - ルートの結果型にフォーマッタが登録されている
//! - ルートの既定フォーマットをそのフォーマッタがサポートしている

use std::{collections::HashMap, path::Path, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::from_fn_with_state,
    routing::{MethodRouter, get},
};
use geoapi_infra::{PostgresStatusApi, ProjectSettings, StatusApi};
use itertools::Itertools;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::Span;

use crate::{
    error::StartupError,
    formatter::FormatterRegistry,
    handler::{STATUS_ROUTE, StatusState, status},
    middleware::{NegotiationState, RouteDescriptor, negotiate_format},
};

const STATUS_PATH: &str = "/status";

/// ルーターを構築する
///
/// バックエンドとフォーマッタレジストリを受け取り、ルートを検証した上で
/// ルーターを組み立てる。
pub fn build_app(
    api: Arc<dyn StatusApi>,
    registry: Arc<FormatterRegistry>,
) -> Result<Router, StartupError> {
    let status_state = Arc::new(StatusState { api });

    // Request ID レイヤー（ServiceBuilder では上に書いたものが外側）
    // 1. SetRequestIdLayer: クライアント提供値が無ければ UUID を生成
    // 2. TraceLayer: request_id を含むスパンを作成
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    let router = Router::new()
        .merge(negotiated_route(
            &registry,
            STATUS_PATH,
            STATUS_ROUTE,
            get(status),
            status_state,
        )?)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    Ok(router)
}

/// フォーマットネゴシエーション付きのルートを作成する
///
/// ルートの検証と登録は必ずこの関数を通す。
/// 検証に失敗したルートはルーターに登録されない。
fn negotiated_route<S>(
    registry: &Arc<FormatterRegistry>,
    path: &'static str,
    route: RouteDescriptor,
    method_router: MethodRouter<S>,
    state: S,
) -> Result<Router, StartupError>
where
    S: Clone + Send + Sync + 'static,
{
    validate_route(registry, path, &route)?;
    tracing::debug!(
        path,
        result_type = %route.result_type,
        default_format = %route.default_format,
        "ルートを登録しました"
    );

    let negotiation = NegotiationState {
        registry: Arc::clone(registry),
        route,
    };

    Ok(Router::new()
        .route(path, method_router)
        .route_layer(from_fn_with_state(negotiation, negotiate_format))
        .with_state(state))
}

/// プロジェクトディレクトリと環境変数マッピングからアプリケーションを構築する
///
/// `environ` を省略した場合はプロセスの環境変数を使う。
/// データベースへの接続は最初のリクエストまで行わない。
pub fn get_application(
    project_dir: &Path,
    environ: Option<&HashMap<String, String>>,
) -> Result<Router, StartupError> {
    if !project_dir.is_dir() {
        return Err(StartupError::ProjectDirNotFound(project_dir.to_path_buf()));
    }

    let settings = ProjectSettings::load(project_dir, environ)?;
    tracing::info!(
        project_dir = %settings.project_dir.display(),
        pool_size = settings.database.pool_size,
        "プロジェクト設定を読み込みました"
    );

    let api: Arc<dyn StatusApi> = Arc::new(PostgresStatusApi::from_settings(&settings)?);
    let registry = Arc::new(FormatterRegistry::v1()?);

    build_app(api, registry)
}

fn validate_route(
    registry: &FormatterRegistry,
    path: &'static str,
    route: &RouteDescriptor,
) -> Result<(), StartupError> {
    let formatter = registry.lookup(route.result_type)?;

    if !formatter.supports_format(&route.default_format) {
        return Err(StartupError::UnsupportedDefaultFormat {
            path,
            result_type: route.result_type,
            format: route.default_format.clone(),
            supported: formatter.list_formats().iter().join(", "),
        });
    }

    Ok(())
}

/// リクエストごとのスパンを作成する
///
/// `SetRequestIdLayer` が付与した `x-request-id` をスパンのフィールドに含める。
fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}
