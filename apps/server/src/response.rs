//! # レスポンス生成
//!
//! ネゴシエーション済みのフォーマッタとフォーマットで結果をレンダリングし、
//! フォーマットに対応する Content-Type を付与する。

use axum::{
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use geoapi_domain::{ApiResult, Format};

use crate::{formatter::FormatError, middleware::RequestContext};

/// フォーマットに対応する Content-Type
///
/// `text` と `xml` 以外はすべて JSON として扱う。
pub fn content_type_for(format: &Format) -> &'static str {
    match format.as_str() {
        "text" => "text/plain; charset=utf-8",
        "xml" => "text/xml; charset=utf-8",
        _ => "application/json",
    }
}

/// レンダリング済みのボディと Content-Type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub body:         String,
    pub content_type: &'static str,
}

impl IntoResponse for RenderedBody {
    fn into_response(self) -> Response {
        (
            [(
                header::CONTENT_TYPE,
                HeaderValue::from_static(self.content_type),
            )],
            self.body,
        )
            .into_response()
    }
}

/// リクエストコンテキストに従って結果をレンダリングする
pub fn render(context: &RequestContext, result: &ApiResult) -> Result<RenderedBody, FormatError> {
    let format = context.format();
    let body = context.formatter().render(result, format)?;

    tracing::debug!(
        result_type = %result.result_type(),
        format = %format,
        bytes = body.len(),
        "レスポンスをレンダリングしました"
    );

    Ok(RenderedBody {
        body,
        content_type: content_type_for(format),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use geoapi_domain::StatusResult;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::formatter::StatusFormatter;

    #[rstest]
    #[case(Format::TEXT, "text/plain; charset=utf-8")]
    #[case(Format::XML, "text/xml; charset=utf-8")]
    #[case(Format::JSON, "application/json")]
    #[case(Format::new("geojson"), "application/json")]
    fn test_フォーマットごとのcontent_type(#[case] format: Format, #[case] expected: &str) {
        assert_eq!(content_type_for(&format), expected);
    }

    #[test]
    fn test_renderはフォーマッタの出力とcontent_typeを返す() {
        let context = RequestContext::new(Arc::new(StatusFormatter), Format::TEXT);

        let rendered = render(&context, &ApiResult::from(StatusResult::ok())).unwrap();

        assert_eq!(
            rendered,
            RenderedBody {
                body:         "OK".to_string(),
                content_type: "text/plain; charset=utf-8",
            }
        );
    }

    #[test]
    fn test_rendered_bodyは200とcontent_typeヘッダーになる() {
        let rendered = RenderedBody {
            body:         "{}".to_string(),
            content_type: "application/json",
        };

        let response = rendered.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }
}
