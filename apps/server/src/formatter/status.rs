//! # ステータス結果のフォーマッタ
//!
//! | フォーマット | 出力 |
//! |--------------|------|
//! | `text` | 正常なら `OK`、異常なら `ERROR: <message>` |
//! | `xml` | `<status code="N">` 要素と子要素 |
//! | `json` | `status` / `message` / `data_updated` / `software_version` / `database_version` |
//!
//! 取得できなかった付加情報（`data_updated`, `database_version`）は出力しない。

use geoapi_domain::{ApiResult, Format, ResultType, StatusResult};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;

use super::{FormatError, Formatter};

const STATUS_FORMATS: &[Format] = &[Format::TEXT, Format::XML, Format::JSON];

/// [`StatusResult`] のフォーマッタ
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusFormatter;

impl Formatter for StatusFormatter {
    fn result_type(&self) -> ResultType {
        ResultType::Status
    }

    fn list_formats(&self) -> &[Format] {
        STATUS_FORMATS
    }

    fn render(&self, result: &ApiResult, format: &Format) -> Result<String, FormatError> {
        let ApiResult::Status(status) = result;

        match format.as_str() {
            "text" => Ok(render_text(status)),
            "xml" => render_xml(status),
            "json" => render_json(status),
            _ => Err(FormatError::UnsupportedFormat(format.clone())),
        }
    }
}

fn render_text(status: &StatusResult) -> String {
    if status.is_healthy() {
        "OK".to_string()
    } else {
        format!("ERROR: {}", status.message)
    }
}

/// JSON 出力のフィールド順を固定するためのビュー
#[derive(Serialize)]
struct StatusJson<'a> {
    status:           i32,
    message:          &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_updated:     Option<String>,
    software_version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_version: Option<&'a str>,
}

fn render_json(status: &StatusResult) -> Result<String, FormatError> {
    let view = StatusJson {
        status:           status.status,
        message:          &status.message,
        data_updated:     status.data_updated.map(|d| d.to_rfc3339()),
        software_version: &status.software_version,
        database_version: status.database_version.as_deref(),
    };
    Ok(serde_json::to_string(&view)?)
}

fn render_xml(status: &StatusResult) -> Result<String, FormatError> {
    let mut writer = Writer::new(Vec::new());

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;

    let code = status.status.to_string();
    writer
        .write_event(Event::Start(
            BytesStart::new("status").with_attributes([("code", code.as_str())]),
        ))
        .map_err(xml_error)?;

    write_text_element(&mut writer, "message", &status.message)?;
    if let Some(data_updated) = status.data_updated {
        write_text_element(&mut writer, "data_updated", &data_updated.to_rfc3339())?;
    }
    write_text_element(&mut writer, "software_version", &status.software_version)?;
    if let Some(database_version) = &status.database_version {
        write_text_element(&mut writer, "database_version", database_version)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("status")))
        .map_err(xml_error)?;

    String::from_utf8(writer.into_inner()).map_err(xml_error)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), FormatError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn xml_error(e: impl std::fmt::Display) -> FormatError {
    FormatError::Xml(e.to_string())
}
