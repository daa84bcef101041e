//! # Observability 基盤
//!
//! サーバーのトレーシング初期化を提供する。
//!
//! | 環境変数 | 値 | 説明 |
//! |----------|----|------|
//! | `LOG_FORMAT` | `json` / `pretty` | 出力形式（未設定・不正値は `pretty`） |
//! | `RUST_LOG` | EnvFilter 構文 | 未設定時は [`DEFAULT_DIRECTIVES`] |

/// `RUST_LOG` が未設定のときのフィルタ
pub const DEFAULT_DIRECTIVES: &str = "info,geoapi=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（本番向け）
    Json,
    /// 人間向けの複数行出力（開発向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 不正な値は `Pretty` として扱い、stderr に警告を出す。
    /// subscriber 初期化前に呼ばれるので `tracing` は使えない。
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "pretty" | "" => Self::Pretty,
            other => {
                eprintln!("WARNING: LOG_FORMAT={other:?} は不明な値のため pretty を使います");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// サービス名（起動時のログに出力する）
    pub service_name:       String,
    pub log_format:         LogFormat,
    /// `RUST_LOG` が未設定のときに使うフィルタ
    pub default_directives: String,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
            default_directives: DEFAULT_DIRECTIVES.to_string(),
        }
    }

    /// `LOG_FORMAT` から出力形式を決めて設定を作る
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }
}

/// 設定に従って subscriber を組み立てる
///
/// グローバルには登録しない。テストでは `tracing::subscriber::with_default` で使う。
#[cfg(feature = "observability")]
pub fn build_subscriber(config: &TracingConfig) -> impl tracing::Subscriber + Send + Sync + use<> {
    subscriber_with_writer(config, std::io::stdout)
}

#[cfg(feature = "observability")]
fn subscriber_with_writer<W>(
    config: &TracingConfig,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync + use<W>
where
    W: for<'w> tracing_subscriber::fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_directives));

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(writer)
            .boxed(),
    };

    // ErrorLayer によりインフラ層のエラーが生成時点の SpanTrace を保持できる
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
}

/// subscriber をグローバルに登録する
///
/// 既に登録済みの場合は何もせず stderr に警告を出す。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::util::SubscriberInitExt;

    if let Err(e) = build_subscriber(&config).try_init() {
        eprintln!("WARNING: トレーシングを初期化できませんでした: {e}");
        return;
    }

    tracing::debug!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parseは大文字小文字と空白を無視する() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::parse("Pretty"), LogFormat::Pretty);
    }

    #[test]
    fn test_parseは空や不明な値でprettyになる() {
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Pretty);
    }

    #[test]
    fn test_newは既定のフィルタを設定する() {
        let config = TracingConfig::new("geoapi-server", LogFormat::Json);

        assert_eq!(
            config,
            TracingConfig {
                service_name:       "geoapi-server".to_string(),
                log_format:         LogFormat::Json,
                default_directives: "info,geoapi=debug".to_string(),
            }
        );
    }

    /// 書き込まれたログを保持するテスト用ライター
    #[cfg(feature = "observability")]
    #[derive(Clone, Default)]
    struct CapturedLog(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    #[cfg(feature = "observability")]
    impl CapturedLog {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect()
        }
    }

    #[cfg(feature = "observability")]
    impl std::io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[cfg(feature = "observability")]
    fn log_one_event(log_format: LogFormat) -> Vec<String> {
        let captured = CapturedLog::default();
        let writer = captured.clone();
        let mut config = TracingConfig::new("test", log_format);
        config.default_directives = "info".to_string();
        let subscriber = subscriber_with_writer(&config, move || writer.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(format = "xml", "フォーマットを決定しました");
        });

        captured.lines()
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_prettyは1イベントを複数行で出力する() {
        let lines = log_one_event(LogFormat::Pretty);

        assert!(lines.len() > 1, "複数行で出力されること: {lines:?}");
        assert!(lines.iter().any(|line| line.contains("フォーマットを決定しました")));
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_jsonは1イベントを1行で出力する() {
        let lines = log_one_event(LogFormat::Json);

        assert_eq!(lines.len(), 1, "1 行で出力されること: {lines:?}");
        let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(json["message"], "フォーマットを決定しました");
        assert_eq!(json["format"], "xml");
    }

    #[cfg(feature = "observability")]
    #[rstest::rstest]
    #[case(LogFormat::Pretty)]
    #[case(LogFormat::Json)]
    fn test_build_subscriberでspan_traceが取得できる(#[case] log_format: LogFormat) {
        let subscriber = build_subscriber(&TracingConfig::new("test", log_format));

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("request");
            let _guard = span.enter();

            let trace = tracing_error::SpanTrace::capture();
            assert_eq!(trace.status(), tracing_error::SpanTraceStatus::CAPTURED);
        });
    }
}
