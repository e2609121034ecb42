use tracing_subscriber::EnvFilter;

/// tracingのsubscriberを初期化する。`RUST_LOG` があればそちらを優先。
/// 出力はstderr（stdoutはコマンド結果用）。2回目以降の呼び出しは何もしない。
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}
