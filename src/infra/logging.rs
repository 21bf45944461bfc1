use tracing_subscriber::EnvFilter;

/// Поставить fmt-подписчика tracing. RUST_LOG перекрывает `default_filter`.
///
/// Повторный вызов (например, из нескольких тестов) ничего не ломает.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
