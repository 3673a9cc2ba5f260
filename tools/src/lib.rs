use tracing_subscriber::EnvFilter;

/// Logs siempre a stderr: stdout es la salida de datos de estas herramientas.
/// RUST_LOG tiene prioridad; por defecto sólo avisos.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
