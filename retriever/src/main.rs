mod retriever;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::retriever::{retrieve, HistoryClient, RetrieverConfig};

#[derive(Parser)]
#[command(name = "retriever")]
#[command(about = "Descarga el historial de un job MapReduce desde el History Server")]
struct Cli {
    /// Dirección del History Server, ej: http://myserver.com:19888
    #[arg(value_name = "HISTORY_SERVER")]
    history_server: String,

    /// Id del job, ej: job_0123456789012_01234
    #[arg(value_name = "JOB_ID")]
    job_id: String,

    /// Directorio raíz; los JSON quedan en <OUTPUT_DIR>/<JOB_ID>/
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Con argumentos inválidos clap imprime el uso y sale antes de tocar disco o red
    let cli = Cli::parse();

    // Logs a stderr; RUST_LOG tiene prioridad sobre el filtro por defecto
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("retriever=info,reqwest=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RetrieverConfig::new(cli.history_server, cli.job_id, cli.output_dir).with_env();
    let client = HistoryClient::new(&config)?;

    let results = retrieve(&client, &config).await?;

    println!("Job descargado:");
    println!("  id: {}", results.job_id);
    println!("  directorio de salida: {}", results.output_dir);
    println!("  tareas: {}", results.tasks);
    println!("  archivos ({}):", results.files.len());
    for f in &results.files {
        println!("    - {}", f);
    }

    Ok(())
}
