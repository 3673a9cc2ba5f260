use anyhow::Result;
use clap::Parser;
use common::fastq::{collect_headers_from_gz, HeaderComparison};
use std::{io, path::PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "fastq-comparer")]
#[command(about = "Compara las cabeceras de lectura de dos FASTQ comprimidos con gzip")]
#[command(long_about = "Compara las cabeceras de lectura de dos FASTQ comprimidos con gzip.

Marcas del informe (entre paréntesis, la marca equivalente en inglés):
  iguales:                 (equal:)
  tamaño:                  (size:)
  ### diferencias ###      (### differences ###)
  no se muestran: el número de lecturas difiere
                           (not shown as number of reads differ)")]
struct Cli {
    #[arg(value_name = "FASTQ1_GZ")]
    first: PathBuf,

    #[arg(value_name = "FASTQ2_GZ")]
    second: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tools::init_tracing();

    // Si falta alguno de los dos no se lee nada
    if !(cli.first.is_file() && cli.second.is_file()) {
        println!("una de las rutas de entrada no existe");
        return Ok(());
    }

    println!("### cargando archivos ###");
    let left = collect_headers_from_gz(&cli.first)?;
    let right = collect_headers_from_gz(&cli.second)?;
    debug!(
        "{}: {} cabeceras, {}: {} cabeceras",
        cli.first.display(),
        left.len(),
        cli.second.display(),
        right.len()
    );

    let comparison = HeaderComparison::new(left, right);
    let stdout = io::stdout();
    comparison.write_report(stdout.lock())?;

    Ok(())
}
