use anyhow::Result;
use clap::Parser;
use common::fastq::{lane_name, open_fastq, uniquify_reads};
use std::{
    io::{self, BufWriter},
    path::PathBuf,
};
use tracing::info;

// Uso típico sobre un directorio de fixtures comprimidos:
//   for f in *.fq.gz; do read-name-uniquifier "$f" | gzip > "new_$f" && mv "new_$f" "$f"; done
#[derive(Parser)]
#[command(name = "read-name-uniquifier")]
#[command(about = "Agrega el lane del nombre de archivo a cada nombre de lectura para hacerlo único")]
struct Cli {
    /// FASTQ (plano o .gz) con nombre <fecha>_<secuenciador>_<run>_<flowcell>_<lane>_<1|2>
    #[arg(value_name = "FASTQ")]
    input: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tools::init_tracing();

    let lane = lane_name(&cli.input)?;
    let reader = open_fastq(&cli.input)?;

    let stdout = io::stdout();
    let rewritten = uniquify_reads(reader, BufWriter::new(stdout.lock()), &lane)?;

    info!(
        "{}: {} cabeceras reescritas con lane {}",
        cli.input.display(),
        rewritten,
        lane
    );
    Ok(())
}
