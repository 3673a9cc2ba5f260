use anyhow::Result;
use clap::Parser;
use common::replace::replace_chars;
use std::io::{self, BufWriter};
use tracing::debug;

#[derive(Parser)]
#[command(name = "char-replacer")]
#[command(about = "Reemplaza un carácter por otro en cada línea de stdin y lo escribe en stdout")]
struct Cli {
    /// Carácter a reemplazar
    #[arg(value_name = "DE", allow_hyphen_values = true)]
    from: char,

    /// Carácter con el que se reemplaza
    #[arg(value_name = "A", allow_hyphen_values = true)]
    to: char,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tools::init_tracing();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let lines = replace_chars(stdin.lock(), BufWriter::new(stdout.lock()), cli.from, cli.to)?;

    debug!("{} líneas procesadas ({:?} -> {:?})", lines, cli.from, cli.to);
    Ok(())
}
