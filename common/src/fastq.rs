use anyhow::{bail, Context, Result};
use flate2::bufread::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

/// Cada lectura FASTQ ocupa 4 líneas; la cabecera es la primera.
pub const LINES_PER_RECORD: usize = 4;

/// Cuántos pares de cabeceras se imprimen como control manual.
pub const PREVIEW_PAIRS: usize = 10;

/// Posición (0-based) del token con el nombre del lane en el nombre de archivo:
/// <fecha>_<secuenciador>_<run>_<flowcell>_L<lane>_<forward/reverse>
pub const LANE_TOKEN_INDEX: usize = 4;

const READ_BUFFER: usize = 64 * 1024;

/* =========================
   Apertura de archivos
   ========================= */

/// Abre un FASTQ comprimido con gzip (soporta varios miembros gzip concatenados).
pub fn open_gz(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("no se pudo abrir {}", path.display()))?;
    let decoder = MultiGzDecoder::new(BufReader::with_capacity(READ_BUFFER, file));
    Ok(Box::new(BufReader::with_capacity(READ_BUFFER, decoder)))
}

/// Abre un FASTQ plano, o comprimido si el nombre termina en ".gz".
pub fn open_fastq(path: &Path) -> Result<Box<dyn BufRead>> {
    let is_gz = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("gz"))
        .unwrap_or(false);

    if is_gz {
        return open_gz(path);
    }

    let file =
        File::open(path).with_context(|| format!("no se pudo abrir {}", path.display()))?;
    Ok(Box::new(BufReader::with_capacity(READ_BUFFER, file)))
}

/* =========================
   Comparación de cabeceras
   ========================= */

/// Lee una línea de cada 4 empezando por la 0 y devuelve las cabeceras ordenadas,
/// sin el salto de línea final.
pub fn collect_headers<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut headers = Vec::new();

    for (counter, line) in reader.lines().enumerate() {
        let line = line?;
        if counter % LINES_PER_RECORD == 0 {
            headers.push(line.trim_end_matches('\r').to_string());
        }
    }

    headers.sort();
    Ok(headers)
}

pub fn collect_headers_from_gz(path: &Path) -> Result<Vec<String>> {
    let reader = open_gz(path)?;
    collect_headers(reader).with_context(|| format!("error leyendo {}", path.display()))
}

/// Cabeceras ordenadas de dos archivos, listas para comparar.
#[derive(Debug, Clone)]
pub struct HeaderComparison {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl HeaderComparison {
    pub fn new(left: Vec<String>, right: Vec<String>) -> Self {
        Self { left, right }
    }

    pub fn is_equal(&self) -> bool {
        self.left == self.right
    }

    pub fn sizes(&self) -> (usize, usize) {
        (self.left.len(), self.right.len())
    }

    /// Primeros `n` pares lado a lado (menos si alguno de los archivos es más corto).
    pub fn preview(&self, n: usize) -> impl Iterator<Item = (&str, &str)> {
        self.left
            .iter()
            .zip(self.right.iter())
            .take(n)
            .map(|(l, r)| (l.as_str(), r.as_str()))
    }

    /// Pares distintos por posición. `None` si el número de lecturas difiere,
    /// porque entonces la comparación posición a posición no tiene sentido.
    pub fn differences(&self) -> Option<Vec<(usize, &str, &str)>> {
        if self.left.len() != self.right.len() {
            return None;
        }

        let diffs = self
            .left
            .iter()
            .zip(self.right.iter())
            .enumerate()
            .filter(|(_, (l, r))| l != r)
            .map(|(i, (l, r))| (i, l.as_str(), r.as_str()))
            .collect();
        Some(diffs)
    }

    /// Escribe el informe completo (a partir del banner de comparación).
    pub fn write_report<W: Write>(&self, mut w: W) -> io::Result<()> {
        let equal = self.is_equal();
        let (n1, n2) = self.sizes();

        writeln!(w, "### comparando archivos ###")?;
        writeln!(w, "iguales: {}", equal)?;
        writeln!(w, "tamaño: {} - {}", n1, n2)?;
        for (l, r) in self.preview(PREVIEW_PAIRS) {
            writeln!(w, "{:60} - {}", l, r)?;
        }

        writeln!(w, "### diferencias ###")?;
        if equal {
            writeln!(w, "n.a.")?;
        } else {
            match self.differences() {
                None => writeln!(w, "no se muestran: el número de lecturas difiere")?,
                Some(diffs) => {
                    for (_, l, r) in diffs {
                        writeln!(w, "{:60} - {}", l, r)?;
                    }
                }
            }
        }

        w.flush()
    }
}

/* =========================
   Nombres de lectura únicos
   ========================= */

/// Extrae el nombre del lane del nombre de archivo (sólo el último componente de la ruta).
///   150616_SN163_0648_AHKYLMADXX_L1_1.fq  ->  "L1"
pub fn lane_name(path: &Path) -> Result<String> {
    let file_name = match path.file_name().and_then(|f| f.to_str()) {
        Some(name) => name,
        None => bail!("nombre de archivo inválido: {}", path.display()),
    };

    match file_name.split('_').nth(LANE_TOKEN_INDEX) {
        Some(lane) if !lane.is_empty() => Ok(lane.to_string()),
        _ => bail!(
            "el nombre {} no tiene el formato <fecha>_<secuenciador>_<run>_<flowcell>_<lane>_<...>",
            file_name
        ),
    }
}

/// Inserta `-<lane>` justo antes de la primera '/' de la cabecera.
/// Devuelve `None` si la cabecera no contiene '/'.
pub fn uniquify_header(line: &str, lane: &str) -> Option<String> {
    line.split_once('/')
        .map(|(prefix, suffix)| format!("{}-{}/{}", prefix, lane, suffix))
}

/// Reescribe todas las cabeceras (una línea de cada 4, empezando por la 0);
/// secuencia, '+' y calidades pasan sin cambios. Devuelve las cabeceras reescritas.
pub fn uniquify_reads<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    lane: &str,
) -> Result<u64> {
    let mut line = String::new();
    let mut counter = 0usize;
    let mut rewritten = 0u64;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        if counter % LINES_PER_RECORD == 0 {
            match uniquify_header(&line, lane) {
                Some(header) => writer.write_all(header.as_bytes())?,
                None => bail!(
                    "la cabecera de la línea {} no contiene '/': {}",
                    counter + 1,
                    line.trim_end()
                ),
            }
            rewritten += 1;
        } else {
            writer.write_all(line.as_bytes())?;
        }
        counter += 1;
    }

    writer.flush()?;
    Ok(rewritten)
}
