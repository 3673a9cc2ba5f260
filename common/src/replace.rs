use std::io::{self, BufRead, Write};

/// Copia `reader` en `writer` reemplazando cada `from` por `to`.
/// Se procesa línea a línea y se respetan los finales de línea originales.
pub fn replace_chars<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    from: char,
    to: char,
) -> io::Result<u64> {
    let mut line = String::new();
    let mut lines = 0u64;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.contains(from) {
            let replaced: String = line
                .chars()
                .map(|c| if c == from { to } else { c })
                .collect();
            writer.write_all(replaced.as_bytes())?;
        } else {
            writer.write_all(line.as_bytes())?;
        }
        lines += 1;
    }

    writer.flush()?;
    Ok(lines)
}
