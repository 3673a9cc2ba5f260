use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn temp_dir(sub: &str) -> PathBuf {
    let base = std::env::temp_dir().join("tools_cli_tests").join(sub);
    let _ = fs::remove_dir_all(&base);
    fs::create_dir_all(&base).unwrap();
    base
}

fn write_gz(path: &Path, content: &str) {
    let file = fs::File::create(path).unwrap();
    let mut enc = GzEncoder::new(file, Compression::default());
    enc.write_all(content.as_bytes()).unwrap();
    enc.finish().unwrap();
}

fn run_with_stdin(bin: &str, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // si el proceso ya terminó (argumentos inválidos) la escritura puede fallar
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

/* =========================
   char-replacer
   ========================= */

#[test]
fn char_replacer_reemplaza_en_stdin() {
    let out = run_with_stdin(
        env!("CARGO_BIN_EXE_char-replacer"),
        &["-", "_"],
        "a-b\nc-d-e\n",
    );
    assert!(out.status.success());
    assert_eq!(stdout(&out), "a_b\nc_d_e\n");
}

#[test]
fn char_replacer_con_argumentos_de_mas_no_transforma() {
    let out = run_with_stdin(
        env!("CARGO_BIN_EXE_char-replacer"),
        &["a", "b", "c"],
        "aaa\n",
    );
    assert!(!out.status.success());
    assert!(!stdout(&out).contains("bbb"));
}

#[test]
fn char_replacer_rechaza_mas_de_un_caracter() {
    let out = run_with_stdin(env!("CARGO_BIN_EXE_char-replacer"), &["ab", "c"], "ab\n");
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

/* =========================
   fastq-comparer
   ========================= */

#[test]
fn fastq_comparer_informa_igualdad() {
    let tmp = temp_dir("cmp_iguales");
    let a = tmp.join("a.fq.gz");
    let b = tmp.join("b.fq.gz");
    write_gz(&a, "@r2/1\nAC\n+\nII\n@r1/1\nGT\n+\nII\n");
    write_gz(&b, "@r1/1\nGT\n+\nII\n@r2/1\nAC\n+\nII\n");

    let out = Command::new(env!("CARGO_BIN_EXE_fastq-comparer"))
        .arg(&a)
        .arg(&b)
        .output()
        .unwrap();
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.starts_with("### cargando archivos ###"));
    assert!(text.contains("iguales: true"));
    assert!(text.contains("tamaño: 2 - 2"));
    assert!(text.trim_end().ends_with("n.a."));
}

#[test]
fn fastq_comparer_con_archivo_inexistente_no_compara() {
    let tmp = temp_dir("cmp_inexistente");
    let a = tmp.join("a.fq.gz");
    write_gz(&a, "@r1/1\nAC\n+\nII\n");

    let out = Command::new(env!("CARGO_BIN_EXE_fastq-comparer"))
        .arg(&a)
        .arg(tmp.join("no_existe.fq.gz"))
        .output()
        .unwrap();

    let text = stdout(&out);
    assert!(text.contains("una de las rutas de entrada no existe"));
    assert!(!text.contains("### cargando archivos ###"));
}

#[test]
fn fastq_comparer_con_un_solo_argumento_no_lee_nada() {
    let out = Command::new(env!("CARGO_BIN_EXE_fastq-comparer"))
        .arg("solo_uno.fq.gz")
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn fastq_comparer_help_lista_las_marcas_en_ingles() {
    let out = Command::new(env!("CARGO_BIN_EXE_fastq-comparer"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(out.status.success());

    let text = stdout(&out);
    for marker in [
        "equal:",
        "size:",
        "### differences ###",
        "not shown as number of reads differ",
    ] {
        assert!(text.contains(marker), "falta {marker:?} en --help");
    }
}

/* =========================
   read-name-uniquifier
   ========================= */

#[test]
fn read_name_uniquifier_sin_argumentos_no_hace_nada() {
    let tmp = temp_dir("uniq_sin_args");

    let out = Command::new(env!("CARGO_BIN_EXE_read-name-uniquifier"))
        .current_dir(&tmp)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
    assert_eq!(fs::read_dir(&tmp).unwrap().count(), 0);
}

#[test]
fn read_name_uniquifier_con_dos_argumentos_no_lee_nada() {
    let tmp = temp_dir("uniq_dos_args");
    let input = tmp.join("150616_SN163_0648_AHKYLMADXX_L1_1.fq");
    fs::write(&input, "@r/1\nA\n+\nI\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_read-name-uniquifier"))
        .arg(&input)
        .arg(&input)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[test]
fn read_name_uniquifier_reescribe_cabeceras() {
    let tmp = temp_dir("uniq_plano");
    let input = tmp.join("150616_SN163_0648_AHKYLMADXX_L1_1.fq");
    fs::write(&input, "@HWI:1:2/1\nACGT\n+\nIIII\n@HWI:1:3/1\nTTTT\n+\nJJJJ\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_read-name-uniquifier"))
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        stdout(&out),
        "@HWI:1:2-L1/1\nACGT\n+\nIIII\n@HWI:1:3-L1/1\nTTTT\n+\nJJJJ\n"
    );
}

#[test]
fn read_name_uniquifier_acepta_gz() {
    let tmp = temp_dir("uniq_gz");
    let input = tmp.join("150616_SN163_0648_AHKYLMADXX_L2_2.fq.gz");
    write_gz(&input, "@r/2\nA\n+\nI\n");

    let out = Command::new(env!("CARGO_BIN_EXE_read-name-uniquifier"))
        .arg(&input)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(stdout(&out), "@r-L2/2\nA\n+\nI\n");
}

#[test]
fn read_name_uniquifier_nombre_sin_lane_falla() {
    let tmp = temp_dir("uniq_sin_lane");
    let input = tmp.join("reads.fq");
    fs::write(&input, "@r/1\nA\n+\nI\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_read-name-uniquifier"))
        .arg(&input)
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}
