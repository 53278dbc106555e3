use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn help_works() -> Result<(), Box<dyn std::error::Error>> {
    Command::new(assert_cmd::cargo::cargo_bin!("decode"))
        .arg("--help")
        .assert()
        .success();
    Ok(())
}

#[test]
fn decode_emits_tagged_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("decode"))
        .write_stdin("a = 2\nb = \"x\"\n")
        .output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(
        v,
        serde_json::json!({
            "a": {"type": "integer", "value": "2"},
            "b": {"type": "string", "value": "x"},
        })
    );
    Ok(())
}

#[test]
fn decode_reads_a_file_argument() -> Result<(), Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "[t]\nn = 1\n")?;

    let output = Command::new(assert_cmd::cargo::cargo_bin!("decode"))
        .arg(tmp.path())
        .output()?;
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_str(&String::from_utf8(output.stdout)?)?;
    assert_eq!(
        v,
        serde_json::json!({"t": {"n": {"type": "integer", "value": "1"}}})
    );
    Ok(())
}

#[test]
fn invalid_documents_exit_nonzero_with_a_located_error() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(assert_cmd::cargo::cargo_bin!("decode"))
        .write_stdin("a.b = 1\n[a]\n")
        .output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("2:2: key error: a is a closed table"), "stderr: {stderr}");
    Ok(())
}
