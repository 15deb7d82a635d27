use std::io::{self, Write};
use std::process::{Command, Stdio};

use tempfile::tempdir;

/// Executes a command with the Balsa CLI.
fn exec() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_balsa"));
    command.env_remove("BALSA_CONFIG");
    command
}

#[test]
fn test_help() -> io::Result<()> {
    let output = exec().arg("--help").output()?;
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("Parses source files"));
    assert!(stdout.contains("--config"));
    Ok(())
}

#[test]
fn test_parse_reports_diagnostics() -> io::Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("broken.bal");
    std::fs::write(&path, "function f() returns")?;

    let output = exec()
        .args(["parse", "--diagnostic-format", "short"])
        .arg(&path)
        .output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("missing type descriptor"));
    assert!(stderr.contains("missing open brace"));
    Ok(())
}

#[test]
fn test_parse_dumps_tree_from_stdin() -> io::Result<()> {
    let mut child = exec()
        .args(["parse", "--tree", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    child.stdin.take().unwrap().write_all(b"int x = 1;\n")?;
    let output = child.wait_with_output()?;
    assert!(output.status.success());
    let stdout = std::str::from_utf8(&output.stdout).unwrap();
    assert!(stdout.contains("CompilationUnit"));
    assert!(stdout.contains("ModuleVarDecl"));
    Ok(())
}

#[test]
fn test_check_many_files() -> io::Result<()> {
    let tmp = tempdir()?;
    let good = tmp.path().join("good.bal");
    let bad = tmp.path().join("bad.bal");
    std::fs::write(&good, "function main() {\n    if x { }\n}\n")?;
    std::fs::write(&bad, "int x = ;")?;

    let output = exec().args(["check", "--quiet"]).arg(&good).output()?;
    assert!(output.status.success());

    let output = exec().arg("check").arg(&good).arg(&bad).output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("missing expression"));
    assert!(stderr.contains("2 files (1 error, 0 warnings)"));
    Ok(())
}

#[test]
fn test_config_file() -> io::Result<()> {
    let tmp = tempdir()?;
    let config = tmp.path().join("balsa.toml");
    let path = tmp.path().join("deep.bal");
    std::fs::write(&config, "max-depth = 4\n")?;
    std::fs::write(&path, "int x = ((((((1))))));")?;

    let output = exec().arg("--config").arg(&config).arg("parse").arg(&path).output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("maximum nesting depth reached"));

    std::fs::write(&config, "max-depth = 0\n")?;
    let output = exec().arg("--config").arg(&config).arg("parse").arg(&path).output()?;
    assert!(!output.status.success());
    let stderr = std::str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("max-depth must be at least 1"));
    Ok(())
}
