use {
    assert_cmd::Command,
    predicates::prelude::*,
    std::io::Write,
    tempfile::NamedTempFile,
};

fn spartie() -> Command {
    let mut cmd = Command::cargo_bin("spartie").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn prints_version() {
    spartie()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("spartie "));
}

#[test]
fn scans_a_script_file() {
    let file = script("var x = 10;\n// done\nprint x;\n");
    spartie()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("VAR"))
        .stdout(predicate::str::contains("IDENTIFIER"))
        .stdout(predicate::str::contains("PRINT"))
        .stdout(predicate::str::contains("|"))
        .stdout(predicate::str::contains("done").not());
}

#[test]
fn scans_stdin() {
    spartie()
        .write_stdin("if (a <= \"b\") {}")
        .assert()
        .success()
        .stdout(predicate::str::contains("LESS_EQUAL"))
        .stdout(predicate::str::contains("\"b\""));
}

#[test]
fn unterminated_string_is_fatal() {
    spartie()
        .write_stdin("\"abc")
        .assert()
        .code(65)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Error occurred on line 1 : Expected a closing: '\"', but none found.",
        ));
}

#[test]
fn unexpected_character_is_fatal() {
    let file = script("var a = 1;\nvar b = 1.2.3;\n");
    spartie()
        .arg(file.path())
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "Error occurred on line 2 : Unexpected character '.' at 22",
        ));
}

#[test]
fn pretty_report_names_the_diagnostic() {
    spartie()
        .arg("--pretty")
        .write_stdin("var a = b # c;")
        .assert()
        .code(65)
        .stderr(predicate::str::contains("Error occurred on line 1 : Unexpected character '#' at 10"))
        .stderr(predicate::str::contains("unexpected_character"));
}

#[test]
fn missing_file() {
    spartie()
        .arg("definitely/not/here.spartie")
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Could not read from file"));
}

#[test]
fn too_many_scripts() {
    spartie()
        .args(["a.spartie", "b.spartie"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Usage: spartie [script file]"));
}
