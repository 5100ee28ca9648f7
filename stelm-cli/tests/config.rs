use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn generate_config_prints_defaults() {
    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.arg("generate-config");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[engine]"))
        .stdout(predicate::str::contains("max_depth = 64"))
        .stdout(predicate::str::contains("[link.protocol_classes]"));
}

#[test]
fn render_uses_protocol_classes_from_config() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("notes.txt");
    fs::write(&input_path, "http://a.b and gopher://c.d").unwrap();

    let config_path = dir.path().join("site.toml");
    fs::write(
        &config_path,
        r#"[link.protocol_classes]
http = "web"
"*" = "elsewhere"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.current_dir(dir.path())
        .arg(input_path.as_os_str())
        .arg("--config")
        .arg(config_path.as_os_str());

    cmd.assert().success().stdout(
        r#"<a href="http://a.b" class="web">http://a.b</a> and <a href="gopher://c.d" class="elsewhere">gopher://c.d</a>"#,
    );
}

#[test]
fn local_stelm_toml_is_picked_up() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "a\nb").unwrap();
    fs::write(
        dir.path().join("stelm.toml"),
        "[engine]\nsubstitutions = true\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.current_dir(dir.path()).arg("notes.txt");

    cmd.assert().success().stdout("a<br/>b");
}

#[test]
fn cli_override_precedes_config() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "<b>").unwrap();

    let config_path = dir.path().join("site.toml");
    fs::write(&config_path, "[engine]\nescape_input = false\n").unwrap();

    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.current_dir(dir.path())
        .arg("notes.txt")
        .arg("--config")
        .arg(config_path.as_os_str());
    cmd.assert().success().stdout("<b>");

    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.current_dir(dir.path())
        .arg("notes.txt")
        .arg("--config")
        .arg(config_path.as_os_str())
        .arg("--extra-escape-input")
        .arg("true");
    cmd.assert().success().stdout("&lt;b&gt;");
}

#[test]
fn missing_config_file_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "x").unwrap();

    let mut cmd = cargo_bin_cmd!("stelm");
    cmd.current_dir(dir.path())
        .arg("notes.txt")
        .arg("--config")
        .arg("nowhere.toml");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Failed to load configuration"));
}
