use assert_cmd::Command;
use predicates::str::contains;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Nothing listens on the discard port, so any request fails fast
const UNREACHABLE_HUB: &str = "http://127.0.0.1:9";

fn cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("model-dl").unwrap();
    cmd.current_dir(cwd)
        .env_remove("MODEL_DL_DIR")
        .env_remove("MODELSCOPE_API_TOKEN")
        .env_remove("RUST_LOG")
        .env("MODELSCOPE_ENDPOINT", UNREACHABLE_HUB);
    cmd
}

fn seed_model_file(root: &Path, file: &str) {
    let dir = root.join("org").join("model");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), "weights").unwrap();
}

#[test]
fn help_lists_flags() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--generate-modelfile"))
        .stdout(contains("-F, --force"))
        .stdout(contains("-f, --file"));
}

#[test]
fn model_is_required() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["-f", "a.gguf"])
        .assert()
        .failure()
        .stderr(contains("--model"));
}

#[test]
fn malformed_model_id_fails() {
    let tmp = TempDir::new().unwrap();
    cmd(tmp.path())
        .args(["-m", "no-namespace"])
        .assert()
        .failure()
        .stderr(contains("Invalid model id"));
}

#[test]
fn existing_model_dir_is_skipped() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("org/model")).unwrap();

    cmd(tmp.path())
        .args(["-m", "org/model", "-d", "."])
        .assert()
        .success()
        .stdout(contains("already exists, skipping download"));
}

#[test]
fn download_dir_from_environment() {
    let tmp = TempDir::new().unwrap();
    let store = tmp.path().join("store");
    fs::create_dir_all(store.join("org/model")).unwrap();

    cmd(tmp.path())
        .env("MODEL_DL_DIR", &store)
        .args(["-m", "org/model"])
        .assert()
        .success()
        .stdout(contains(store.join("org").join("model").display().to_string()))
        .stdout(contains("skipping download"));
}

#[test]
fn existing_files_skipped_and_modelfile_generated() {
    let tmp = TempDir::new().unwrap();
    seed_model_file(tmp.path(), "q4.gguf");
    seed_model_file(tmp.path(), "config.json");

    cmd(tmp.path())
        .args(["-m", "org/model", "-f", "q4.gguf,config.json", "-g"])
        .assert()
        .success()
        .stdout(contains("2 files to download"))
        .stdout(contains("ollama create q4 -f Modelfile/q4.modelfile"));

    let modelfile_dir = tmp.path().join("Modelfile");
    assert_eq!(
        fs::read_to_string(modelfile_dir.join("q4.modelfile")).unwrap(),
        "FROM ../org/model/q4.gguf"
    );
    assert_eq!(fs::read_dir(modelfile_dir).unwrap().count(), 1);
}

#[test]
fn modelfile_dir_is_configurable() {
    let tmp = TempDir::new().unwrap();
    seed_model_file(tmp.path(), "q8.gguf");

    cmd(tmp.path())
        .args(["-m", "org/model", "-f", "q8.gguf", "-g", "--modelfile-dir", "ollama"])
        .assert()
        .success();

    assert!(tmp.path().join("ollama/q8.modelfile").exists());
    assert!(!tmp.path().join("Modelfile").exists());
}

#[test]
fn force_bypasses_existing_file() {
    let tmp = TempDir::new().unwrap();
    seed_model_file(tmp.path(), "q4.gguf");

    cmd(tmp.path())
        .args(["-m", "org/model", "-f", "q4.gguf", "-F"])
        .assert()
        .failure()
        .stdout(contains("Downloading q4.gguf"))
        .stderr(contains("Error: Download of org/model failed"))
        .stderr(contains("caused by: Transport error"));

    assert_eq!(
        fs::read_to_string(tmp.path().join("org/model/q4.gguf")).unwrap(),
        "weights"
    );
}

#[test]
fn path_escaping_model_dir_is_rejected() {
    let tmp = TempDir::new().unwrap();

    cmd(tmp.path())
        .args(["-m", "org/model", "-f", "../../outside.gguf", "-g"])
        .assert()
        .failure()
        .stderr(contains("Error: Download of org/model failed"))
        .stderr(contains("caused by: Invalid repository path '../../outside.gguf'"));

    assert!(!tmp.path().join("Modelfile").exists());
}
