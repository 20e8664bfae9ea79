//! Coverage for credential loading, permission checks and env overlay.

use std::fs;
use std::path::PathBuf;

use proposal_generator::credentials::{load_credentials, Credentials, ANTHROPIC_API_KEY, OLLAMA_URL};

fn write_env(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join(".env");
    fs::write(&path, contents).expect("write .env");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).expect("chmod 600");
    }
    path
}

#[test]
fn loads_private_env_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_env(&dir, "ANTHROPIC_API_KEY=sk-ant-test\n# comment\nOLLAMA_URL=http://gpu:11434\n");
    let credentials = load_credentials(&path).expect("credentials load");
    assert_eq!(credentials.get(ANTHROPIC_API_KEY), Some("sk-ant-test"));
    assert_eq!(credentials.get(OLLAMA_URL), Some("http://gpu:11434"));
}

#[cfg(unix)]
#[test]
fn rejects_world_readable_env_file() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_env(&dir, "ANTHROPIC_API_KEY=sk-ant-test\n");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod 644");
    assert!(load_credentials(&path).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(load_credentials(&dir.path().join(".env")).is_err());
}

#[test]
fn environment_overrides_file_values() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_env(&dir, "ANTHROPIC_API_KEY=from-file\n");
    let mut credentials = load_credentials(&path).expect("credentials load");

    credentials.overlay(|key| match key {
        "ANTHROPIC_API_KEY" => Some("from-env".to_owned()),
        "OLLAMA_URL" => Some("   ".to_owned()),
        _ => None,
    });
    assert_eq!(credentials.get(ANTHROPIC_API_KEY), Some("from-env"));
    assert_eq!(credentials.get(OLLAMA_URL), None);
}

#[test]
fn debug_output_hides_values() {
    let mut credentials = Credentials::default();
    credentials.overlay(|key| (key == ANTHROPIC_API_KEY).then(|| "sk-ant-secret".to_owned()));
    let debug = format!("{credentials:?}");
    assert!(debug.contains(ANTHROPIC_API_KEY));
    assert!(!debug.contains("sk-ant-secret"));
}
