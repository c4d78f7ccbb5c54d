#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Settings that point at a closed loopback port, so any connection
/// attempt fails fast instead of reaching a real host.
pub fn unreachable_settings(identity: &Path) -> Value {
    json!({
        "User": "tester",
        "Host": "127.0.0.1",
        "Port": "1",
        "RemoteDir": "/srv/share/",
        "RemoteUrl": "https://i.example.com/",
        "FileLen": 6,
        "ShowExtUrl": false,
        "IdentityFile": identity,
    })
}

pub fn write_settings(dir: &Path, settings: &Value) -> PathBuf {
    let path = dir.join("settings.json");
    fs::write(&path, serde_json::to_vec_pretty(settings).unwrap()).unwrap();
    path
}

pub fn write_identity(dir: &Path) -> PathBuf {
    let path = dir.join("id_rsa");
    fs::write(&path, b"not a real key").unwrap();
    path
}

pub fn create_temp_directory() -> TempDir {
    TempDir::new().unwrap()
}

pub fn create_test_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            path
        })
        .collect()
}

/// True when `name` is `len` ASCII letters followed by `extension`.
pub fn is_generated_name(name: &str, len: usize, extension: &str) -> bool {
    match name.strip_suffix(extension) {
        Some(stem) => stem.len() == len && stem.bytes().all(|b| b.is_ascii_alphabetic()),
        None => false,
    }
}
