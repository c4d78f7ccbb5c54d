use crate::config::ShareConfig;
use crate::error::Result;
use crate::naming::remote_name;
use crate::report::public_url;
use crate::session::Connector;
use crate::source::{load_content, ContentSource};
use crate::upload::upload;
use crate::utils::format_file_size;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub source: ContentSource,
    pub keep_name: bool,
}

impl UploadRequest {
    pub fn file(path: impl Into<PathBuf>, keep_name: bool) -> Self {
        Self {
            source: ContentSource::LocalFile(path.into()),
            keep_name,
        }
    }

    pub fn screenshot() -> Self {
        Self {
            source: ContentSource::Screenshot,
            keep_name: false,
        }
    }
}

/// A finished upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Absolute local path; `None` for screenshots.
    pub local_path: Option<PathBuf>,
    pub remote_name: String,
    pub remote_path: String,
    pub url: String,
}

/// Runs one request end to end: load the bytes, pick the remote name,
/// connect, write, and derive the URL.
///
/// Content is loaded before connecting so a missing file or a cancelled
/// capture never opens a session or leaves an empty remote file behind.
/// The session is dropped (and disconnected) before this returns, on
/// success and on error alike.
pub fn share<C: Connector>(
    config: &ShareConfig,
    connector: &C,
    request: &UploadRequest,
) -> Result<Upload> {
    let (local_path, data) = load_content(&request.source, &config.screenshot_argv())?;
    let name = remote_name(
        &request.source,
        request.keep_name,
        config.file_len,
        &mut rand::thread_rng(),
    );
    crate::verbose!("Remote name: {} ({})", name, format_file_size(data.len() as u64));

    let remote_path = {
        let mut store = connector.connect(config)?;
        upload(&mut store, &config.remote_dir, &name, &data)?
    };

    let url = public_url(&config.remote_url, &name, config.show_ext_url);
    Ok(Upload {
        local_path,
        remote_name: name,
        remote_path,
        url,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::ShareConfig;
    use crate::error::{Result, ShareError};
    use crate::report::ClipboardSink;
    use crate::session::Connector;
    use crate::upload::RemoteStore;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    pub fn config(show_ext: bool) -> ShareConfig {
        let raw = format!(
            r#"{{
                "User": "tester",
                "Host": "files.example.com",
                "Port": "22",
                "RemoteDir": "/srv/share/",
                "RemoteUrl": "https://i.example.com/",
                "FileLen": 6,
                "ShowExtUrl": {},
                "ScreenshotCommand": ["sh", "-c", "printf PNG"]
            }}"#,
            show_ext
        );
        ShareConfig::from_json(&raw).unwrap()
    }

    /// Shared in-memory remote filesystem.
    #[derive(Clone, Default)]
    pub struct FakeConnector {
        pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        pub connects: Arc<AtomicUsize>,
        pub open_sessions: Arc<AtomicUsize>,
        pub refuse: bool,
    }

    pub struct FakeSession {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        open_sessions: Arc<AtomicUsize>,
    }

    impl Connector for FakeConnector {
        type Store = FakeSession;

        fn connect(&self, config: &ShareConfig) -> Result<FakeSession> {
            self.connects.fetch_add(1, Ordering::SeqCst);
            if self.refuse {
                return Err(ShareError::Connect {
                    addr: config.address(),
                    source: std::io::ErrorKind::ConnectionRefused.into(),
                });
            }
            self.open_sessions.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                files: self.files.clone(),
                open_sessions: self.open_sessions.clone(),
            })
        }
    }

    impl RemoteStore for FakeSession {
        fn put(&mut self, remote_path: &str, data: &[u8]) -> Result<()> {
            self.files
                .lock()
                .unwrap()
                .insert(remote_path.to_string(), data.to_vec());
            Ok(())
        }
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// A single store kept in memory.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        pub files: HashMap<String, Vec<u8>>,
    }

    impl RemoteStore for MemoryStore {
        fn put(&mut self, remote_path: &str, data: &[u8]) -> Result<()> {
            self.files.insert(remote_path.to_string(), data.to_vec());
            Ok(())
        }
    }

    /// Keeps every copied string.
    #[derive(Debug, Default)]
    pub struct RecordingClipboard {
        pub copied: Mutex<Vec<String>>,
    }

    impl ClipboardSink for RecordingClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    /// True when `name` is `len` ASCII letters followed by `extension`.
    pub fn is_generated_name(name: &str, len: usize, extension: &str) -> bool {
        match name.strip_suffix(extension) {
            Some(stem) => stem.len() == len && stem.bytes().all(|b| b.is_ascii_alphabetic()),
            None => false,
        }
    }
}
