use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config value: {0}")]
    InvalidConfig(String),

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("No remote user configured and $USER is not set")]
    UserUnavailable,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run screenshot tool `{tool}`: {source}")]
    CaptureSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Screenshot tool `{tool}` cancelled or failed ({status}): {stderr}")]
    CaptureFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("Screenshot tool `{0}` produced no image data")]
    EmptyCapture(String),

    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("SSH error: {0}")]
    Ssh(#[from] ssh2::Error),

    #[error("Authentication rejected for {user}@{addr}: {reason}")]
    AuthRejected {
        user: String,
        addr: String,
        reason: String,
    },

    #[error("Host key for {addr} rejected: {reason}")]
    HostKeyRejected { addr: String, reason: String },

    #[error("Failed to write remote file {path}: {source}")]
    RemoteWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Failed to start upload workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Completion barrier counts {expected} tasks but {tasks} files were given")]
    BarrierMismatch { expected: usize, tasks: usize },

    #[error("Upload task panicked: {0}")]
    TaskPanicked(String),
}

pub type Result<T> = std::result::Result<T, ShareError>;
