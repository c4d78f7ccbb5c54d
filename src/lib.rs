pub mod logger;

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fanout;
pub mod naming;
pub mod report;
pub mod session;
pub mod share;
pub mod source;
pub mod upload;
pub mod utils;

pub use config::{config_path, ShareConfig};
pub use error::{Result, ShareError};
pub use fanout::{upload_all, CompletionBarrier, FanOutReport, FileOutcome};
pub use naming::{extension_of, random_letters, remote_name, strip_extension};
pub use report::{
    hold_clipboard, public_url, ClipboardSink, ClipboardStrategy, ReportMode, Reporter,
    SystemClipboard,
};
pub use session::{Connector, RemoteSession, SshConnector};
pub use share::{share, Upload, UploadRequest};
pub use source::{capture_screenshot, read_local_file, ContentSource};
pub use upload::{upload, RemoteStore};
