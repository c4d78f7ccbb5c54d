use crate::constants::{HOLDER_STARTUP_GRACE_MS, HOLD_CLIPBOARD_FLAG};
use crate::error::{Result, ShareError};
use crate::naming::strip_extension;
use crate::share::Upload;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

/// Bytes left unescaped in a URL path segment: the unreserved set plus the
/// sub-delimiters that are legal inside a segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

pub fn escape_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// The public URL of `name` under `base`, with or without its extension.
///
/// This is the only place a URL is derived; every reporting path uses the
/// value stored on [`Upload`].
pub fn public_url(base: &str, name: &str, show_ext: bool) -> String {
    let shown = if show_ext { name } else { strip_extension(name) };
    format!("{}{}", base, escape_path_segment(shown))
}

/// Something that can hold the URL for pasting.
pub trait ClipboardSink: Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// How [`SystemClipboard`] keeps copied text available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardStrategy {
    /// Set the text from this process; the OS keeps it after exit.
    Direct,
    /// Hand the text to a detached `goshare --hold-clipboard` process that
    /// owns the selection until another application takes it over. On X11
    /// and Wayland the selection dies with its owner.
    DetachedHolder,
}

impl ClipboardStrategy {
    pub fn for_platform() -> Self {
        if cfg!(target_os = "linux") {
            ClipboardStrategy::DetachedHolder
        } else {
            ClipboardStrategy::Direct
        }
    }
}

/// The desktop clipboard, via `arboard`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        match ClipboardStrategy::for_platform() {
            ClipboardStrategy::Direct => set_clipboard_text(text),
            ClipboardStrategy::DetachedHolder => spawn_clipboard_holder(text),
        }
    }
}

fn clipboard_error(err: arboard::Error) -> ShareError {
    ShareError::Clipboard(err.to_string())
}

fn set_clipboard_text(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    clipboard.set_text(text.to_string()).map_err(clipboard_error)
}

fn spawn_clipboard_holder(text: &str) -> Result<()> {
    let exe = std::env::current_exe()
        .map_err(|e| ShareError::Clipboard(format!("cannot locate the goshare binary: {}", e)))?;
    let mut holder = Command::new(exe)
        .arg(format!("{}={}", HOLD_CLIPBOARD_FLAG, text))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| ShareError::Clipboard(format!("cannot start clipboard holder: {}", e)))?;

    // a holder without a display exits straight away
    thread::sleep(Duration::from_millis(HOLDER_STARTUP_GRACE_MS));
    match holder.try_wait() {
        Ok(Some(status)) if !status.success() => Err(ShareError::Clipboard(format!(
            "clipboard holder exited with {}",
            status
        ))),
        Ok(_) => Ok(()),
        Err(e) => Err(ShareError::Clipboard(format!(
            "cannot check clipboard holder: {}",
            e
        ))),
    }
}

/// Owns the clipboard selection until another application replaces it.
/// Runs in the detached process started for [`ClipboardStrategy::DetachedHolder`].
pub fn hold_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(clipboard_error)?;
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait()
            .text(text.to_string())
            .map_err(clipboard_error)
    }
    #[cfg(not(target_os = "linux"))]
    {
        clipboard.set_text(text.to_string()).map_err(clipboard_error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    /// `local_path: url`, one line per file of a multi-file run
    Summary,
    Clipboard,
    Stdout,
}

impl ReportMode {
    pub fn select(multiple_files: bool, copy: bool) -> Self {
        if multiple_files {
            ReportMode::Summary
        } else if copy {
            ReportMode::Clipboard
        } else {
            ReportMode::Stdout
        }
    }
}

/// Delivers finished uploads. Safe to share between upload tasks: lines
/// are written whole under a lock.
pub struct Reporter<W: Write + Send, C: ClipboardSink> {
    mode: ReportMode,
    out: Mutex<W>,
    clipboard: C,
}

impl<W: Write + Send, C: ClipboardSink> Reporter<W, C> {
    pub fn new(mode: ReportMode, out: W, clipboard: C) -> Self {
        Self {
            mode,
            out: Mutex::new(out),
            clipboard,
        }
    }

    pub fn report(&self, upload: &Upload) -> Result<()> {
        match self.mode {
            ReportMode::Summary => {
                let local = upload
                    .local_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| upload.remote_name.clone());
                self.write_line(&format!("{}: {}", local, upload.url))
            }
            ReportMode::Clipboard => self.clipboard.set_text(&upload.url),
            ReportMode::Stdout => self.write_line(&upload.url),
        }
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }

    pub fn into_parts(self) -> (W, C) {
        let out = self.out.into_inner().unwrap_or_else(PoisonError::into_inner);
        (out, self.clipboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::test_support::RecordingClipboard;
    use std::path::PathBuf;

    fn upload(local: Option<&str>, url: &str) -> Upload {
        Upload {
            local_path: local.map(PathBuf::from),
            remote_name: "abc.png".to_string(),
            remote_path: "/srv/abc.png".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_public_url_hides_extension() {
        assert_eq!(
            public_url("https://i.example.com/", "abc.png", false),
            "https://i.example.com/abc"
        );
    }

    #[test]
    fn test_public_url_shows_extension() {
        assert_eq!(
            public_url("https://i.example.com/", "abc.png", true),
            "https://i.example.com/abc.png"
        );
    }

    #[test]
    fn test_public_url_escapes_kept_names() {
        assert_eq!(
            public_url("https://x/", "my photo#1.jpg", true),
            "https://x/my%20photo%231.jpg"
        );
        assert_eq!(public_url("https://x/", "a+b=c.txt", true), "https://x/a+b=c.txt");
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(ReportMode::select(true, true), ReportMode::Summary);
        assert_eq!(ReportMode::select(false, true), ReportMode::Clipboard);
        assert_eq!(ReportMode::select(false, false), ReportMode::Stdout);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_hands_selection_to_detached_holder() {
        assert_eq!(
            ClipboardStrategy::for_platform(),
            ClipboardStrategy::DetachedHolder
        );
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_other_platforms_set_clipboard_directly() {
        assert_eq!(ClipboardStrategy::for_platform(), ClipboardStrategy::Direct);
    }

    #[test]
    fn test_stdout_mode_prints_url_only() {
        let reporter = Reporter::new(ReportMode::Stdout, Vec::new(), RecordingClipboard::default());
        reporter.report(&upload(None, "https://x/abc")).unwrap();
        let (out, clipboard) = reporter.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), "https://x/abc\n");
        assert!(clipboard.copied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clipboard_mode_prints_nothing() {
        let reporter =
            Reporter::new(ReportMode::Clipboard, Vec::new(), RecordingClipboard::default());
        reporter.report(&upload(None, "https://x/abc")).unwrap();
        let (out, clipboard) = reporter.into_parts();
        assert!(out.is_empty());
        assert_eq!(*clipboard.copied.lock().unwrap(), vec!["https://x/abc".to_string()]);
    }

    #[test]
    fn test_summary_mode_prefixes_local_path() {
        let reporter = Reporter::new(ReportMode::Summary, Vec::new(), RecordingClipboard::default());
        reporter
            .report(&upload(Some("/home/me/a.txt"), "https://x/Qwerty"))
            .unwrap();
        let (out, _) = reporter.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "/home/me/a.txt: https://x/Qwerty\n"
        );
    }
}
