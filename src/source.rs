use crate::error::{Result, ShareError};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Where the bytes of an upload come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    LocalFile(PathBuf),
    Screenshot,
}

impl ContentSource {
    pub fn local_path(&self) -> Option<&Path> {
        match self {
            ContentSource::LocalFile(path) => Some(path),
            ContentSource::Screenshot => None,
        }
    }
}

/// Makes `path` absolute against the current directory without touching the
/// filesystem.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Reads a whole local file, resolving relative paths first.
///
/// # Returns
/// * `Ok((absolute_path, bytes))`
/// * `Err(ShareError::FileNotFound)` if nothing exists at the path
pub fn read_local_file(path: &Path) -> Result<(PathBuf, Vec<u8>)> {
    let absolute = absolutize(path)?;
    if !absolute.exists() {
        return Err(ShareError::FileNotFound(absolute));
    }

    let data = fs::read(&absolute).map_err(|source| ShareError::FileRead {
        path: absolute.clone(),
        source,
    })?;
    Ok((absolute, data))
}

/// Runs the screenshot tool and returns its stdout as the image payload.
///
/// The first element of `argv` is the program. A non-zero exit status
/// (usually a cancelled region selection) or empty output is an error.
pub fn capture_screenshot(argv: &[String]) -> Result<Vec<u8>> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ShareError::InvalidConfig("empty screenshot command".to_string()))?;
    let tool = argv.join(" ");

    crate::verbose!("Running screenshot tool: {}", tool);
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| ShareError::CaptureSpawn {
            tool: tool.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ShareError::CaptureFailed {
            tool,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    if output.stdout.is_empty() {
        return Err(ShareError::EmptyCapture(tool));
    }

    Ok(output.stdout)
}

/// Produces the payload for `source`, along with the resolved local path.
pub fn load_content(
    source: &ContentSource,
    screenshot_argv: &[String],
) -> Result<(Option<PathBuf>, Vec<u8>)> {
    match source {
        ContentSource::LocalFile(path) => {
            let (absolute, data) = read_local_file(path)?;
            Ok((Some(absolute), data))
        }
        ContentSource::Screenshot => Ok((None, capture_screenshot(screenshot_argv)?)),
    }
}
