use crate::error::Result;

/// A destination that can store a complete file at a remote path.
pub trait RemoteStore {
    /// Creates (or truncates) `remote_path` and writes all of `data` to it.
    fn put(&mut self, remote_path: &str, data: &[u8]) -> Result<()>;
}

/// Joins the configured remote directory and the generated name.
///
/// The directory is used verbatim; a missing trailing separator is not
/// added here.
pub fn remote_path(remote_dir: &str, name: &str) -> String {
    format!("{}{}", remote_dir, name)
}

/// Writes `data` to `remote_dir + name` on `store`.
///
/// # Returns
/// * `Ok(remote_path)` - the path the bytes were written to
/// * `Err(ShareError)` - if the remote file cannot be created or written
pub fn upload<S: RemoteStore + ?Sized>(
    store: &mut S,
    remote_dir: &str,
    name: &str,
    data: &[u8],
) -> Result<String> {
    let path = remote_path(remote_dir, name);
    crate::verbose!("Writing {} bytes to {}", data.len(), path);
    store.put(&path, data)?;
    Ok(path)
}
