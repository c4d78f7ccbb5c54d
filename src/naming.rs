use crate::constants::{NAME_ALPHABET, SCREENSHOT_EXTENSION};
use crate::source::ContentSource;
use rand::Rng;

/// Returns `len` letters drawn uniformly from `a-zA-Z`.
pub fn random_letters<R: Rng + ?Sized>(len: usize, rng: &mut R) -> String {
    (0..len)
        .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
        .collect()
}

/// The extension of a file name, dot included: everything from the last
/// `.` of the final path component. Empty if there is none.
pub fn extension_of(name: &str) -> &str {
    let base = base_name(name);
    match base.rfind('.') {
        Some(index) => &base[index..],
        None => "",
    }
}

/// `name` without the suffix `extension_of` would return.
pub fn strip_extension(name: &str) -> &str {
    &name[..name.len() - extension_of(name).len()]
}

fn base_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(name)
}

/// Picks the name an upload is stored under:
/// 1. keep-name with a local file: the file's base name,
/// 2. a local file: random letters plus the file's extension,
/// 3. a screenshot: random letters plus `.png`.
pub fn remote_name<R: Rng + ?Sized>(
    source: &ContentSource,
    keep_name: bool,
    len: u8,
    rng: &mut R,
) -> String {
    match source {
        ContentSource::LocalFile(path) => {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());
            if keep_name {
                file_name
            } else {
                random_letters(len as usize, rng) + extension_of(&file_name)
            }
        }
        ContentSource::Screenshot => random_letters(len as usize, rng) + SCREENSHOT_EXTENSION,
    }
}
