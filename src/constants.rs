pub const VERSION: &str = "v0.3";

pub const CONFIG_DIR_NAME: &str = "goshare";
pub const CONFIG_FILE_NAME: &str = "settings.json";
pub const DEFAULT_IDENTITY_FILE: &str = ".ssh/id_rsa";
pub const DEFAULT_KNOWN_HOSTS_FILE: &str = ".ssh/known_hosts";

pub const DEFAULT_SCREENSHOT_COMMAND: &[&str] = &["maim", "-s"];
pub const SCREENSHOT_EXTENSION: &str = ".png";

/// Hidden flag that runs goshare as a detached clipboard owner.
pub const HOLD_CLIPBOARD_FLAG: &str = "--hold-clipboard";
/// How long to watch a freshly started clipboard holder for an early exit.
pub const HOLDER_STARTUP_GRACE_MS: u64 = 150;

pub const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const PROGRESS_SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
pub const PROGRESS_BAR_TEMPLATE: &str = "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}";

// Common output message prefixes
pub const UPLOAD_PREFIX: &str = "📤";
pub const LINK_PREFIX: &str = "🔗";
pub const SUCCESS_PREFIX: &str = "✅";
pub const CLIPBOARD_PREFIX: &str = "📋";

/// Exit status after printing help, the version, or the settings.
pub const EXIT_USAGE: u8 = 1;
/// Exit status after any failed upload.
pub const EXIT_FAILURE: u8 = 2;
