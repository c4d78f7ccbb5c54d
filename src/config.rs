use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_IDENTITY_FILE, DEFAULT_SCREENSHOT_COMMAND,
};
use crate::error::{Result, ShareError};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings read from `~/.config/goshare/settings.json`.
///
/// Field names follow the goshare schema (`Host`, `RemoteDir`, ...) and
/// also accept the lower camel case spelling used by xshare.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ShareConfig {
    #[serde(rename = "Host", alias = "host")]
    pub host: String,

    #[serde(rename = "Port", alias = "port", deserialize_with = "deserialize_port")]
    pub port: u16,

    #[serde(rename = "User", alias = "user", default)]
    pub user: Option<String>,

    /// Prepended verbatim to the remote name, so it needs its own trailing `/`.
    #[serde(rename = "RemoteDir", alias = "remoteDir")]
    pub remote_dir: String,

    #[serde(rename = "RemoteUrl", alias = "remoteUrl")]
    pub remote_url: String,

    #[serde(rename = "FileLen", alias = "fileLen")]
    pub file_len: u8,

    #[serde(rename = "ShowExtUrl", alias = "showExtUrl", default)]
    pub show_ext_url: bool,

    #[serde(rename = "IdentityFile", alias = "identityFile", default)]
    pub identity_file: Option<PathBuf>,

    #[serde(rename = "ScreenshotCommand", alias = "screenshotCommand", default)]
    pub screenshot_command: Option<Vec<String>>,

    #[serde(rename = "VerifyHostKey", alias = "verifyHostKey", default)]
    pub verify_host_key: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u16),
    Text(String),
}

fn deserialize_port<'de, D>(deserializer: D) -> std::result::Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    match PortValue::deserialize(deserializer)? {
        PortValue::Number(port) => Ok(port),
        PortValue::Text(text) => text
            .trim()
            .parse::<u16>()
            .map_err(|_| serde::de::Error::custom(format!("invalid port \"{}\"", text))),
    }
}

/// Default location of the settings file.
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(ShareError::HomeDirUnavailable)?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl ShareConfig {
    /// Reads, parses and validates the settings file. Nothing is defaulted
    /// for the required fields; a bad file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ShareError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|err| match err {
            ShareError::ConfigParse { source, .. } => ShareError::ConfigParse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: ShareConfig =
            serde_json::from_str(raw).map_err(|source| ShareError::ConfigParse {
                path: PathBuf::new(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ShareError::InvalidConfig("Host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(ShareError::InvalidConfig("Port must not be 0".to_string()));
        }
        if self.remote_url.trim().is_empty() {
            return Err(ShareError::InvalidConfig(
                "RemoteUrl must not be empty".to_string(),
            ));
        }
        if self.file_len == 0 {
            return Err(ShareError::InvalidConfig(
                "FileLen must be at least 1".to_string(),
            ));
        }
        if let Some(command) = &self.screenshot_command {
            if command.first().map_or(true, |program| program.trim().is_empty()) {
                return Err(ShareError::InvalidConfig(
                    "ScreenshotCommand must name a program".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The remote login: `User` from the settings, else `$USER`.
    pub fn resolve_user(&self) -> Result<String> {
        match &self.user {
            Some(user) if !user.is_empty() => Ok(user.clone()),
            _ => std::env::var("USER")
                .ok()
                .filter(|user| !user.is_empty())
                .ok_or(ShareError::UserUnavailable),
        }
    }

    pub fn resolve_identity_file(&self) -> Result<PathBuf> {
        match &self.identity_file {
            Some(path) => Ok(path.clone()),
            None => {
                let home = dirs::home_dir().ok_or(ShareError::HomeDirUnavailable)?;
                Ok(home.join(DEFAULT_IDENTITY_FILE))
            }
        }
    }

    pub fn screenshot_argv(&self) -> Vec<String> {
        match &self.screenshot_command {
            Some(command) => command.clone(),
            None => DEFAULT_SCREENSHOT_COMMAND
                .iter()
                .map(|arg| arg.to_string())
                .collect(),
        }
    }
}

impl fmt::Display for ShareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Host:          {}", self.host)?;
        writeln!(f, "Port:          {}", self.port)?;
        writeln!(
            f,
            "User:          {}",
            self.user.as_deref().unwrap_or("($USER)")
        )?;
        writeln!(f, "RemoteDir:     {}", self.remote_dir)?;
        writeln!(f, "RemoteUrl:     {}", self.remote_url)?;
        writeln!(f, "FileLen:       {}", self.file_len)?;
        writeln!(f, "ShowExtUrl:    {}", self.show_ext_url)?;
        match &self.identity_file {
            Some(path) => writeln!(f, "IdentityFile:  {}", path.display())?,
            None => writeln!(f, "IdentityFile:  ~/{}", DEFAULT_IDENTITY_FILE)?,
        }
        writeln!(f, "Screenshot:    {}", self.screenshot_argv().join(" "))?;
        write!(f, "VerifyHostKey: {}", self.verify_host_key)
    }
}
