//! SSH/SFTP session to the upload host.
//!
//! Host keys are NOT verified unless `VerifyHostKey` is enabled in the
//! settings: any server answering on `host:port` is trusted. A warning is
//! printed once per process when running in that mode, quiet or not.

use crate::config::ShareConfig;
use crate::constants::DEFAULT_KNOWN_HOSTS_FILE;
use crate::error::{Result, ShareError};
use crate::upload::RemoteStore;
use ssh2::{CheckResult, KnownHostFileKind, Session, Sftp};
use std::io::Write;
use std::net::TcpStream;
use std::path::Path;
use std::sync::Once;

static HOST_KEY_WARNING: Once = Once::new();

/// Opens a store for one upload. Every task calls `connect` for itself.
pub trait Connector: Sync {
    type Store: RemoteStore;

    fn connect(&self, config: &ShareConfig) -> Result<Self::Store>;
}

/// Connects with `ssh2` using the configured identity file.
#[derive(Debug, Default, Clone, Copy)]
pub struct SshConnector;

impl Connector for SshConnector {
    type Store = RemoteSession;

    fn connect(&self, config: &ShareConfig) -> Result<RemoteSession> {
        RemoteSession::connect(config)
    }
}

/// An authenticated session with an open SFTP channel. Dropping it closes
/// the channel and disconnects.
pub struct RemoteSession {
    sftp: Option<Sftp>,
    session: Session,
}

impl RemoteSession {
    pub fn connect(config: &ShareConfig) -> Result<Self> {
        let addr = config.address();
        let user = config.resolve_user()?;
        let identity = config.resolve_identity_file()?;
        if !identity.exists() {
            return Err(ShareError::FileNotFound(identity));
        }

        if !config.verify_host_key {
            HOST_KEY_WARNING.call_once(|| {
                // not routed through warn!: -q must not hide this
                eprintln!(
                    "⚠️  Host key verification is disabled; the identity of {} is not checked",
                    addr
                );
            });
        }

        crate::verbose!("Connecting to {} as {}", addr, user);
        let tcp = TcpStream::connect(&addr).map_err(|source| ShareError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;

        if config.verify_host_key {
            verify_host_key(&session, config)?;
        }

        session
            .userauth_pubkey_file(&user, None, &identity, None)
            .map_err(|err| ShareError::AuthRejected {
                user: user.clone(),
                addr: addr.clone(),
                reason: err.message().to_string(),
            })?;
        if !session.authenticated() {
            return Err(ShareError::AuthRejected {
                user,
                addr,
                reason: "server did not accept the key".to_string(),
            });
        }

        let sftp = session.sftp()?;
        crate::verbose!("SFTP channel open on {}", addr);

        Ok(Self {
            sftp: Some(sftp),
            session,
        })
    }
}

fn verify_host_key(session: &Session, config: &ShareConfig) -> Result<()> {
    let addr = config.address();
    let home = dirs::home_dir().ok_or(ShareError::HomeDirUnavailable)?;
    let known_hosts_file = home.join(DEFAULT_KNOWN_HOSTS_FILE);

    let mut known_hosts = session.known_hosts()?;
    known_hosts
        .read_file(&known_hosts_file, KnownHostFileKind::OpenSSH)
        .map_err(|err| ShareError::HostKeyRejected {
            addr: addr.clone(),
            reason: format!("cannot read {:?}: {}", known_hosts_file, err.message()),
        })?;

    let (key, _) = session
        .host_key()
        .ok_or_else(|| ShareError::HostKeyRejected {
            addr: addr.clone(),
            reason: "server presented no host key".to_string(),
        })?;

    let reason = match known_hosts.check_port(&config.host, config.port, key) {
        CheckResult::Match => return Ok(()),
        CheckResult::NotFound => "host is not listed in known_hosts",
        CheckResult::Mismatch => "host key does not match known_hosts",
        CheckResult::Failure => "known_hosts lookup failed",
    };
    Err(ShareError::HostKeyRejected {
        addr,
        reason: reason.to_string(),
    })
}

impl RemoteStore for RemoteSession {
    fn put(&mut self, remote_path: &str, data: &[u8]) -> Result<()> {
        let to_write_error = |source: std::io::Error| ShareError::RemoteWrite {
            path: remote_path.to_string(),
            source,
        };
        let sftp = self
            .sftp
            .as_ref()
            .ok_or_else(|| to_write_error(std::io::ErrorKind::NotConnected.into()))?;

        let mut file = sftp
            .create(Path::new(remote_path))
            .map_err(|err| to_write_error(err.into()))?;
        file.write_all(data).map_err(to_write_error)?;
        file.flush().map_err(to_write_error)?;
        Ok(())
    }
}

impl Drop for RemoteSession {
    fn drop(&mut self) {
        drop(self.sftp.take());
        if let Err(err) = self.session.disconnect(None, "upload finished", None) {
            crate::verbose!("Disconnect failed: {}", err);
        }
    }
}
