//! One-shot SSH exec over russh

use super::key::load_private_key;
use super::HostKeyPolicy;
use crate::ports::CommandRunner;
use crate::{Result, WakeshutError};
use async_trait::async_trait;
use russh::client::{self, Handle};
use russh::{ChannelMsg, Disconnect};
use russh_keys::key;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wakeshut_types::{ConnectionProfile, Credential, ExecutionOutcome};

/// Extended data stream number for stderr
const SSH_EXTENDED_DATA_STDERR: u32 = 1;

/// Reported when the server closes the channel without an exit status
const UNKNOWN_EXIT_STATUS: i64 = -1;

/// Client-side session handler; only decides on the server key
struct ClientHandler {
    policy: HostKeyPolicy,
}

#[async_trait]
impl client::Handler for ClientHandler {
    type Error = russh::Error;

    async fn check_server_key(
        &mut self,
        server_public_key: &key::PublicKey,
    ) -> std::result::Result<bool, Self::Error> {
        let fingerprint = server_public_key.fingerprint();
        let accepted = self.policy.accepts(&fingerprint);
        match (&self.policy, accepted) {
            (HostKeyPolicy::AcceptAny, _) => {
                debug!("Host key check disabled, accepting SHA256:{}", fingerprint)
            }
            (_, true) => debug!("Host key SHA256:{} matches pinned fingerprint", fingerprint),
            (_, false) => warn!("Rejecting unexpected host key SHA256:{}", fingerprint),
        }
        Ok(accepted)
    }
}

/// [`CommandRunner`] that opens a fresh SSH session for every call
#[derive(Debug, Clone, Default)]
pub struct SshRunner {
    host_key_policy: HostKeyPolicy,
}

impl SshRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host_key_policy(mut self, policy: HostKeyPolicy) -> Self {
        self.host_key_policy = policy;
        self
    }

    pub fn host_key_policy(&self) -> &HostKeyPolicy {
        &self.host_key_policy
    }

    /// Connect, authenticate, run `command` and return its trimmed stdout.
    ///
    /// The channel and the session are closed on every path.
    pub async fn run(
        &self,
        profile: &ConnectionProfile,
        command: &str,
        timeout: Duration,
    ) -> Result<String> {
        // The key is decoded before any connection is made
        let key_pair = match profile.credential() {
            Credential::PrivateKey(pem) => Some(Arc::new(load_private_key(pem)?)),
            Credential::Password(_) => None,
        };

        let mut session = tokio::time::timeout(timeout, self.connect(profile, key_pair))
            .await
            .map_err(|_| {
                WakeshutError::Connection(format!(
                    "timed out connecting to {}:{} after {:?}",
                    profile.host, profile.port, timeout
                ))
            })??;

        let result = exec(&mut session, command, timeout / 2).await;

        if let Err(e) = session
            .disconnect(Disconnect::ByApplication, "", "English")
            .await
        {
            debug!("Disconnect from {} failed: {}", profile.host, e);
        }

        result
    }

    async fn connect(
        &self,
        profile: &ConnectionProfile,
        key_pair: Option<Arc<key::KeyPair>>,
    ) -> Result<Handle<ClientHandler>> {
        let config = Arc::new(client::Config::default());
        let handler = ClientHandler {
            policy: self.host_key_policy.clone(),
        };

        info!("Connecting to {}", profile.target());
        let mut session =
            client::connect(config, (profile.host.trim(), profile.port), handler).await?;

        let authenticated = match (profile.credential(), key_pair) {
            (Credential::PrivateKey(_), Some(key_pair)) => {
                session
                    .authenticate_publickey(profile.username.trim(), key_pair)
                    .await?
            }
            (Credential::Password(password), _) => {
                session
                    .authenticate_password(profile.username.trim(), password)
                    .await?
            }
            (Credential::PrivateKey(_), None) => false,
        };

        if !authenticated {
            let _ = session
                .disconnect(Disconnect::ByApplication, "", "English")
                .await;
            return Err(WakeshutError::Authentication(format!(
                "{} rejected the credentials for {}",
                profile.host, profile.username
            )));
        }

        debug!("Authenticated to {}", profile.target());
        Ok(session)
    }
}

/// Run `command` on a new exec channel and collect its output until the
/// channel closes. No local input is forwarded.
async fn exec(
    session: &mut Handle<ClientHandler>,
    command: &str,
    open_timeout: Duration,
) -> Result<String> {
    let mut channel = tokio::time::timeout(open_timeout, async {
        let channel = session.channel_open_session().await?;
        channel.exec(true, command).await?;
        Ok::<_, WakeshutError>(channel)
    })
    .await
    .map_err(|_| {
        WakeshutError::Connection(format!("timed out opening exec channel after {:?}", open_timeout))
    })??;

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut exit_status = None;

    // `wait` yields every buffered message before returning None on close
    while let Some(msg) = channel.wait().await {
        match msg {
            ChannelMsg::Data { ref data } => stdout.extend_from_slice(data),
            ChannelMsg::ExtendedData { ref data, ext } if ext == SSH_EXTENDED_DATA_STDERR => {
                stderr.extend_from_slice(data)
            }
            ChannelMsg::ExitStatus { exit_status: status } => exit_status = Some(status),
            ChannelMsg::ExitSignal { signal_name, .. } => {
                debug!("Remote command terminated by signal {:?}", signal_name)
            }
            _ => {}
        }
    }

    if let Err(e) = channel.close().await {
        debug!("Channel close after remote close: {}", e);
    }

    debug!(
        "Command finished with status {:?} ({} bytes stdout, {} bytes stderr)",
        exit_status,
        stdout.len(),
        stderr.len()
    );
    outcome_from_exit(exit_status, &stdout, &stderr)
}

/// Map the remote exit status and captured streams to a result.
///
/// Status 0 yields the trimmed stdout. Any other status (or none at all)
/// yields the trimmed stderr, or a message embedding the status and the
/// stdout when stderr is empty.
pub fn outcome_from_exit(exit_status: Option<u32>, stdout: &[u8], stderr: &[u8]) -> Result<String> {
    let output = String::from_utf8_lossy(stdout).trim().to_string();

    match exit_status {
        Some(0) => Ok(output),
        other => {
            let status = other.map(i64::from).unwrap_or(UNKNOWN_EXIT_STATUS);
            let err = String::from_utf8_lossy(stderr).trim().to_string();
            let message = if err.is_empty() {
                format!("Command exited with status {}. Output: {}", status, output)
            } else {
                err
            };
            Err(WakeshutError::RemoteCommand { status, message })
        }
    }
}

#[async_trait]
impl CommandRunner for SshRunner {
    async fn execute(
        &self,
        profile: &ConnectionProfile,
        command: &str,
        timeout: Duration,
    ) -> ExecutionOutcome {
        let result = self.run(profile, command, timeout).await;
        if let Err(ref e) = result {
            warn!("Command on {} failed: {}", profile.target(), e);
        }
        result.into()
    }
}
