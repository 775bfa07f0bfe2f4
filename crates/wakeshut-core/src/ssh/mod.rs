//! SSH command runner
//!
//! Opens one session per call, authenticates with either a password or a
//! PEM private key, runs one command on an exec channel and maps the exit
//! status to an [`ExecutionOutcome`](wakeshut_types::ExecutionOutcome).
//!
//! Host-key verification is disabled by default ([`HostKeyPolicy::AcceptAny`]).
//! Any server presenting any key is trusted, which leaves the connection
//! open to man-in-the-middle attacks on untrusted networks. Pin the server
//! key with [`HostKeyPolicy::Fingerprint`] to close that gap.

mod key;
mod runner;

pub use key::{load_private_key, normalize_pem};
pub use runner::{outcome_from_exit, SshRunner};

/// Server host-key verification policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostKeyPolicy {
    /// Accept any server key without checking it
    #[default]
    AcceptAny,
    /// Accept only a key with this SHA-256 fingerprint (base64, with or
    /// without the `SHA256:` prefix)
    Fingerprint(String),
}

impl HostKeyPolicy {
    pub fn from_fingerprint(fingerprint: Option<String>) -> Self {
        match fingerprint {
            Some(fp) if !fp.trim().is_empty() => Self::Fingerprint(fp.trim().to_string()),
            _ => Self::AcceptAny,
        }
    }

    /// Whether a server key with the given SHA-256 fingerprint is trusted
    pub fn accepts(&self, fingerprint: &str) -> bool {
        match self {
            Self::AcceptAny => true,
            Self::Fingerprint(expected) => {
                strip_prefix(expected) == strip_prefix(fingerprint)
            }
        }
    }
}

fn strip_prefix(fp: &str) -> &str {
    let fp = fp.trim();
    fp.strip_prefix("SHA256:").unwrap_or(fp).trim_end_matches('=')
}
