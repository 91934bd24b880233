//! Placeholder substitution for instance metadata.
//!
//! Metadata values (typically cloud-init `user-data`) may reference the
//! configured username and the operator's SSH public key through fixed
//! literal tokens. Substitution is a plain `str::replace`: any occurrence of a
//! token is rewritten, whether or not it was meant as a placeholder.

use std::collections::BTreeMap;

/// A literal token that is replaced in every metadata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Username,
    SshPublicKey,
}

/// Tokens in the order they are applied.
pub const PLACEHOLDERS: &[Placeholder] = &[Placeholder::Username, Placeholder::SshPublicKey];

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Username => "USERNAME",
            Placeholder::SshPublicKey => "SSH_PUBLIC_KEY",
        }
    }

    fn value<'a>(&self, subs: &Substitutions<'a>) -> &'a str {
        match self {
            Placeholder::Username => subs.username,
            Placeholder::SshPublicKey => subs.ssh_public_key,
        }
    }
}

/// Runtime values for each placeholder.
#[derive(Debug, Clone, Copy)]
pub struct Substitutions<'a> {
    pub username: &'a str,
    pub ssh_public_key: &'a str,
}

/// Apply every placeholder to one value.
///
/// Tokens are applied in [`PLACEHOLDERS`] order, so a username that itself
/// contains `SSH_PUBLIC_KEY` is rewritten again by the later pass.
pub fn render_value(value: &str, subs: &Substitutions<'_>) -> String {
    PLACEHOLDERS
        .iter()
        .fold(value.to_string(), |acc, placeholder| {
            acc.replace(placeholder.token(), placeholder.value(subs))
        })
}

/// Returns a map with the same keys and every value rendered.
pub fn render_metadata(
    metadata: &BTreeMap<String, String>,
    subs: &Substitutions<'_>,
) -> BTreeMap<String, String> {
    metadata
        .iter()
        .map(|(key, value)| (key.clone(), render_value(value, subs)))
        .collect()
}
