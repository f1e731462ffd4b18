//! Operator authentication.

use crate::session::{Authenticator, Credentials};

/// Accepts any credentials whose username and password are both non-blank.
///
/// There is no account store; this only gates the core behind a login step.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyCredentials;

impl Authenticator for NonEmptyCredentials {
    fn authenticate(&self, credentials: &Credentials) -> bool {
        !credentials.username.trim().is_empty() && !credentials.password.is_empty()
    }
}
