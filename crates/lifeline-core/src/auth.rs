//! Authentication collaborator seam.

/// External authentication capability (biometric prompt on device).
///
/// Consulted only when settings require it; a denial aborts the
/// activation before any journal entry exists.
pub trait Authenticator {
    /// Prompt the user. `true` means the gate opens.
    fn authenticate(&self) -> bool;
}

/// Fixed-response authenticator for tests and non-interactive callers.
#[derive(Debug, Clone, Copy)]
pub struct StaticAuthenticator {
    granted: bool,
}

impl StaticAuthenticator {
    pub fn allow() -> Self {
        Self { granted: true }
    }

    pub fn deny() -> Self {
        Self { granted: false }
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self) -> bool {
        self.granted
    }
}
