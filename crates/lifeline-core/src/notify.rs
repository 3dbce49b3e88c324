//! Local notification collaborator seam.

/// Best-effort local alert (banner/toast on device).
///
/// Failures never surface as activation failures; the orchestrator
/// swallows them.
pub trait Notifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>>;
}

/// Writes notifications to stderr. The CLI front-end's notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<(), Box<dyn std::error::Error>> {
        eprintln!("[{title}] {body}");
        Ok(())
    }
}

/// Drops every notification. For tests and headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _body: &str) -> Result<(), Box<dyn std::error::Error>> {
        Ok(())
    }
}
