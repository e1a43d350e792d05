//! Host navigation seam used by the session-expiry fallback

/// Where the host currently is and how to move it.
///
/// The HTTP layer never touches a routing mechanism directly; the hosting
/// application injects an implementation wired to whatever navigation it has.
/// `navigate_to` is fire-and-forget.
pub trait Navigator: Send + Sync {
    /// Current navigable location of the host
    fn current_path(&self) -> String;

    /// Force a navigation to the given path
    fn navigate_to(&self, path: &str);
}

/// Navigator that ignores every navigation request, for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn current_path(&self) -> String {
        String::new()
    }

    fn navigate_to(&self, _path: &str) {}
}
