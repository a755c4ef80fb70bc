/// Side effects the client asks of the embedding UI.
pub trait UiHooks: Send + Sync {
    /// Shows an error message to the user.
    fn notify_error(&self, message: &str);

    /// Moves the user to `path`.
    fn redirect(&self, path: &str);
}

/// Hooks for headless use; both effects are only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHooks;

impl UiHooks for TracingHooks {
    fn notify_error(&self, message: &str) {
        tracing::warn!("⚠️ {}", message);
    }

    fn redirect(&self, path: &str) {
        tracing::info!("↪️ Redirect to {}", path);
    }
}
