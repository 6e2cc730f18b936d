use std::fmt;

/// Outcome of comparing the viewer's input with the configured password.
/// Recomputed on every render; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Shared-password gate for restricted columns.
///
/// This only controls what is displayed; the full table is still loaded.
#[derive(Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    /// Exact, case-sensitive comparison with no trimming. Without a
    /// configured secret nothing is ever granted.
    pub fn decide(&self, entered: &str) -> AccessDecision {
        match &self.secret {
            Some(secret) if secret == entered => AccessDecision::Granted,
            _ => AccessDecision::Denied,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// An empty secret lets an empty input through.
    pub fn has_empty_secret(&self) -> bool {
        self.secret.as_deref() == Some("")
    }
}

impl fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGate")
            .field("configured", &self.is_configured())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let gate = AccessGate::new(Some("Sharp2024".into()));
        assert_eq!(gate.decide("Sharp2024"), AccessDecision::Granted);
        assert_eq!(gate.decide("sharp2024"), AccessDecision::Denied);
        assert_eq!(gate.decide(" Sharp2024"), AccessDecision::Denied);
        assert_eq!(gate.decide("Sharp2024\n"), AccessDecision::Denied);
        assert_eq!(gate.decide(""), AccessDecision::Denied);
    }

    #[test]
    fn unconfigured_never_grants() {
        let gate = AccessGate::new(None);
        assert!(!gate.is_configured());
        assert_eq!(gate.decide(""), AccessDecision::Denied);
        assert_eq!(gate.decide("anything"), AccessDecision::Denied);
    }

    #[test]
    fn empty_secret_grants_empty_input() {
        let gate = AccessGate::new(Some(String::new()));
        assert!(gate.has_empty_secret());
        assert!(gate.decide("").is_granted());
        assert!(!gate.decide("x").is_granted());
    }

    #[test]
    fn debug_hides_secret() {
        let gate = AccessGate::new(Some("hunter2".into()));
        let shown = format!("{gate:?}");
        assert!(!shown.contains("hunter2"));
    }
}
