use std::fmt;

/// Phases of the poll loop.
///
/// STARTUP → POLLING ⇄ NOTIFYING, with ERROR always leading back to POLLING
/// on the next cycle. There is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Startup,
    Polling,
    Notifying,
    Error,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Startup => write!(f, "STARTUP"),
            Phase::Polling => write!(f, "POLLING"),
            Phase::Notifying => write!(f, "NOTIFYING"),
            Phase::Error => write!(f, "ERROR"),
        }
    }
}

/// State owned by the poll loop. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopState {
    phase: Phase,
    last_notified_status: Option<String>,
    from_date: i64,
}

impl LoopState {
    pub fn new(from_date: i64) -> Self {
        Self {
            phase: Phase::Startup,
            last_notified_status: None,
            from_date,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn last_notified_status(&self) -> Option<&str> {
        self.last_notified_status.as_deref()
    }

    /// Lower bound for the next API request.
    pub fn from_date(&self) -> i64 {
        self.from_date
    }

    pub fn begin_poll(&mut self) {
        self.phase = Phase::Polling;
    }

    /// Whether `status` differs from the last one that reached the chat.
    pub fn is_new_status(&self, status: &str) -> bool {
        self.last_notified_status.as_deref() != Some(status)
    }

    pub fn begin_notify(&mut self) {
        self.phase = Phase::Notifying;
    }

    /// Record a notification that was confirmed sent.
    ///
    /// This is the only place `last_notified_status` and `from_date` move.
    pub fn confirm_notified(&mut self, status: &str, current_date: Option<i64>) {
        self.last_notified_status = Some(status.to_string());
        if let Some(ts) = current_date {
            self.from_date = ts;
        }
        self.phase = Phase::Polling;
    }

    /// A send failed; nothing changes so the same message is retried.
    pub fn notify_failed(&mut self) {
        self.phase = Phase::Polling;
    }

    pub fn fail(&mut self) {
        self.phase = Phase::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_startup_with_no_status() {
        let state = LoopState::new(1000);
        assert_eq!(state.phase(), Phase::Startup);
        assert_eq!(state.last_notified_status(), None);
        assert_eq!(state.from_date(), 1000);
    }

    #[test]
    fn any_status_is_new_initially() {
        let state = LoopState::new(0);
        assert!(state.is_new_status("reviewing"));
    }

    #[test]
    fn confirm_updates_status_and_from_date() {
        let mut state = LoopState::new(0);
        state.begin_poll();
        state.begin_notify();
        assert_eq!(state.phase(), Phase::Notifying);

        state.confirm_notified("reviewing", Some(1_700_000_000));
        assert_eq!(state.phase(), Phase::Polling);
        assert_eq!(state.last_notified_status(), Some("reviewing"));
        assert_eq!(state.from_date(), 1_700_000_000);
        assert!(!state.is_new_status("reviewing"));
        assert!(state.is_new_status("approved"));
    }

    #[test]
    fn confirm_without_current_date_keeps_from_date() {
        let mut state = LoopState::new(42);
        state.confirm_notified("approved", None);
        assert_eq!(state.from_date(), 42);
    }

    #[test]
    fn failed_send_leaves_state_untouched() {
        let mut state = LoopState::new(42);
        state.begin_notify();
        state.notify_failed();
        assert_eq!(state.last_notified_status(), None);
        assert_eq!(state.from_date(), 42);
        assert_eq!(state.phase(), Phase::Polling);
    }

    #[test]
    fn error_returns_to_polling_on_next_cycle() {
        let mut state = LoopState::new(0);
        state.fail();
        assert_eq!(state.phase(), Phase::Error);
        state.begin_poll();
        assert_eq!(state.phase(), Phase::Polling);
    }

    #[test]
    fn phase_display() {
        assert_eq!(Phase::Startup.to_string(), "STARTUP");
        assert_eq!(Phase::Polling.to_string(), "POLLING");
        assert_eq!(Phase::Notifying.to_string(), "NOTIFYING");
        assert_eq!(Phase::Error.to_string(), "ERROR");
    }
}
