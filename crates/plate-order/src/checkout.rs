//! Checkout flow
//!
//! ```text
//! Browsing -> Reviewing -> SentPrimary -> SentSecondary -> Completed
//!                 |             |               |
//!                 v             v               v
//!             Browsing      Cancelled       Cancelled
//! ```
//!
//! `Reviewing` is the details form. Each `Sent*` state is the prompt to send
//! the same message to the next channel. With fewer channels configured, the
//! last send completes the flow directly. Terminal states return to
//! `Browsing` when a new checkout begins.

use crate::dispatch::MessageDraft;
use crate::error::OrderError;
use serde::Serialize;
use tracing::info;

/// Checkout state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Browsing,
    Reviewing,
    SentPrimary,
    SentSecondary,
    Completed,
    Cancelled,
}

impl CheckoutState {
    /// Whether the flow has ended
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, CheckoutState::Completed | CheckoutState::Cancelled)
    }

    /// Whether the message went out and more channels are pending
    #[inline]
    #[must_use]
    pub fn is_sending(self) -> bool {
        matches!(self, CheckoutState::SentPrimary | CheckoutState::SentSecondary)
    }

    /// Prompt state after `sent` channels have been messaged
    #[must_use]
    pub fn after_sends(sent: usize, channels: usize) -> Self {
        if sent >= channels {
            return CheckoutState::Completed;
        }
        match sent {
            0 => CheckoutState::Reviewing,
            1 => CheckoutState::SentPrimary,
            _ => CheckoutState::SentSecondary,
        }
    }
}

/// States reachable from `from`
#[must_use]
pub fn allowed_transitions(from: CheckoutState) -> Vec<CheckoutState> {
    use CheckoutState::*;
    match from {
        Browsing => vec![Reviewing],
        Reviewing => vec![Browsing, SentPrimary, Completed],
        SentPrimary => vec![SentSecondary, Completed, Cancelled],
        SentSecondary => vec![Completed, Cancelled],
        Completed | Cancelled => vec![Browsing],
    }
}

/// Check a transition against [`allowed_transitions`]
///
/// # Errors
/// [`OrderError::InvalidTransition`] if not allowed
pub fn validate_transition(from: CheckoutState, to: CheckoutState) -> Result<(), OrderError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(OrderError::InvalidTransition { from, to })
    }
}

/// Checkout progress plus the message being sent
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
    draft: Option<MessageDraft>,
    sent: usize,
}

impl CheckoutFlow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Message prepared at details submission
    #[inline]
    #[must_use]
    pub fn draft(&self) -> Option<&MessageDraft> {
        self.draft.as_ref()
    }

    /// Channels messaged so far
    #[inline]
    #[must_use]
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Move to `to` if allowed
    ///
    /// Leaving a terminal state drops the message.
    ///
    /// # Errors
    /// [`OrderError::InvalidTransition`] if not allowed; state is unchanged
    pub fn transition(&mut self, to: CheckoutState) -> Result<(), OrderError> {
        validate_transition(self.state, to)?;
        info!(from = ?self.state, to = ?to, "Checkout transition");
        if to == CheckoutState::Browsing {
            self.draft = None;
            self.sent = 0;
        }
        self.state = to;
        Ok(())
    }

    /// Store the message and count the first send
    ///
    /// # Errors
    /// [`OrderError::InvalidTransition`] unless reviewing
    pub fn record_first_send(&mut self, draft: MessageDraft, channels: usize) -> Result<(), OrderError> {
        let next = CheckoutState::after_sends(1, channels);
        validate_transition(self.state, next)?;
        self.draft = Some(draft);
        self.sent = 1;
        self.transition(next)
    }

    /// Count one more send
    ///
    /// # Errors
    /// [`OrderError::InvalidTransition`] unless at a send prompt
    pub fn record_next_send(&mut self, channels: usize) -> Result<(), OrderError> {
        let next = CheckoutState::after_sends(self.sent + 1, channels);
        self.transition(next)?;
        self.sent += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DEFAULT_MESSAGING_BASE;

    fn draft() -> MessageDraft {
        MessageDraft::new(DEFAULT_MESSAGING_BASE, "order").unwrap()
    }

    #[test]
    fn three_channel_flow() {
        let mut flow = CheckoutFlow::new();
        flow.transition(CheckoutState::Reviewing).unwrap();
        flow.record_first_send(draft(), 3).unwrap();
        assert_eq!(flow.state(), CheckoutState::SentPrimary);
        flow.record_next_send(3).unwrap();
        assert_eq!(flow.state(), CheckoutState::SentSecondary);
        flow.record_next_send(3).unwrap();
        assert_eq!(flow.state(), CheckoutState::Completed);
        assert_eq!(flow.sent(), 3);
        assert!(flow.draft().is_some());
    }

    #[test]
    fn single_channel_completes_immediately() {
        let mut flow = CheckoutFlow::new();
        flow.transition(CheckoutState::Reviewing).unwrap();
        flow.record_first_send(draft(), 1).unwrap();
        assert_eq!(flow.state(), CheckoutState::Completed);
    }

    #[test]
    fn cannot_send_before_review() {
        let mut flow = CheckoutFlow::new();
        assert!(flow.record_first_send(draft(), 3).is_err());
        assert!(flow.draft().is_none());
        assert!(flow.record_next_send(3).is_err());
        assert_eq!(flow.state(), CheckoutState::Browsing);
    }

    #[test]
    fn cancel_only_from_prompts() {
        assert!(validate_transition(CheckoutState::SentPrimary, CheckoutState::Cancelled).is_ok());
        assert!(validate_transition(CheckoutState::SentSecondary, CheckoutState::Cancelled).is_ok());
        assert!(validate_transition(CheckoutState::Reviewing, CheckoutState::Cancelled).is_err());
        assert!(validate_transition(CheckoutState::Browsing, CheckoutState::Cancelled).is_err());
    }

    #[test]
    fn sending_only_at_prompts() {
        assert!(CheckoutState::SentPrimary.is_sending());
        assert!(CheckoutState::SentSecondary.is_sending());
        assert!(!CheckoutState::Reviewing.is_sending());
        assert!(!CheckoutState::Completed.is_sending());
    }

    #[test]
    fn restart_clears_draft() {
        let mut flow = CheckoutFlow::new();
        flow.transition(CheckoutState::Reviewing).unwrap();
        flow.record_first_send(draft(), 2).unwrap();
        flow.transition(CheckoutState::Cancelled).unwrap();
        flow.transition(CheckoutState::Browsing).unwrap();
        assert!(flow.draft().is_none());
        assert_eq!(flow.sent(), 0);
    }
}
