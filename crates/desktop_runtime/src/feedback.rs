//! Transient voice-assistant toast with generation-guarded expiry.

#[derive(Debug, Clone, PartialEq, Eq)]
/// What happens to a toast once its timer fires.
pub enum FeedbackExpiry {
    /// Clear the toast after the delay.
    ClearAfter(u32),
    /// Swap in a follow-up text after the delay. The follow-up stays until replaced.
    ReplaceAfter(u32, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A toast text and its lifetime.
pub struct FeedbackMessage {
    pub text: String,
    pub expiry: FeedbackExpiry,
}

impl FeedbackMessage {
    pub fn clear_after(text: impl Into<String>, delay_ms: u32) -> Self {
        Self {
            text: text.into(),
            expiry: FeedbackExpiry::ClearAfter(delay_ms),
        }
    }

    pub fn replace_after(text: impl Into<String>, delay_ms: u32, next: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            expiry: FeedbackExpiry::ReplaceAfter(delay_ms, next.into()),
        }
    }

    pub fn delay_ms(&self) -> u32 {
        match self.expiry {
            FeedbackExpiry::ClearAfter(delay_ms) | FeedbackExpiry::ReplaceAfter(delay_ms, _) => {
                delay_ms
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Handle for the expiry timer of one shown message.
pub struct FeedbackTicket {
    generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The visible toast. Each [`FeedbackState::show`] bumps a generation so stale timers are ignored.
pub struct FeedbackState {
    text: Option<String>,
    pending: Option<FeedbackExpiry>,
    generation: u64,
}

impl FeedbackState {
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replaces the current toast and returns the ticket its timer must present.
    pub fn show(&mut self, message: FeedbackMessage) -> FeedbackTicket {
        self.generation = self.generation.wrapping_add(1);
        self.text = Some(message.text);
        self.pending = Some(message.expiry);
        FeedbackTicket {
            generation: self.generation,
        }
    }

    /// Applies the expiry of the message `ticket` was issued for, unless a newer message has
    /// been shown since. Returns whether the toast changed.
    pub fn expire(&mut self, ticket: FeedbackTicket) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match self.pending.take() {
            Some(FeedbackExpiry::ClearAfter(_)) => {
                self.text = None;
                true
            }
            Some(FeedbackExpiry::ReplaceAfter(_, next)) => {
                self.text = Some(next);
                true
            }
            None => false,
        }
    }
}
