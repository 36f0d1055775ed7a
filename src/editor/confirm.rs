/// Gate in front of a destructive action: nothing happens until the user
/// confirms the pending request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmFlow<T> {
    Idle,
    Pending(T),
}

impl<T> Default for ConfirmFlow<T> {
    fn default() -> Self {
        ConfirmFlow::Idle
    }
}

impl<T> ConfirmFlow<T> {
    /// Ask for confirmation. A second request while one is pending is ignored
    /// and returns `false`.
    pub fn request(&mut self, subject: T) -> bool {
        match self {
            ConfirmFlow::Idle => {
                *self = ConfirmFlow::Pending(subject);
                true
            }
            ConfirmFlow::Pending(_) => false,
        }
    }

    pub fn pending(&self) -> Option<&T> {
        match self {
            ConfirmFlow::Pending(subject) => Some(subject),
            ConfirmFlow::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ConfirmFlow::Pending(_))
    }

    /// Dismiss the prompt without acting.
    pub fn cancel(&mut self) -> Option<T> {
        self.take()
    }

    /// Accept the prompt; returns the subject to act on.
    pub fn confirm(&mut self) -> Option<T> {
        self.take()
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::take(self) {
            ConfirmFlow::Pending(subject) => Some(subject),
            ConfirmFlow::Idle => None,
        }
    }
}
