//! Client-side copies of server-owned state.
//!
//! Local state only changes when the server confirms: a load or a write
//! replaces it with the server's payload, a failure leaves it as it was.
//! Every request is tagged with a [`Ticket`]; once a store is invalidated
//! (tab closed, signed out) answers carrying an older ticket are dropped.

mod content;
mod fleet;

pub use content::{ContentStore, SavePlan};
pub use fleet::FleetStore;

use crate::http::ApiError;

/// Generation stamp of an outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What happened when a response was handed back to a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Settled {
    /// The server's payload replaced local state.
    Applied,
    /// The call failed; local state is unchanged.
    Failed(ApiError),
    /// The store was invalidated while the call was outstanding.
    Stale,
}

impl Settled {
    pub fn into_result(self) -> Result<(), ApiError> {
        match self {
            Settled::Applied | Settled::Stale => Ok(()),
            Settled::Failed(err) => Err(err),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Generation(u64);

impl Generation {
    fn ticket(self) -> Ticket {
        Ticket(self.0)
    }

    fn is_current(self, ticket: Ticket) -> bool {
        ticket.0 == self.0
    }

    fn bump(&mut self) {
        self.0 += 1;
    }
}
