use crate::api::AdminApi;
use crate::domain::{Atv, AtvId};
use crate::http::ApiError;
use crate::notify::Toasts;
use crate::store::{FleetStore, Settled, Ticket};

use super::{ConfirmFlow, EditorError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTarget {
    pub id: AtvId,
    pub name: String,
}

impl DeleteTarget {
    /// `None` for a listing the server has not assigned an id yet.
    pub fn of(atv: &Atv) -> Option<Self> {
        Some(Self {
            id: atv.id.clone()?,
            name: atv.name.clone(),
        })
    }
}

pub type DeleteFlow = ConfirmFlow<DeleteTarget>;

/// The fleet to write once a delete is confirmed.
#[derive(Debug, Clone)]
pub struct DeletePlan {
    pub ticket: Ticket,
    pub target: DeleteTarget,
    pub next: Vec<Atv>,
}

/// Refused unless the fleet is loaded and settled, so the write never
/// drops listings the client has not seen.
pub fn plan_delete(store: &FleetStore, target: DeleteTarget) -> Result<DeletePlan, EditorError> {
    if !store.is_ready() {
        return Err(EditorError::FleetNotLoaded);
    }
    Ok(DeletePlan {
        ticket: store.ticket(),
        next: store.without(&target.id),
        target,
    })
}

/// Apply the answer to a delete write. The listing only disappears locally
/// if the server accepted the new fleet.
pub fn finish_delete(
    store: &mut FleetStore,
    ticket: Ticket,
    target: &DeleteTarget,
    result: Result<Vec<Atv>, ApiError>,
    toasts: &mut Toasts,
    now: u64,
) -> Settled {
    let settled = store.finish_replace(ticket, result);
    match &settled {
        Settled::Applied => {
            tracing::info!(id = %target.id, "listing deleted");
            toasts.success("Deleted", format!("{} was deleted successfully!", target.name), now);
        }
        Settled::Failed(err) => {
            toasts.error(
                "Error",
                format!("Error saving data: {}", err.user_message()),
                now,
            );
        }
        Settled::Stale => {}
    }
    settled
}

/// Act on a confirmed delete prompt. Returns `Ok(None)` when nothing was
/// pending; the prompt stays open if the fleet is not ready.
pub async fn confirm_delete(
    flow: &mut DeleteFlow,
    api: &dyn AdminApi,
    store: &mut FleetStore,
    toasts: &mut Toasts,
    now: u64,
) -> Result<Option<Settled>, EditorError> {
    if flow.is_pending() && !store.is_ready() {
        return Err(EditorError::FleetNotLoaded);
    }
    let Some(target) = flow.confirm() else {
        return Ok(None);
    };
    let plan = plan_delete(store, target)?;
    let result = api.replace_atvs(plan.next).await;
    Ok(Some(finish_delete(store, plan.ticket, &plan.target, result, toasts, now)))
}
