use crate::api::AdminApi;
use crate::domain::{Atv, AtvId};
use crate::http::ApiError;

use super::{Generation, Settled, Ticket};

/// Authoritative client copy of the vehicle fleet.
#[derive(Debug, Clone, Default)]
pub struct FleetStore {
    atvs: Vec<Atv>,
    error: Option<String>,
    loading: bool,
    loaded: bool,
    generation: Generation,
}

impl FleetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atvs(&self) -> &[Atv] {
        &self.atvs
    }

    pub fn find(&self, id: &AtvId) -> Option<&Atv> {
        self.atvs.iter().find(|atv| atv.id.as_ref() == Some(id))
    }

    /// Page-level load error, kept until the next successful load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The list came from a successful load and no load is outstanding.
    /// Full-fleet writes require this.
    pub fn is_ready(&self) -> bool {
        self.loaded && !self.loading
    }

    pub fn ticket(&self) -> Ticket {
        self.generation.ticket()
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.is_current(ticket)
    }

    /// Forget outstanding requests; their answers will be ignored.
    pub fn invalidate(&mut self) {
        self.generation.bump();
        self.loading = false;
    }

    /// Drop the fleet along with any outstanding requests.
    pub fn clear(&mut self) {
        self.invalidate();
        self.atvs.clear();
        self.error = None;
        self.loaded = false;
    }

    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.ticket()
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: Result<Vec<Atv>, ApiError>) -> Settled {
        if !self.is_current(ticket) {
            tracing::debug!("dropping fleet load answer for an invalidated view");
            return Settled::Stale;
        }
        self.loading = false;

        match result {
            Ok(atvs) => {
                tracing::info!(count = atvs.len(), "fleet loaded");
                self.atvs = atvs;
                self.error = None;
                self.loaded = true;
                Settled::Applied
            }
            Err(err) => {
                tracing::error!(error = %err, "fleet load failed");
                self.loaded = false;
                self.error = Some(format!(
                    "Could not load the ATV list. (Error: {})",
                    err.user_message()
                ));
                Settled::Failed(err)
            }
        }
    }

    /// Hand back the answer to a full-fleet write.
    ///
    /// On success local state becomes exactly what the server returned, not
    /// what was proposed.
    pub fn finish_replace(&mut self, ticket: Ticket, result: Result<Vec<Atv>, ApiError>) -> Settled {
        if !self.is_current(ticket) {
            tracing::debug!("dropping fleet write answer for an invalidated view");
            return Settled::Stale;
        }

        match result {
            Ok(atvs) => {
                tracing::info!(count = atvs.len(), "fleet replaced");
                self.atvs = atvs;
                Settled::Applied
            }
            Err(err) => {
                tracing::warn!(error = %err, "fleet write failed, keeping previous list");
                Settled::Failed(err)
            }
        }
    }

    pub async fn load(&mut self, api: &dyn AdminApi) -> Settled {
        let ticket = self.begin_load();
        let result = api.list_atvs().await;
        self.finish_load(ticket, result)
    }

    pub async fn replace_all(&mut self, api: &dyn AdminApi, next: Vec<Atv>) -> Result<(), ApiError> {
        let ticket = self.ticket();
        let result = api.replace_atvs(next).await;
        self.finish_replace(ticket, result).into_result()
    }

    /// The fleet with one listing removed, in original order.
    pub fn without(&self, id: &AtvId) -> Vec<Atv> {
        self.atvs
            .iter()
            .filter(|atv| atv.id.as_ref() != Some(id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi, atv};

    #[tokio::test]
    async fn clear_empties_and_drops_pending_load() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = FleetStore::new();
        store.load(&api).await;

        let ticket = store.begin_load();
        store.clear();
        assert!(store.atvs().is_empty());
        assert_eq!(
            store.finish_load(ticket, Ok(vec![atv("2", "Outlander", 30.0)])),
            Settled::Stale
        );
        assert!(store.atvs().is_empty());
    }

    #[tokio::test]
    async fn ready_only_after_successful_load() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = FleetStore::new();
        assert!(!store.is_ready());

        let ticket = store.begin_load();
        assert!(!store.is_ready());
        store.finish_load(ticket, Ok(api.fleet()));
        assert!(store.is_ready());

        // a reload in flight blocks writes until it settles
        let ticket = store.begin_load();
        assert!(!store.is_ready());
        store.finish_load(ticket, Err(ApiError::Network("refused".into())));
        assert!(!store.is_ready());
        assert_eq!(store.atvs().len(), 1);

        store.load(&api).await;
        assert!(store.is_ready());
        store.clear();
        assert!(!store.is_ready());
    }

    #[tokio::test]
    async fn load_replaces_list_and_clears_error() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = FleetStore::new();

        api.fail_next_list(ApiError::Network("refused".into()));
        assert!(matches!(store.load(&api).await, Settled::Failed(_)));
        assert!(store.error().is_some());

        assert_eq!(store.load(&api).await, Settled::Applied);
        assert_eq!(store.atvs().len(), 1);
        assert!(store.error().is_none());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_list() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0), atv("2", "Raptor", 30.0)]);
        let mut store = FleetStore::new();
        store.load(&api).await;

        api.fail_next_list(ApiError::Server {
            status: 500,
            message: None,
        });
        store.load(&api).await;

        assert_eq!(store.atvs().len(), 2);
        assert!(store.error().unwrap_or_default().contains("status 500"));
    }

    #[tokio::test]
    async fn replace_adopts_server_payload_not_proposal() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]).reorder_on_replace();
        let mut store = FleetStore::new();
        store.load(&api).await;

        let mut proposed = store.atvs().to_vec();
        proposed.push(Atv {
            id: None,
            ..atv("x", "Outlander", 35.0)
        });
        store.replace_all(&api, proposed.clone()).await.unwrap();

        assert_ne!(store.atvs(), proposed.as_slice());
        assert_eq!(store.atvs(), api.fleet().as_slice());
        assert_eq!(store.atvs()[0].name, "Outlander");
        assert_eq!(store.atvs()[0].id, Some(AtvId::new("srv-1")));
    }

    #[tokio::test]
    async fn failed_replace_leaves_list_untouched() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = FleetStore::new();
        store.load(&api).await;

        api.fail_next_replace(ApiError::Network("timeout".into()));
        let result = store.replace_all(&api, Vec::new()).await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        assert_eq!(store.atvs().len(), 1);
        assert_eq!(api.calls().last(), Some(&Call::ReplaceAtvs(Vec::new())));
    }

    #[test]
    fn answers_after_invalidate_are_ignored() {
        let mut store = FleetStore::new();
        let ticket = store.begin_load();
        store.invalidate();

        let settled = store.finish_load(ticket, Ok(vec![atv("1", "Grizzly", 20.0)]));
        assert_eq!(settled, Settled::Stale);
        assert!(store.atvs().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn without_preserves_order() {
        let mut store = FleetStore::new();
        let ticket = store.begin_load();
        store.finish_load(
            ticket,
            Ok(vec![atv("a", "A", 1.0), atv("b", "B", 2.0), atv("c", "C", 3.0)]),
        );

        let names: Vec<_> = store
            .without(&AtvId::new("b"))
            .into_iter()
            .map(|atv| atv.name)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(store.find(&AtvId::new("c")).is_some());
    }
}
