//! Single in-progress vehicle listing.
//!
//! A draft is a private copy: nothing the admin types reaches the fleet
//! until `commit`, which uploads the pending image first and then writes
//! the whole fleet with the draft merged in. The draft stays open when
//! either step fails so the admin can retry.

use crate::api::AdminApi;
use crate::domain::{Atv, AtvField, AtvId, PendingAsset};
use crate::notify::Toasts;
use crate::store::{FleetStore, Settled, Ticket};

use super::{EditorError, upload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftMode {
    New,
    Edit(AtvId),
}

#[derive(Debug, Clone)]
pub struct Draft {
    pub atv: Atv,
    pub mode: DraftMode,
    pub asset: Option<PendingAsset>,
}

impl Draft {
    pub fn is_new(&self) -> bool {
        self.mode == DraftMode::New
    }
}

/// Everything a commit needs, detached from the editor so it can run
/// while the UI keeps rendering.
#[derive(Debug, Clone)]
pub struct CommitPlan {
    ticket: Ticket,
    epoch: u64,
    atv: Atv,
    mode: DraftMode,
    asset: Option<PendingAsset>,
    fleet: Vec<Atv>,
}

#[derive(Debug, Clone)]
pub struct CommitOutcome {
    ticket: Ticket,
    epoch: u64,
    uploaded: Option<String>,
    result: Result<Vec<Atv>, EditorError>,
}

#[derive(Debug, Default)]
pub struct DraftEditor {
    draft: Option<Draft>,
    in_flight: bool,
    epoch: u64,
}

impl DraftEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    /// A commit has been sent and its answer has not arrived yet.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Open a copy of `from`, or the new-listing template when `None`.
    pub fn begin(&mut self, from: Option<&Atv>, now_millis: u64) -> Result<(), EditorError> {
        if self.draft.is_some() {
            return Err(EditorError::DraftAlreadyOpen);
        }

        let draft = match from {
            Some(atv) => {
                let id = atv.id.clone().ok_or(EditorError::NotPersisted)?;
                Draft {
                    atv: atv.clone(),
                    mode: DraftMode::Edit(id),
                    asset: None,
                }
            }
            None => Draft {
                atv: Atv {
                    id: Some(AtvId::placeholder(now_millis)),
                    ..Atv::template()
                },
                mode: DraftMode::New,
                asset: None,
            },
        };

        self.epoch += 1;
        self.draft = Some(draft);
        Ok(())
    }

    pub fn set_field(&mut self, field: AtvField) -> Result<(), EditorError> {
        field.apply(&mut self.draft_mut()?.atv);
        Ok(())
    }

    /// Append a trimmed feature. Blank input is silently ignored.
    pub fn add_feature(&mut self, text: &str) -> Result<(), EditorError> {
        let draft = self.draft_mut()?;
        let text = text.trim();
        if !text.is_empty() {
            draft.atv.features.push(text.to_string());
        }
        Ok(())
    }

    /// Remove the feature at `index`. Out-of-range indices are rejected.
    pub fn remove_feature(&mut self, index: usize) -> Result<String, EditorError> {
        let features = &mut self.draft_mut()?.atv.features;
        if index >= features.len() {
            return Err(EditorError::FeatureIndexOutOfRange {
                index,
                len: features.len(),
            });
        }
        Ok(features.remove(index))
    }

    /// Hold an image for upload at commit time, replacing any earlier pick.
    pub fn attach(&mut self, asset: PendingAsset) -> Result<(), EditorError> {
        self.draft_mut()?.asset = Some(asset);
        Ok(())
    }

    pub fn detach(&mut self) -> Result<Option<PendingAsset>, EditorError> {
        Ok(self.draft_mut()?.asset.take())
    }

    /// Close the draft without saving. Closing when nothing is open is a no-op.
    pub fn discard(&mut self) {
        if self.draft.take().is_some() {
            self.epoch += 1;
        }
    }

    /// Drop the draft and forget any outstanding commit.
    pub fn reset(&mut self) {
        self.draft = None;
        self.in_flight = false;
        self.epoch += 1;
    }

    /// Snapshot the draft for a commit and mark the editor busy.
    pub fn prepare_commit(&mut self, store: &FleetStore) -> Result<CommitPlan, EditorError> {
        if self.in_flight {
            return Err(EditorError::CommitInFlight);
        }
        let draft = self.draft.as_ref().ok_or(EditorError::NoDraft)?;
        if !store.is_ready() {
            return Err(EditorError::FleetNotLoaded);
        }
        if let DraftMode::Edit(id) = &draft.mode {
            if store.find(id).is_none() {
                return Err(EditorError::UnknownEntity(id.clone()));
            }
        }

        let plan = CommitPlan {
            ticket: store.ticket(),
            epoch: self.epoch,
            atv: draft.atv.clone(),
            mode: draft.mode.clone(),
            asset: draft.asset.clone(),
            fleet: store.atvs().to_vec(),
        };
        self.in_flight = true;
        Ok(plan)
    }

    /// Apply a commit's outcome to the store, the draft and the toasts.
    pub fn finish_commit(
        &mut self,
        outcome: CommitOutcome,
        store: &mut FleetStore,
        toasts: &mut Toasts,
        now: u64,
    ) -> Result<(), EditorError> {
        let CommitOutcome {
            ticket,
            epoch,
            uploaded,
            result,
        } = outcome;
        if !store.is_current(ticket) {
            tracing::debug!("dropping commit answer for an invalidated view");
            return Ok(());
        }
        self.in_flight = false;
        let same_draft = epoch == self.epoch;

        match result {
            Ok(fleet) => {
                if let Settled::Applied = store.finish_replace(ticket, Ok(fleet)) {
                    if same_draft {
                        self.draft = None;
                        self.epoch += 1;
                    }
                    toasts.success("Success", "Changes saved successfully!", now);
                }
                Ok(())
            }
            Err(err) => {
                // The image already reached the server; keep its path so a
                // retry does not upload it again.
                if let (true, Some(path), Some(draft)) = (same_draft, uploaded, self.draft.as_mut()) {
                    draft.atv.image = path;
                    draft.asset = None;
                }
                match &err {
                    EditorError::Upload(api_err) => toasts.error(
                        "Error",
                        format!("Error uploading the image: {}", api_err.user_message()),
                        now,
                    ),
                    EditorError::Save(api_err) => {
                        store.finish_replace(ticket, Err(api_err.clone()));
                        toasts.error(
                            "Error",
                            format!("Error saving data: {}", api_err.user_message()),
                            now,
                        )
                    }
                    other => toasts.error("Error", other.to_string(), now),
                };
                Err(err)
            }
        }
    }

    pub async fn commit(
        &mut self,
        api: &dyn AdminApi,
        store: &mut FleetStore,
        toasts: &mut Toasts,
        now: u64,
    ) -> Result<(), EditorError> {
        let plan = self.prepare_commit(store)?;
        let outcome = run_commit(api, plan).await;
        self.finish_commit(outcome, store, toasts, now)
    }

    fn draft_mut(&mut self) -> Result<&mut Draft, EditorError> {
        self.draft.as_mut().ok_or(EditorError::NoDraft)
    }
}

/// Upload the pending image, then write the full fleet with the draft
/// merged in. The fleet write is never attempted if the upload fails.
pub async fn run_commit(api: &dyn AdminApi, plan: CommitPlan) -> CommitOutcome {
    let CommitPlan {
        ticket,
        epoch,
        atv,
        mode,
        asset,
        fleet,
    } = plan;
    let had_asset = asset.is_some();

    let image = match upload::resolve(api, &atv.image, asset).await {
        Ok(image) => image,
        Err(err) => {
            return CommitOutcome {
                ticket,
                epoch,
                uploaded: None,
                result: Err(err),
            };
        }
    };
    let uploaded = had_asset.then(|| image.clone());

    let next = merge_into(fleet, atv, &mode, image);
    let result = api.replace_atvs(next).await.map_err(EditorError::Save);

    CommitOutcome {
        ticket,
        epoch,
        uploaded,
        result,
    }
}

/// The next full fleet: a new listing is appended without its placeholder
/// id, an edited listing replaces the entry with the same id.
fn merge_into(mut fleet: Vec<Atv>, mut atv: Atv, mode: &DraftMode, image: String) -> Vec<Atv> {
    atv.image = image;
    match mode {
        DraftMode::New => {
            atv.id = None;
            fleet.push(atv);
        }
        DraftMode::Edit(id) => {
            for slot in fleet.iter_mut().filter(|slot| slot.id.as_ref() == Some(id)) {
                *slot = atv.clone();
            }
        }
    }
    fleet
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ApiError;
    use crate::notify::{TOAST_DURATION_MS, ToastKind};
    use crate::testing::{FakeApi, atv};

    async fn loaded(api: &FakeApi) -> FleetStore {
        let mut store = FleetStore::new();
        store.load(api).await;
        store
    }

    #[test]
    fn begin_is_not_reentrant() {
        let mut editor = DraftEditor::new();
        let grizzly = atv("1", "Grizzly", 20.0);
        editor.begin(Some(&grizzly), 0).unwrap();

        assert_eq!(editor.begin(None, 0), Err(EditorError::DraftAlreadyOpen));
        assert_eq!(editor.draft().map(|d| d.atv.name.as_str()), Some("Grizzly"));
    }

    #[test]
    fn new_draft_uses_template_and_placeholder() {
        let mut editor = DraftEditor::new();
        editor.begin(None, 42).unwrap();

        let draft = editor.draft().unwrap();
        assert!(draft.is_new());
        assert_eq!(draft.atv.name, "New ATV Model");
        assert_eq!(draft.atv.features, vec!["4WD", "Digital Display"]);
        assert!(draft.atv.id.as_ref().is_some_and(AtvId::is_placeholder));
    }

    #[test]
    fn edits_stay_on_the_draft() {
        let mut editor = DraftEditor::new();
        let grizzly = atv("1", "Grizzly", 20.0);
        editor.begin(Some(&grizzly), 0).unwrap();
        editor.set_field(AtvField::Price(25.0)).unwrap();

        assert_eq!(editor.draft().unwrap().atv.price, 25.0);
        assert_eq!(grizzly.price, 20.0);
    }

    #[test]
    fn feature_editing() {
        let mut editor = DraftEditor::new();
        editor.begin(None, 0).unwrap();

        editor.add_feature("").unwrap();
        editor.add_feature("   ").unwrap();
        assert_eq!(editor.draft().unwrap().atv.features.len(), 2);

        editor.add_feature(" X ").unwrap();
        editor.add_feature("Winch").unwrap();
        assert_eq!(
            editor.draft().unwrap().atv.features,
            vec!["4WD", "Digital Display", "X", "Winch"]
        );

        assert_eq!(editor.remove_feature(1).unwrap(), "Digital Display");
        assert_eq!(editor.draft().unwrap().atv.features, vec!["4WD", "X", "Winch"]);

        assert_eq!(
            editor.remove_feature(3),
            Err(EditorError::FeatureIndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(editor.draft().unwrap().atv.features.len(), 3);
    }

    #[test]
    fn operations_without_draft_fail() {
        let mut editor = DraftEditor::new();
        assert_eq!(editor.add_feature("x"), Err(EditorError::NoDraft));
        assert_eq!(editor.set_field(AtvField::Seats(2)), Err(EditorError::NoDraft));
        assert!(matches!(
            editor.prepare_commit(&FleetStore::new()),
            Err(EditorError::NoDraft)
        ));
    }

    #[tokio::test]
    async fn commit_after_failed_load_writes_nothing() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0), atv("2", "Raptor", 30.0)]);
        let mut store = FleetStore::new();
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        api.fail_next_list(ApiError::Network("refused".into()));
        store.load(&api).await;
        editor.begin(None, 0).unwrap();

        assert_eq!(
            editor.commit(&api, &mut store, &mut toasts, 0).await,
            Err(EditorError::FleetNotLoaded)
        );
        assert!(api.replace_calls().is_empty());
        assert_eq!(api.upload_calls(), 0);
        assert_eq!(api.fleet().len(), 2);
        assert!(editor.is_open());
        assert!(!editor.is_in_flight());
    }

    #[test]
    fn commit_during_load_is_refused() {
        let mut store = FleetStore::new();
        let mut editor = DraftEditor::new();
        editor.begin(None, 0).unwrap();

        let _ticket = store.begin_load();
        assert!(matches!(
            editor.prepare_commit(&store),
            Err(EditorError::FleetNotLoaded)
        ));
    }

    #[tokio::test]
    async fn add_never_sends_placeholder_id() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        editor.begin(None, 1_700_000_000_000).unwrap();
        editor.set_field(AtvField::Name("Outlander".into())).unwrap();
        editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap();

        let sent = api.replace_calls();
        assert_eq!(sent.len(), 1);
        let added = sent[0].last().unwrap();
        assert_eq!(added.name, "Outlander");
        assert!(added.id.is_none());
        assert!(serde_json::to_value(added).unwrap().get("_id").is_none());

        assert!(!editor.is_open());
        assert_eq!(store.atvs().len(), 2);
        assert_eq!(store.atvs()[1].id, Some(AtvId::new("srv-1")));
    }

    #[tokio::test]
    async fn upload_failure_skips_fleet_write() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        let grizzly = store.atvs()[0].clone();
        editor.begin(Some(&grizzly), 0).unwrap();
        editor.attach(PendingAsset::new("grizzly.png", vec![1, 2])).unwrap();
        api.fail_next_upload(ApiError::Network("connection reset".into()));

        let err = editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap_err();

        assert!(matches!(err, EditorError::Upload(_)));
        assert!(api.replace_calls().is_empty());
        assert!(editor.is_open());
        assert!(editor.draft().unwrap().asset.is_some());
        assert!(!editor.is_in_flight());
        assert_eq!(store.atvs()[0], grizzly);
        assert_eq!(toasts.visible().next().map(|t| t.kind), Some(ToastKind::Error));
    }

    #[tokio::test]
    async fn uploaded_path_is_persisted_before_write() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.attach(PendingAsset::new("g.png", vec![9])).unwrap();
        editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap();

        let sent = api.replace_calls();
        assert_eq!(sent[0][0].image, "/atv_images/atvImage-g.png");
        assert_eq!(store.atvs()[0].image, "/atv_images/atvImage-g.png");
        assert_eq!(api.upload_calls(), 1);
    }

    #[tokio::test]
    async fn failed_write_keeps_draft_for_retry() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.set_field(AtvField::Price(30.0)).unwrap();
        editor.attach(PendingAsset::new("g.png", vec![9])).unwrap();
        api.fail_next_replace(ApiError::Server {
            status: 500,
            message: Some("Database unavailable".into()),
        });

        let err = editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap_err();
        assert!(matches!(err, EditorError::Save(_)));
        assert_eq!(store.atvs()[0].price, 20.0);

        let draft = editor.draft().unwrap();
        assert_eq!(draft.atv.price, 30.0);
        assert_eq!(draft.atv.image, "/atv_images/atvImage-g.png");
        assert!(draft.asset.is_none());
        assert!(toasts.visible().any(|t| t.message.contains("Database unavailable")));

        editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap();
        assert_eq!(api.upload_calls(), 1);
        assert_eq!(store.atvs()[0].price, 30.0);
    }

    #[tokio::test]
    async fn second_commit_while_in_flight_is_refused() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let store = loaded(&api).await;
        let mut editor = DraftEditor::new();
        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();

        let _plan = editor.prepare_commit(&store).unwrap();
        assert!(matches!(
            editor.prepare_commit(&store),
            Err(EditorError::CommitInFlight)
        ));
    }

    #[tokio::test]
    async fn discard_after_commit_is_noop() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.commit(&api, &mut store, &mut toasts, 0).await.unwrap();
        let before = store.atvs().to_vec();

        editor.discard();
        editor.discard();
        assert!(!editor.is_open());
        assert_eq!(store.atvs(), before.as_slice());
    }

    #[tokio::test]
    async fn discard_drops_pending_asset_without_network() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let store = loaded(&api).await;
        let mut editor = DraftEditor::new();

        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.attach(PendingAsset::new("g.png", vec![9])).unwrap();
        editor.discard();

        assert!(!editor.is_open());
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn edit_of_removed_listing_is_refused() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let store = loaded(&api).await;
        let mut editor = DraftEditor::new();
        editor.begin(Some(&atv("9", "Ghost", 1.0)), 0).unwrap();

        assert_eq!(
            editor.prepare_commit(&store).unwrap_err(),
            EditorError::UnknownEntity(AtvId::new("9"))
        );
        assert!(!editor.is_in_flight());
    }

    #[tokio::test]
    async fn answer_after_sign_out_is_ignored() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = loaded(&api).await;
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();
        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.set_field(AtvField::Price(99.0)).unwrap();

        let plan = editor.prepare_commit(&store).unwrap();
        let outcome = run_commit(&api, plan).await;
        store.invalidate();
        editor.reset();

        editor.finish_commit(outcome, &mut store, &mut toasts, 0).unwrap();
        assert_eq!(store.atvs()[0].price, 20.0);
        assert!(toasts.is_empty());
    }

    #[tokio::test]
    async fn edit_price_end_to_end() {
        let api = FakeApi::with_fleet(vec![atv("1", "Grizzly", 20.0)]);
        let mut store = FleetStore::new();
        let mut toasts = Toasts::new();
        let mut editor = DraftEditor::new();

        store.load(&api).await;
        editor.begin(Some(&store.atvs()[0].clone()), 0).unwrap();
        editor.set_field(AtvField::Price(25.0)).unwrap();
        editor.commit(&api, &mut store, &mut toasts, 1_000).await.unwrap();

        assert_eq!(store.atvs()[0].price, 25.0);
        assert!(!editor.is_open());
        let toast = toasts.visible().next().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);

        assert!(!toasts.prune(1_000 + TOAST_DURATION_MS - 1));
        assert!(toasts.prune(1_000 + TOAST_DURATION_MS));
        assert!(toasts.is_empty());
    }
}
