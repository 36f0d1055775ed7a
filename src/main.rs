mod ui;

use std::fmt::{self, Display};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use atv_admin::api::{AdminApi, RestApi};
use atv_admin::auth::{SessionUser, SharedSession};
use atv_admin::config::ApiConfig;
use atv_admin::domain::{Atv, AtvField, AtvId, ContentField, ContentRecord, DriveType, PendingAsset, Transmission};
use atv_admin::editor::{self, CommitOutcome, ConfirmFlow, DeleteFlow, DeletePlan, DeleteTarget, DraftEditor, EditorError};
use atv_admin::http::{ApiClient, ApiError};
use atv_admin::notify::{ToastId, Toasts, now_millis};
use atv_admin::storage;
use atv_admin::store::{ContentStore, FleetStore, Settled, Ticket};
use iced::widget::{column, container};
use iced::{Element, Length, Subscription, Task};
use rusqlite::Connection;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::style;

const TOAST_TICK: Duration = Duration::from_millis(250);
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atv_admin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ApiConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "invalid configuration");
            std::process::exit(2);
        }
    };
    tracing::info!(
        base_url = %config.base_url,
        api_path = %config.api_path,
        data_dir = %config.data_dir.display(),
        "starting ATV admin"
    );

    iced::application("ATV Admin", update, view)
        .subscription(subscription)
        .theme(|_| style::app_theme())
        .window_size((1220.0, 840.0))
        .run_with(move || App::boot(config))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Fleet,
    Content,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Fleet, Tab::Content];
}

impl Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Tab::Fleet => "ATV Fleet",
            Tab::Content => "About Page",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Default)]
pub struct SignInForm {
    pub token: String,
    pub name: String,
    pub error: Option<String>,
}

/// Raw text behind the draft's numeric and free-form inputs.
#[derive(Debug, Default)]
pub struct DraftForm {
    pub seats: String,
    pub price: String,
    pub feature: String,
    pub image_path: String,
}

impl DraftForm {
    fn from_atv(atv: &Atv) -> Self {
        Self {
            seats: atv.seats.to_string(),
            price: format!("{:.2}", atv.price),
            ..Self::default()
        }
    }
}

struct App {
    config: ApiConfig,
    db: Option<Connection>,
    session: SharedSession,
    api: Option<Arc<dyn AdminApi>>,
    tab: Tab,
    sign_in: SignInForm,
    fleet: FleetStore,
    editor: DraftEditor,
    form: DraftForm,
    delete: DeleteFlow,
    deleting: bool,
    content: ContentStore,
    logout: ConfirmFlow<()>,
    toasts: Toasts,
}

impl App {
    fn boot(config: ApiConfig) -> (Self, Task<Message>) {
        let db = match storage::open_db(&config.data_dir) {
            Ok(db) => Some(db),
            Err(err) => {
                tracing::warn!(error = %err, "session storage unavailable, sign-in will not persist");
                None
            }
        };
        let session = db
            .as_ref()
            .and_then(|db| match storage::load_session(db) {
                Ok(session) => Some(session),
                Err(err) => {
                    tracing::warn!(error = %err, "stored session unreadable");
                    None
                }
            })
            .unwrap_or_default();
        let session = SharedSession::new(session);

        let mut toasts = Toasts::new();
        let api = match ApiClient::new(config.clone(), session.clone()) {
            Ok(client) => Some(Arc::new(RestApi::new(client)) as Arc<dyn AdminApi>),
            Err(err) => {
                tracing::error!(error = %err, "HTTP client unavailable");
                toasts.error("Error", err.user_message(), now_millis());
                None
            }
        };

        let mut app = Self {
            config,
            db,
            session,
            api,
            tab: Tab::Fleet,
            sign_in: SignInForm::default(),
            fleet: FleetStore::new(),
            editor: DraftEditor::new(),
            form: DraftForm::default(),
            delete: DeleteFlow::default(),
            deleting: false,
            content: ContentStore::new(),
            logout: ConfirmFlow::default(),
            toasts,
        };

        let task = if app.is_signed_in() {
            app.load_tab()
        } else {
            Task::none()
        };
        (app, task)
    }

    fn is_signed_in(&self) -> bool {
        self.session.snapshot().is_signed_in()
    }

    fn load_tab(&mut self) -> Task<Message> {
        match self.tab {
            Tab::Fleet => self.load_fleet(),
            Tab::Content => self.load_content(),
        }
    }

    fn load_fleet(&mut self) -> Task<Message> {
        let Some(api) = self.api.clone() else {
            return Task::none();
        };
        let ticket = self.fleet.begin_load();
        Task::perform(async move { api.list_atvs().await }, move |result| {
            Message::FleetLoaded(ticket, result)
        })
    }

    fn load_content(&mut self) -> Task<Message> {
        let Some(api) = self.api.clone() else {
            return Task::none();
        };
        let ticket = self.content.begin_load();
        Task::perform(async move { api.get_content().await }, move |result| {
            Message::ContentLoaded(ticket, result)
        })
    }

    /// Tear down the current tab's view state, as if it was closed.
    fn leave_tab(&mut self) {
        self.fleet.invalidate();
        self.content.invalidate();
        self.editor.reset();
        self.form = DraftForm::default();
        self.delete.cancel();
        self.deleting = false;
    }

    fn sign_out(&mut self, notice: Option<&str>) {
        self.session.clear();
        self.persist_session();
        self.leave_tab();
        self.fleet.clear();
        self.content.clear();
        self.logout.cancel();
        self.sign_in = SignInForm {
            error: notice.map(str::to_string),
            ..SignInForm::default()
        };
        tracing::info!("signed out");
    }

    fn persist_session(&mut self) {
        let Some(db) = &self.db else {
            return;
        };
        if let Err(err) = storage::save_session(db, &self.session.snapshot()) {
            tracing::warn!(error = %err, "failed to persist session");
            self.toasts.error("Error", format!("Could not store the session: {err}"), now_millis());
        }
    }

    /// A rejected token ends the session; anything else is left to the caller.
    fn check_auth(&mut self, err: &ApiError) {
        if err.is_unauthenticated() {
            tracing::warn!("token rejected by the server");
            self.sign_out(Some(SESSION_EXPIRED));
        }
    }

    fn set_draft_field(&mut self, field: AtvField) {
        if let Err(err) = self.editor.set_field(field) {
            tracing::debug!(error = %err, "field change without a draft");
        }
    }

    fn sync_form(&mut self) {
        self.form = match self.editor.draft() {
            Some(draft) => DraftForm::from_atv(&draft.atv),
            None => DraftForm::default(),
        };
    }

    fn report(&mut self, err: EditorError) {
        tracing::warn!(error = %err, "editor action refused");
        self.toasts.error("Error", err.to_string(), now_millis());
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    TokenChanged(String),
    UserNameChanged(String),
    SignInPressed,
    TabSelected(Tab),
    RetryFleet,
    RetryContent,
    FleetLoaded(Ticket, Result<Vec<Atv>, ApiError>),
    AddPressed,
    EditPressed(AtvId),
    NameChanged(String),
    EngineChanged(String),
    SeatsChanged(String),
    PriceChanged(String),
    TransmissionSelected(Transmission),
    DriveTypeSelected(DriveType),
    AvailableToggled(bool),
    FeatureInputChanged(String),
    AddFeaturePressed,
    RemoveFeature(usize),
    ImagePathChanged(String),
    AttachImagePressed,
    ImageLoaded(Result<PendingAsset, EditorError>),
    DetachImagePressed,
    SavePressed,
    CommitFinished(CommitOutcome),
    CancelPressed,
    DeletePressed(AtvId),
    DeleteCancelled,
    DeleteConfirmed,
    DeleteFinished {
        ticket: Ticket,
        target: DeleteTarget,
        result: Result<Vec<Atv>, ApiError>,
    },
    ContentLoaded(Ticket, Result<ContentRecord, ApiError>),
    ContentEdited(ContentField, String),
    ContentSavePressed,
    ContentSaved(Ticket, Result<ContentRecord, ApiError>),
    ContentResetPressed,
    ToastDismissed(ToastId),
    Tick,
    LogoutPressed,
    LogoutCancelled,
    LogoutConfirmed,
}

fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::TokenChanged(token) => {
            app.sign_in.token = token;
            Task::none()
        }
        Message::UserNameChanged(name) => {
            app.sign_in.name = name;
            Task::none()
        }
        Message::SignInPressed => {
            let name = app.sign_in.name.trim();
            let user = (!name.is_empty()).then(|| SessionUser {
                name: name.to_string(),
                email: None,
            });
            if let Err(err) = app.session.init(&app.sign_in.token, user) {
                app.sign_in.error = Some(err.to_string());
                return Task::none();
            }
            tracing::info!("signed in");
            app.sign_in = SignInForm::default();
            app.persist_session();
            app.leave_tab();
            app.load_tab()
        }
        Message::TabSelected(tab) => {
            if tab == app.tab {
                return Task::none();
            }
            app.leave_tab();
            app.tab = tab;
            app.load_tab()
        }
        Message::RetryFleet => app.load_fleet(),
        Message::RetryContent => app.load_content(),
        Message::FleetLoaded(ticket, result) => {
            if let Settled::Failed(err) = app.fleet.finish_load(ticket, result) {
                app.check_auth(&err);
            }
            Task::none()
        }
        Message::AddPressed => {
            if !app.fleet.is_ready() {
                app.report(EditorError::FleetNotLoaded);
                return Task::none();
            }
            match app.editor.begin(None, now_millis()) {
                Ok(()) => app.sync_form(),
                Err(err) => app.report(err),
            }
            Task::none()
        }
        Message::EditPressed(id) => {
            if !app.fleet.is_ready() {
                app.report(EditorError::FleetNotLoaded);
                return Task::none();
            }
            let Some(atv) = app.fleet.find(&id).cloned() else {
                app.report(EditorError::UnknownEntity(id));
                return Task::none();
            };
            match app.editor.begin(Some(&atv), now_millis()) {
                Ok(()) => app.sync_form(),
                Err(err) => app.report(err),
            }
            Task::none()
        }
        Message::NameChanged(value) => {
            app.set_draft_field(AtvField::Name(value));
            Task::none()
        }
        Message::EngineChanged(value) => {
            app.set_draft_field(AtvField::Engine(value));
            Task::none()
        }
        Message::SeatsChanged(value) => {
            if let Ok(seats) = value.trim().parse::<u32>() {
                app.set_draft_field(AtvField::Seats(seats));
            }
            app.form.seats = value;
            Task::none()
        }
        Message::PriceChanged(value) => {
            if let Some(price) = value.trim().parse::<f64>().ok().filter(|p| p.is_finite()) {
                app.set_draft_field(AtvField::Price(price));
            }
            app.form.price = value;
            Task::none()
        }
        Message::TransmissionSelected(value) => {
            app.set_draft_field(AtvField::Transmission(value));
            Task::none()
        }
        Message::DriveTypeSelected(value) => {
            app.set_draft_field(AtvField::DriveType(value));
            Task::none()
        }
        Message::AvailableToggled(value) => {
            app.set_draft_field(AtvField::Available(value));
            Task::none()
        }
        Message::FeatureInputChanged(value) => {
            app.form.feature = value;
            Task::none()
        }
        Message::AddFeaturePressed => {
            let text = std::mem::take(&mut app.form.feature);
            if let Err(err) = app.editor.add_feature(&text) {
                app.report(err);
            }
            Task::none()
        }
        Message::RemoveFeature(index) => {
            if let Err(err) = app.editor.remove_feature(index) {
                app.report(err);
            }
            Task::none()
        }
        Message::ImagePathChanged(value) => {
            app.form.image_path = value;
            Task::none()
        }
        Message::AttachImagePressed => {
            let path = PathBuf::from(app.form.image_path.trim());
            if path.as_os_str().is_empty() {
                return Task::none();
            }
            Task::perform(
                async move { editor::upload::load_asset(&path).await },
                Message::ImageLoaded,
            )
        }
        Message::ImageLoaded(result) => {
            match result {
                Ok(asset) => {
                    tracing::debug!(file = %asset.file_name, "image attached");
                    match app.editor.attach(asset) {
                        Ok(()) => app.form.image_path.clear(),
                        // the draft was closed while the file was being read
                        Err(EditorError::NoDraft) => {}
                        Err(err) => app.report(err),
                    }
                }
                Err(err) => app.report(err),
            }
            Task::none()
        }
        Message::DetachImagePressed => {
            if let Err(err) = app.editor.detach() {
                app.report(err);
            }
            Task::none()
        }
        Message::SavePressed => {
            let Some(api) = app.api.clone() else {
                return Task::none();
            };
            match app.editor.prepare_commit(&app.fleet) {
                Ok(plan) => Task::perform(
                    async move { editor::run_commit(api.as_ref(), plan).await },
                    Message::CommitFinished,
                ),
                Err(err) => {
                    app.report(err);
                    Task::none()
                }
            }
        }
        Message::CommitFinished(outcome) => {
            let result = app
                .editor
                .finish_commit(outcome, &mut app.fleet, &mut app.toasts, now_millis());
            match result {
                Ok(()) => {
                    if !app.editor.is_open() {
                        app.form = DraftForm::default();
                    }
                }
                Err(EditorError::Upload(err) | EditorError::Save(err)) => app.check_auth(&err),
                Err(_) => {}
            }
            Task::none()
        }
        Message::CancelPressed => {
            app.editor.discard();
            app.form = DraftForm::default();
            Task::none()
        }
        Message::DeletePressed(id) => {
            if !app.fleet.is_ready() {
                app.report(EditorError::FleetNotLoaded);
                return Task::none();
            }
            if let Some(target) = app.fleet.find(&id).and_then(DeleteTarget::of) {
                app.delete.request(target);
            }
            Task::none()
        }
        Message::DeleteCancelled => {
            app.delete.cancel();
            Task::none()
        }
        Message::DeleteConfirmed => {
            if app.deleting {
                return Task::none();
            }
            let Some(api) = app.api.clone() else {
                return Task::none();
            };
            let Some(target) = app.delete.confirm() else {
                return Task::none();
            };
            let DeletePlan { ticket, target, next } = match editor::plan_delete(&app.fleet, target) {
                Ok(plan) => plan,
                Err(err) => {
                    app.report(err);
                    return Task::none();
                }
            };
            app.deleting = true;
            Task::perform(async move { api.replace_atvs(next).await }, move |result| {
                Message::DeleteFinished {
                    ticket,
                    target: target.clone(),
                    result,
                }
            })
        }
        Message::DeleteFinished {
            ticket,
            target,
            result,
        } => {
            let settled = editor::finish_delete(
                &mut app.fleet,
                ticket,
                &target,
                result,
                &mut app.toasts,
                now_millis(),
            );
            match settled {
                Settled::Stale => {}
                Settled::Applied => app.deleting = false,
                Settled::Failed(err) => {
                    app.deleting = false;
                    app.check_auth(&err);
                }
            }
            Task::none()
        }
        Message::ContentLoaded(ticket, result) => {
            if let Settled::Failed(err) = app.content.finish_load(ticket, result) {
                app.check_auth(&err);
            }
            Task::none()
        }
        Message::ContentEdited(field, value) => {
            if let Err(err) = app.content.edit(field, value) {
                app.report(err);
            }
            Task::none()
        }
        Message::ContentSavePressed => {
            let Some(api) = app.api.clone() else {
                return Task::none();
            };
            match app.content.prepare_save() {
                Ok(plan) => {
                    let ticket = plan.ticket;
                    Task::perform(async move { api.replace_content(plan.record).await }, move |result| {
                        Message::ContentSaved(ticket, result)
                    })
                }
                Err(err) => {
                    app.report(err);
                    Task::none()
                }
            }
        }
        Message::ContentSaved(ticket, result) => {
            let settled = app
                .content
                .finish_save(ticket, result, &mut app.toasts, now_millis());
            if let Settled::Failed(err) = settled {
                app.check_auth(&err);
            }
            Task::none()
        }
        Message::ContentResetPressed => {
            app.content.reset();
            Task::none()
        }
        Message::ToastDismissed(id) => {
            app.toasts.dismiss(id);
            Task::none()
        }
        Message::Tick => {
            app.toasts.prune(now_millis());
            Task::none()
        }
        Message::LogoutPressed => {
            app.logout.request(());
            Task::none()
        }
        Message::LogoutCancelled => {
            app.logout.cancel();
            Task::none()
        }
        Message::LogoutConfirmed => {
            if app.logout.confirm().is_some() {
                app.sign_out(None);
            }
            Task::none()
        }
    }
}

fn subscription(app: &App) -> Subscription<Message> {
    if app.toasts.is_empty() {
        Subscription::none()
    } else {
        iced::time::every(TOAST_TICK).map(|_| Message::Tick)
    }
}

fn view(app: &App) -> Element<'_, Message> {
    let session = app.session.snapshot();
    if !session.is_signed_in() {
        let screen = ui::sign_in::view(&app.sign_in);
        return ui::toasts::overlay(screen, &app.toasts);
    }

    let user = session.user().map(|user| user.name.clone());
    let header = ui::header::view(user, app.logout.is_pending());
    let tabs = ui::tabs::view(app.tab);

    let busy = app.editor.is_in_flight() || app.deleting || !app.fleet.is_ready();
    let body = match app.tab {
        Tab::Fleet => ui::fleet_list::view(&app.fleet, &app.config, busy),
        Tab::Content => ui::content_editor::view(&app.content),
    };

    let layout = column![
        header,
        tabs,
        container(body).padding(16).width(Length::Fill).height(Length::Fill)
    ]
    .spacing(1)
    .height(Length::Fill)
    .width(Length::Fill);

    let mut screen: Element<'_, Message> = container(layout)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_| style::flat_surface_style(style::BG))
        .into();

    if let Some(draft) = app.editor.draft() {
        let form = ui::atv_editor::view(draft, &app.form, &app.config, app.editor.is_in_flight());
        // unsaved edits only go away through Cancel
        screen = ui::modal::view(screen, form, None);
    }
    if let Some(target) = app.delete.pending() {
        let prompt = ui::modal::confirm(
            "Delete ATV",
            format!("Are you sure you want to delete {}? This cannot be undone.", target.name),
            "Delete",
            Message::DeleteConfirmed,
            Message::DeleteCancelled,
        );
        screen = ui::modal::view(screen, prompt, Some(Message::DeleteCancelled));
    }
    if app.logout.is_pending() {
        let prompt = ui::modal::confirm(
            "Log out",
            "Are you sure you want to log out?".to_string(),
            "Log out",
            Message::LogoutConfirmed,
            Message::LogoutCancelled,
        );
        screen = ui::modal::view(screen, prompt, Some(Message::LogoutCancelled));
    }

    ui::toasts::overlay(screen, &app.toasts)
}
