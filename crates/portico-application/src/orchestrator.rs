//! Session orchestrator.
//!
//! The orchestrator is the only component with real control flow: it owns
//! the session, the conversation store, and the connection state machine
//! (`Disconnected -> Connecting -> Connected -> Disconnected`), and drives
//! the portal and the invocation registry in response to user intents.
//! Presentation collaborators observe it through a broadcast event stream
//! and never touch the inner components directly.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock, broadcast};
use uuid::Uuid;

use portico_core::PorticoError;
use portico_core::clock::{Clock, SystemClock};
use portico_core::conversation::{ConversationStore, export_filename};
use portico_core::error::Result;
use portico_core::invocation::InvocationRequest;
use portico_core::session::{
    AuthenticatedState, ConnectionState, Identity, InvocationSettings, Message, Session,
    SessionEvent, SettingsUpdate, Severity,
};
use portico_core::validator::validate_login;
use portico_interaction::portal::PortalClient;
use portico_interaction::registry::ModelInvocationRegistry;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Login material for the connect intent.
///
/// Consumed by value so the password is dropped as soon as the exchange
/// completes; nothing downstream retains it.
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    pub username: String,
    pub password: String,
    pub account_id: String,
    pub region: String,
}

/// A serialized conversation plus its suggested filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryExport {
    pub filename: String,
    pub json: String,
}

struct OrchestratorState {
    session: Session,
    conversation: ConversationStore,
    connection: ConnectionState,
    settings: InvocationSettings,
    current_model: String,
}

/// Coordinates authentication, invocation, and the conversation log.
///
/// All methods take `&self`; shared state lives behind a `RwLock` so an
/// `Arc<SessionOrchestrator>` can serve concurrent intents. The two-step
/// connect exchange is serialized by an internal gate, while independent
/// `send` calls may be in flight at once.
pub struct SessionOrchestrator {
    portal: Arc<dyn PortalClient>,
    registry: Arc<ModelInvocationRegistry>,
    clock: Arc<dyn Clock>,
    export_prefix: String,
    state: RwLock<OrchestratorState>,
    connect_gate: Mutex<()>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionOrchestrator {
    /// Creates an orchestrator in the `Disconnected` state.
    pub fn new(portal: Arc<dyn PortalClient>, registry: Arc<ModelInvocationRegistry>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let current_model = registry.default_model().to_string();
        Self {
            portal,
            registry,
            export_prefix: "aws-bedrock-chat".to_string(),
            state: RwLock::new(OrchestratorState {
                session: Session::new(),
                conversation: ConversationStore::with_clock(clock.clone()),
                connection: ConnectionState::Disconnected,
                settings: InvocationSettings::default(),
                current_model,
            }),
            connect_gate: Mutex::new(()),
            events,
            clock,
        }
    }

    /// Overrides the time source for the orchestrator and its conversation.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock.clone();
        self.state = RwLock::new(OrchestratorState {
            session: Session::new(),
            conversation: ConversationStore::with_clock(clock),
            connection: ConnectionState::Disconnected,
            settings: InvocationSettings::default(),
            current_model: self.registry.default_model().to_string(),
        });
        self
    }

    /// Overrides the export filename prefix.
    pub fn with_export_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.export_prefix = prefix.into();
        self
    }

    /// Subscribes to the orchestrator's event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SessionEvent) {
        // Nobody listening is fine; events are advisory.
        let _ = self.events.send(event);
    }

    fn notify(&self, severity: Severity, message: impl Into<String>) {
        self.emit(SessionEvent::Notification {
            message: message.into(),
            severity,
        });
    }

    fn transition(&self, state: ConnectionState, detail: impl Into<String>) {
        let detail = detail.into();
        tracing::info!(%state, %detail, "connection state changed");
        self.emit(SessionEvent::ConnectionStateChanged { state, detail });
    }

    /// Runs the full connect sequence: validate, authenticate, provision.
    ///
    /// Atomic all-or-nothing: any failure returns the machine to
    /// `Disconnected` with no partial session state retained. Concurrent
    /// connect attempts are serialized by an internal gate.
    pub async fn connect(&self, request: ConnectRequest) -> Result<()> {
        let _gate = self.connect_gate.lock().await;

        {
            let mut state = self.state.write().await;
            if state.connection != ConnectionState::Disconnected {
                self.notify(Severity::Warning, "Already connected");
                return Err(PorticoError::internal(
                    "connect is only valid while disconnected",
                ));
            }
            state.connection = ConnectionState::Connecting;
        }

        self.emit(SessionEvent::ConnectBusy { busy: true });
        self.transition(ConnectionState::Connecting, "Connecting...");
        self.notify(Severity::Info, "Connecting to portal...");

        let ConnectRequest {
            username,
            password,
            account_id,
            region,
        } = request;

        let outcome = self
            .run_exchange(&username, &password, &account_id, &region)
            .await;
        // Password material is dropped here, before any state is published.
        drop(password);

        match outcome {
            Ok(auth) => {
                let mut state = self.state.write().await;
                state.session.establish(auth);
                state.connection = ConnectionState::Connected;
                drop(state);

                self.transition(ConnectionState::Connected, "Connected");
                self.notify(
                    Severity::Success,
                    format!("Successfully connected to account {account_id}"),
                );
                self.emit(SessionEvent::ConnectBusy { busy: false });
                Ok(())
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state.session.clear();
                state.connection = ConnectionState::Disconnected;
                drop(state);

                self.transition(ConnectionState::Disconnected, "Connection Failed");
                self.notify(Severity::Error, format!("Connection failed: {err}"));
                self.emit(SessionEvent::ConnectBusy { busy: false });
                Err(err)
            }
        }
    }

    async fn run_exchange(
        &self,
        username: &str,
        password: &str,
        account_id: &str,
        region: &str,
    ) -> Result<AuthenticatedState> {
        validate_login(username, password, account_id, region)?;

        let issued_token = self
            .portal
            .authenticate(username, password, account_id, region)
            .await?;
        // Provisioning starts only after authentication has fully completed.
        let credentials = self
            .portal
            .provision_credentials(&issued_token, account_id, region)
            .await?;

        Ok(AuthenticatedState {
            identity: Identity {
                username: username.to_string(),
                account_id: account_id.to_string(),
                region: region.to_string(),
            },
            issued_token,
            credentials,
        })
    }

    /// Disconnects unconditionally.
    ///
    /// Clears the session and the conversation together: dropping history at
    /// the end of an authenticated session is a privacy boundary. The
    /// generation bump makes any in-flight send results stale.
    pub async fn disconnect(&self) {
        let mut state = self.state.write().await;
        state.session.clear();
        state.conversation.clear();
        state.connection = ConnectionState::Disconnected;
        drop(state);

        self.transition(ConnectionState::Disconnected, "Disconnected");
        self.emit(SessionEvent::HistoryCleared);
        self.notify(Severity::Info, "Disconnected from portal");
    }

    /// Submits a prompt to the current model.
    ///
    /// The user turn is appended synchronously; the invocation result (or a
    /// visible error turn) follows when the backend resolves. A result that
    /// arrives after the session generation has changed is dropped: the
    /// history it belonged to no longer exists.
    pub async fn send(&self, prompt: &str) -> Result<()> {
        let prompt = prompt.trim();

        let (generation, model_id, settings, user_message) = {
            let mut state = self.state.write().await;
            if state.connection != ConnectionState::Connected {
                self.notify(Severity::Error, "Please authenticate first");
                return Err(PorticoError::NotAuthenticated);
            }
            if prompt.is_empty() {
                self.notify(Severity::Warning, "Please enter a prompt");
                return Ok(());
            }

            let model_id = state.current_model.clone();
            let message = state
                .conversation
                .append(Message::user(prompt, model_id.clone()))
                .clone();
            (
                state.session.generation(),
                model_id,
                state.settings.clone(),
                message,
            )
        };

        self.emit(SessionEvent::MessageAppended {
            message: user_message,
        });
        self.emit(SessionEvent::SendBusy { busy: true });

        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, model = %model_id, "dispatching invocation");

        let outcome = self
            .registry
            .invoke(InvocationRequest {
                model_id,
                prompt: prompt.to_string(),
                settings,
            })
            .await;

        let mut state = self.state.write().await;
        if state.session.generation() != generation {
            tracing::debug!(%request_id, "dropping result from a cleared session");
            drop(state);
            self.emit(SessionEvent::SendBusy { busy: false });
            return Ok(());
        }

        let message = match outcome {
            Ok(result) => {
                tracing::debug!(
                    %request_id,
                    input_tokens = result.input_tokens,
                    output_tokens = result.output_tokens,
                    "invocation completed"
                );
                Message::assistant(
                    result.content,
                    result.model,
                    result.model_id,
                    result.input_tokens,
                    result.output_tokens,
                )
            }
            Err(err) => {
                tracing::warn!(%request_id, %err, "invocation failed");
                self.notify(Severity::Error, format!("Failed to get response: {err}"));
                Message::error(format!("Error: {err}"))
            }
        };
        let appended = state.conversation.append(message).clone();
        drop(state);

        self.emit(SessionEvent::MessageAppended { message: appended });
        self.emit(SessionEvent::SendBusy { busy: false });
        Ok(())
    }

    /// Wipes the conversation history.
    ///
    /// Any confirmation dialog belongs to the caller; this performs the
    /// irreversible wipe when asked.
    pub async fn clear_history(&self) {
        let mut state = self.state.write().await;
        if state.conversation.is_empty() {
            drop(state);
            self.notify(Severity::Info, "Chat history is already empty");
            return;
        }
        state.conversation.clear();
        drop(state);

        self.emit(SessionEvent::HistoryCleared);
        self.notify(Severity::Info, "Chat history cleared");
    }

    /// Serializes the history for the persistence collaborator.
    ///
    /// Returns `None` (with an informational notification) when there is
    /// nothing to export.
    pub async fn export_history(&self) -> Result<Option<HistoryExport>> {
        let state = self.state.read().await;
        if state.conversation.is_empty() {
            drop(state);
            self.notify(Severity::Info, "No chat history to download");
            return Ok(None);
        }
        let json = state.conversation.serialize()?;
        drop(state);

        let filename = export_filename(&self.export_prefix, self.clock.now());
        self.notify(Severity::Success, "Chat history downloaded");
        Ok(Some(HistoryExport { filename, json }))
    }

    /// Records the preferred model for subsequent sends.
    ///
    /// Unknown identifiers are tolerated; the registry's default-model
    /// fallback applies at invoke time.
    pub async fn change_model(&self, model_id: impl Into<String>) {
        let model_id = model_id.into();
        if !self.registry.contains(&model_id) {
            tracing::debug!(%model_id, "selected model is not registered; registry fallback will apply");
        }
        self.state.write().await.current_model = model_id;
    }

    /// Applies a partial settings update, allowed in any state.
    ///
    /// Out-of-range values reject the whole update and previous values are
    /// retained.
    pub async fn update_settings(&self, update: SettingsUpdate) -> Result<()> {
        let outcome = {
            let mut state = self.state.write().await;
            state.settings.apply(update)
        };
        if let Err(err) = &outcome {
            self.notify(Severity::Error, err.to_string());
        }
        outcome
    }

    /// Current connection state.
    pub async fn connection_state(&self) -> ConnectionState {
        self.state.read().await.connection
    }

    /// Whether a full authenticate-then-provision sequence has completed.
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.session.is_authenticated()
    }

    /// Snapshot of the authenticated state, if any.
    pub async fn auth_state(&self) -> Option<AuthenticatedState> {
        self.state.read().await.session.auth().cloned()
    }

    /// Snapshot of the conversation history.
    pub async fn history(&self) -> Vec<Message> {
        self.state.read().await.conversation.messages().to_vec()
    }

    /// Current invocation settings.
    pub async fn settings(&self) -> InvocationSettings {
        self.state.read().await.settings.clone()
    }

    /// The model id subsequent sends will target.
    pub async fn current_model(&self) -> String {
        self.state.read().await.current_model.clone()
    }
}
