//! Action dispatcher use case
//!
//! Maps input events to actions, runs each action's side effects in a
//! fixed order and is the only writer of the device state. Every action
//! ends by handing its message to a deferred revert task, so the status
//! always converges back to "Ready".

use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::deck::{
    ActionRequest, DeckPhase, DeckSession, DeviceSnapshot, DeviceState, InputEvent,
    InvalidStateTransition, Keymap, ProviderId, Rgb, TransformKind, STATUS_READY,
};

use super::ports::{
    FeedbackError, FeedbackSink, GatewayError, ProcessLauncher, ProviderGateway, TextIo,
    CLIPBOARD_PLACEHOLDER,
};

/// Result text when no backend serves the selected provider
pub const NO_PROVIDER_RESULT: &str = "No LLM selected";

const STATUS_DONE: &str = "Done!";
const STATUS_OPENING: &str = "Opening...";
const STATUS_OPENED: &str = "Opened";
const STATUS_CLOSING: &str = "Closing";
const STATUS_CLOSED: &str = "Closed";

// Dwell lengths, in time units
const TRANSFORM_DWELL: f64 = 2.0;
const SWITCH_DWELL: f64 = 1.0;
const OPEN_DWELL: f64 = 1.5;
const CLOSE_DWELL: f64 = 1.0;

/// Errors from the dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Feedback unavailable at startup: {0}")]
    FeedbackUnavailable(#[from] FeedbackError),

    #[error("Action rejected: {0}")]
    Busy(#[from] InvalidStateTransition),
}

/// Timing and tuning for the dispatcher
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Parameter change per encoder detent
    pub parameter_step: f64,
    /// Length of one dwell time-unit
    pub dwell_unit: Duration,
    /// How long the indicator stays lit per flash
    pub flash: Duration,
    /// Upper bound on a provider call
    pub gateway_timeout: Duration,
    /// Process terminated by the close action
    pub browser_process: String,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            parameter_step: 0.1,
            dwell_unit: Duration::from_secs(1),
            flash: Duration::from_millis(100),
            gateway_timeout: Duration::from_secs(30),
            browser_process: "firefox".to_string(),
        }
    }
}

struct Deck {
    state: DeviceState,
    session: DeckSession,
}

/// Device state plus the display it is rendered on.
///
/// Shared with the revert task; state mutation and the matching
/// display refresh happen under one lock.
struct Console<F> {
    feedback: F,
    deck: Mutex<Deck>,
    snapshots: watch::Sender<DeviceSnapshot>,
}

impl<F: FeedbackSink> Console<F> {
    async fn refresh(&self, state: &DeviceState) {
        self.feedback.show_status(&state.render()).await;
        self.snapshots.send_replace(state.snapshot());
    }

    async fn set_status(&self, status: impl Into<String>) {
        let mut deck = self.deck.lock().await;
        deck.state.set_status(status);
        self.refresh(&deck.state).await;
    }

    async fn revert_after(self: Arc<Self>, delay: Duration) {
        tokio::time::sleep(delay).await;

        let mut deck = self.deck.lock().await;
        if deck.session.revert().is_ok() {
            deck.state.set_status(STATUS_READY);
            self.refresh(&deck.state).await;
        }
    }
}

/// Action dispatcher
pub struct ActionDispatcher<F, T, G, L>
where
    F: FeedbackSink + 'static,
    T: TextIo,
    G: ProviderGateway,
    L: ProcessLauncher,
{
    console: Arc<Console<F>>,
    text_io: T,
    gateway: G,
    launcher: L,
    keymap: Keymap,
    settings: DispatchSettings,
    pending_revert: StdMutex<Option<JoinHandle<()>>>,
}

impl<F, T, G, L> ActionDispatcher<F, T, G, L>
where
    F: FeedbackSink + 'static,
    T: TextIo,
    G: ProviderGateway,
    L: ProcessLauncher,
{
    /// Create a new dispatcher owning the given initial state
    pub fn new(
        feedback: F,
        text_io: T,
        gateway: G,
        launcher: L,
        keymap: Keymap,
        state: DeviceState,
        settings: DispatchSettings,
    ) -> Self {
        let (snapshots, _) = watch::channel(state.snapshot());
        Self {
            console: Arc::new(Console {
                feedback,
                deck: Mutex::new(Deck {
                    state,
                    session: DeckSession::new(),
                }),
                snapshots,
            }),
            text_io,
            gateway,
            launcher,
            keymap,
            settings,
            pending_revert: StdMutex::new(None),
        }
    }

    /// Bring up the display and indicator.
    ///
    /// Fails if the feedback sink is unusable; the deck must not run
    /// half-initialized.
    pub async fn start(&self) -> Result<(), DispatchError> {
        self.console.feedback.init().await?;

        {
            let deck = self.console.deck.lock().await;
            self.console.refresh(&deck.state).await;
        }
        self.console
            .feedback
            .flash(Rgb::SUCCESS, self.settings.flash)
            .await;

        info!("deck started");
        Ok(())
    }

    /// Latest published state
    pub fn snapshot(&self) -> DeviceSnapshot {
        self.console.snapshots.borrow().clone()
    }

    /// Receiver notified after every display refresh
    pub fn subscribe(&self) -> watch::Receiver<DeviceSnapshot> {
        self.console.snapshots.subscribe()
    }

    /// Current session phase
    pub async fn phase(&self) -> DeckPhase {
        self.console.deck.lock().await.session.phase()
    }

    /// Map an input event to an action.
    ///
    /// Unbound slots and zero encoder deltas resolve to `None`.
    pub fn resolve(&self, event: InputEvent) -> Option<ActionRequest> {
        match event {
            InputEvent::KeyPressed(slot) => self.keymap.resolve(slot).cloned(),
            InputEvent::EncoderRotated(0) => None,
            InputEvent::EncoderRotated(detents) => Some(ActionRequest::AdjustParameter(
                f64::from(detents) * self.settings.parameter_step,
            )),
        }
    }

    /// Resolve and dispatch an input event
    pub async fn handle(&self, event: InputEvent) -> Result<(), DispatchError> {
        match self.resolve(event) {
            Some(request) => self.dispatch(request).await,
            None => {
                debug!(?event, "no action bound");
                Ok(())
            }
        }
    }

    /// Run one action to the point where only its dwell remains
    pub async fn dispatch(&self, request: ActionRequest) -> Result<(), DispatchError> {
        if let ActionRequest::AdjustParameter(delta) = request {
            self.adjust_parameter(delta).await;
            return Ok(());
        }

        self.cancel_pending_revert();
        {
            let mut deck = self.console.deck.lock().await;
            deck.session.begin(request.name())?;
        }
        info!(action = %request, "dispatching");

        match request {
            ActionRequest::Open => self.run_open().await,
            ActionRequest::Close => self.run_close().await,
            ActionRequest::Transform(kind) => self.run_transform(kind).await,
            ActionRequest::SwitchProvider(id) => self.run_switch(&id).await,
            ActionRequest::AdjustParameter(_) => {}
        }

        Ok(())
    }

    /// Move the parameter and redraw if it changed.
    ///
    /// Dropped while another action is running. Returns whether the value changed.
    pub async fn adjust_parameter(&self, delta: f64) -> bool {
        let mut deck = self.console.deck.lock().await;
        if deck.session.is_busy() {
            debug!(delta, "encoder delta dropped while busy");
            return false;
        }

        let changed = deck.state.adjust_parameter(delta);
        if changed {
            self.console.refresh(&deck.state).await;
        }
        changed
    }

    /// Wait for a pending revert to "Ready"
    pub async fn settle(&self) {
        let handle = self
            .pending_revert
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    async fn run_transform(&self, kind: TransformKind) {
        self.console.set_status(kind.busy_status()).await;
        self.flash(Rgb::BUSY).await;

        let content = self.read_content().await;
        let provider = self.console.deck.lock().await.state.provider();
        let result = self
            .request_transform(provider, kind.instruction(), &content)
            .await;

        self.console
            .deck
            .lock()
            .await
            .state
            .record_result(result.as_str());

        if !self.text_io.persist(&result).await {
            warn!("failed to persist result");
        }
        if !self.text_io.write_external_text(&result).await {
            warn!("failed to write result to clipboard");
        }

        self.console.set_status(STATUS_DONE).await;
        self.flash(Rgb::SUCCESS).await;
        self.hold_then_revert(TRANSFORM_DWELL).await;
    }

    async fn run_switch(&self, id: &str) {
        {
            let mut deck = self.console.deck.lock().await;
            if !deck.state.set_provider(id) {
                debug!(id, "unknown provider, keeping {}", deck.state.provider());
            }
            self.console.refresh(&deck.state).await;
        }
        self.flash(Rgb::INFO).await;
        self.hold_then_revert(SWITCH_DWELL).await;
    }

    async fn run_open(&self) {
        self.console.set_status(STATUS_OPENING).await;

        let provider = self.console.deck.lock().await.state.provider();
        self.launcher.open(provider.chat_url()).await;

        self.console.set_status(STATUS_OPENED).await;
        self.flash(Rgb::SPECIAL).await;
        self.hold_then_revert(OPEN_DWELL).await;
    }

    async fn run_close(&self) {
        self.console.set_status(STATUS_CLOSING).await;
        self.launcher
            .close_named_process(&self.settings.browser_process)
            .await;
        self.console.set_status(STATUS_CLOSED).await;
        self.hold_then_revert(CLOSE_DWELL).await;
    }

    async fn read_content(&self) -> String {
        let text = self.text_io.read_external_text().await;
        if text.trim().is_empty() {
            CLIPBOARD_PLACEHOLDER.to_string()
        } else {
            text
        }
    }

    async fn request_transform(
        &self,
        provider: ProviderId,
        instruction: &str,
        content: &str,
    ) -> String {
        let call = self.gateway.transform(provider, instruction, content);
        let outcome = match tokio::time::timeout(self.settings.gateway_timeout, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GatewayError::Timeout),
        };

        match outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(%provider, error = %e, "provider call failed");
                fallback_result(provider, &e)
            }
        }
    }

    async fn flash(&self, color: Rgb) {
        self.console.feedback.flash(color, self.settings.flash).await;
    }

    async fn hold_then_revert(&self, units: f64) {
        {
            let mut deck = self.console.deck.lock().await;
            if let Err(e) = deck.session.hold() {
                warn!(error = %e, "session out of step");
            }
        }

        let delay = self.settings.dwell_unit.mul_f64(units);
        let handle = tokio::spawn(Arc::clone(&self.console).revert_after(delay));

        let previous = self
            .pending_revert
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    fn cancel_pending_revert(&self) {
        let pending = self
            .pending_revert
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();

        if let Some(handle) = pending {
            handle.abort();
        }
    }
}

/// Result text substituted for a failed provider call
pub fn fallback_result(provider: ProviderId, error: &GatewayError) -> String {
    match error {
        GatewayError::NotConfigured(_) => NO_PROVIDER_RESULT.to_string(),
        other => format!("{} error: {}", provider.vendor(), other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct RecordingFeedback {
        screens: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl FeedbackSink for Arc<RecordingFeedback> {
        async fn show_status(&self, text: &str) {
            self.screens.lock().unwrap().push(text.to_string());
        }

        async fn flash(&self, _color: Rgb, _duration: Duration) {}
    }

    struct FailingFeedback;

    #[async_trait]
    impl FeedbackSink for FailingFeedback {
        async fn init(&self) -> Result<(), FeedbackError> {
            Err(FeedbackError::DisplayUnavailable("no i2c bus".to_string()))
        }

        async fn show_status(&self, _text: &str) {}

        async fn flash(&self, _color: Rgb, _duration: Duration) {}
    }

    struct FixedText(&'static str);

    #[async_trait]
    impl TextIo for FixedText {
        async fn read_external_text(&self) -> String {
            self.0.to_string()
        }

        async fn write_external_text(&self, _text: &str) -> bool {
            true
        }

        async fn persist(&self, _text: &str) -> bool {
            true
        }
    }

    struct EchoGateway;

    #[async_trait]
    impl ProviderGateway for EchoGateway {
        async fn transform(
            &self,
            provider: ProviderId,
            _instruction: &str,
            content: &str,
        ) -> Result<String, GatewayError> {
            Ok(format!("{}:{}", provider.as_str(), content))
        }
    }

    struct SlowGateway;

    #[async_trait]
    impl ProviderGateway for SlowGateway {
        async fn transform(
            &self,
            _provider: ProviderId,
            _instruction: &str,
            _content: &str,
        ) -> Result<String, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok("too late".to_string())
        }
    }

    struct NullLauncher;

    #[async_trait]
    impl ProcessLauncher for NullLauncher {
        async fn open(&self, _url: &str) {}

        async fn close_named_process(&self, _name: &str) {}
    }

    fn settings() -> DispatchSettings {
        DispatchSettings {
            flash: Duration::ZERO,
            gateway_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    fn dispatcher<G: ProviderGateway>(
        gateway: G,
    ) -> (
        ActionDispatcher<Arc<RecordingFeedback>, FixedText, G, NullLauncher>,
        Arc<RecordingFeedback>,
    ) {
        let feedback = Arc::new(RecordingFeedback::default());
        let dispatcher = ActionDispatcher::new(
            Arc::clone(&feedback),
            FixedText("hello"),
            gateway,
            NullLauncher,
            Keymap::default(),
            DeviceState::new(),
            settings(),
        );
        (dispatcher, feedback)
    }

    #[test]
    fn fallback_for_unconfigured_provider() {
        let text = fallback_result(
            ProviderId::Gemini,
            &GatewayError::NotConfigured(ProviderId::Gemini),
        );
        assert_eq!(text, "No LLM selected");
    }

    #[test]
    fn fallback_names_vendor() {
        let text = fallback_result(ProviderId::Llama, &GatewayError::RateLimited);
        assert_eq!(text, "Llama error: Rate limit exceeded");
    }

    #[tokio::test]
    async fn resolve_encoder_scales_by_step() {
        let (dispatcher, _) = dispatcher(EchoGateway);
        assert_eq!(
            dispatcher.resolve(InputEvent::EncoderRotated(-1)),
            Some(ActionRequest::AdjustParameter(-0.1))
        );
        assert_eq!(dispatcher.resolve(InputEvent::EncoderRotated(0)), None);
        assert_eq!(dispatcher.resolve(InputEvent::KeyPressed(8)), None);
    }

    #[tokio::test]
    async fn start_renders_power_on_screen() {
        let (dispatcher, feedback) = dispatcher(EchoGateway);
        dispatcher.start().await.unwrap();
        assert_eq!(
            feedback.screens.lock().unwrap().as_slice(),
            ["LLM:GPT T:0.5\nReady"]
        );
    }

    #[tokio::test]
    async fn start_fails_without_display() {
        let dispatcher = ActionDispatcher::new(
            FailingFeedback,
            FixedText(""),
            EchoGateway,
            NullLauncher,
            Keymap::default(),
            DeviceState::new(),
            settings(),
        );
        let err = dispatcher.start().await.unwrap_err();
        assert!(matches!(err, DispatchError::FeedbackUnavailable(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn transform_uses_selected_provider() {
        let (dispatcher, _) = dispatcher(EchoGateway);
        dispatcher
            .dispatch(ActionRequest::SwitchProvider("llama".into()))
            .await
            .unwrap();
        dispatcher
            .dispatch(ActionRequest::Transform(TransformKind::Expand))
            .await
            .unwrap();
        dispatcher.settle().await;

        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.last_result, "llama:hello");
        assert_eq!(snapshot.status, "Ready");
        assert_eq!(dispatcher.phase().await, DeckPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn gateway_timeout_yields_sentinel() {
        let (dispatcher, _) = dispatcher(SlowGateway);
        dispatcher
            .dispatch(ActionRequest::Transform(TransformKind::Summarize))
            .await
            .unwrap();
        dispatcher.settle().await;

        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.last_result, "OpenAI error: Request timed out");
        assert_eq!(snapshot.status, "Ready");
    }

    #[tokio::test(start_paused = true)]
    async fn status_is_held_until_dwell_expires() {
        let (dispatcher, _) = dispatcher(EchoGateway);
        dispatcher
            .dispatch(ActionRequest::SwitchProvider("gemini".into()))
            .await
            .unwrap();
        assert_eq!(dispatcher.snapshot().status, "→ GEMINI");
        assert_eq!(dispatcher.phase().await, DeckPhase::Dwelling);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(dispatcher.snapshot().status, "→ GEMINI");

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(dispatcher.snapshot().status, "Ready");
    }

    #[tokio::test(start_paused = true)]
    async fn new_action_cancels_pending_revert() {
        let (dispatcher, feedback) = dispatcher(EchoGateway);
        dispatcher
            .dispatch(ActionRequest::SwitchProvider("gemini".into()))
            .await
            .unwrap();
        dispatcher
            .dispatch(ActionRequest::SwitchProvider("llama".into()))
            .await
            .unwrap();
        dispatcher.settle().await;

        let statuses: Vec<String> = feedback
            .screens
            .lock()
            .unwrap()
            .iter()
            .filter_map(|screen| screen.lines().nth(1).map(String::from))
            .collect();
        assert_eq!(statuses, ["→ GEMINI", "→ LLAMA", "Ready"]);
    }

    #[tokio::test(start_paused = true)]
    async fn encoder_during_dwell_keeps_message_and_revert() {
        let (dispatcher, _) = dispatcher(EchoGateway);
        dispatcher.dispatch(ActionRequest::Close).await.unwrap();
        assert!(dispatcher.adjust_parameter(0.1).await);
        assert_eq!(dispatcher.snapshot().status, "Closed");

        dispatcher.settle().await;
        let snapshot = dispatcher.snapshot();
        assert_eq!(snapshot.status, "Ready");
        assert_eq!(snapshot.parameter, 0.6);
    }

    #[tokio::test]
    async fn unbound_key_is_noop() {
        let (dispatcher, feedback) = dispatcher(EchoGateway);
        dispatcher.handle(InputEvent::KeyPressed(8)).await.unwrap();
        dispatcher.handle(InputEvent::KeyPressed(42)).await.unwrap();
        assert!(feedback.screens.lock().unwrap().is_empty());
        assert_eq!(dispatcher.phase().await, DeckPhase::Idle);
    }
}
