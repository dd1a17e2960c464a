use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::{
    application::state::AppState,
    domain::ClientError,
    infrastructure::http_client::ApiClient,
};

use super::actions::{descriptor, ActionDescriptor, ActionInput};
use super::controls::{ControlBoard, ControlState, PendingControl};
use super::notifier::{Notifier, UiSurface};
use super::render::ResultView;

/// Result of a dispatch that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// The call settled successfully and `view` was rendered.
    Completed(ResultView),
    /// The control was already pending; nothing happened.
    Busy,
}

/// The one call/disable/settle protocol shared by every action.
pub struct ActionService {
    client: ApiClient,
    state: Arc<AppState>,
    controls: ControlBoard,
    surface: Arc<dyn UiSurface>,
    notifier: Notifier,
}

impl ActionService {
    pub fn new(
        client: ApiClient,
        state: Arc<AppState>,
        surface: Arc<dyn UiSurface>,
        notifier: Notifier,
    ) -> Self {
        Self {
            client,
            state,
            controls: ControlBoard::new(),
            surface,
            notifier,
        }
    }

    pub fn controls(&self) -> &ControlBoard {
        &self.controls
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the action described by `input`.
    ///
    /// A second invocation while the same control is pending returns
    /// `Dispatch::Busy` and touches nothing else. Otherwise blank required
    /// input and an offline API fail locally without touching the network.
    pub async fn run(&self, input: ActionInput) -> Result<Dispatch, ClientError> {
        let action = descriptor(input.kind());

        let Some(pending) = self.controls.try_begin(action.kind) else {
            debug!(
                target: "triad_client::actions",
                action = %action.kind,
                "ignored, control is pending"
            );
            return Ok(Dispatch::Busy);
        };

        if let Err(err) = input.validate() {
            self.report(action, &err);
            return Err(err);
        }

        if !self.state.is_online() {
            let err = ClientError::Offline;
            self.report(action, &err);
            return Err(err);
        }

        let span = info_span!(
            target: "triad_client::actions",
            "action",
            action = %action.kind,
            invocation = %Uuid::new_v4(),
        );
        self.execute(action, &input, pending).instrument(span).await
    }

    async fn execute(
        &self,
        action: &ActionDescriptor,
        input: &ActionInput,
        pending: PendingControl<'_>,
    ) -> Result<Dispatch, ClientError> {
        self.surface
            .set_control(action.kind, ControlState::Pending, action.pending_label);
        info!(target: "triad_client::actions", endpoint = action.endpoint, "dispatching");

        let outcome = match (action.build_payload)(input) {
            Ok(payload) => self
                .client
                .call(action.endpoint, action.method, Some(payload))
                .await
                .map(|value| (action.render)(&value))
                .map_err(ClientError::from),
            Err(err) => Err(err),
        };

        let settled = pending.settle(outcome.is_ok());
        self.surface
            .set_control(action.kind, settled, action.idle_label);
        self.surface
            .set_control(action.kind, ControlState::Idle, action.idle_label);

        match outcome {
            Ok(view) => {
                self.surface.render(action.kind, &view);
                self.notifier.success(action.success_message);
                info!(target: "triad_client::actions", "settled");
                Ok(Dispatch::Completed(view))
            }
            Err(err) => {
                self.report(action, &err);
                Err(err)
            }
        }
    }

    fn report(&self, action: &ActionDescriptor, err: &ClientError) {
        let message = match err {
            ClientError::Api(_) | ClientError::Other(_) => {
                format!("{}: {}", action.failure_prefix, err.banner_text())
            }
            _ => err.banner_text(),
        };
        self.notifier.error(message);
    }
}
