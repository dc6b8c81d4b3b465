//! Per-card coordination state.
//!
//! A `CardContext` is built once per render of a card and handed by `&mut` to
//! every element of the render pass. It owns the input values, the visibility
//! overrides, the resource list and the action dispatcher; a new card gets a
//! new context, so nothing leaks between cards.

pub mod inputs;
pub mod resources;
pub mod visibility;

use crate::action::{ActionKind, ActionPayload};
use crate::dispatch::{self, ActionDispatcher, DispatchOutcome, DispatchPolicy, DropReason};
use crate::error::{CardResult, ParseErrorReport};
use crate::host::CardHost;
use crate::host_config::HostConfig;
use std::rc::Rc;

pub use inputs::{InputRecord, InputStateStore, InputValue};
pub use resources::{ResourceEntry, ResourceRegistry};
pub use visibility::VisibilityController;

pub struct CardContext<'a> {
    host_config: Rc<HostConfig>,
    inputs: InputStateStore,
    visibility: VisibilityController,
    resources: ResourceRegistry,
    dispatcher: ActionDispatcher<'a>,
}

impl<'a> CardContext<'a> {
    pub fn new(host_config: impl Into<Rc<HostConfig>>, host: impl CardHost + 'a) -> Self {
        Self {
            host_config: host_config.into(),
            inputs: InputStateStore::new(),
            visibility: VisibilityController::new(),
            resources: ResourceRegistry::new(),
            dispatcher: ActionDispatcher::new(host),
        }
    }

    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatcher = self.dispatcher.with_policy(policy);
        self
    }

    pub fn host_config(&self) -> &HostConfig {
        &self.host_config
    }

    pub fn supports_interactivity(&self) -> bool {
        self.host_config.supports_interactivity
    }

    // ─── Inputs ──────────────────────────────────────────────────────────────

    pub fn set_input(&mut self, id: impl Into<String>, value: impl Into<InputValue>, error_state: bool) {
        self.inputs.set_input(id, value, error_state);
    }

    pub fn get_value(&self, id: &str) -> Option<&InputValue> {
        self.inputs.get_value(id)
    }

    pub fn get_error(&self, id: &str) -> Option<bool> {
        self.inputs.get_error(id)
    }

    pub fn inputs(&self) -> &InputStateStore {
        &self.inputs
    }

    // ─── Visibility ──────────────────────────────────────────────────────────

    pub fn is_visible(&self, id: &str) -> bool {
        self.visibility.is_visible(id)
    }

    pub fn toggle_visibility<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.visibility.toggle(ids);
    }

    pub fn visibility(&self) -> &VisibilityController {
        &self.visibility
    }

    pub(crate) fn declare_hidden(&mut self, id: &str) {
        self.visibility.declare_hidden(id);
    }

    // ─── Resources ───────────────────────────────────────────────────────────

    pub fn add_resource(&mut self, url: impl Into<String>, mime_type: impl Into<String>) {
        self.resources.add_resource(url, mime_type);
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    // ─── Actions ─────────────────────────────────────────────────────────────

    /// Run an action triggered by a button
    pub fn execute_action(&mut self, payload: ActionPayload) -> CardResult<DispatchOutcome> {
        if !self.supports_interactivity() {
            return dispatch::drop_action(
                self.dispatcher.policy(),
                &payload.kind,
                DropReason::NotInteractive,
            );
        }
        self.dispatcher
            .execute(payload, &self.inputs, &mut self.visibility)
    }

    /// Run an element's `selectAction`; show-card is rejected here and never
    /// reaches the dispatcher
    pub fn execute_select_action(&mut self, payload: ActionPayload) -> CardResult<DispatchOutcome> {
        if payload.kind == ActionKind::ShowCard {
            return dispatch::drop_action(self.dispatcher.policy(), &payload.kind, DropReason::ShowCard);
        }
        self.execute_action(payload)
    }

    /// Forward a resource or rendering failure to the host
    pub fn report_error(&mut self, report: ParseErrorReport) {
        log::warn!("card error reported: {:?}: {}", report.error, report.message);
        self.dispatcher.host_mut().on_parse_error(report);
    }
}
