use crate::action::{ActionKind, ActionPayload};
use crate::context::inputs::InputStateStore;
use crate::context::visibility::VisibilityController;
use crate::error::{CardError, CardResult};
use crate::host::CardHost;
use serde_json::Value;
use std::fmt;

/// What happens to an action that cannot be executed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchPolicy {
    /// Drop it and report `DispatchOutcome::Dropped`
    #[default]
    Silent,
    /// Return `CardError::ActionDropped`
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    EmptyUrl,
    ShowCard,
    Disabled,
    NoTargets,
    NotInteractive,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            DropReason::EmptyUrl => "url is empty",
            DropReason::ShowCard => "show-card is not dispatched",
            DropReason::Disabled => "action is disabled",
            DropReason::NoTargets => "no target elements",
            DropReason::NotInteractive => "host does not support interactivity",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Navigated,
    VisibilityToggled { targets: usize },
    Executed,
    Dropped(DropReason),
}

/// Resolves an action's kind to its effect and hands it to the host
pub struct ActionDispatcher<'a> {
    host: Box<dyn CardHost + 'a>,
    policy: DispatchPolicy,
}

impl<'a> ActionDispatcher<'a> {
    pub fn new(host: impl CardHost + 'a) -> Self {
        Self {
            host: Box::new(host),
            policy: DispatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    pub fn host_mut(&mut self) -> &mut (dyn CardHost + 'a) {
        self.host.as_mut()
    }

    pub fn execute(
        &mut self,
        payload: ActionPayload,
        inputs: &InputStateStore,
        visibility: &mut VisibilityController,
    ) -> CardResult<DispatchOutcome> {
        if !payload.is_enabled() {
            return self.drop_action(&payload.kind, DropReason::Disabled);
        }

        match payload.kind {
            ActionKind::OpenUrl => {
                if payload.navigable_url().is_none() {
                    return self.drop_action(&payload.kind, DropReason::EmptyUrl);
                }
                log::debug!("open url {:?}", payload.url);
                self.host.on_open_url(payload);
                Ok(DispatchOutcome::Navigated)
            }
            ActionKind::ToggleVisibility => {
                if payload.target_elements.is_empty() {
                    return self.drop_action(&payload.kind, DropReason::NoTargets);
                }
                for target in &payload.target_elements {
                    match target.pinned() {
                        Some(visible) => visibility.set_visible(target.element_id(), visible),
                        None => visibility.toggle([target.element_id()]),
                    }
                }
                let targets = payload.target_elements.len();
                log::debug!("toggled visibility of {} element(s)", targets);
                Ok(DispatchOutcome::VisibilityToggled { targets })
            }
            ActionKind::ShowCard => self.drop_action(&payload.kind, DropReason::ShowCard),
            _ => {
                let merged = merge_input_values(payload, inputs);
                log::debug!("execute {} with {} input(s)", merged.kind, inputs.len());
                self.host.on_execute_action(merged);
                Ok(DispatchOutcome::Executed)
            }
        }
    }

    fn drop_action(&self, kind: &ActionKind, reason: DropReason) -> CardResult<DispatchOutcome> {
        drop_action(self.policy, kind, reason)
    }
}

/// Apply `policy` to an action that will not be executed
pub(crate) fn drop_action(
    policy: DispatchPolicy,
    kind: &ActionKind,
    reason: DropReason,
) -> CardResult<DispatchOutcome> {
    match policy {
        DispatchPolicy::Silent => {
            log::debug!("dropped {}: {}", kind, reason);
            Ok(DispatchOutcome::Dropped(reason))
        }
        DispatchPolicy::Strict => {
            log::warn!("dropped {}: {}", kind, reason);
            Err(CardError::ActionDropped {
                kind: kind.to_string(),
                reason: reason.to_string(),
            })
        }
    }
}

/// Merge the current input values into `data`
///
/// Input values overwrite same-named keys; other keys of `data` stay. Absent
/// or null `data` becomes the input map. Scalar or array `data` is left alone.
pub fn merge_input_values(mut payload: ActionPayload, inputs: &InputStateStore) -> ActionPayload {
    match payload.data.take() {
        None | Some(Value::Null) => {
            payload.data = Some(Value::Object(inputs.to_json_map()));
        }
        Some(Value::Object(mut data)) => {
            data.extend(inputs.to_json_map());
            payload.data = Some(Value::Object(data));
        }
        Some(other) => {
            log::debug!("{} data is not an object, inputs not merged", payload.kind);
            payload.data = Some(other);
        }
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::{HostCall, RecordingHost};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dispatcher(host: &RecordingHost) -> ActionDispatcher<'static> {
        ActionDispatcher::new(host.clone())
    }

    #[test]
    fn test_open_url_empty_is_silent() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let outcome = d
            .execute(ActionPayload::open_url(""), &InputStateStore::new(), &mut VisibilityController::new())
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::EmptyUrl));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_open_url_forwards_exact_url() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let outcome = d
            .execute(
                ActionPayload::open_url("https://x"),
                &InputStateStore::new(),
                &mut VisibilityController::new(),
            )
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Navigated);
        assert_eq!(host.calls(), vec![HostCall::OpenUrl(ActionPayload::open_url("https://x"))]);
    }

    #[test]
    fn test_toggle_visibility_flips_and_restores() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let inputs = InputStateStore::new();
        let mut visibility = VisibilityController::new();

        d.execute(ActionPayload::toggle_visibility(["x", "y"]), &inputs, &mut visibility)
            .unwrap();
        assert!(!visibility.is_visible("x"));
        assert!(!visibility.is_visible("y"));

        d.execute(ActionPayload::toggle_visibility(["x", "y"]), &inputs, &mut visibility)
            .unwrap();
        assert!(visibility.is_visible("x"));
        assert!(visibility.is_visible("y"));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_toggle_pinned_target_sets_value() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let mut visibility = VisibilityController::new();
        let payload: ActionPayload = serde_json::from_value(json!({
            "type": "Action.ToggleVisibility",
            "targetElements": [{ "elementId": "x", "isVisible": true }]
        }))
        .unwrap();

        d.execute(payload.clone(), &InputStateStore::new(), &mut visibility).unwrap();
        d.execute(payload, &InputStateStore::new(), &mut visibility).unwrap();
        assert!(visibility.is_visible("x"));
    }

    #[test]
    fn test_submit_merges_inputs() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let mut inputs = InputStateStore::new();
        inputs.set_input("id1", "bar", false);

        let outcome = d
            .execute(ActionPayload::submit(json!({ "foo": 1 })), &inputs, &mut VisibilityController::new())
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Executed);

        let calls = host.calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            HostCall::Execute(payload) => {
                assert_eq!(payload.data, Some(json!({ "foo": 1, "id1": "bar" })));
            }
            other => panic!("Expected execute call, got {:?}", other),
        }
    }

    #[test]
    fn test_inputs_override_same_named_data_keys() {
        let mut inputs = InputStateStore::new();
        inputs.set_input("name", "typed", false);
        let merged = merge_input_values(
            ActionPayload::submit(json!({ "name": "declared", "keep": true })),
            &inputs,
        );
        assert_eq!(merged.data, Some(json!({ "name": "typed", "keep": true })));
    }

    #[test]
    fn test_absent_data_becomes_input_map() {
        let mut inputs = InputStateStore::new();
        inputs.set_input("a", "1", false);
        let merged = merge_input_values(ActionPayload::new(ActionKind::Submit), &inputs);
        assert_eq!(merged.data, Some(json!({ "a": "1" })));
    }

    #[test]
    fn test_scalar_data_left_alone() {
        let mut inputs = InputStateStore::new();
        inputs.set_input("a", "1", false);
        let merged = merge_input_values(ActionPayload::submit(json!("ping")), &inputs);
        assert_eq!(merged.data, Some(json!("ping")));
    }

    #[test]
    fn test_custom_kind_takes_submit_path() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let mut inputs = InputStateStore::new();
        inputs.set_input("rating", "5", false);

        d.execute(ActionPayload::new("Action.Rate"), &inputs, &mut VisibilityController::new())
            .unwrap();
        match &host.calls()[0] {
            HostCall::Execute(payload) => {
                assert_eq!(payload.kind, ActionKind::Other("Action.Rate".to_string()));
                assert_eq!(payload.data, Some(json!({ "rating": "5" })));
            }
            other => panic!("Expected execute call, got {:?}", other),
        }
    }

    #[test]
    fn test_show_card_never_forwarded() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let outcome = d
            .execute(
                ActionPayload::show_card(json!({ "type": "AdaptiveCard" })),
                &InputStateStore::new(),
                &mut VisibilityController::new(),
            )
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::ShowCard));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_disabled_action_dropped() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host);
        let mut payload = ActionPayload::submit(json!({}));
        payload.is_enabled = Some(false);
        let outcome = d
            .execute(payload, &InputStateStore::new(), &mut VisibilityController::new())
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Dropped(DropReason::Disabled));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_strict_policy_reports_drop() {
        let host = RecordingHost::default();
        let mut d = dispatcher(&host).with_policy(DispatchPolicy::Strict);
        let result = d.execute(
            ActionPayload::open_url(""),
            &InputStateStore::new(),
            &mut VisibilityController::new(),
        );
        assert!(matches!(result, Err(CardError::ActionDropped { .. })));
        assert!(host.calls().is_empty());
    }
}
