//! # Adaptive Card render context
//!
//! Parses Adaptive Card JSON and runs the per-card state that every rendered
//! element shares: input values and validity, visibility overrides, referenced
//! resources, and action dispatch to the host.
//!
//! ## Example
//! ```ignore
//! use adaptivecards_core::{mount, parse_card, ActionPayload, CallbackHost, CardContext, HostConfig};
//!
//! let card = parse_card(r#"{
//!   "type": "AdaptiveCard",
//!   "body": [{ "type": "Input.Text", "id": "name", "value": "Ada" }],
//!   "actions": [{ "type": "Action.Submit", "data": { "form": "signup" } }]
//! }"#)?;
//!
//! let host = CallbackHost::new(|payload| println!("{:?}", payload.data));
//! let mut ctx = CardContext::new(HostConfig::default(), host);
//! let tree = mount(&card, &mut ctx);
//! ctx.execute_action(tree.actions[0].clone())?;
//! // prints Some(Object {"form": String("signup"), "name": String("Ada")})
//! ```

pub mod action;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod host_config;
pub mod input_rules;
pub mod render;
pub mod schema;
pub mod validator;

// --- Core types ---
pub use action::{ActionKind, ActionPayload, TargetElement};
pub use context::{
    CardContext, InputRecord, InputStateStore, InputValue, ResourceEntry, ResourceRegistry,
    VisibilityController,
};
pub use dispatch::{ActionDispatcher, DispatchOutcome, DispatchPolicy, DropReason};
pub use error::{CardError, CardResult, ErrorCode, ParseErrorReport};
pub use host::{CallbackHost, CardHost, NoopHost};
pub use host_config::HostConfig;
pub use input_rules::InputRef;
pub use render::{edit_input, mount, MediaPlayback, RenderNode, RenderTree};
pub use schema::{AdaptiveCard, Element};

/// Parse and validate a card
pub fn parse_card(json: &str) -> CardResult<AdaptiveCard> {
    let card = parse_card_unchecked(json)?;
    validator::validate_card(&card)?;
    Ok(card)
}

/// Parse a card without validating it; inputs without ids are kept
pub fn parse_card_unchecked(json: &str) -> CardResult<AdaptiveCard> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a card from an already-decoded JSON value
pub fn parse_card_value(value: serde_json::Value) -> CardResult<AdaptiveCard> {
    let card: AdaptiveCard = serde_json::from_value(value)?;
    validator::validate_card(&card)?;
    Ok(card)
}
