use crate::action::{ActionKind, ActionPayload};
use crate::error::{CardError, CardResult};
use crate::schema::*;
use std::collections::HashSet;

const MAX_NESTING_DEPTH: usize = 32;
const CARD_TYPE: &str = "AdaptiveCard";

/// Validate a parsed card
pub fn validate_card(card: &AdaptiveCard) -> CardResult<()> {
    if card.card_type != CARD_TYPE {
        return Err(CardError::InvalidCardType {
            found: card.card_type.clone(),
        });
    }

    let mut seen_ids = HashSet::new();
    for element in &card.body {
        validate_element(element, 0, &mut seen_ids)?;
    }
    for action in &card.actions {
        validate_action(action)?;
    }
    if let Some(ref action) = card.select_action {
        validate_select_action(action)?;
    }
    Ok(())
}

fn validate_element(element: &Element, depth: usize, seen_ids: &mut HashSet<String>) -> CardResult<()> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CardError::MaxNestingDepthExceeded {
            max_depth: MAX_NESTING_DEPTH,
        });
    }

    if element.is_input() {
        let id = element.id().unwrap_or_default();
        if id.is_empty() {
            return Err(CardError::MissingProperty {
                element: element.type_name().to_string(),
                property: "id".to_string(),
            });
        }
        if !seen_ids.insert(id.to_string()) {
            return Err(CardError::DuplicateId { id: id.to_string() });
        }
    }

    if let Some(action) = element.select_action() {
        validate_select_action(action)?;
    }

    match element {
        Element::Container(c) => validate_children(&c.items, depth, seen_ids),
        Element::ColumnSet(c) => {
            for column in &c.columns {
                if let Some(ref action) = column.select_action {
                    validate_select_action(action)?;
                }
                validate_children(&column.items, depth + 1, seen_ids)?;
            }
            Ok(())
        }
        Element::ImageSet(set) => {
            for image in &set.images {
                if let Some(ref action) = image.select_action {
                    validate_select_action(action)?;
                }
            }
            Ok(())
        }
        Element::ActionSet(set) => {
            for action in &set.actions {
                validate_action(action)?;
            }
            Ok(())
        }
        Element::TextInput(input) => {
            if let Some(ref pattern) = input.regex {
                if let Err(e) = regex::Regex::new(pattern) {
                    return Err(CardError::InvalidProperty {
                        element: "Input.Text".to_string(),
                        property: "regex".to_string(),
                        reason: e.to_string(),
                    });
                }
            }
            if let Some(ref action) = input.inline_action {
                validate_action(action)?;
            }
            Ok(())
        }
        Element::NumberInput(input) => match (input.min, input.max) {
            (Some(min), Some(max)) if min > max => Err(CardError::InvalidProperty {
                element: "Input.Number".to_string(),
                property: "min".to_string(),
                reason: format!("min {} is greater than max {}", min, max),
            }),
            _ => Ok(()),
        },
        Element::ChoiceSetInput(input) => {
            if input.choices.is_empty() {
                return Err(CardError::InvalidProperty {
                    element: "Input.ChoiceSet".to_string(),
                    property: "choices".to_string(),
                    reason: "must contain at least one choice".to_string(),
                });
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn validate_children(
    children: &[Element],
    depth: usize,
    seen_ids: &mut HashSet<String>,
) -> CardResult<()> {
    for child in children {
        validate_element(child, depth + 1, seen_ids)?;
    }
    Ok(())
}

fn validate_action(action: &ActionPayload) -> CardResult<()> {
    if action.kind == ActionKind::ToggleVisibility {
        for target in &action.target_elements {
            if target.element_id().is_empty() {
                return Err(CardError::InvalidProperty {
                    element: action.kind.to_string(),
                    property: "targetElements".to_string(),
                    reason: "target element ids must be non-empty".to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Select actions may not be `Action.ShowCard`
fn validate_select_action(action: &ActionPayload) -> CardResult<()> {
    if action.kind == ActionKind::ShowCard {
        return Err(CardError::InvalidProperty {
            element: "selectAction".to_string(),
            property: "type".to_string(),
            reason: "Action.ShowCard is not supported as a select action".to_string(),
        });
    }
    validate_action(action)
}
