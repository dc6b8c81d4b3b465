//! Mount pass: walks a card once, registering inputs and resources in the
//! context, and returns the tree of elements that are actually shown.

use crate::action::ActionPayload;
use crate::context::inputs::InputValue;
use crate::context::CardContext;
use crate::error::{ErrorCode, ParseErrorReport};
use crate::input_rules::InputRef;
use crate::schema::*;
use serde::Serialize;
use std::collections::HashSet;

/// A mounted element
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub element_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ActionPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<ActionPayload>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    fn new(element_type: &'static str, id: Option<&str>) -> Self {
        Self {
            element_type,
            id: id.map(str::to_string),
            select_action: None,
            actions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(RenderNode::count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderTree {
    pub body: Vec<RenderNode>,
    pub actions: Vec<ActionPayload>,
}

impl RenderTree {
    pub fn find(&self, id: &str) -> Option<&RenderNode> {
        self.body.iter().find_map(|node| node.find(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Number of mounted elements
    pub fn len(&self) -> usize {
        self.body.iter().map(RenderNode::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Mount `card` into `ctx`
///
/// Safe to call again on the same context after a visibility change: inputs
/// registered by an earlier pass keep their current value. Within one pass,
/// a later input with the same id overwrites the earlier one.
pub fn mount(card: &AdaptiveCard, ctx: &mut CardContext<'_>) -> RenderTree {
    if let Some(ref background) = card.background_image {
        ctx.add_resource(background.url(), "");
    }

    let mut pass = MountPass::default();
    let body = mount_children(&card.body, ctx, &mut pass);

    let actions = if ctx.supports_interactivity() {
        let max = ctx.host_config().actions.max_actions;
        card.actions.iter().take(max).cloned().collect()
    } else {
        Vec::new()
    };

    let tree = RenderTree { body, actions };
    log::debug!(
        "mounted {} element(s), {} input(s), {} resource(s)",
        tree.len(),
        ctx.inputs().len(),
        ctx.resources().len()
    );
    tree
}

/// Input ids registered during the current mount
#[derive(Debug, Default)]
struct MountPass {
    registered: HashSet<String>,
}

fn mount_children(
    elements: &[Element],
    ctx: &mut CardContext<'_>,
    pass: &mut MountPass,
) -> Vec<RenderNode> {
    elements
        .iter()
        .filter_map(|element| mount_element(element, ctx, pass))
        .collect()
}

/// Seed a schema `isVisible: false` and read the current visibility
fn is_shown(ctx: &mut CardContext<'_>, id: Option<&str>, declared_visible: bool) -> bool {
    if !declared_visible {
        match id {
            Some(id) => ctx.declare_hidden(id),
            // nothing can ever show it
            None => return false,
        }
    }
    id.map_or(true, |id| ctx.is_visible(id))
}

fn mount_element(
    element: &Element,
    ctx: &mut CardContext<'_>,
    pass: &mut MountPass,
) -> Option<RenderNode> {
    let id = element.id().filter(|id| !id.is_empty());
    if !is_shown(ctx, id, element.declared_visible()) {
        return None;
    }

    let interactive = ctx.supports_interactivity();
    let mut node = RenderNode::new(element.type_name(), id);

    match element {
        Element::TextBlock(_) | Element::FactSet(_) => {}
        Element::Image(image) => mount_image(image, ctx),
        Element::ImageSet(set) => {
            for image in &set.images {
                let image_id = image.id.as_deref().filter(|id| !id.is_empty());
                if !is_shown(ctx, image_id, image.is_visible != Some(false)) {
                    continue;
                }
                mount_image(image, ctx);
                let mut child = RenderNode::new("Image", image_id);
                if interactive {
                    child.select_action = image.select_action.clone();
                }
                node.children.push(child);
            }
        }
        Element::Media(media) => {
            for source in &media.sources {
                ctx.add_resource(source.url.as_str(), source.mime_type.as_str());
            }
            if let Some(poster) = media.poster.as_deref().filter(|p| !p.is_empty()) {
                ctx.add_resource(poster, "");
            }
        }
        Element::Container(container) => {
            node.children = mount_children(&container.items, ctx, pass);
        }
        Element::ColumnSet(set) => {
            for column in &set.columns {
                let column_id = column.id.as_deref().filter(|id| !id.is_empty());
                if !is_shown(ctx, column_id, column.is_visible != Some(false)) {
                    continue;
                }
                let mut child = RenderNode::new("Column", column_id);
                if interactive {
                    child.select_action = column.select_action.clone();
                }
                child.children = mount_children(&column.items, ctx, pass);
                node.children.push(child);
            }
        }
        Element::ActionSet(set) => {
            if !interactive {
                return None;
            }
            node.actions = set.actions.clone();
        }
        Element::TextInput(_)
        | Element::NumberInput(_)
        | Element::DateInput(_)
        | Element::TimeInput(_)
        | Element::ToggleInput(_)
        | Element::ChoiceSetInput(_) => {
            if !interactive {
                return None;
            }
            let input = InputRef::from_element(element)?;
            register_input(input, ctx, pass);
        }
        Element::Unknown => {
            log::debug!("skipping element of unknown type");
            return None;
        }
    }

    if interactive {
        node.select_action = element.select_action().cloned();
    }
    Some(node)
}

fn mount_image(image: &Image, ctx: &mut CardContext<'_>) {
    // registered even when the url is empty
    ctx.add_resource(image.url.as_str(), "");
}

fn register_input(input: InputRef<'_>, ctx: &mut CardContext<'_>, pass: &mut MountPass) {
    let first_this_pass = pass.registered.insert(input.id().to_string());
    if first_this_pass && ctx.get_value(input.id()).is_some() {
        return;
    }
    let value = input.initial_value();
    let error_state = ctx.host_config().inputs.validate_on_mount && input.is_invalid(&value);
    ctx.set_input(input.id(), value, error_state);
}

/// Re-validate and store a user edit; returns the new error state
pub fn edit_input(ctx: &mut CardContext<'_>, input: InputRef<'_>, value: impl Into<InputValue>) -> bool {
    let value = value.into();
    let error_state = input.is_invalid(&value);
    ctx.set_input(input.id(), value, error_state);
    error_state
}

/// Walks a media element's playable sources as playback fails
#[derive(Debug, Clone)]
pub struct MediaPlayback<'m> {
    sources: Vec<&'m MediaSource>,
    current: usize,
}

impl<'m> MediaPlayback<'m> {
    pub fn new(media: &'m Media) -> Self {
        Self {
            sources: media
                .sources
                .iter()
                .filter(|s| !s.url.trim().is_empty())
                .collect(),
            current: 0,
        }
    }

    pub fn current_source(&self) -> Option<&'m MediaSource> {
        self.sources.get(self.current).copied()
    }

    /// Move to the next source; after the last one, report the failure to the
    /// host and return `None`
    pub fn on_source_error(&mut self, ctx: &mut CardContext<'_>) -> Option<&'m MediaSource> {
        if self.current + 1 < self.sources.len() {
            self.current += 1;
            return self.current_source();
        }
        ctx.report_error(ParseErrorReport::new(
            ErrorCode::InvalidPropertyValue,
            "Not able to play the source",
        ));
        None
    }
}
