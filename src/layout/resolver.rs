//! Layout stack resolution
//!
//! Resolution walks `layout -> parent -> ...` from a starting layout to a
//! terminal one, then works on the resulting path of frames. A start name
//! that is not registered stands for the caller's own content, so it still
//! picks up the default layout.
//!
//!
//! - data is folded outermost first with the configured [`MergeStrategy`]
//! - content is composed outermost first, each inner layout substituted
//!   into the placeholder the previous step left behind
//!
//! [`MergeStrategy`]: super::MergeStrategy

use std::borrow::Cow;
use std::collections::HashSet;

use tracing::{debug, trace};

use crate::tag::{replace_tag, TagOptions};

use super::config::LayoutConfig;
use super::error::LayoutError;
use super::store::LayoutStore;
use super::types::{Data, LayoutDefinition, LayoutRef, TERMINAL_NAMES};

/// Result of resolving a layout stack
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    /// Layout names from the outermost layout to the starting one
    pub names: Vec<String>,
    /// Composed template, with the starting layout's placeholder left open
    pub content: String,
    /// Merged data of every layout in the stack
    pub data: Data,
}

/// Normalize a raw layout reference into a parent name.
///
/// | reference                          | result              |
/// |------------------------------------|---------------------|
/// | unset, null, `true`, `""`          | the default, if any |
/// | `false`, `"false"`, `"null"`, `"nil"` | `None`           |
/// | any other name                     | that name           |
pub fn assert_layout<'a>(layout: &'a LayoutRef, default_layout: Option<&'a str>) -> Option<&'a str> {
    let default_layout = default_layout.filter(|name| !name.is_empty());
    match layout {
        LayoutRef::Unset | LayoutRef::Null | LayoutRef::Flag(true) => default_layout,
        LayoutRef::Flag(false) => None,
        LayoutRef::Name(name) if name.is_empty() => default_layout,
        LayoutRef::Name(name) if is_terminal_name(name) => None,
        LayoutRef::Name(name) => Some(name.as_str()),
    }
}

/// Check whether a name is one of the explicit "no layout" sentinels
pub fn is_terminal_name(name: &str) -> bool {
    TERMINAL_NAMES.contains(&name)
}

/// The frame a stack starts from.
///
/// A registered name borrows its definition. Any other name becomes a bare
/// placeholder with no data and an unset layout, so the body passes through
/// it untouched and the default layout, if any, still wraps it.
pub fn start_frame<'a>(
    store: &'a LayoutStore,
    config: &LayoutConfig,
    start: &str,
) -> Cow<'a, LayoutDefinition> {
    match store.get_layout(start) {
        Some(def) => Cow::Borrowed(def),
        None => {
            trace!(start, "unregistered start layout, content used as-is");
            let options = TagOptions::new(config.delims.clone(), config.tag.clone());
            Cow::Owned(LayoutDefinition::with_parent(
                start,
                LayoutRef::Unset,
                options.placeholder(),
            ))
        }
    }
}

/// Walk the parent chain from `start`.
///
/// Returns the frames outermost first, so the last frame is `start`. Every
/// parent must be registered.
pub fn resolve_chain<'a>(
    store: &'a LayoutStore,
    config: &LayoutConfig,
    start: &'a LayoutDefinition,
) -> Result<Vec<&'a LayoutDefinition>, LayoutError> {
    let mut current = start;
    let mut visited = HashSet::from([current.name.clone()]);
    let mut frames = vec![current];

    while let Some(parent) = assert_layout(&current.layout, config.default_layout()) {
        // The default layout does not wrap itself
        if !current.layout.is_explicit() && parent == current.name {
            break;
        }

        if !visited.insert(parent.to_string()) {
            let mut chain: Vec<String> = frames.iter().map(|f| f.name.clone()).collect();
            chain.push(parent.to_string());
            return Err(LayoutError::cycle(chain));
        }

        let next = store
            .get_layout(parent)
            .ok_or_else(|| LayoutError::unresolved(parent, Some(current.name.as_str())))?;
        trace!(layout = %current.name, parent = %next.name, "following layout");
        frames.push(next);
        current = next;
    }

    frames.reverse();
    debug!(start = %start.name, depth = frames.len(), "resolved layout chain");
    Ok(frames)
}

/// Fold frame data outermost first with the configured strategy
pub(crate) fn merge_frames(frames: &[&LayoutDefinition], config: &LayoutConfig) -> Data {
    config.merge.fold(frames.iter().map(|frame| &frame.data))
}

/// Resolve the stack for `start` into one template and one data object
pub fn stack(store: &LayoutStore, config: &LayoutConfig, start: &str) -> Result<Stack, LayoutError> {
    let start = start_frame(store, config, start);
    let frames = resolve_chain(store, config, &start)?;
    let data = merge_frames(&frames, config);

    let mut content = String::new();
    let mut outer: Option<&LayoutDefinition> = None;
    for &frame in &frames {
        content = match outer {
            Some(outer) => replace_tag(&frame.content, &content, &config.tag_options(outer)),
            None => frame.content.clone(),
        };
        outer = Some(frame);
    }

    Ok(Stack {
        names: frames.iter().map(|frame| frame.name.clone()).collect(),
        content,
        data,
    })
}
