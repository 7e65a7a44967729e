//! Rendering content through a layout stack
//!
//! All entry points share [`render`]; the callback and `async` forms only
//! change how the result is delivered.

use tracing::{debug, trace};

use crate::layout::resolver::merge_frames;
use crate::layout::{
    assert_layout, is_terminal_name, resolve_chain, start_frame, Data, LayoutConfig, LayoutError,
    LayoutRef, LayoutStore, LocalsPrecedence, MergeStrategy,
};
use crate::tag::replace_tag;

/// Final composed output and its merged data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub content: String,
    pub data: Data,
}

/// A literal body with its own layout reference and front matter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub content: String,
    pub layout: LayoutRef,
    pub data: Data,
}

impl View {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: impl Into<LayoutRef>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_data(mut self, data: Data) -> Self {
        self.data = data;
        self
    }
}

/// Wrap `content` in the layout stack starting at `start`.
///
/// With no start layout, or a terminal name such as `"nil"`, the content is
/// returned unchanged with empty data. An unregistered start name wraps the
/// content in the default layout when one is configured and returns it
/// unchanged otherwise.
pub fn render(
    store: &LayoutStore,
    config: &LayoutConfig,
    content: &str,
    start: Option<&str>,
) -> Result<Rendered, LayoutError> {
    let Some(start) = start.filter(|name| !name.is_empty() && !is_terminal_name(name)) else {
        trace!("no layout, content returned as-is");
        return Ok(Rendered {
            content: content.to_string(),
            data: Data::new(),
        });
    };

    let first = start_frame(store, config, start);
    let frames = resolve_chain(store, config, &first)?;
    let data = merge_frames(&frames, config);
    let content = frames.iter().rev().fold(content.to_string(), |body, frame| {
        trace!(layout = %frame.name, "applying layout");
        replace_tag(&body, &frame.content, &config.tag_options(frame))
    });

    debug!(start, layers = frames.len(), "rendered layout stack");
    Ok(Rendered { content, data })
}

/// Callback form of [`render`]
pub fn render_with<F>(
    store: &LayoutStore,
    config: &LayoutConfig,
    content: &str,
    start: Option<&str>,
    callback: F,
) where
    F: FnOnce(Result<Rendered, LayoutError>),
{
    callback(render(store, config, content, start));
}

/// `async` form of [`render`]
pub async fn render_async(
    store: &LayoutStore,
    config: &LayoutConfig,
    content: &str,
    start: Option<&str>,
) -> Result<Rendered, LayoutError> {
    render(store, config, content, start)
}

/// Render a view through its own layout reference.
///
/// The default layout applies when the view does not name one. Result data
/// is layered later-wins: layout data, then view data and `locals` in the
/// order chosen by [`LocalsPrecedence`].
pub fn render_view(
    store: &LayoutStore,
    config: &LayoutConfig,
    view: &View,
    locals: Option<&Data>,
) -> Result<Rendered, LayoutError> {
    let start = assert_layout(&view.layout, config.default_layout());
    let rendered = render(store, config, &view.content, start)?;

    let layer = match config.merge {
        MergeStrategy::Deep => MergeStrategy::Deep,
        _ => MergeStrategy::Overwrite,
    };
    let empty = Data::new();
    let locals = locals.unwrap_or(&empty);
    let data = match config.locals {
        LocalsPrecedence::PreferLocals => layer.fold([&rendered.data, &view.data, locals]),
        LocalsPrecedence::PreferData => layer.fold([&rendered.data, locals, &view.data]),
    };

    Ok(Rendered {
        content: rendered.content,
        data,
    })
}
