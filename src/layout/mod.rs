//! Layout engine: registration, stack resolution and data merging
//!
//! A layout is a named template with one body placeholder and an optional
//! parent. Resolving a layout walks its parents up to a terminal layout,
//! detecting cycles on the way, and produces one composed template plus one
//! merged data object.

pub mod config;
pub mod error;
pub mod merge;
pub mod resolver;
pub mod store;
pub mod types;

pub use config::{LayoutConfig, LocalsPrecedence};
pub use error::LayoutError;
pub use merge::{MergeFn, MergeMode, MergeStrategy};
pub use resolver::{assert_layout, is_terminal_name, resolve_chain, stack, start_frame, Stack};
pub use store::LayoutStore;
pub use types::{Data, LayoutDefinition, LayoutRef, TERMINAL_NAMES};
