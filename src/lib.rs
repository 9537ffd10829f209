//! Metadata-driven UI composition.
//!
//! Applications describe their menus, tool compartments and widgets as data
//! ([`descriptor`]), register widget factories by kind ([`registry`]), and
//! drive an interaction store ([`state`]) with [`actions`]. The
//! [`compose`] engine turns the three into a [`compose::WidgetTree`], and
//! [`shell::Shell`] ties it all together for a host. [`paint`] is the
//! terminal host used by the `term-compose` binary.

pub mod actions;
pub mod compose;
pub mod constants;
pub mod descriptor;
pub mod dialog;
pub mod document;
pub mod error;
pub mod keybindings;
pub mod navigator;
pub mod paint;
pub mod params;
pub mod registry;
pub mod shell;
pub mod state;
pub mod theme;
pub mod tracing_sub;
pub mod widget;
pub mod widgets;
