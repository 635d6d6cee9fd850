#![doc(html_root_url = "https://docs.rs/petit-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A small keyed virtual DOM reconciler.
//!
//! Build immutable [`Node`] trees with [`create_node`], then let a [`DomDiffer`] mount them into any [`Dom`]
//! and patch them into later versions with a minimal number of host operations.
//!
//! The `web` module renders into a browser document, the `memory` module into an inspectable arena.

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod closure_map;
mod rc_hash_map;

pub mod component;
pub mod diff;
pub mod dom;
pub mod edit_script;
pub mod memory;
pub mod node;
pub mod web;

pub use component::{default_should_update, Component, FunctionComponent};
pub use diff::{DomDiffer, Options};
pub use dom::{Dom, Listener};
pub use node::{create_node, AttrValue, Child, Content, Element, Key, Node, NodeId, NodeKind, NodeType, Prop, Props, Value};
