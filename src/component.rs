//! Embeddable components.

use crate::{
	diff::DomDiffer,
	dom::Dom,
	node::{Content, Node, Props},
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// An object that manages its own live subtree.
///
/// Component nodes are only patched against nodes of the same component instance (by pointer).
/// Each method receives the differ, so a component can render through it in turn.
pub trait Component<D: Dom> {
	/// Creates the component's live node. The caller inserts it.
	fn mount(&self, differ: &mut DomDiffer<D>, props: &Props<D>, content: &Content<D>) -> D::Node;

	fn patch(&self, differ: &mut DomDiffer<D>, node: &D::Node, new_props: &Props<D>, old_props: &Props<D>, new_content: &Content<D>, old_content: &Content<D>);

	/// Tears down component state. The caller removes `node` from its parent.
	fn unmount(&self, differ: &mut DomDiffer<D>, node: &D::Node);
}

type Render<D> = dyn Fn(&Props<D>, &Content<D>) -> Node<D>;
type ShouldUpdate<D> = dyn Fn(&Props<D>, &Props<D>, &Content<D>, &Content<D>) -> bool;

/// A render function, with an optional predicate that lets patching skip re-rendering.
pub struct FunctionComponent<D: Dom> {
	render: Rc<Render<D>>,
	should_update: Option<Rc<ShouldUpdate<D>>>,
}

impl<D: Dom> FunctionComponent<D> {
	pub fn new(render: impl 'static + Fn(&Props<D>, &Content<D>) -> Node<D>) -> Self {
		Self {
			render: Rc::new(render),
			should_update: None,
		}
	}

	/// Replaces [`default_should_update`].
	///
	/// The predicate receives `(new_props, old_props, new_content, old_content)`.
	#[must_use]
	pub fn with_should_update(mut self, should_update: impl 'static + Fn(&Props<D>, &Props<D>, &Content<D>, &Content<D>) -> bool) -> Self {
		self.should_update = Some(Rc::new(should_update));
		self
	}

	#[must_use]
	pub fn render(&self, props: &Props<D>, content: &Content<D>) -> Node<D> {
		(self.render)(props, content)
	}

	#[must_use]
	pub fn should_update(&self, new_props: &Props<D>, old_props: &Props<D>, new_content: &Content<D>, old_content: &Content<D>) -> bool {
		match &self.should_update {
			Some(should_update) => should_update(new_props, old_props, new_content, old_content),
			None => default_should_update(new_props, old_props, new_content, old_content),
		}
	}

	/// Whether both wrap the same render function instance.
	#[must_use]
	pub fn same_as(&self, other: &Self) -> bool {
		Rc::as_ptr(&self.render).cast::<u8>() == Rc::as_ptr(&other.render).cast::<u8>()
	}
}

impl<D: Dom> Clone for FunctionComponent<D> {
	fn clone(&self) -> Self {
		Self {
			render: Rc::clone(&self.render),
			should_update: self.should_update.clone(),
		}
	}
}

impl<D: Dom> Debug for FunctionComponent<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("FunctionComponent")
			.field("render", &Rc::as_ptr(&self.render).cast::<u8>())
			.field("should_update", &self.should_update.is_some())
			.finish()
	}
}

/// Re-render if the content changed by identity or any prop differs.
#[must_use]
pub fn default_should_update<D: Dom>(new_props: &Props<D>, old_props: &Props<D>, new_content: &Content<D>, old_content: &Content<D>) -> bool {
	!new_content.is_identical(old_content) || new_props.differs_from(old_props)
}
