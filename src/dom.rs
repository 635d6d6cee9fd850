//! The host environment the differ renders into.
//!
//! Everything [`DomDiffer`](`crate::DomDiffer`) does to live nodes goes through [`Dom`].
//! The crate ships two implementations: [`MemoryDom`](`crate::memory::MemoryDom`) and [`WebDom`](`crate::web::WebDom`).

use crate::node::Value;
use core::fmt::Debug;
use std::rc::Rc;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
pub const XMLNS_NAMESPACE: &str = "http://www.w3.org/2000/xmlns/";

/// An event listener as stored in a [`Node`](`crate::Node`).
///
/// Listeners are compared by pointer only. See [`same_rc`].
pub type Listener<D> = Rc<dyn Fn(&<D as Dom>::Event)>;

/// A DOM-like host.
///
/// Methods are infallible from the differ's point of view.
/// Implementations should panic (or throw) on host failures rather than leave the tree silently out of sync.
pub trait Dom {
	/// A handle to a live host node. Equality must be reference equality.
	type Node: Clone + PartialEq + Debug;

	/// The argument passed to [`Listener`]s.
	type Event: 'static;

	fn create_element(&mut self, tag: &str) -> Self::Node;
	fn create_element_ns(&mut self, namespace: &str, tag: &str) -> Self::Node;
	fn create_text_node(&mut self, text: &str) -> Self::Node;
	fn set_text(&mut self, node: &Self::Node, text: &str);

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
	/// Inserts (or moves) `child` before `reference`, or at the end if `reference` is [`None`].
	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>);
	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node);
	fn replace_child(&mut self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node);

	fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);
	fn set_attribute_ns(&mut self, node: &Self::Node, namespace: &str, qualified_name: &str, value: &str);
	fn remove_attribute(&mut self, node: &Self::Node, name: &str);
	fn remove_attribute_ns(&mut self, node: &Self::Node, namespace: &str, local_name: &str);

	fn set_property(&mut self, node: &Self::Node, name: &str, value: &Value);

	fn add_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>);
	fn remove_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>);

	/// Called when a pre-existing live subtree is spliced into the rendered tree.
	fn subtree_connected(&mut self, _node: &Self::Node) {}

	/// Called when a pre-existing live subtree leaves the rendered tree.
	fn subtree_disconnected(&mut self, _node: &Self::Node) {}

	/// Called after the differ removed and unmounted a node it created. It won't use `node` again.
	///
	/// Pre-existing subtrees spliced in below `node` (see [`subtree_connected`](`Dom::subtree_connected`))
	/// are still attached and must survive.
	fn release(&mut self, _node: &Self::Node) {}
}

/// Looks up the namespace a (qualified) attribute name must be set in, if any.
#[must_use]
pub fn attribute_namespace(name: &str) -> Option<&'static str> {
	match name {
		"xlink:actuate" | "xlink:arcrole" | "xlink:href" | "xlink:role" | "xlink:show" | "xlink:title" | "xlink:type" => Some(XLINK_NAMESPACE),
		"xml:base" | "xml:lang" | "xml:space" => Some(XML_NAMESPACE),
		"xmlns" | "xmlns:xlink" => Some(XMLNS_NAMESPACE),
		_ => None,
	}
}

/// The local part of a qualified attribute name.
#[must_use]
pub fn local_name(qualified_name: &str) -> &str {
	qualified_name.split_once(':').map_or(qualified_name, |(_, local)| local)
}

/// Pointer identity for `Rc`s of trait objects, ignoring vtables.
#[must_use]
pub fn same_rc<E: ?Sized>(a: &Rc<E>, b: &Rc<E>) -> bool {
	Rc::as_ptr(a).cast::<u8>() == Rc::as_ptr(b).cast::<u8>()
}
