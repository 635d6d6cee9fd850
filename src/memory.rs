//! An in-memory [`Dom`] for tests and headless rendering.
//!
//! Nodes live in an [`indextree::Arena`] and every call through [`Dom`] is recorded as a [`Mutation`],
//! so callers can check not just the resulting tree but also how much work it took to get there.

use crate::{
	dom::{local_name, Dom, Listener},
	node::Value,
};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashSet;
use indextree::{Arena, NodeId};
use std::{collections::BTreeMap, mem, rc::Rc};
use tracing::trace;

/// The event type passed to listeners of a [`MemoryDom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryEvent {
	pub kind: String,
}

impl MemoryEvent {
	#[must_use]
	pub fn new(kind: impl Into<String>) -> Self {
		Self { kind: kind.into() }
	}
}

/// One recorded host call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	CreateElement(String),
	CreateText(String),
	SetText(NodeId),
	Insert { parent: NodeId, child: NodeId },
	Remove { parent: NodeId, child: NodeId },
	Replace { parent: NodeId, new_child: NodeId, old_child: NodeId },
	SetAttribute { node: NodeId, name: String },
	RemoveAttribute { node: NodeId, name: String },
	SetProperty { node: NodeId, name: String },
	AddListener { node: NodeId, event: String },
	RemoveListener { node: NodeId, event: String },
	Connected(NodeId),
	Disconnected(NodeId),
}

impl Mutation {
	/// Whether this created a new host node.
	#[must_use]
	pub fn is_creation(&self) -> bool {
		matches!(self, Mutation::CreateElement(_) | Mutation::CreateText(_))
	}
}

struct Attribute {
	namespace: Option<String>,
	value: String,
}

struct ElementData {
	tag: String,
	namespace: Option<String>,
	/// By qualified name.
	attributes: BTreeMap<String, Attribute>,
	properties: BTreeMap<String, Value>,
	listeners: Vec<(String, Listener<MemoryDom>)>,
}

enum NodeData {
	Element(ElementData),
	Text(String),
}

pub struct MemoryDom {
	arena: Arena<NodeData>,
	mutations: Vec<Mutation>,
	/// Subtree roots the differ didn't create. [`Dom::release`] leaves these alone.
	spliced: HashSet<NodeId>,
}

impl Debug for MemoryDom {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDom")
			.field("nodes", &self.node_count())
			.field("mutations", &self.mutations.len())
			.finish()
	}
}

impl Default for MemoryDom {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDom {
	#[must_use]
	pub fn new() -> Self {
		Self {
			arena: Arena::new(),
			mutations: Vec::new(),
			spliced: HashSet::new(),
		}
	}

	/// How many nodes exist, attached or not. Released nodes aren't counted.
	#[must_use]
	pub fn node_count(&self) -> usize {
		self.arena.live_count()
	}

	/// Whether `node` was released and no longer exists.
	#[must_use]
	pub fn is_released(&self, node: NodeId) -> bool {
		node.is_removed(&self.arena)
	}

	/// Creates a detached element to render into. This isn't recorded.
	pub fn create_root(&mut self, tag: &str) -> NodeId {
		self.arena.new_node(NodeData::Element(ElementData {
			tag: tag.to_owned(),
			namespace: None,
			attributes: BTreeMap::new(),
			properties: BTreeMap::new(),
			listeners: Vec::new(),
		}))
	}

	#[must_use]
	pub fn mutations(&self) -> &[Mutation] {
		&self.mutations
	}

	pub fn take_mutations(&mut self) -> Vec<Mutation> {
		mem::take(&mut self.mutations)
	}

	#[must_use]
	pub fn children(&self, node: NodeId) -> Vec<NodeId> {
		node.children(&self.arena).collect()
	}

	#[must_use]
	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.arena[node].parent()
	}

	#[must_use]
	pub fn tag(&self, node: NodeId) -> Option<&str> {
		match self.arena[node].get() {
			NodeData::Element(element) => Some(&element.tag),
			NodeData::Text(_) => None,
		}
	}

	#[must_use]
	pub fn namespace(&self, node: NodeId) -> Option<&str> {
		self.element(node).and_then(|element| element.namespace.as_deref())
	}

	#[must_use]
	pub fn text(&self, node: NodeId) -> Option<&str> {
		match self.arena[node].get() {
			NodeData::Text(text) => Some(text),
			NodeData::Element(_) => None,
		}
	}

	/// An attribute value by qualified name.
	#[must_use]
	pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node).and_then(|element| element.attributes.get(name)).map(|attribute| attribute.value.as_str())
	}

	/// The namespace an attribute was set in.
	#[must_use]
	pub fn attribute_namespace(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node).and_then(|element| element.attributes.get(name)).and_then(|attribute| attribute.namespace.as_deref())
	}

	#[must_use]
	pub fn property(&self, node: NodeId, name: &str) -> Option<&Value> {
		self.element(node).and_then(|element| element.properties.get(name))
	}

	/// How many listeners are registered on `node` for `event`.
	#[must_use]
	pub fn listener_count(&self, node: NodeId, event: &str) -> usize {
		self.element(node).map_or(0, |element| element.listeners.iter().filter(|(e, _)| e == event).count())
	}

	/// Calls every listener registered on `node` for `event`, in registration order, and returns how many ran.
	pub fn dispatch(&self, node: NodeId, event: &str) -> usize {
		let listeners: Vec<Listener<Self>> = match self.element(node) {
			Some(element) => element.listeners.iter().filter(|(e, _)| e == event).map(|(_, listener)| Rc::clone(listener)).collect(),
			None => return 0,
		};
		let event = MemoryEvent::new(event);
		for listener in &listeners {
			listener(&event);
		}
		listeners.len()
	}

	/// Serializes `node` and its descendants.
	#[must_use]
	pub fn to_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		self.serialize(&mut html, node);
		html
	}

	/// Serializes the descendants of `node`.
	#[must_use]
	pub fn inner_html(&self, node: NodeId) -> String {
		let mut html = String::new();
		for child in node.children(&self.arena) {
			self.serialize(&mut html, child);
		}
		html
	}

	fn serialize(&self, out: &mut String, node: NodeId) {
		match self.arena[node].get() {
			NodeData::Text(text) => escape_into(out, text, false),
			NodeData::Element(element) => {
				out.push('<');
				out.push_str(&element.tag);
				for (name, attribute) in &element.attributes {
					out.push(' ');
					out.push_str(name);
					out.push_str("=\"");
					escape_into(out, &attribute.value, true);
					out.push('"');
				}
				out.push('>');
				for child in node.children(&self.arena) {
					self.serialize(out, child);
				}
				out.push_str("</");
				out.push_str(&element.tag);
				out.push('>');
			}
		}
	}

	fn element(&self, node: NodeId) -> Option<&ElementData> {
		match self.arena[node].get() {
			NodeData::Element(element) => Some(element),
			NodeData::Text(_) => None,
		}
	}

	fn element_mut(&mut self, node: NodeId) -> &mut ElementData {
		match self.arena[node].get_mut() {
			NodeData::Element(element) => element,
			NodeData::Text(_) => panic!("MemoryDom: {:?} is not an element", node),
		}
	}

	fn assert_child(&self, parent: NodeId, child: NodeId) {
		assert_eq!(self.arena[child].parent(), Some(parent), "MemoryDom: {:?} is not a child of {:?}", child, parent);
	}
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' if attribute => out.push_str("&quot;"),
			_ => out.push(c),
		}
	}
}

impl Dom for MemoryDom {
	type Node = NodeId;
	type Event = MemoryEvent;

	fn create_element(&mut self, tag: &str) -> Self::Node {
		self.mutations.push(Mutation::CreateElement(tag.to_owned()));
		self.create_root(tag)
	}

	fn create_element_ns(&mut self, namespace: &str, tag: &str) -> Self::Node {
		let node = self.create_element(tag);
		self.element_mut(node).namespace = Some(namespace.to_owned());
		node
	}

	fn create_text_node(&mut self, text: &str) -> Self::Node {
		self.mutations.push(Mutation::CreateText(text.to_owned()));
		self.arena.new_node(NodeData::Text(text.to_owned()))
	}

	fn set_text(&mut self, node: &Self::Node, text: &str) {
		self.mutations.push(Mutation::SetText(*node));
		match self.arena[*node].get_mut() {
			NodeData::Text(current) => text.clone_into(current),
			NodeData::Element(_) => panic!("MemoryDom: {:?} is not a text node", node),
		}
	}

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) {
		self.insert_before(parent, child, None);
	}

	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>) {
		self.mutations.push(Mutation::Insert { parent: *parent, child: *child });
		match reference {
			Some(reference) => {
				self.assert_child(*parent, *reference);
				if reference != child {
					reference.insert_before(*child, &mut self.arena);
				}
			}
			None => parent.append(*child, &mut self.arena),
		}
	}

	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) {
		self.assert_child(*parent, *child);
		self.mutations.push(Mutation::Remove { parent: *parent, child: *child });
		child.detach(&mut self.arena);
	}

	fn replace_child(&mut self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node) {
		self.assert_child(*parent, *old_child);
		self.mutations.push(Mutation::Replace {
			parent: *parent,
			new_child: *new_child,
			old_child: *old_child,
		});
		if new_child != old_child {
			old_child.insert_before(*new_child, &mut self.arena);
			old_child.detach(&mut self.arena);
		}
	}

	fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) {
		self.mutations.push(Mutation::SetAttribute { node: *node, name: name.to_owned() });
		self.element_mut(*node).attributes.insert(
			name.to_owned(),
			Attribute {
				namespace: None,
				value: value.to_owned(),
			},
		);
	}

	fn set_attribute_ns(&mut self, node: &Self::Node, namespace: &str, qualified_name: &str, value: &str) {
		self.mutations.push(Mutation::SetAttribute {
			node: *node,
			name: qualified_name.to_owned(),
		});
		self.element_mut(*node).attributes.insert(
			qualified_name.to_owned(),
			Attribute {
				namespace: Some(namespace.to_owned()),
				value: value.to_owned(),
			},
		);
	}

	fn remove_attribute(&mut self, node: &Self::Node, name: &str) {
		self.mutations.push(Mutation::RemoveAttribute { node: *node, name: name.to_owned() });
		self.element_mut(*node).attributes.remove(name);
	}

	fn remove_attribute_ns(&mut self, node: &Self::Node, namespace: &str, local: &str) {
		self.mutations.push(Mutation::RemoveAttribute { node: *node, name: local.to_owned() });
		self.element_mut(*node)
			.attributes
			.retain(|name, attribute| attribute.namespace.as_deref() != Some(namespace) || local_name(name) != local);
	}

	fn set_property(&mut self, node: &Self::Node, name: &str, value: &Value) {
		self.mutations.push(Mutation::SetProperty { node: *node, name: name.to_owned() });
		self.element_mut(*node).properties.insert(name.to_owned(), value.clone());
	}

	fn add_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>) {
		self.mutations.push(Mutation::AddListener {
			node: *node,
			event: event.to_owned(),
		});
		self.element_mut(*node).listeners.push((event.to_owned(), Rc::clone(listener)));
	}

	fn remove_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>) {
		self.mutations.push(Mutation::RemoveListener {
			node: *node,
			event: event.to_owned(),
		});
		let listeners = &mut self.element_mut(*node).listeners;
		match listeners.iter().position(|(e, l)| e == event && crate::dom::same_rc(l, listener)) {
			Some(index) => {
				listeners.remove(index);
			}
			None => panic!("MemoryDom: No matching {} listener on {:?}", event, node),
		}
	}

	fn subtree_connected(&mut self, node: &Self::Node) {
		trace!("Connected {:?}", node);
		self.mutations.push(Mutation::Connected(*node));
		self.spliced.insert(*node);
	}

	fn subtree_disconnected(&mut self, node: &Self::Node) {
		trace!("Disconnected {:?}", node);
		self.mutations.push(Mutation::Disconnected(*node));
	}

	fn release(&mut self, node: &Self::Node) {
		// Spliced subtrees are detached first, without looking inside them.
		let mut pending: Vec<NodeId> = node.children(&self.arena).collect();
		let mut spliced = Vec::new();
		while let Some(next) = pending.pop() {
			if self.spliced.contains(&next) {
				spliced.push(next);
			} else {
				pending.extend(next.children(&self.arena));
			}
		}
		for root in spliced {
			root.detach(&mut self.arena);
		}
		trace!("Released {:?}", node);
		node.remove_subtree(&mut self.arena);
	}
}
