//! The node model: immutable, cheaply cloneable descriptions of what to render.

use crate::{
	component::{Component, FunctionComponent},
	dom::{same_rc, Dom, Listener},
};
use core::{
	any::Any,
	cell::Cell,
	fmt::{self, Debug, Formatter},
	slice,
};
use std::{borrow::Cow, collections::BTreeMap, rc::Rc};

/// Identifies a [`Node`] instance for the lifetime of the thread.
///
/// Live bindings are stored against this, which keeps [`Node`]s themselves immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

thread_local! {
	static NEXT_NODE_ID: Cell<u64> = Cell::new(0);
}

impl NodeId {
	fn next() -> Self {
		NEXT_NODE_ID.with(|next| {
			let id = next.get();
			next.set(id + 1);
			Self(id)
		})
	}
}

/// A property value, compared the way `===` would.
#[derive(Clone)]
pub enum Value {
	Undefined,
	Null,
	Bool(bool),
	Number(f64),
	String(Rc<str>),
	/// Compared by pointer.
	Object(Rc<dyn Any>),
}

impl PartialEq for Value {
	#[allow(clippy::float_cmp)]
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Object(a), Value::Object(b)) => same_rc(a, b),
			_ => false,
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Null => f.write_str("null"),
			Value::Bool(b) => Debug::fmt(b, f),
			Value::Number(n) => Debug::fmt(n, f),
			Value::String(s) => Debug::fmt(s, f),
			Value::Object(o) => write!(f, "Object({:p})", Rc::as_ptr(o).cast::<u8>()),
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<f64> for Value {
	fn from(n: f64) -> Self {
		Value::Number(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Value::Number(n.into())
	}
}

impl From<u32> for Value {
	fn from(n: u32) -> Self {
		Value::Number(n.into())
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.into())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s.into())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map_or(Value::Null, Into::into)
	}
}

/// List identity of a node among its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Int(i64),
	Str(Rc<str>),
}

impl Key {
	/// Converts a `key` prop. [`None`] for values that can't act as a key.
	#[must_use]
	#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
	pub fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => Some(Key::Int(*n as i64)),
			Value::Number(n) => Some(Key::Str(n.to_string().into())),
			Value::String(s) => Some(Key::Str(Rc::clone(s))),
			Value::Bool(b) => Some(Key::Str(b.to_string().into())),
			Value::Undefined | Value::Null | Value::Object(_) => None,
		}
	}
}

impl From<i64> for Key {
	fn from(n: i64) -> Self {
		Key::Int(n)
	}
}

impl From<&str> for Key {
	fn from(s: &str) -> Self {
		Key::Str(s.into())
	}
}

/// An entry of a [`Props`] bag.
pub enum Prop<D: Dom> {
	Value(Value),
	Listener(Listener<D>),
}

impl<D: Dom> Clone for Prop<D> {
	fn clone(&self) -> Self {
		match self {
			Prop::Value(value) => Prop::Value(value.clone()),
			Prop::Listener(listener) => Prop::Listener(Rc::clone(listener)),
		}
	}
}

impl<D: Dom> PartialEq for Prop<D> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Prop::Value(a), Prop::Value(b)) => a == b,
			(Prop::Listener(a), Prop::Listener(b)) => same_rc(a, b),
			_ => false,
		}
	}
}

impl<D: Dom> Debug for Prop<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Prop::Value(value) => Debug::fmt(value, f),
			Prop::Listener(listener) => write!(f, "Listener({:p})", Rc::as_ptr(listener).cast::<u8>()),
		}
	}
}

/// An ordered property bag, as passed to [`create_node`] and to components.
pub struct Props<D: Dom>(Vec<(String, Prop<D>)>);

impl<D: Dom> Props<D> {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Sets `name`, replacing an earlier entry of the same name.
	#[must_use]
	pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.set(name.into(), Prop::Value(value.into()))
	}

	/// Sets `name` to a listener. Names of the form `onEvent` bind `event` on elements.
	#[must_use]
	pub fn listener(self, name: impl Into<String>, listener: Listener<D>) -> Self {
		self.set(name.into(), Prop::Listener(listener))
	}

	fn set(mut self, name: String, prop: Prop<D>) -> Self {
		match self.0.iter_mut().find(|(n, _)| *n == name) {
			Some(entry) => entry.1 = prop,
			None => self.0.push((name, prop)),
		}
		self
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&Prop<D>> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, prop)| prop)
	}

	/// Shorthand for [`Prop::Value`] entries.
	#[must_use]
	pub fn value(&self, name: &str) -> Option<&Value> {
		match self.get(name) {
			Some(Prop::Value(value)) => Some(value),
			_ => None,
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop<D>)> {
		self.0.iter().map(|(name, prop)| (name.as_str(), prop))
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// `true` iff any entry differs (by identity for objects and listeners) or the name sets differ.
	#[must_use]
	pub fn differs_from(&self, other: &Self) -> bool {
		self.len() != other.len() || self.iter().any(|(name, prop)| other.get(name) != Some(prop))
	}
}

impl<D: Dom> Default for Props<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D: Dom> Clone for Props<D> {
	fn clone(&self) -> Self {
		Self(self.0.clone())
	}
}

impl<D: Dom> Debug for Props<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.0.iter().map(|(name, prop)| (name, prop))).finish()
	}
}

/// Attribute values. `Bool(true)` renders as an empty attribute, `Bool(false)` as none at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
	Str(Rc<str>),
	Bool(bool),
}

/// Construction-time child content, flattened by [`create_node`].
pub enum Child<D: Dom> {
	Node(Node<D>),
	Text(String),
	Empty,
	List(Vec<Child<D>>),
}

impl<D: Dom> From<Node<D>> for Child<D> {
	fn from(node: Node<D>) -> Self {
		Child::Node(node)
	}
}

impl<D: Dom> From<&Node<D>> for Child<D> {
	fn from(node: &Node<D>) -> Self {
		Child::Node(node.clone())
	}
}

impl<D: Dom> From<&str> for Child<D> {
	fn from(text: &str) -> Self {
		Child::Text(text.to_owned())
	}
}

impl<D: Dom> From<String> for Child<D> {
	fn from(text: String) -> Self {
		Child::Text(text)
	}
}

impl<D: Dom> From<()> for Child<D> {
	fn from((): ()) -> Self {
		Child::Empty
	}
}

impl<D: Dom, T: Into<Child<D>>> From<Option<T>> for Child<D> {
	fn from(child: Option<T>) -> Self {
		child.map_or(Child::Empty, Into::into)
	}
}

impl<D: Dom> From<Vec<Child<D>>> for Child<D> {
	fn from(children: Vec<Child<D>>) -> Self {
		Child::List(children)
	}
}

impl<D: Dom> From<Vec<Node<D>>> for Child<D> {
	fn from(nodes: Vec<Node<D>>) -> Self {
		Child::List(nodes.into_iter().map(Child::Node).collect())
	}
}

/// Child content of an element or component.
pub enum Content<D: Dom> {
	Single(Node<D>),
	List(Vec<Node<D>>),
}

impl<D: Dom> Content<D> {
	#[must_use]
	pub fn empty() -> Self {
		Content::List(Vec::new())
	}

	#[must_use]
	pub fn as_slice(&self) -> &[Node<D>] {
		match self {
			Content::Single(node) => slice::from_ref(node),
			Content::List(nodes) => nodes,
		}
	}

	#[must_use]
	pub fn is_list(&self) -> bool {
		matches!(self, Content::List(_))
	}

	/// Same shape and the same node instances.
	#[must_use]
	pub fn is_identical(&self, other: &Self) -> bool {
		self.is_list() == other.is_list()
			&& self.as_slice().len() == other.as_slice().len()
			&& self.as_slice().iter().zip(other.as_slice()).all(|(a, b)| a.ptr_eq(b))
	}

	fn into_svg(self) -> Self {
		match self {
			Content::Single(node) => Content::Single(node.into_svg()),
			Content::List(nodes) => Content::List(nodes.into_iter().map(Node::into_svg).collect()),
		}
	}
}

impl<D: Dom> Clone for Content<D> {
	fn clone(&self) -> Self {
		match self {
			Content::Single(node) => Content::Single(node.clone()),
			Content::List(nodes) => Content::List(nodes.clone()),
		}
	}
}

impl<D: Dom> Debug for Content<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Content::Single(node) => f.debug_tuple("Single").field(node).finish(),
			Content::List(nodes) => f.debug_tuple("List").field(nodes).finish(),
		}
	}
}

/// An element description. Attributes, properties and listeners are kept sorted by name.
///
/// Attribute names are stored as given. See [`dom_attribute_name`] for how they are applied.
pub struct Element<D: Dom> {
	pub tag: String,
	pub svg: bool,
	/// Attributes, properties and listeners of externally owned roots aren't patched.
	pub external_root: bool,
	pub attributes: BTreeMap<String, AttrValue>,
	pub properties: BTreeMap<String, Value>,
	pub listeners: BTreeMap<String, Listener<D>>,
	pub content: Content<D>,
}

impl<D: Dom> Clone for Element<D> {
	fn clone(&self) -> Self {
		Self {
			tag: self.tag.clone(),
			svg: self.svg,
			external_root: self.external_root,
			attributes: self.attributes.clone(),
			properties: self.properties.clone(),
			listeners: self.listeners.clone(),
			content: self.content.clone(),
		}
	}
}

impl<D: Dom> Debug for Element<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Element")
			.field("tag", &self.tag)
			.field("svg", &self.svg)
			.field("external_root", &self.external_root)
			.field("attributes", &self.attributes)
			.field("properties", &self.properties)
			.field("listeners", &self.listeners.keys().collect::<Vec<_>>())
			.field("content", &self.content)
			.finish()
	}
}

pub enum NodeKind<D: Dom> {
	Text(String),
	Element(Element<D>),
	/// An embedded component object.
	Component {
		component: Rc<dyn Component<D>>,
		props: Props<D>,
		content: Content<D>,
	},
	/// An embedded render function.
	Function {
		function: FunctionComponent<D>,
		props: Props<D>,
		content: Content<D>,
	},
	/// An already-live host node, spliced in as-is.
	Live(D::Node),
}

impl<D: Dom> Debug for NodeKind<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			NodeKind::Text(text) => f.debug_tuple("Text").field(text).finish(),
			NodeKind::Element(element) => Debug::fmt(element, f),
			NodeKind::Component { component, props, content } => f
				.debug_struct("Component")
				.field("component", &Rc::as_ptr(component).cast::<u8>())
				.field("props", props)
				.field("content", content)
				.finish(),
			NodeKind::Function { function, props, content } => f.debug_struct("Function").field("function", function).field("props", props).field("content", content).finish(),
			NodeKind::Live(node) => f.debug_tuple("Live").field(node).finish(),
		}
	}
}

struct NodeData<D: Dom> {
	id: NodeId,
	key: Option<Key>,
	kind: NodeKind<D>,
}

/// An immutable description of something to render.
///
/// Cloning is cheap and preserves identity: [`DomDiffer::patch`](`crate::DomDiffer::patch`) skips
/// any subtree whose new and old node are the same instance.
pub struct Node<D: Dom>(Rc<NodeData<D>>);

impl<D: Dom> Clone for Node<D> {
	fn clone(&self) -> Self {
		Self(Rc::clone(&self.0))
	}
}

impl<D: Dom> Debug for Node<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let mut debug = f.debug_struct("Node");
		debug.field("id", &self.0.id);
		if let Some(key) = &self.0.key {
			debug.field("key", key);
		}
		debug.field("kind", &self.0.kind).finish()
	}
}

impl<D: Dom> Node<D> {
	fn new(key: Option<Key>, kind: NodeKind<D>) -> Self {
		Self(Rc::new(NodeData { id: NodeId::next(), key, kind }))
	}

	#[must_use]
	pub fn text(text: impl Into<String>) -> Self {
		Self::new(None, NodeKind::Text(text.into()))
	}

	/// Wraps an already-live host node.
	#[must_use]
	pub fn live(node: D::Node) -> Self {
		Self::new(None, NodeKind::Live(node))
	}

	/// Wraps a live host node and gives it a list key.
	#[must_use]
	pub fn keyed_live(key: impl Into<Key>, node: D::Node) -> Self {
		Self::new(Some(key.into()), NodeKind::Live(node))
	}

	#[must_use]
	pub fn element(key: Option<Key>, element: Element<D>) -> Self {
		Self::new(key, NodeKind::Element(element))
	}

	#[must_use]
	pub fn id(&self) -> NodeId {
		self.0.id
	}

	#[must_use]
	pub fn key(&self) -> Option<&Key> {
		self.0.key.as_ref()
	}

	#[must_use]
	pub fn kind(&self) -> &NodeKind<D> {
		&self.0.kind
	}

	#[must_use]
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}

	/// Whether two nodes occupy the same slot in a list, i.e. whether their keys match.
	#[must_use]
	pub fn can_patch(&self, other: &Self) -> bool {
		self.key() == other.key()
	}

	/// Marks an element as an externally owned root, which keeps its own attributes,
	/// properties and listeners out of patching. Other nodes are returned unchanged.
	#[must_use]
	pub fn external_root(self) -> Self {
		match self.kind() {
			NodeKind::Element(element) if !element.external_root => {
				let mut element = element.clone();
				element.external_root = true;
				Self::element(self.0.key.clone(), element)
			}
			_ => self,
		}
	}

	fn into_svg(self) -> Self {
		match self.kind() {
			NodeKind::Element(element) if !element.svg => {
				let mut element = element.clone();
				element.svg = true;
				element.content = element.content.into_svg();
				Self::element(self.0.key.clone(), element)
			}
			_ => self,
		}
	}
}

/// What [`create_node`] creates.
pub enum NodeType<D: Dom> {
	Tag(String),
	Component(Rc<dyn Component<D>>),
	Function(FunctionComponent<D>),
}

impl<D: Dom> From<&str> for NodeType<D> {
	fn from(tag: &str) -> Self {
		NodeType::Tag(tag.to_owned())
	}
}

impl<D: Dom> From<String> for NodeType<D> {
	fn from(tag: String) -> Self {
		NodeType::Tag(tag)
	}
}

impl<D: Dom> From<Rc<dyn Component<D>>> for NodeType<D> {
	fn from(component: Rc<dyn Component<D>>) -> Self {
		NodeType::Component(component)
	}
}

impl<D: Dom> From<FunctionComponent<D>> for NodeType<D> {
	fn from(function: FunctionComponent<D>) -> Self {
		NodeType::Function(function)
	}
}

impl<D: Dom> From<&FunctionComponent<D>> for NodeType<D> {
	fn from(function: &FunctionComponent<D>) -> Self {
		NodeType::Function(function.clone())
	}
}

/// Creates a [`Node`].
///
/// For tags, `props` are sorted into attributes (strings and booleans), listeners
/// (`onEvent` keys holding a [`Prop::Listener`]) and properties (everything else).
/// `key` is taken out as list identity. Content lists are flattened, with strings and
/// empty entries becoming text nodes. Everything below an `svg` tag is created in the SVG namespace,
/// and keeps its camelCase attribute names (see [`dom_attribute_name`]).
///
/// Components and functions receive `props` and the content as given.
pub fn create_node<D: Dom>(node_type: impl Into<NodeType<D>>, props: Props<D>, content: impl Into<Child<D>>) -> Node<D> {
	let key = props.value("key").and_then(Key::from_value);
	let content = content.into();
	match node_type.into() {
		NodeType::Tag(tag) => {
			let svg = tag == "svg";
			let content = match content {
				Child::Empty => Content::empty(),
				Child::List(children) => {
					let mut nodes = Vec::with_capacity(children.len());
					flatten_into(&mut nodes, children);
					Content::List(nodes)
				}
				Child::Node(node) => Content::Single(node),
				Child::Text(text) => Content::Single(Node::text(text)),
			};
			let mut element = Element {
				tag,
				svg: false,
				external_root: false,
				attributes: BTreeMap::new(),
				properties: BTreeMap::new(),
				listeners: BTreeMap::new(),
				content: if svg { content.into_svg() } else { content },
			};
			classify_props(&mut element, props);
			element.svg = svg;
			Node::element(key, element)
		}
		NodeType::Component(component) => Node::new(
			key,
			NodeKind::Component {
				component,
				props,
				content: component_content(content),
			},
		),
		NodeType::Function(function) => Node::new(
			key,
			NodeKind::Function {
				function,
				props,
				content: component_content(content),
			},
		),
	}
}

fn component_content<D: Dom>(content: Child<D>) -> Content<D> {
	match content {
		Child::Node(node) => Content::Single(node),
		Child::Text(text) => Content::Single(Node::text(text)),
		Child::Empty => Content::empty(),
		Child::List(children) => {
			let mut nodes = Vec::with_capacity(children.len());
			flatten_into(&mut nodes, children);
			Content::List(nodes)
		}
	}
}

fn flatten_into<D: Dom>(nodes: &mut Vec<Node<D>>, children: Vec<Child<D>>) {
	for child in children {
		match child {
			Child::Node(node) => nodes.push(node),
			Child::Text(text) => nodes.push(Node::text(text)),
			Child::Empty => nodes.push(Node::text(String::new())),
			Child::List(children) => flatten_into(nodes, children),
		}
	}
}

fn classify_props<D: Dom>(element: &mut Element<D>, props: Props<D>) {
	for (name, prop) in props.0 {
		if name == "key" {
			continue;
		}
		match prop {
			Prop::Listener(listener) => match event_type(&name) {
				Some(event) => {
					element.listeners.insert(event, listener);
				}
				None => {
					element.properties.insert(name, Value::Object(Rc::new(listener)));
				}
			},
			Prop::Value(Value::String(value)) => {
				element.attributes.insert(name, AttrValue::Str(value));
			}
			Prop::Value(Value::Bool(value)) => {
				element.attributes.insert(name, AttrValue::Bool(value));
			}
			Prop::Value(value) => {
				element.properties.insert(name, value);
			}
		}
	}
}

/// The name an attribute prop is set under: kebab-case for HTML, as given for SVG (whose attributes are case-sensitive).
///
/// Whether an element is SVG is only settled once its `svg` ancestor exists, so this is applied when attributes are set.
#[must_use]
pub fn dom_attribute_name(name: &str, svg: bool) -> Cow<'_, str> {
	if svg || !name.bytes().any(|b| b.is_ascii_uppercase()) {
		Cow::Borrowed(name)
	} else {
		Cow::Owned(kebab_case(name))
	}
}

/// `onClick` → `click`, `onOjAction` → `ojAction`. [`None`] unless the name is `on` followed by a capital letter.
#[must_use]
pub fn event_type(name: &str) -> Option<String> {
	let rest = name.strip_prefix("on")?;
	let mut chars = rest.chars();
	let first = chars.next().filter(char::is_ascii_uppercase)?;
	Some(first.to_ascii_lowercase().to_string() + chars.as_str())
}

/// `ariaLabel` → `aria-label`.
#[must_use]
pub fn kebab_case(name: &str) -> String {
	let mut kebab = String::with_capacity(name.len() + 4);
	for c in name.chars() {
		if c.is_ascii_uppercase() {
			kebab.push('-');
			kebab.push(c.to_ascii_lowercase());
		} else {
			kebab.push(c);
		}
	}
	kebab
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::memory::{MemoryDom, MemoryEvent};

	type N = Node<MemoryDom>;

	fn element(node: &N) -> &Element<MemoryDom> {
		match node.kind() {
			NodeKind::Element(element) => element,
			other => panic!("Expected element, found {:?}", other),
		}
	}

	#[test]
	fn event_names() {
		assert_eq!(event_type("onClick").as_deref(), Some("click"));
		assert_eq!(event_type("onOjAction").as_deref(), Some("ojAction"));
		assert_eq!(event_type("once"), None);
		assert_eq!(event_type("on"), None);
	}

	#[test]
	fn kebab() {
		assert_eq!(kebab_case("ariaLabel"), "aria-label");
		assert_eq!(kebab_case("class"), "class");
		assert_eq!(kebab_case("dataFooBar"), "data-foo-bar");
	}

	#[test]
	fn attribute_names() {
		assert_eq!(dom_attribute_name("ariaLabel", false), "aria-label");
		assert_eq!(dom_attribute_name("viewBox", true), "viewBox");
		assert_eq!(dom_attribute_name("xlink:href", false), "xlink:href");
		assert!(matches!(dom_attribute_name("class", false), Cow::Borrowed(_)));
	}

	#[test]
	fn classification() {
		let listener: Listener<MemoryDom> = Rc::new(|_: &MemoryEvent| ());
		let node: N = create_node(
			"button",
			Props::new()
				.with("key", 7)
				.with("ariaLabel", "Close")
				.with("disabled", true)
				.with("tabIndex", 3)
				.listener("onClick", Rc::clone(&listener))
				.listener("callback", listener),
			"x",
		);
		assert_eq!(node.key(), Some(&Key::Int(7)));
		let element = element(&node);
		assert_eq!(element.attributes.get("ariaLabel"), Some(&AttrValue::Str("Close".into())));
		assert_eq!(element.attributes.get("disabled"), Some(&AttrValue::Bool(true)));
		assert_eq!(element.properties.get("tabIndex"), Some(&Value::Number(3.0)));
		assert!(matches!(element.properties.get("callback"), Some(Value::Object(_))));
		assert!(element.listeners.contains_key("click"));
		assert!(!element.attributes.contains_key("key"));
		assert!(matches!(&element.content, Content::Single(text) if matches!(text.kind(), NodeKind::Text(t) if t == "x")));
	}

	#[test]
	fn nested_content_is_flattened() {
		let inner: N = create_node("b", Props::new(), ());
		let node: N = create_node(
			"p",
			Props::new(),
			vec![Child::<MemoryDom>::from("a"), Child::List(vec![Child::from(&inner), Child::Empty]), Child::from("c")],
		);
		let content = element(&node).content.as_slice();
		assert_eq!(content.len(), 4);
		assert!(content[1].ptr_eq(&inner));
		assert!(matches!(content[2].kind(), NodeKind::Text(t) if t.is_empty()));
	}

	#[test]
	fn svg_descendants() {
		let circle: N = create_node("circle", Props::new().with("strokeWidth", "2"), ());
		let g: N = create_node("g", Props::new(), vec![circle.clone()]);
		let svg: N = create_node("svg", Props::new().with("viewBox", "0 0 10 10"), vec![g]);
		let svg_element = element(&svg);
		assert!(svg_element.svg);
		assert!(svg_element.attributes.contains_key("viewBox"));
		assert!(element(&circle).attributes.contains_key("strokeWidth"), "names are kept until applied");
		let g = &svg_element.content.as_slice()[0];
		assert!(element(g).svg);
		let nested = &element(g).content.as_slice()[0];
		assert!(element(nested).svg);
		assert!(!nested.ptr_eq(&circle));
		assert!(!element(&circle).svg);
	}

	#[test]
	fn prop_comparison() {
		let object: Rc<dyn Any> = Rc::new(5_u8);
		let a: Props<MemoryDom> = Props::new().with("x", 1).with("o", Value::Object(Rc::clone(&object)));
		let b: Props<MemoryDom> = Props::new().with("x", 1).with("o", Value::Object(object));
		let c: Props<MemoryDom> = Props::new().with("x", 1).with("o", Value::Object(Rc::new(5_u8)));
		assert!(!a.differs_from(&b));
		assert!(a.differs_from(&c));
		assert!(a.differs_from(&Props::new().with("x", 1)));
	}
}
