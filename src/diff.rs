use crate::{
	dom::{attribute_namespace, local_name, same_rc, Dom, Listener},
	node::{dom_attribute_name, AttrValue, Content, Node, NodeId, NodeKind, Value},
};
use core::fmt::{self, Debug, Formatter};
use hashbrown::HashMap;
use std::collections::BTreeMap;
use tracing::{error, instrument, trace, trace_span, warn};

mod children;
mod mount;

/// Tuning knobs for [`DomDiffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// Edit distance at which child list diffing stops searching for a shortest edit script
	/// and falls back to key matching. The result is still correct, but may move or recreate more nodes.
	pub max_edit_cost: usize,
}

impl Options {
	#[must_use]
	pub fn new() -> Self {
		Self { max_edit_cost: 50 }
	}

	#[must_use]
	pub fn max_edit_cost(self, max_edit_cost: usize) -> Self {
		Self { max_edit_cost }
	}
}

impl Default for Options {
	fn default() -> Self {
		Self::new()
	}
}

/// What a mounted [`Node`] was realised as.
struct Binding<D: Dom> {
	live: D::Node,
	/// The last output of a function component.
	rendered: Option<Node<D>>,
}

/// Mounts, patches and unmounts [`Node`] trees against a [`Dom`].
///
/// # Correct Use
///
/// Every node passed as `old` must be the node last mounted or patched in that place,
/// and a node instance may only be mounted in one place at a time.
/// Violations are bugs in the calling code and cause a panic.
///
/// Calls must not overlap for the same subtree. [`Component`](`crate::Component`)s receive
/// the differ mutably, so this is only possible through them.
pub struct DomDiffer<D: Dom> {
	dom: D,
	bindings: HashMap<NodeId, Binding<D>>,
	options: Options,
}

impl<D: Dom + Debug> Debug for DomDiffer<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("DomDiffer")
			.field("dom", &self.dom)
			.field("bindings", &self.bindings.len())
			.field("options", &self.options)
			.finish()
	}
}

impl<D: Dom> DomDiffer<D> {
	#[must_use]
	pub fn new(dom: D) -> Self {
		Self::with_options(dom, Options::default())
	}

	#[must_use]
	pub fn with_options(dom: D, options: Options) -> Self {
		Self {
			dom,
			bindings: HashMap::new(),
			options,
		}
	}

	pub fn dom(&self) -> &D {
		&self.dom
	}

	pub fn dom_mut(&mut self) -> &mut D {
		&mut self.dom
	}

	pub fn into_dom(self) -> D {
		self.dom
	}

	pub fn options(&self) -> Options {
		self.options
	}

	/// The live node `node` is currently realised as, if it is mounted.
	pub fn live_node(&self, node: &Node<D>) -> Option<&D::Node> {
		self.bindings.get(&node.id()).map(|binding| &binding.live)
	}

	/// How many nodes are currently mounted.
	pub fn bound_count(&self) -> usize {
		self.bindings.len()
	}

	/// Reconciles the child nodes of `parent`, which must currently match `old`, to `new`.
	///
	/// Pass an empty `old` to render into an empty host node and an empty `new` to clear it.
	#[instrument(skip_all, fields(old.len = old.len(), new.len = new.len()))]
	pub fn update_child_nodes(&mut self, parent: &D::Node, old: &[Node<D>], new: &[Node<D>]) {
		self.diff_children(parent, new, old);
		trace!("{} node(s) bound after update.", self.bindings.len());
	}

	/// Patches the live node of `old` to match `new` and returns the live node now representing `new`.
	///
	/// If the two can't be patched (different tag, component or node kind), `new` is mounted
	/// and replaces `old` in `parent`. Without a `parent`, the caller must swap the returned node in.
	#[instrument(skip_all, fields(new = ?new.id(), old = ?old.id()))]
	pub fn patch(&mut self, new: &Node<D>, old: &Node<D>, parent: Option<&D::Node>) -> D::Node {
		if new.ptr_eq(old) {
			return self.live(old);
		}

		match (new.kind(), old.kind()) {
			(NodeKind::Text(new_text), NodeKind::Text(old_text)) => {
				let span = trace_span!("Patching text");
				let _enter = span.enter();
				let binding = self.unbind(old);
				if new_text != old_text {
					if cfg!(feature = "dangerous-logging") {
						trace!("Updating text {:?} -> {:?}", old_text, new_text);
					}
					self.dom.set_text(&binding.live, new_text);
				}
				self.bind(new, binding)
			}

			(NodeKind::Element(new_element), NodeKind::Element(old_element)) if new_element.tag == old_element.tag && new_element.svg == old_element.svg => {
				let span = trace_span!("Patching element", tag = %new_element.tag, svg = new_element.svg);
				let _enter = span.enter();
				let binding = self.unbind(old);
				if new_element.external_root {
					trace!("Skipping attributes, properties and listeners of external root.");
				} else {
					self.patch_attributes(&binding.live, new_element.svg, &new_element.attributes, &old_element.attributes);
					self.patch_properties(&binding.live, &new_element.properties, &old_element.properties);
					self.patch_listeners(&binding.live, &new_element.listeners, &old_element.listeners);
				}
				self.patch_content(&binding.live, &new_element.content, &old_element.content);
				self.bind(new, binding)
			}

			(
				NodeKind::Component {
					component: new_component,
					props: new_props,
					content: new_content,
				},
				NodeKind::Component {
					component: old_component,
					props: old_props,
					content: old_content,
				},
			) if same_rc(new_component, old_component) => {
				let span = trace_span!("Patching component");
				let _enter = span.enter();
				let binding = self.unbind(old);
				new_component.patch(self, &binding.live, new_props, old_props, new_content, old_content);
				self.bind(new, binding)
			}

			(
				NodeKind::Function {
					function,
					props: new_props,
					content: new_content,
				},
				NodeKind::Function {
					function: old_function,
					props: old_props,
					content: old_content,
				},
			) if function.same_as(old_function) => {
				let span = trace_span!("Patching function component");
				let _enter = span.enter();
				let Binding { live, rendered } = self.unbind(old);
				let previous = match rendered {
					Some(previous) => previous,
					None => unbound(old),
				};
				if function.should_update(new_props, old_props, new_content, old_content) {
					let next = function.render(new_props, new_content);
					let live = self.patch(&next, &previous, parent);
					self.bind(new, Binding { live, rendered: Some(next) })
				} else {
					trace!("Skipping update.");
					self.bind(new, Binding { live, rendered: Some(previous) })
				}
			}

			(NodeKind::Live(new_live), NodeKind::Live(old_live)) => {
				let span = trace_span!("Patching live node");
				let _enter = span.enter();
				self.unbind(old);
				if new_live != old_live {
					match parent {
						Some(parent) => {
							self.dom.subtree_connected(new_live);
							self.dom.replace_child(parent, new_live, old_live);
							self.dom.subtree_disconnected(old_live);
						}
						None => warn!("Swapping live nodes without a parent. The caller must replace {:?} with {:?}.", old_live, new_live),
					}
				}
				self.bind(
					new,
					Binding {
						live: new_live.clone(),
						rendered: None,
					},
				)
			}

			_ => {
				let span = trace_span!("Replacing mismatching node");
				let _enter = span.enter();
				let live = self.mount(new);
				let old_live = self.live(old);
				let owned = self.owns_live_node(old);
				match parent {
					Some(parent) => self.dom.replace_child(parent, &live, &old_live),
					None => warn!("Replacing a node without a parent. The caller must replace {:?} with {:?}.", old_live, live),
				}
				self.unmount(old);
				if owned && parent.is_some() {
					self.dom.release(&old_live);
				}
				live
			}
		}
	}

	/// Patches the children of `parent`.
	fn patch_content(&mut self, parent: &D::Node, new: &Content<D>, old: &Content<D>) {
		match (new, old) {
			(Content::Single(new), Content::Single(old)) => {
				self.patch(new, old, Some(parent));
			}
			(Content::List(new), Content::List(old)) => self.diff_children(parent, new, old),
			(new, old) => {
				let span = trace_span!("Replacing content", old.len = old.as_slice().len(), new.len = new.as_slice().len());
				let _enter = span.enter();
				for old in old.as_slice() {
					self.discard(parent, old);
				}
				for new in new.as_slice() {
					let live = self.mount(new);
					self.dom.append_child(parent, &live);
				}
			}
		}
	}

	fn patch_attributes(&mut self, element: &D::Node, svg: bool, new: &BTreeMap<String, AttrValue>, old: &BTreeMap<String, AttrValue>) {
		for (name, value) in new {
			if old.get(name) == Some(value) {
				continue;
			}
			let name = dom_attribute_name(name, svg);
			if cfg!(feature = "dangerous-logging") {
				trace!("Setting attribute {} = {:?}", name, value);
			} else {
				trace!("Setting attribute {}", name);
			}
			match value {
				AttrValue::Bool(true) => self.set_attribute(element, &name, ""),
				AttrValue::Bool(false) => self.remove_attribute(element, &name),
				AttrValue::Str(value) => self.set_attribute(element, &name, value),
			}
		}
		for name in old.keys().filter(|name| !new.contains_key(*name)) {
			let name = dom_attribute_name(name, svg);
			trace!("Removing attribute {}", name);
			self.remove_attribute(element, &name);
		}
	}

	fn set_attribute(&mut self, element: &D::Node, name: &str, value: &str) {
		match attribute_namespace(name) {
			Some(namespace) => self.dom.set_attribute_ns(element, namespace, name, value),
			None => self.dom.set_attribute(element, name, value),
		}
	}

	fn remove_attribute(&mut self, element: &D::Node, name: &str) {
		match attribute_namespace(name) {
			Some(namespace) => self.dom.remove_attribute_ns(element, namespace, local_name(name)),
			None => self.dom.remove_attribute(element, name),
		}
	}

	fn patch_properties(&mut self, element: &D::Node, new: &BTreeMap<String, Value>, old: &BTreeMap<String, Value>) {
		for (name, value) in new {
			if old.get(name) != Some(value) {
				trace!("Setting property {}", name);
				self.dom.set_property(element, name, value);
			}
		}
		for name in old.keys().filter(|name| !new.contains_key(*name)) {
			trace!("Resetting property {}", name);
			self.dom.set_property(element, name, &Value::Undefined);
		}
	}

	fn patch_listeners(&mut self, element: &D::Node, new: &BTreeMap<String, Listener<D>>, old: &BTreeMap<String, Listener<D>>) {
		for (event, listener) in new {
			match old.get(event) {
				Some(previous) if same_rc(previous, listener) => (),
				Some(previous) => {
					trace!("Replacing {} listener", event);
					self.dom.remove_event_listener(element, event, previous);
					self.dom.add_event_listener(element, event, listener);
				}
				None => {
					trace!("Adding {} listener", event);
					self.dom.add_event_listener(element, event, listener);
				}
			}
		}
		for (event, listener) in old {
			if !new.contains_key(event) {
				trace!("Removing {} listener", event);
				self.dom.remove_event_listener(element, event, listener);
			}
		}
	}

	/// Removes the live node of `node` from `parent`, unmounts `node` and then lets the host release
	/// the live node, unless it was spliced in from outside.
	fn discard(&mut self, parent: &D::Node, node: &Node<D>) {
		let live = self.live(node);
		let owned = self.owns_live_node(node);
		self.dom.remove_child(parent, &live);
		self.unmount(node);
		if owned {
			trace!("Releasing {:?}", live);
			self.dom.release(&live);
		}
	}

	/// Whether the live node of mounted `node` was created for it (as opposed to wrapped with [`Node::live`]).
	fn owns_live_node(&self, node: &Node<D>) -> bool {
		match node.kind() {
			NodeKind::Live(_) => false,
			NodeKind::Function { .. } => match self.bindings.get(&node.id()).and_then(|binding| binding.rendered.as_ref()) {
				Some(rendered) => self.owns_live_node(rendered),
				None => unbound(node),
			},
			NodeKind::Text(_) | NodeKind::Element(_) | NodeKind::Component { .. } => true,
		}
	}

	/// The live node of a mounted node.
	fn live(&self, node: &Node<D>) -> D::Node {
		match self.bindings.get(&node.id()) {
			Some(binding) => binding.live.clone(),
			None => unbound(node),
		}
	}

	fn bind(&mut self, node: &Node<D>, binding: Binding<D>) -> D::Node {
		let live = binding.live.clone();
		if self.bindings.insert(node.id(), binding).is_some() {
			error!("Node {:?} was bound twice. Each node instance may only be mounted in one place at a time.", node.id());
			panic!("petit-dom: node {:?} mounted twice", node.id());
		}
		live
	}

	fn unbind(&mut self, node: &Node<D>) -> Binding<D> {
		match self.bindings.remove(&node.id()) {
			Some(binding) => binding,
			None => unbound(node),
		}
	}
}

#[cold]
fn unbound<D: Dom>(node: &Node<D>) -> ! {
	error!("Node {:?} is not mounted.", node.id());
	panic!("petit-dom: tried to patch or unmount node {:?}, which is not mounted", node.id())
}
