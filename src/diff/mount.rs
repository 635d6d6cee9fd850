use super::{unbound, Binding, DomDiffer};
use crate::{
	dom::{Dom, SVG_NAMESPACE},
	node::{Content, Node, NodeKind},
};
use std::collections::BTreeMap;
use tracing::{instrument, trace, trace_span};

impl<D: Dom> DomDiffer<D> {
	/// Creates the live node(s) for `node` and returns its root. The caller inserts it.
	#[instrument(skip_all, fields(node = ?node.id()))]
	pub fn mount(&mut self, node: &Node<D>) -> D::Node {
		let (live, rendered) = match node.kind() {
			NodeKind::Text(text) => {
				let span = trace_span!("Mounting text");
				let _enter = span.enter();
				if cfg!(feature = "dangerous-logging") {
					trace!("Text: {:?}", text);
				}
				(self.dom.create_text_node(text), None)
			}

			NodeKind::Element(element) => {
				let span = trace_span!("Mounting element", tag = %element.tag, svg = element.svg);
				let _enter = span.enter();
				let live = if element.svg {
					self.dom.create_element_ns(SVG_NAMESPACE, &element.tag)
				} else {
					self.dom.create_element(&element.tag)
				};
				self.patch_attributes(&live, element.svg, &element.attributes, &BTreeMap::new());
				self.patch_properties(&live, &element.properties, &BTreeMap::new());
				self.patch_listeners(&live, &element.listeners, &BTreeMap::new());
				match &element.content {
					Content::Single(child) => {
						let child = self.mount(child);
						self.dom.append_child(&live, &child);
					}
					Content::List(children) => {
						for child in children {
							let child = self.mount(child);
							self.dom.append_child(&live, &child);
						}
					}
				}
				(live, None)
			}

			NodeKind::Component { component, props, content } => {
				let span = trace_span!("Mounting component");
				let _enter = span.enter();
				(component.mount(self, props, content), None)
			}

			NodeKind::Function { function, props, content } => {
				let span = trace_span!("Mounting function component");
				let _enter = span.enter();
				let rendered = function.render(props, content);
				(self.mount(&rendered), Some(rendered))
			}

			NodeKind::Live(live) => {
				let span = trace_span!("Mounting live node", ?live);
				let _enter = span.enter();
				self.dom.subtree_connected(live);
				(live.clone(), None)
			}
		};
		self.bind(node, Binding { live, rendered })
	}

	/// Tears down `node` and everything below it, children first.
	///
	/// This releases bindings, removes the listeners the differ added and runs component teardown,
	/// but doesn't detach the live node.
	#[instrument(skip_all, fields(node = ?node.id()))]
	pub fn unmount(&mut self, node: &Node<D>) {
		let binding = self.unbind(node);
		match node.kind() {
			NodeKind::Text(_) => trace!("Unmounting text"),
			NodeKind::Element(element) => {
				let span = trace_span!("Unmounting element", tag = %element.tag, children = element.content.as_slice().len());
				let _enter = span.enter();
				for child in element.content.as_slice() {
					self.unmount(child);
				}
				// External roots keep whatever listeners they were mounted with.
				if !element.external_root {
					for (event, listener) in &element.listeners {
						trace!("Removing {} listener", event);
						self.dom.remove_event_listener(&binding.live, event, listener);
					}
				}
			}
			NodeKind::Component { component, .. } => {
				let span = trace_span!("Unmounting component");
				let _enter = span.enter();
				component.unmount(self, &binding.live);
			}
			NodeKind::Function { .. } => {
				let span = trace_span!("Unmounting function component");
				let _enter = span.enter();
				match &binding.rendered {
					Some(rendered) => self.unmount(rendered),
					None => unbound(node),
				}
			}
			NodeKind::Live(live) => {
				let span = trace_span!("Unmounting live node", ?live);
				let _enter = span.enter();
				self.dom.subtree_disconnected(live);
			}
		}
	}
}
