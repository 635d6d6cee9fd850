//! Rendering into a browser document through [`web_sys`].

use crate::{
	closure_map::ClosureMap,
	dom::{Dom, Listener},
	node::Value,
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use tracing::trace;
use wasm_bindgen::{throw_str, JsCast, JsValue, UnwrapThrowExt};

/// A [`Dom`] backed by a [`web_sys::Document`].
///
/// Host failures are thrown into JavaScript.
///
/// [`Value::Object`] properties must hold either a [`JsValue`] or a [`Listener<WebDom>`](`Listener`).
/// The latter is set as a JS function, which stays valid until the property changes or the element is released.
pub struct WebDom {
	document: web_sys::Document,
	listeners: ClosureMap,
	/// Listeners currently set as property values, by element and property name.
	function_properties: Vec<(web_sys::Node, String, Listener<WebDom>)>,
}

impl Debug for WebDom {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("WebDom")
			.field("document", &self.document)
			.field("listeners", &self.listeners.len())
			.field("function_properties", &self.function_properties.len())
			.finish()
	}
}

impl WebDom {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self {
			document,
			listeners: ClosureMap::default(),
			function_properties: Vec::new(),
		}
	}

	/// The document of the current window, if there is one.
	#[must_use]
	pub fn for_window() -> Option<Self> {
		web_sys::window().and_then(|window| window.document()).map(Self::new)
	}

	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}

	/// How many distinct listeners currently have a JS closure.
	pub fn published_listener_count(&self) -> usize {
		self.listeners.len()
	}
}

fn element(node: &web_sys::Node) -> &web_sys::Element {
	node.dyn_ref::<web_sys::Element>().expect_throw("petit-dom: Expected an element")
}

fn to_js(value: &Value) -> JsValue {
	match value {
		Value::Undefined => JsValue::UNDEFINED,
		Value::Null => JsValue::NULL,
		Value::Bool(b) => JsValue::from_bool(*b),
		Value::Number(n) => JsValue::from_f64(*n),
		Value::String(s) => JsValue::from_str(s),
		Value::Object(object) => match object.downcast_ref::<JsValue>() {
			Some(js_value) => js_value.clone(),
			None => throw_str("petit-dom: Object property values must hold a `JsValue` or a `Listener<WebDom>`"),
		},
	}
}

impl Dom for WebDom {
	type Node = web_sys::Node;
	type Event = web_sys::Event;

	fn create_element(&mut self, tag: &str) -> Self::Node {
		self.document.create_element(tag).unwrap_throw().into()
	}

	fn create_element_ns(&mut self, namespace: &str, tag: &str) -> Self::Node {
		self.document.create_element_ns(Some(namespace), tag).unwrap_throw().into()
	}

	fn create_text_node(&mut self, text: &str) -> Self::Node {
		self.document.create_text_node(text).into()
	}

	fn set_text(&mut self, node: &Self::Node, text: &str) {
		node.set_node_value(Some(text));
	}

	fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) {
		parent.append_child(child).unwrap_throw();
	}

	fn insert_before(&mut self, parent: &Self::Node, child: &Self::Node, reference: Option<&Self::Node>) {
		parent.insert_before(child, reference).unwrap_throw();
	}

	fn remove_child(&mut self, parent: &Self::Node, child: &Self::Node) {
		parent.remove_child(child).unwrap_throw();
	}

	fn replace_child(&mut self, parent: &Self::Node, new_child: &Self::Node, old_child: &Self::Node) {
		parent.replace_child(new_child, old_child).unwrap_throw();
	}

	fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) {
		element(node).set_attribute(name, value).unwrap_throw();
	}

	fn set_attribute_ns(&mut self, node: &Self::Node, namespace: &str, qualified_name: &str, value: &str) {
		element(node).set_attribute_ns(Some(namespace), qualified_name, value).unwrap_throw();
	}

	fn remove_attribute(&mut self, node: &Self::Node, name: &str) {
		element(node).remove_attribute(name).unwrap_throw();
	}

	fn remove_attribute_ns(&mut self, node: &Self::Node, namespace: &str, local_name: &str) {
		element(node).remove_attribute_ns(Some(namespace), local_name).unwrap_throw();
	}

	fn set_property(&mut self, node: &Self::Node, name: &str, value: &Value) {
		let listener = match value {
			Value::Object(object) => object.downcast_ref::<Listener<Self>>().map(Rc::clone),
			_ => None,
		};
		let js_value: JsValue = match &listener {
			Some(listener) => self.listeners.publish(listener).clone().into(),
			None => to_js(value),
		};
		js_sys::Reflect::set(node, &JsValue::from_str(name), &js_value).unwrap_throw();

		// Published before the previous one is dropped, so the same listener keeps its closure.
		if let Some(index) = self.function_properties.iter().position(|(element, property, _)| element == node && property == name) {
			let (_, _, previous) = self.function_properties.swap_remove(index);
			self.listeners.unpublish(&previous);
		}
		if let Some(listener) = listener {
			self.function_properties.push((node.clone(), name.to_owned(), listener));
		}
	}

	fn add_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>) {
		let function = self.listeners.publish(listener);
		node.add_event_listener_with_callback(event, function).unwrap_throw();
		trace!("{} distinct listener(s) published.", self.listeners.len());
	}

	fn remove_event_listener(&mut self, node: &Self::Node, event: &str, listener: &Listener<Self>) {
		let function = self.listeners.get(listener).expect_throw("petit-dom: Removed listener was never added");
		node.remove_event_listener_with_callback(event, function).unwrap_throw();
		self.listeners.unpublish(listener);
	}

	fn release(&mut self, node: &Self::Node) {
		let listeners = &mut self.listeners;
		self.function_properties.retain(|(element, _, listener)| {
			if node.contains(Some(element)) {
				listeners.unpublish(listener);
				false
			} else {
				true
			}
		});
	}
}
