use crate::{
	dom::Listener,
	rc_hash_map::{MissingKeyError, RcHashMap},
	web::WebDom,
};
use js_sys::Function;
use std::rc::Rc;
use tracing::trace;
use wasm_bindgen::{closure::Closure, throw_str, JsCast};

/// JS closures for [`Listener`]s, shared by every element the same listener is bound to.
#[derive(Default)]
pub(crate) struct ClosureMap {
	closures: RcHashMap<usize, u32, Closure<dyn Fn(web_sys::Event)>>,
}

fn address(listener: &Listener<WebDom>) -> usize {
	Rc::as_ptr(listener).cast::<u8>() as usize
}

impl ClosureMap {
	/// Retrieves the JS function for `listener`, creating it if necessary, and counts one more use.
	pub fn publish(&mut self, listener: &Listener<WebDom>) -> &Function {
		let captured = Rc::clone(listener);
		let closure = self
			.closures
			.increment_or_insert_with(address(listener), move || {
				trace!("Created Closure.");
				Closure::wrap(Box::new(move |event: web_sys::Event| captured(&event)) as Box<dyn Fn(web_sys::Event)>)
			})
			.unwrap_or_else(|_| throw_str("petit-dom: Too many (more than 4G) active bindings of the same listener"));
		let closure: &Closure<dyn Fn(web_sys::Event)> = closure;
		closure.as_ref().unchecked_ref()
	}

	/// The JS function currently published for `listener`.
	pub fn get(&self, listener: &Listener<WebDom>) -> Option<&Function> {
		self.closures.get(&address(listener)).map(|closure| closure.as_ref().unchecked_ref())
	}

	/// Counts one use less, and drops the JS function after its last use.
	pub fn unpublish(&mut self, listener: &Listener<WebDom>) {
		match self.closures.decrement(&address(listener)) {
			Ok(Some(_closure)) => trace!("Destroyed Closure."),
			Ok(None) => (),
			Err(MissingKeyError) => throw_str("petit-dom: Tried to unpublish a listener that isn't bound"),
		}
	}

	pub fn len(&self) -> usize {
		self.closures.len()
	}
}
