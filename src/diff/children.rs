//! Keyed child list reconciliation.

use super::DomDiffer;
use crate::{
	dom::Dom,
	edit_script::{index_of, keyed_edit_script, shortest_edit_script, Op},
	node::{Key, Node},
};
use hashbrown::HashMap;
use tracing::{debug, trace, trace_span, warn};

impl<D: Dom> DomDiffer<D> {
	/// Reconciles the children of `parent` from `old` to `new`.
	///
	/// Afterwards, the children of `parent` correspond to `new` in order. Nodes whose key
	/// survives keep their live node, even if they moved.
	pub(super) fn diff_children(&mut self, parent: &D::Node, new: &[Node<D>], old: &[Node<D>]) {
		let span = trace_span!("Diffing children", old.len = old.len(), new.len = new.len());
		let _enter = span.enter();

		let (mut new_start, mut new_end) = (0, new.len());
		let (mut old_start, mut old_end) = (0, old.len());

		while new_start < new_end && old_start < old_end && new[new_start].can_patch(&old[old_start]) {
			self.patch(&new[new_start], &old[old_start], Some(parent));
			new_start += 1;
			old_start += 1;
		}
		while new_start < new_end && old_start < old_end && new[new_end - 1].can_patch(&old[old_end - 1]) {
			self.patch(&new[new_end - 1], &old[old_end - 1], Some(parent));
			new_end -= 1;
			old_end -= 1;
		}
		trace!("Common prefix {}, common suffix {}.", new_start, new.len() - new_end);

		// Everything from here on goes before the (already patched) suffix.
		let suffix = new.get(new_end).map(|node| self.live(node));
		let new = &new[new_start..new_end];
		let old = &old[old_start..old_end];

		if old.is_empty() {
			return self.insert_children(parent, new, suffix.as_ref());
		}
		if new.is_empty() {
			return self.remove_children(parent, old);
		}

		if old.len() < new.len() {
			if let Some(found) = index_of(new, old, Node::can_patch) {
				trace!("Old children found as a run at {} of the new ones.", found);
				let first = self.live(&old[0]);
				self.insert_children(parent, &new[..found], Some(&first));
				for (new, old) in new[found..found + old.len()].iter().zip(old) {
					self.patch(new, old, Some(parent));
				}
				return self.insert_children(parent, &new[found + old.len()..], suffix.as_ref());
			}
		} else if old.len() > new.len() {
			if let Some(found) = index_of(old, new, Node::can_patch) {
				trace!("New children found as a run at {} of the old ones.", found);
				self.remove_children(parent, &old[..found]);
				for (new, old) in new.iter().zip(&old[found..found + new.len()]) {
					self.patch(new, old, Some(parent));
				}
				return self.remove_children(parent, &old[found + new.len()..]);
			}
		}

		if let [single] = old {
			trace!("Replacing a single old child.");
			let live = self.live(single);
			self.insert_children(parent, new, Some(&live));
			return self.discard(parent, single);
		}
		if let [single] = new {
			trace!("Replacing with a single new child.");
			let live = self.mount(single);
			let first = self.live(&old[0]);
			self.dom.insert_before(parent, &live, Some(&first));
			return self.remove_children(parent, old);
		}

		let max_cost = self.options.max_edit_cost;
		let script = match shortest_edit_script(old.len(), new.len(), max_cost, |o, n| old[o].can_patch(&new[n])) {
			Some(script) => script,
			None => {
				debug!("Edit distance exceeds {}. Falling back to key matching.", max_cost);
				let old_keys: Vec<Option<&Key>> = old.iter().map(Node::key).collect();
				let new_keys: Vec<Option<&Key>> = new.iter().map(Node::key).collect();
				keyed_edit_script(&old_keys, &new_keys)
			}
		};
		self.apply_edit_script(parent, &script, new, old, suffix.as_ref());
	}

	/// Applies `script` to the children of `parent`.
	///
	/// An insertion whose key matches a deleted old child moves and patches that child's live node instead.
	fn apply_edit_script(&mut self, parent: &D::Node, script: &[Op], new: &[Node<D>], old: &[Node<D>], suffix: Option<&D::Node>) {
		let span = trace_span!("Applying edit script", ops = script.len());
		let _enter = span.enter();

		let mut deleted = HashMap::new();
		let mut old_index = 0;
		for op in script {
			match op {
				Op::Patch => old_index += 1,
				Op::Delete => {
					if let Some(key) = old[old_index].key() {
						if deleted.insert(key, old_index).is_some() {
							warn!("Duplicate key {:?} among removed children. Only the last one can be moved.", key);
						}
					}
					old_index += 1;
				}
				Op::Insert => (),
			}
		}

		// Old live nodes stay valid until processed, since only processed ones get replaced.
		let old_live: Vec<D::Node> = old.iter().map(|node| self.live(node)).collect();
		let mut moved = vec![false; old.len()];

		let (mut new_index, mut old_index) = (0, 0);
		for op in script {
			match op {
				Op::Patch => {
					self.patch(&new[new_index], &old[old_index], Some(parent));
					new_index += 1;
					old_index += 1;
				}
				Op::Insert => {
					let node = &new[new_index];
					new_index += 1;
					let live = match node.key().and_then(|key| deleted.remove(key)) {
						Some(from) => {
							trace!("Moving {:?} from old index {}.", node.key(), from);
							moved[from] = true;
							self.patch(node, &old[from], Some(parent))
						}
						None => self.mount(node),
					};
					let before = (old_index..old.len()).find(|&i| !moved[i]).map(|i| &old_live[i]).or(suffix);
					self.dom.insert_before(parent, &live, before);
				}
				Op::Delete => old_index += 1,
			}
		}

		let mut old_index = 0;
		for op in script {
			match op {
				Op::Patch => old_index += 1,
				Op::Delete => {
					if !moved[old_index] {
						self.discard(parent, &old[old_index]);
					}
					old_index += 1;
				}
				Op::Insert => (),
			}
		}
	}

	fn insert_children(&mut self, parent: &D::Node, new: &[Node<D>], before: Option<&D::Node>) {
		for node in new {
			let live = self.mount(node);
			self.dom.insert_before(parent, &live, before);
		}
	}

	fn remove_children(&mut self, parent: &D::Node, old: &[Node<D>]) {
		for node in old {
			self.discard(parent, node);
		}
	}
}
