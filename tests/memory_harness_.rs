#![allow(dead_code)]

use indextree::NodeId;
use petit_dom::{
	create_node,
	memory::{MemoryDom, Mutation},
	DomDiffer, Node, Props,
};

pub type N = Node<MemoryDom>;

pub fn init_tracing() {
	tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).with_test_writer().try_init().ok();
}

/// A differ with an empty `<ul>` root.
pub fn differ() -> (DomDiffer<MemoryDom>, NodeId) {
	init_tracing();
	let mut differ = DomDiffer::new(MemoryDom::new());
	let root = differ.dom_mut().create_root("ul");
	(differ, root)
}

/// `<li>` keyed by `key`, showing it as text.
pub fn item(key: i64) -> N {
	create_node("li", Props::new().with("key", key as f64), key.to_string())
}

pub fn items(keys: &[i64]) -> Vec<N> {
	keys.iter().copied().map(item).collect()
}

pub fn creations(mutations: &[Mutation]) -> usize {
	mutations.iter().filter(|mutation| mutation.is_creation()).count()
}

pub fn removals(mutations: &[Mutation]) -> usize {
	mutations.iter().filter(|mutation| matches!(mutation, Mutation::Remove { .. })).count()
}

pub fn insertions(mutations: &[Mutation]) -> usize {
	mutations.iter().filter(|mutation| matches!(mutation, Mutation::Insert { .. })).count()
}

/// The live nodes of `nodes`, which must all be mounted.
pub fn live(differ: &DomDiffer<MemoryDom>, nodes: &[N]) -> Vec<NodeId> {
	nodes.iter().map(|node| *differ.live_node(node).expect("not mounted")).collect()
}
