use core::cell::Cell;
use petit_dom::{
	create_node,
	memory::{MemoryDom, MemoryEvent, Mutation},
	Dom, Listener, Node, Props, Value,
};
use std::rc::Rc;

mod memory_harness_;
use memory_harness_::{differ, N};

fn counting_listener(count: &Rc<Cell<usize>>) -> Listener<MemoryDom> {
	let count = Rc::clone(count);
	Rc::new(move |_: &MemoryEvent| count.set(count.get() + 1))
}

#[test]
fn identical_tree_is_free() {
	let (mut differ, root) = differ();
	let item: N = create_node("li", Props::new().with("class", "a"), "text");
	let tree: Vec<N> = vec![create_node("p", Props::new(), vec![item, Node::text("b")])];
	differ.update_child_nodes(&root, &[], &tree);
	differ.dom_mut().take_mutations();

	differ.update_child_nodes(&root, &tree, &tree);
	let live = differ.patch(&tree[0], &tree[0], Some(&root));
	assert!(differ.dom().mutations().is_empty());
	assert_eq!(differ.live_node(&tree[0]), Some(&live));
	assert_eq!(differ.bound_count(), 4);
}

#[test]
fn text_changes_only_touch_text() {
	let (mut differ, root) = differ();
	let old: Vec<N> = vec![create_node("p", Props::new().with("class", "x"), "a")];
	let new: Vec<N> = vec![create_node("p", Props::new().with("class", "x"), "b")];
	differ.update_child_nodes(&root, &[], &old);
	let text = differ.dom().children(differ.dom().children(root)[0])[0];
	differ.dom_mut().take_mutations();

	differ.update_child_nodes(&root, &old, &new);
	assert_eq!(differ.dom().mutations(), &[Mutation::SetText(text)]);
	assert_eq!(differ.dom().inner_html(root), "<p class=\"x\">b</p>");

	let same: Vec<N> = vec![create_node("p", Props::new().with("class", "x"), "b")];
	differ.dom_mut().take_mutations();
	differ.update_child_nodes(&root, &new, &same);
	assert!(differ.dom().mutations().is_empty());
}

#[test]
fn boolean_attributes() {
	let (mut differ, root) = differ();
	let input = |disabled: bool| -> Vec<N> { vec![create_node("input", Props::new().with("disabled", disabled), ())] };

	let on = input(true);
	differ.update_child_nodes(&root, &[], &on);
	let live = differ.dom().children(root)[0];
	assert_eq!(differ.dom().attribute(live, "disabled"), Some(""));

	let off = input(false);
	differ.update_child_nodes(&root, &on, &off);
	assert_eq!(differ.dom().attribute(live, "disabled"), None);

	let on_again = input(true);
	differ.update_child_nodes(&root, &off, &on_again);
	assert_eq!(differ.dom().attribute(live, "disabled"), Some(""));
	assert_eq!(differ.dom().children(root), vec![live]);
}

#[test]
fn attributes_and_properties_are_diffed() {
	let (mut differ, root) = differ();
	let old: Vec<N> = vec![create_node("a", Props::new().with("href", "#a").with("title", "t").with("tabIndex", 1), ())];
	let new: Vec<N> = vec![create_node("a", Props::new().with("href", "#b").with("dataIndex", "2"), ())];
	differ.update_child_nodes(&root, &[], &old);
	let live = differ.dom().children(root)[0];

	differ.update_child_nodes(&root, &old, &new);
	let dom = differ.dom();
	assert_eq!(dom.to_html(live), "<a data-index=\"2\" href=\"#b\"></a>");
	assert_eq!(dom.property(live, "tabIndex"), Some(&Value::Undefined));
}

#[test]
fn listeners_are_swapped_by_identity() {
	let (mut differ, root) = differ();
	let (first_count, second_count) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
	let (first, second) = (counting_listener(&first_count), counting_listener(&second_count));
	let button = |listener: &Listener<MemoryDom>| -> Vec<N> { vec![create_node("button", Props::new().listener("onClick", Rc::clone(listener)), ())] };

	let v1 = button(&first);
	differ.update_child_nodes(&root, &[], &v1);
	let live = differ.dom().children(root)[0];

	let v2 = button(&first);
	differ.dom_mut().take_mutations();
	differ.update_child_nodes(&root, &v1, &v2);
	assert!(differ.dom().mutations().is_empty());

	let v3 = button(&second);
	differ.update_child_nodes(&root, &v2, &v3);
	assert_eq!(differ.dom().listener_count(live, "click"), 1);
	differ.dom().dispatch(live, "click");
	assert_eq!((first_count.get(), second_count.get()), (0, 1));

	let v4: Vec<N> = vec![create_node("button", Props::new(), ())];
	differ.update_child_nodes(&root, &v3, &v4);
	assert_eq!(differ.dom().listener_count(live, "click"), 0);
}

#[test]
fn mismatching_nodes_are_replaced() {
	let (mut differ, root) = differ();
	let old: Vec<N> = vec![create_node("p", Props::new(), "a"), Node::text("b")];
	let new: Vec<N> = vec![create_node("div", Props::new(), "a"), create_node("span", Props::new(), "b")];
	differ.update_child_nodes(&root, &[], &old);
	let old_live = differ.dom().children(root);

	differ.update_child_nodes(&root, &old, &new);
	assert_eq!(differ.dom().inner_html(root), "<div>a</div><span>b</span>");
	let replaced = differ.dom().mutations().iter().filter(|mutation| matches!(mutation, Mutation::Replace { .. })).count();
	assert_eq!(replaced, 2);
	assert!(differ.dom().children(root).iter().all(|live| !old_live.contains(live)));
	assert_eq!(differ.bound_count(), 4);
}

#[test]
fn replacement_without_parent_is_left_to_the_caller() {
	let (mut differ, root) = differ();
	let old: N = create_node("p", Props::new(), ());
	let new: N = Node::text("t");
	let old_live = differ.mount(&old);
	differ.dom_mut().append_child(&root, &old_live);

	let new_live = differ.patch(&new, &old, None);
	assert_eq!(differ.dom().text(new_live), Some("t"));
	assert_eq!(differ.dom().children(root), vec![old_live]);
	assert_eq!(differ.live_node(&old), None);
}

#[test]
fn switching_between_single_and_list_content() {
	let (mut differ, root) = differ();
	let single: Vec<N> = vec![create_node("p", Props::new(), "one")];
	let list: Vec<N> = vec![create_node("p", Props::new(), vec![Node::text("one"), Node::text("two")])];
	differ.update_child_nodes(&root, &[], &single);
	differ.update_child_nodes(&root, &single, &list);
	assert_eq!(differ.dom().inner_html(root), "<p>onetwo</p>");
	differ.update_child_nodes(&root, &list, &single);
	assert_eq!(differ.dom().inner_html(root), "<p>one</p>");
	assert_eq!(differ.bound_count(), 2);
}

#[test]
fn external_roots_keep_their_own_attributes() {
	let (mut differ, root) = differ();
	let old: Vec<N> = vec![create_node("x-host", Props::new().with("class", "mine"), "a")];
	differ.update_child_nodes(&root, &[], &old);
	let live = differ.dom().children(root)[0];
	differ.dom_mut().set_attribute(&live, "slot", "external");

	let new: Vec<N> = vec![create_node("x-host", Props::new().with("class", "theirs"), "b").external_root()];
	differ.update_child_nodes(&root, &old, &new);
	assert_eq!(differ.dom().to_html(live), "<x-host class=\"mine\" slot=\"external\">b</x-host>");
}

#[test]
fn live_nodes_are_swapped() {
	let (mut differ, root) = differ();
	let first = differ.dom_mut().create_element("canvas");
	let second = differ.dom_mut().create_element("video");
	let old: Vec<N> = vec![Node::live(first)];
	let new: Vec<N> = vec![Node::live(second)];
	differ.update_child_nodes(&root, &[], &old);
	differ.dom_mut().take_mutations();

	differ.update_child_nodes(&root, &old, &new);
	assert_eq!(
		differ.dom().mutations(),
		&[
			Mutation::Connected(second),
			Mutation::Replace {
				parent: root,
				new_child: second,
				old_child: first,
			},
			Mutation::Disconnected(first),
		]
	);
	assert_eq!(differ.dom().children(root), vec![second]);
}

#[test]
fn nested_svg_attributes_are_patched_by_their_own_names() {
	let (mut differ, root) = differ();
	let picture = |units: &str, view_box: &str, opacity: Option<&str>| -> Vec<N> {
		let mut gradient = Props::new().with("gradientUnits", units);
		if let Some(opacity) = opacity {
			gradient = gradient.with("fillOpacity", opacity);
		}
		let defs: N = create_node(
			"defs",
			Props::new(),
			vec![create_node("linearGradient", gradient, ()), create_node("symbol", Props::new().with("viewBox", view_box), ())],
		);
		vec![create_node("svg", Props::new(), defs)]
	};

	let old = picture("userSpaceOnUse", "0 0 1 1", Some("0.5"));
	differ.update_child_nodes(&root, &[], &old);
	let defs = differ.dom().children(differ.dom().children(root)[0])[0];
	let (gradient, symbol) = (differ.dom().children(defs)[0], differ.dom().children(defs)[1]);
	differ.dom_mut().take_mutations();

	let new = picture("objectBoundingBox", "0 0 2 2", None);
	differ.update_child_nodes(&root, &old, &new);
	assert_eq!(
		differ.dom().mutations(),
		&[
			Mutation::SetAttribute {
				node: gradient,
				name: "gradientUnits".into(),
			},
			Mutation::RemoveAttribute {
				node: gradient,
				name: "fillOpacity".into(),
			},
			Mutation::SetAttribute {
				node: symbol,
				name: "viewBox".into(),
			},
		]
	);
	assert_eq!(differ.dom().to_html(gradient), "<linearGradient gradientUnits=\"objectBoundingBox\"></linearGradient>");
	assert_eq!(differ.dom().attribute(symbol, "viewBox"), Some("0 0 2 2"));
}

#[test]
fn removed_nodes_are_released() {
	let (mut differ, root) = differ();
	let old: Vec<N> = vec![create_node("p", Props::new(), vec![Node::text("a"), create_node("b", Props::new(), "c")])];
	differ.update_child_nodes(&root, &[], &old);
	let p = differ.dom().children(root)[0];
	assert_eq!(differ.dom().node_count(), 5);

	let new: Vec<N> = vec![Node::text("d")];
	differ.update_child_nodes(&root, &old, &new);
	assert!(differ.dom().is_released(p));
	assert_eq!(differ.dom().node_count(), 2);

	differ.update_child_nodes(&root, &new, &[]);
	assert_eq!(differ.dom().node_count(), 1);
}

#[test]
fn spliced_nodes_survive_release() {
	let (mut differ, root) = differ();
	let canvas = differ.dom_mut().create_element("canvas");
	let inner = differ.dom_mut().create_text_node("drawn");
	differ.dom_mut().append_child(&canvas, &inner);

	let old: Vec<N> = vec![create_node("figure", Props::new(), vec![Node::text("caption"), Node::live(canvas)])];
	differ.update_child_nodes(&root, &[], &old);
	let figure = differ.dom().children(root)[0];
	differ.update_child_nodes(&root, &old, &[]);

	assert!(differ.dom().is_released(figure));
	assert!(!differ.dom().is_released(canvas));
	assert_eq!(differ.dom().parent(canvas), None);
	assert_eq!(differ.dom().children(canvas), vec![inner]);
}

#[test]
fn unmounting_removes_listeners() {
	let (mut differ, root) = differ();
	let count = Rc::new(Cell::new(0));
	let node: N = create_node("button", Props::new().listener("onClick", counting_listener(&count)), ());
	let live = differ.mount(&node);
	differ.dom_mut().append_child(&root, &live);

	differ.unmount(&node);
	assert_eq!(differ.dom().listener_count(live, "click"), 0);
	assert_eq!(differ.dom().dispatch(live, "click"), 0);
	assert_eq!(count.get(), 0);
}
