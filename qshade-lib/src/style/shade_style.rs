use crate::style::qss_matcher::{
    compute_resolved_style, matches_complex_selector, StyleRule,
};
use crate::widget::widget_tree::{Node, WidgetTree};
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Represents the final set of properties a widget gets from the cascade.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedStyle {
    pub properties: HashMap<String, String>,
}

impl ResolvedStyle {
    pub fn new() -> Self {
        ResolvedStyle {
            properties: HashMap::new(),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties.get(property).map(String::as_str)
    }
}

/// Apply compiled rules to every widget in the tree, storing each widget's
/// resolved property map on its node.
pub fn apply_rules_to_tree(tree: &WidgetTree, rules: &[StyleRule]) {
    apply_rules_recursive(&tree.root, rules);
}

fn apply_rules_recursive(node_handle: &Rc<RefCell<Node>>, rules: &[StyleRule]) {
    let (is_widget, children) = match &*node_handle.borrow() {
        Node::Root(root) => (false, root.children.clone()),
        Node::Widget(widget) => (true, widget.children.clone()),
    };
    if is_widget {
        restyle_widget(node_handle, rules);
    }
    for child in &children {
        apply_rules_recursive(child, rules);
    }
}

/// Re-resolve a single widget against the rule set. This is the unit of work
/// for state and attribute changes: only the affected widget is re-styled.
pub fn restyle_widget(widget_handle: &Rc<RefCell<Node>>, rules: &[StyleRule]) {
    let resolved = compute_widget_style(widget_handle, rules);
    if let Node::Widget(widget) = &mut *widget_handle.borrow_mut() {
        trace!(
            "restyled {}{} with {} properties",
            widget.class,
            widget
                .object_name
                .as_ref()
                .map(|n| format!("#{}", n))
                .unwrap_or_default(),
            resolved.len()
        );
        widget.resolved = resolved;
    }
}

/// Build the resolved style for one widget by matching every rule against it
/// and merging the survivors through the cascade. Unmatched selectors are
/// simply inert.
pub fn compute_widget_style(
    widget_handle: &Rc<RefCell<Node>>,
    rules: &[StyleRule],
) -> HashMap<String, String> {
    let matched: Vec<StyleRule> = rules
        .iter()
        .filter(|rule| matches_complex_selector(widget_handle, &rule.selector))
        .cloned()
        .collect();
    compute_resolved_style(matched)
}

/// Toggle a pseudo-state (hover, pressed, focus, disabled, ...) on a widget
/// and re-resolve just that widget.
pub fn set_widget_state(
    widget_handle: &Rc<RefCell<Node>>,
    state: &str,
    on: bool,
    rules: &[StyleRule],
) {
    if let Node::Widget(widget) = &mut *widget_handle.borrow_mut() {
        widget.set_state(state, on);
    }
    restyle_widget(widget_handle, rules);
}

/// Set or clear a dynamic property (e.g. the `error`/`success` validation
/// flags) and re-resolve just that widget.
pub fn set_widget_property(
    widget_handle: &Rc<RefCell<Node>>,
    name: &str,
    value: Option<&str>,
    rules: &[StyleRule],
) {
    if let Node::Widget(widget) = &mut *widget_handle.borrow_mut() {
        widget.set_property(name, value);
    }
    restyle_widget(widget_handle, rules);
}

/// Snapshot a widget's stored resolved style.
pub fn resolved_style_of(widget_handle: &Rc<RefCell<Node>>) -> ResolvedStyle {
    match &*widget_handle.borrow() {
        Node::Widget(widget) => ResolvedStyle {
            properties: widget.resolved.clone(),
        },
        Node::Root(_) => ResolvedStyle::new(),
    }
}
