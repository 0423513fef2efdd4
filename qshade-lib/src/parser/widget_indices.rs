use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::widget::widget_tree::{Node, WidgetTree};

/// Global indexes for fast widget lookup.
#[derive(Debug, Default)]
pub struct WidgetIndices {
    /// Maps a widget's object name to the corresponding node.
    pub name_map: HashMap<String, Rc<RefCell<Node>>>,
    /// Maps a concrete class name (e.g. "QPushButton") to all nodes of that
    /// class, sub-controls excluded.
    pub class_map: HashMap<String, Vec<Rc<RefCell<Node>>>>,
    /// Maps a sub-control tag (e.g. "handle") to its nodes.
    pub sub_control_map: HashMap<String, Vec<Rc<RefCell<Node>>>>,
}

impl WidgetIndices {
    /// Build the indices for the entire tree.
    pub fn build(tree: &WidgetTree) -> Self {
        let mut indices = WidgetIndices::default();
        Self::traverse(&tree.root, &mut indices);
        indices
    }

    /// Look up a widget by object name.
    pub fn find_by_name(&self, object_name: &str) -> Option<Rc<RefCell<Node>>> {
        self.name_map.get(object_name).cloned()
    }

    /// Recursively traverse the tree and populate the indices.
    fn traverse(node: &Rc<RefCell<Node>>, indices: &mut WidgetIndices) {
        let children = match &*node.borrow() {
            Node::Root(root) => root.children.clone(),
            Node::Widget(widget) => {
                match &widget.sub_control {
                    Some(sub_control) => {
                        indices
                            .sub_control_map
                            .entry(sub_control.clone())
                            .or_default()
                            .push(Rc::clone(node));
                    }
                    None => {
                        indices
                            .class_map
                            .entry(widget.class.clone())
                            .or_default()
                            .push(Rc::clone(node));
                        if let Some(name) = &widget.object_name {
                            indices.name_map.insert(name.clone(), Rc::clone(node));
                        }
                    }
                }
                widget.children.clone()
            }
        };
        for child in &children {
            Self::traverse(child, indices);
        }
    }
}
