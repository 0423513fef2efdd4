use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

pub mod widget_tree {
    use super::*;

    /// Superclass table for the Qt widget classes the launcher theme touches.
    /// Type selectors match a widget's class or any of its superclasses.
    const SUPERCLASSES: &[(&str, &str)] = &[
        ("QMainWindow", "QWidget"),
        ("QFrame", "QWidget"),
        ("QLabel", "QFrame"),
        ("QAbstractButton", "QWidget"),
        ("QPushButton", "QAbstractButton"),
        ("QLineEdit", "QWidget"),
        ("QAbstractScrollArea", "QFrame"),
        ("QScrollArea", "QAbstractScrollArea"),
        ("QAbstractSlider", "QWidget"),
        ("QScrollBar", "QAbstractSlider"),
        ("QDialog", "QWidget"),
        ("QMessageBox", "QDialog"),
        ("QInputDialog", "QDialog"),
        ("QToolTip", "QLabel"),
    ];

    /// Build the class lineage for a widget class, most-derived first.
    /// Classes not in the table are still rooted at QWidget.
    pub fn class_lineage(class: &str) -> Vec<String> {
        let mut lineage = vec![class.to_string()];
        let mut current = class;
        loop {
            match SUPERCLASSES.iter().find(|(c, _)| *c == current) {
                Some(&(_, parent)) => {
                    lineage.push(parent.to_string());
                    current = parent;
                }
                None => break,
            }
        }
        if current != "QWidget" {
            lineage.push("QWidget".to_string());
        }
        lineage
    }

    #[derive(Debug, Clone)]
    pub enum Node {
        Root(RootNode),
        Widget(WidgetNode),
    }

    #[derive(Debug, Clone)]
    pub struct RootNode {
        pub children: Vec<Rc<RefCell<Node>>>,
    }

    /// A widget as the style engine sees it: class identity, object name,
    /// optional sub-control tag, dynamic properties, and active pseudo-states.
    /// `resolved` holds the property map from the last style pass.
    #[derive(Debug, Clone)]
    pub struct WidgetNode {
        pub class: String,
        pub lineage: Vec<String>,
        pub object_name: Option<String>,
        pub sub_control: Option<String>,
        pub properties: HashMap<String, String>,
        pub states: HashSet<String>,
        pub resolved: HashMap<String, String>,
        pub children: Vec<Rc<RefCell<Node>>>,
        pub parent: Option<Weak<RefCell<Node>>>,
    }

    #[derive(Debug)]
    pub struct WidgetTree {
        pub root: Rc<RefCell<Node>>,
    }

    impl RootNode {
        pub fn new() -> Self {
            RootNode {
                children: Vec::new(),
            }
        }
    }

    impl Default for RootNode {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WidgetNode {
        pub fn new(class: &str) -> Self {
            WidgetNode {
                class: class.to_string(),
                lineage: class_lineage(class),
                object_name: None,
                sub_control: None,
                properties: HashMap::new(),
                states: HashSet::new(),
                resolved: HashMap::new(),
                children: Vec::new(),
                parent: None,
            }
        }

        pub fn named(class: &str, object_name: &str) -> Self {
            let mut widget = Self::new(class);
            widget.object_name = Some(object_name.to_string());
            widget
        }

        /// A sub-control element of a widget class, e.g. the scrollbar handle.
        pub fn sub_control_of(class: &str, sub_control: &str) -> Self {
            let mut widget = Self::new(class);
            widget.sub_control = Some(sub_control.to_string());
            widget
        }

        pub fn with_state(mut self, state: &str) -> Self {
            self.states.insert(state.to_string());
            self
        }

        pub fn set_state(&mut self, state: &str, on: bool) {
            if on {
                self.states.insert(state.to_string());
            } else {
                self.states.remove(state);
            }
        }

        pub fn set_property(&mut self, name: &str, value: Option<&str>) {
            match value {
                Some(v) => {
                    self.properties.insert(name.to_string(), v.to_string());
                }
                None => {
                    self.properties.remove(name);
                }
            }
        }
    }

    impl WidgetTree {
        pub fn new() -> Self {
            WidgetTree {
                root: Rc::new(RefCell::new(Node::Root(RootNode::new()))),
            }
        }
    }

    impl Default for WidgetTree {
        fn default() -> Self {
            Self::new()
        }
    }

    /// Attach a widget under a parent node and return its handle.
    /// Sets the child's parent pointer so selector matching can walk upward.
    pub fn attach(parent: &Rc<RefCell<Node>>, mut widget: WidgetNode) -> Rc<RefCell<Node>> {
        widget.parent = Some(Rc::downgrade(parent));
        let handle = Rc::new(RefCell::new(Node::Widget(widget)));
        match &mut *parent.borrow_mut() {
            Node::Root(root) => root.children.push(Rc::clone(&handle)),
            Node::Widget(parent_widget) => parent_widget.children.push(Rc::clone(&handle)),
        }
        handle
    }
}
