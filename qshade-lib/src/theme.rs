//! The built-in dark launcher theme and the widget vocabulary it styles.
//!
//! The theme file is a plain QSS sheet embedded at compile time. The object
//! names below are the contract with the host application: a selector like
//! `#projectCard` only ever resolves against a widget the host registered
//! under that name. `sample_launcher_tree` builds the launcher hierarchy
//! (header, card grid, dialogs, scrollbar) so the CLI and the tests have a
//! realistic tree to resolve against.

use crate::widget::widget_tree::{attach, WidgetNode, WidgetTree};

/// The dark project-launcher theme.
pub const DARK_LAUNCHER_QSS: &str = include_str!("../themes/dark_launcher.qss");

/// Object names the launcher application assigns to its widgets.
pub mod object_names {
    pub const HEADER_WIDGET: &str = "headerWidget";
    pub const APP_TITLE: &str = "appTitle";
    pub const SECTION_TITLE: &str = "sectionTitle";
    pub const PROJECTS_SCROLL_AREA: &str = "projectsScrollArea";
    pub const PROJECTS_CONTAINER: &str = "projectsContainer";
    pub const PROJECT_CARD: &str = "projectCard";
    pub const PROJECT_NAME: &str = "projectName";
    pub const PROJECT_INFO: &str = "projectInfo";
    pub const NEW_PROJECT_BUTTON: &str = "newProjectButton";
    pub const OPEN_BUTTON: &str = "openButton";
    pub const DELETE_BUTTON: &str = "deleteButton";
    pub const NO_PROJECTS_LABEL: &str = "noProjectsLabel";
}

/// Build the launcher widget hierarchy: main window with header and title,
/// a scroll area holding the project-card grid and its vertical scrollbar
/// (with handle/line/page sub-controls), the no-projects placeholder, and
/// the message box and input dialog the launcher pops up.
pub fn sample_launcher_tree() -> WidgetTree {
    use object_names::*;

    let tree = WidgetTree::new();
    let window = attach(&tree.root, WidgetNode::new("QMainWindow"));
    let central = attach(&window, WidgetNode::new("QWidget"));

    let header = attach(&central, WidgetNode::named("QWidget", HEADER_WIDGET));
    attach(&header, WidgetNode::named("QLabel", APP_TITLE));
    attach(&header, WidgetNode::named("QPushButton", NEW_PROJECT_BUTTON));

    attach(&central, WidgetNode::named("QLabel", SECTION_TITLE));

    let scroll_area = attach(
        &central,
        WidgetNode::named("QScrollArea", PROJECTS_SCROLL_AREA),
    );
    let container = attach(
        &scroll_area,
        WidgetNode::named("QWidget", PROJECTS_CONTAINER),
    );

    let card = attach(&container, WidgetNode::named("QFrame", PROJECT_CARD));
    attach(&card, WidgetNode::named("QLabel", PROJECT_NAME));
    attach(&card, WidgetNode::named("QLabel", PROJECT_INFO));
    attach(&card, WidgetNode::named("QPushButton", OPEN_BUTTON));
    attach(&card, WidgetNode::named("QPushButton", DELETE_BUTTON));

    attach(&container, WidgetNode::named("QLabel", NO_PROJECTS_LABEL));

    let scrollbar = attach(
        &scroll_area,
        WidgetNode::new("QScrollBar").with_state("vertical"),
    );
    for sub_control in ["handle", "add-line", "sub-line", "add-page", "sub-page"] {
        attach(
            &scrollbar,
            WidgetNode::sub_control_of("QScrollBar", sub_control).with_state("vertical"),
        );
    }

    let message_box = attach(&window, WidgetNode::new("QMessageBox"));
    attach(&message_box, WidgetNode::new("QLabel"));
    attach(&message_box, WidgetNode::new("QPushButton"));

    let input_dialog = attach(&window, WidgetNode::new("QInputDialog"));
    attach(&input_dialog, WidgetNode::new("QLineEdit"));
    attach(&input_dialog, WidgetNode::new("QPushButton"));

    attach(&window, WidgetNode::new("QToolTip"));

    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::widget_indices::WidgetIndices;

    #[test]
    fn sample_tree_registers_every_themed_object_name() {
        let tree = sample_launcher_tree();
        let indices = WidgetIndices::build(&tree);
        for name in [
            object_names::HEADER_WIDGET,
            object_names::APP_TITLE,
            object_names::SECTION_TITLE,
            object_names::PROJECTS_SCROLL_AREA,
            object_names::PROJECTS_CONTAINER,
            object_names::PROJECT_CARD,
            object_names::PROJECT_NAME,
            object_names::PROJECT_INFO,
            object_names::NEW_PROJECT_BUTTON,
            object_names::OPEN_BUTTON,
            object_names::DELETE_BUTTON,
            object_names::NO_PROJECTS_LABEL,
        ] {
            assert!(indices.find_by_name(name).is_some(), "missing {}", name);
        }
        assert_eq!(indices.sub_control_map.len(), 5);
    }
}
