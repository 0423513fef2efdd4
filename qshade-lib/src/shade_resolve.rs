use crate::parser::shade_qss::{self, QssParseError};
use crate::style::qss_matcher::{self, StyleRule};
use crate::style::shade_style;
use crate::widget::widget_tree::WidgetTree;

pub mod shade_engine {
    use super::*;

    /// Parse a QSS sheet, compile it, and style every widget in the tree.
    /// Returns the compiled rules so callers can re-resolve widgets after
    /// state or property changes.
    pub fn apply(qss_content: &str, tree: &WidgetTree) -> Result<Vec<StyleRule>, QssParseError> {
        let sheet = shade_qss::parse_stylesheet(qss_content)?;
        let rules = qss_matcher::compile_stylesheet(&sheet);
        shade_style::apply_rules_to_tree(tree, &rules);
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::shade_style::resolved_style_of;
    use crate::widget::widget_tree::{attach, WidgetNode, WidgetTree};

    #[test]
    fn end_to_end_apply_styles_a_small_tree() {
        let qss = r#"
            QWidget { background-color: #1a1a1a; color: #ffffff; }
            #headerWidget { background-color: #232323; border-radius: 10px; }
            #headerWidget QLabel { font-size: 24px; }
        "#;

        let tree = WidgetTree::new();
        let header = attach(&tree.root, WidgetNode::named("QWidget", "headerWidget"));
        let title = attach(&header, WidgetNode::new("QLabel"));

        let rules = shade_engine::apply(qss, &tree).expect("sheet parses");
        assert!(!rules.is_empty());

        let header_style = resolved_style_of(&header);
        assert_eq!(header_style.get("background-color"), Some("#232323"));
        assert_eq!(header_style.get("border-radius"), Some("10px"));

        let title_style = resolved_style_of(&title);
        assert_eq!(title_style.get("font-size"), Some("24px"));
        assert_eq!(title_style.get("color"), Some("#ffffff"));
    }

    #[test]
    fn broken_sheet_reports_an_error() {
        let tree = WidgetTree::new();
        assert!(shade_engine::apply("QWidget { color: red;", &tree).is_err());
    }
}
