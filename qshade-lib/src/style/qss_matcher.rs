use crate::style::owned_qss::{OwnedDeclaration, OwnedStylesheet};
use crate::widget::widget_tree::{Node, WidgetNode};
use log::debug;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// ------------------------------
/// 1. Selector Parsing
/// ------------------------------

/// Attribute selector operators supported by QSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr="value"]
    Exact,
    /// [attr~="value"] (space-separated word match)
    Includes,
}

/// Represents one attribute condition, e.g. `[error="true"]`.
/// A missing operator means a bare existence check (`[error]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<String>,
}

/// A compound selector: optional widget class (`QPushButton`), optional
/// object name (`#deleteButton`), optional sub-control (`::handle`),
/// pseudo-states (`:hover`), and attribute conditions (`[error="true"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub class: Option<String>,
    pub id: Option<String>,
    pub sub_control: Option<String>,
    pub states: Vec<String>,
    pub attributes: Vec<AttributeSelector>,
}

/// A complex selector composed of a key compound selector and a list of
/// ancestor parts, e.g. `QInputDialog QLineEdit:focus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub key: CompoundSelector,
    /// Ancestors with their combinators, in right-to-left order.
    pub ancestors: Vec<(Combinator, CompoundSelector)>,
}

/// Combinators QSS understands. There are no sibling combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (a space).
    Descendant,
    /// Child combinator (`>`).
    Child,
}

/// A helper that returns a parsed selector; if parsing fails, returns a
/// single-compound fallback so a bad selector is inert rather than fatal.
pub fn parse_selector(selector: &str) -> ComplexSelector {
    parse_complex_selector(selector).unwrap_or_else(|| ComplexSelector {
        key: parse_compound_selector(selector),
        ancestors: Vec::new(),
    })
}

/// Parse a compound selector string, e.g.
/// `QScrollBar::handle:vertical` or `QLineEdit[error="true"]`.
pub fn parse_compound_selector(selector: &str) -> CompoundSelector {
    let mut class = None;
    let mut id = None;
    let mut sub_control = None;
    let mut states = Vec::new();
    let mut attributes = Vec::new();
    let mut chars = selector.chars().peekable();
    let mut buffer = String::new();

    // If the first char is alphanumeric or '*' assume a class name.
    if let Some(&ch) = chars.peek() {
        if ch.is_alphanumeric() || ch == '*' || ch == '_' {
            while let Some(&ch) = chars.peek() {
                if ch == '#' || ch == ':' || ch == '[' {
                    break;
                }
                buffer.push(ch);
                chars.next();
            }
            if !buffer.is_empty() && buffer != "*" {
                class = Some(buffer.clone());
            }
            buffer.clear();
        }
    }

    while let Some(ch) = chars.next() {
        match ch {
            '#' => {
                while let Some(&ch) = chars.peek() {
                    if ch == '#' || ch == ':' || ch == '[' {
                        break;
                    }
                    buffer.push(ch);
                    chars.next();
                }
                if !buffer.is_empty() {
                    id = Some(buffer.clone());
                }
                buffer.clear();
            }
            ':' => {
                // "::" introduces a sub-control, a single ':' a pseudo-state.
                let is_sub_control = matches!(chars.peek(), Some(':'));
                if is_sub_control {
                    chars.next();
                }
                while let Some(&ch) = chars.peek() {
                    if ch == '#' || ch == ':' || ch == '[' {
                        break;
                    }
                    buffer.push(ch);
                    chars.next();
                }
                if !buffer.is_empty() {
                    if is_sub_control {
                        sub_control = Some(buffer.clone());
                    } else {
                        states.push(buffer.clone());
                    }
                }
                buffer.clear();
            }
            '[' => {
                // Parse attribute selector until ']'
                let mut attr_name = String::new();
                let mut operator: Option<AttributeOperator> = None;
                let mut attr_value: Option<String> = None;

                // Skip whitespace.
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() {
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Read attribute name.
                while let Some(&ch) = chars.peek() {
                    if ch == '=' || ch == '~' || ch == ']' || ch.is_whitespace() {
                        break;
                    }
                    attr_name.push(ch);
                    chars.next();
                }
                // Skip whitespace.
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() {
                        chars.next();
                    } else {
                        break;
                    }
                }
                // Check if an operator is present.
                if let Some(&ch) = chars.peek() {
                    if ch == '=' || ch == '~' {
                        let mut op_str = String::new();
                        op_str.push(ch);
                        chars.next();
                        if ch == '~' {
                            if let Some(&'=') = chars.peek() {
                                op_str.push('=');
                                chars.next();
                            }
                        }
                        operator = match op_str.as_str() {
                            "=" => Some(AttributeOperator::Exact),
                            "~=" => Some(AttributeOperator::Includes),
                            _ => None,
                        };
                        // Skip whitespace.
                        while let Some(&ch) = chars.peek() {
                            if ch.is_whitespace() {
                                chars.next();
                            } else {
                                break;
                            }
                        }
                        // Now parse the attribute value, quoted or bare.
                        let quote = match chars.peek() {
                            Some(&ch) if ch == '"' || ch == '\'' => Some(ch),
                            _ => None,
                        };
                        if let Some(q) = quote {
                            chars.next(); // Consume opening quote.
                            let mut value_buf = String::new();
                            for ch in chars.by_ref() {
                                if ch == q {
                                    break;
                                }
                                value_buf.push(ch);
                            }
                            attr_value = Some(value_buf);
                        } else {
                            let mut value_buf = String::new();
                            while let Some(&ch) = chars.peek() {
                                if ch.is_whitespace() || ch == ']' {
                                    break;
                                }
                                value_buf.push(ch);
                                chars.next();
                            }
                            attr_value = Some(value_buf);
                        }
                    }
                }
                // Skip until ']'
                for ch in chars.by_ref() {
                    if ch == ']' {
                        break;
                    }
                }
                if !attr_name.is_empty() {
                    attributes.push(AttributeSelector {
                        name: attr_name,
                        operator,
                        value: attr_value,
                    });
                }
            }
            _ => {}
        }
    }

    CompoundSelector {
        class,
        id,
        sub_control,
        states,
        attributes,
    }
}

/// Parse a complex selector string (e.g. `QMessageBox QPushButton:hover` or
/// `QInputDialog > QLineEdit`) into a ComplexSelector.
/// Assumes tokens are separated by whitespace.
pub fn parse_complex_selector(selector: &str) -> Option<ComplexSelector> {
    let tokens: Vec<&str> = selector.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }
    let mut iter = tokens.into_iter();
    let mut key = parse_compound_selector(iter.next()?);
    let mut ancestors = Vec::new();

    while let Some(token) = iter.next() {
        let combinator = if token == ">" {
            Combinator::Child
        } else {
            Combinator::Descendant
        };
        let compound_token = if token == ">" {
            iter.next().unwrap_or(token)
        } else {
            token
        };
        ancestors.push((combinator, key));
        key = parse_compound_selector(compound_token);
    }
    ancestors.reverse();
    Some(ComplexSelector { key, ancestors })
}

/// ------------------------------
/// 2. Specificity & Cascade Merging
/// ------------------------------

/// Compute specificity for a compound selector as
/// (id_count, state+attribute_count, class+sub_control_count).
/// Pseudo-states and attribute conditions weigh like CSS classes; the
/// widget class and a sub-control tag weigh like type selectors.
pub fn compute_specificity(compound: &CompoundSelector) -> (u32, u32, u32) {
    let id_count = if compound.id.is_some() { 1 } else { 0 };
    let state_count = compound.states.len() as u32;
    let attr_count = compound.attributes.len() as u32;
    let class_count = if compound.class.is_some() { 1 } else { 0 };
    let sub_control_count = if compound.sub_control.is_some() { 1 } else { 0 };
    (
        id_count,
        state_count + attr_count,
        class_count + sub_control_count,
    )
}

/// Compute specificity for a complex selector by summing key and ancestors.
pub fn compute_complex_specificity(selector: &ComplexSelector) -> (u32, u32, u32) {
    let mut spec = compute_specificity(&selector.key);
    for &(_, ref comp) in &selector.ancestors {
        let anc_spec = compute_specificity(comp);
        spec.0 += anc_spec.0;
        spec.1 += anc_spec.1;
        spec.2 += anc_spec.2;
    }
    spec
}

/// One matchable rule: a parsed selector plus the declarations of the block
/// it came from. Comma-grouped selectors become one StyleRule each, sharing
/// declarations and source order.
#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: ComplexSelector,
    pub declarations: Vec<OwnedDeclaration>,
    pub source_order: u32,
}

/// Compile an owned stylesheet into matchable rules.
pub fn compile_stylesheet(sheet: &OwnedStylesheet) -> Vec<StyleRule> {
    let mut compiled = Vec::new();
    for (order, rule) in sheet.rules.iter().enumerate() {
        for selector_str in &rule.selectors {
            compiled.push(StyleRule {
                selector: parse_selector(selector_str),
                declarations: rule.declarations.clone(),
                source_order: order as u32,
            });
        }
    }
    debug!(
        "compiled {} selectors from {} rule blocks",
        compiled.len(),
        sheet.rules.len()
    );
    compiled
}

/// Expand a shorthand declaration into the resolved map.
/// QSS shorthands mirror the CSS ones: `margin`/`padding` take 1, 2, 3 or 4
/// values; `border` is `width style color`; `background` covers
/// `background-color`. `border: none` only clears the border style.
fn expand_declaration(resolved: &mut HashMap<String, String>, property: &str, value: &str) {
    match property {
        "margin" | "padding" => {
            let parts: Vec<&str> = value.split_whitespace().collect();
            let (top, right, bottom, left) = match parts.as_slice() {
                [all] => (*all, *all, *all, *all),
                [tb, lr] => (*tb, *lr, *tb, *lr),
                [t, lr, b] => (*t, *lr, *b, *lr),
                [t, r, b, l] => (*t, *r, *b, *l),
                _ => (value, value, value, value),
            };
            resolved.insert(format!("{}-top", property), top.to_string());
            resolved.insert(format!("{}-right", property), right.to_string());
            resolved.insert(format!("{}-bottom", property), bottom.to_string());
            resolved.insert(format!("{}-left", property), left.to_string());
        }
        "border" => {
            if value == "none" {
                resolved.insert("border-style".to_string(), "none".to_string());
                return;
            }
            let parts: Vec<&str> = value.split_whitespace().collect();
            if parts.len() >= 3 {
                resolved.insert("border-width".to_string(), parts[0].to_string());
                resolved.insert("border-style".to_string(), parts[1].to_string());
                resolved.insert("border-color".to_string(), parts[2].to_string());
            } else {
                // Fallback: assign the same value to all.
                resolved.insert("border-width".to_string(), value.to_string());
                resolved.insert("border-style".to_string(), value.to_string());
                resolved.insert("border-color".to_string(), value.to_string());
            }
        }
        "background" => {
            resolved.insert("background-color".to_string(), value.to_string());
        }
        _ => {
            resolved.insert(property.to_string(), value.to_string());
        }
    }
}

/// Merge matched rules into a resolved property map: sort by specificity,
/// then source order, then apply declarations in document order so later
/// values win per property. QSS has no inheritance pass; anything unset
/// here falls back to the toolkit default.
pub fn compute_resolved_style(matched_rules: Vec<StyleRule>) -> HashMap<String, String> {
    let mut rules = matched_rules;
    rules.sort_by(|a, b| {
        let spec_a = compute_complex_specificity(&a.selector);
        let spec_b = compute_complex_specificity(&b.selector);
        let cmp_spec = spec_a.cmp(&spec_b);
        if cmp_spec == Ordering::Equal {
            a.source_order.cmp(&b.source_order)
        } else {
            cmp_spec
        }
    });
    let mut resolved: HashMap<String, String> = HashMap::new();
    for rule in rules {
        for decl in &rule.declarations {
            expand_declaration(&mut resolved, &decl.property, &decl.value);
        }
    }
    resolved
}

/// ------------------------------
/// 3. Selector Matching
/// ------------------------------

/// Returns true if the given WidgetNode matches the CompoundSelector.
/// Checks class lineage, object name, sub-control, active pseudo-states,
/// and attribute conditions against dynamic properties.
pub fn matches_compound(widget: &WidgetNode, compound: &CompoundSelector) -> bool {
    if let Some(ref class) = compound.class {
        // A type selector matches the class and its superclasses, as in Qt.
        if !widget.lineage.iter().any(|ancestor| ancestor == class) {
            return false;
        }
    }
    if let Some(ref id) = compound.id {
        if widget.object_name.as_deref() != Some(id.as_str()) {
            return false;
        }
    }
    // Sub-control rules only style sub-control elements, and plain rules
    // never leak onto them.
    if compound.sub_control != widget.sub_control {
        return false;
    }
    for state in &compound.states {
        if !widget.states.contains(state) {
            return false;
        }
    }
    for attr_sel in &compound.attributes {
        if let Some(actual_val) = widget.properties.get(&attr_sel.name) {
            if let Some(expected) = &attr_sel.value {
                match attr_sel.operator {
                    Some(AttributeOperator::Exact) => {
                        if actual_val != expected {
                            return false;
                        }
                    }
                    Some(AttributeOperator::Includes) => {
                        if !actual_val.split_whitespace().any(|word| word == expected) {
                            return false;
                        }
                    }
                    None => {} // No operator means just existence; already confirmed.
                }
            }
        } else {
            return false;
        }
    }
    true
}

/// Matches a ComplexSelector against a candidate widget node.
/// The matching proceeds right-to-left, using parent pointers.
pub fn matches_complex_selector(candidate: &Rc<RefCell<Node>>, complex: &ComplexSelector) -> bool {
    let current_widget = {
        let node = candidate.borrow();
        match &*node {
            Node::Widget(widget) => widget.clone(),
            _ => return false,
        }
    };
    if !matches_compound(&current_widget, &complex.key) {
        return false;
    }
    let mut current_node = Rc::clone(candidate);
    for (combinator, compound) in &complex.ancestors {
        let found = match combinator {
            Combinator::Child => match parent_widget(&current_node) {
                Some(parent_rc) => {
                    let parent_matches = match &*parent_rc.borrow() {
                        Node::Widget(parent) => matches_compound(parent, compound),
                        _ => false,
                    };
                    if parent_matches {
                        current_node = parent_rc;
                        true
                    } else {
                        false
                    }
                }
                None => false,
            },
            Combinator::Descendant => {
                let mut ancestor = parent_widget(&current_node);
                let mut matched = false;
                while let Some(ancestor_rc) = ancestor {
                    let ancestor_matches = match &*ancestor_rc.borrow() {
                        Node::Widget(widget) => matches_compound(widget, compound),
                        _ => false,
                    };
                    if ancestor_matches {
                        current_node = ancestor_rc;
                        matched = true;
                        break;
                    }
                    ancestor = parent_widget(&ancestor_rc);
                }
                matched
            }
        };
        if !found {
            return false;
        }
    }
    true
}

/// Helper: get the parent widget node, if any.
fn parent_widget(node: &Rc<RefCell<Node>>) -> Option<Rc<RefCell<Node>>> {
    let weak: Option<Weak<RefCell<Node>>> = match &*node.borrow() {
        Node::Widget(widget) => widget.parent.clone(),
        _ => None,
    };
    weak.and_then(|w| w.upgrade())
}
