// src/style/owned_qss.rs (the parser's fully-owned output, before compilation)
use std::fmt;

// A fully-owned stylesheet: a flat list of style rules. QSS has no at-rules,
// so there is nothing else to represent.
#[derive(Debug, Default)]
pub struct OwnedStylesheet {
    pub rules: Vec<OwnedRule>,
}

#[derive(Debug, Clone)]
pub struct OwnedRule {
    /// e.g. "QPushButton", "#deleteButton:hover", "QScrollBar::handle:vertical"
    pub selectors: Vec<String>,
    /// Declarations in document order; within a block the last value for a
    /// property wins, so order must be preserved here.
    pub declarations: Vec<OwnedDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDeclaration {
    pub property: String,
    pub value: String,
}

impl fmt::Display for OwnedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selectors.join(", "))?;
        for decl in &self.declarations {
            writeln!(f, "    {}: {};", decl.property, decl.value)?;
        }
        writeln!(f, "}}")
    }
}
