//! CSS AST: selectors, declarations, rule sets.
//!
//! Every node prints back as CSS through `Display`; the stylesheet compiler
//! logs ignored declarations in that form.

use std::fmt;

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// One simple selector.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Matches the node tag, case-insensitively.
    Type(String),
    Universal,
    Class(String),
    Id(String),
    /// `:first-child`, `:last-child`, `:only-child`, `:empty`. Unknown names
    /// never match.
    PseudoClass(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: `A B`.
    Descendant,
    /// `A > B`.
    Child,
}

/// Synthetic child generated by a `::before` or `::after` rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoElement {
    Before,
    After,
}

impl PseudoElement {
    /// Parse a pseudo-element name without the leading `::`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }

    /// The tag of nodes synthesized for this pseudo-element. The leading
    /// underscore keeps it out of the author tag namespace.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Before => "_before",
            Self::After => "_after",
        }
    }
}

/// Simple selectors with no whitespace between them: `view.primary:empty`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// Compound selectors joined by combinators, optionally ending in a
/// pseudo-element.
///
/// `view > text.title::before` has parts
/// `[Compound(view), Combinator(Child), Compound(text.title)]` and
/// `pseudo_element = Some(Before)`. The parts then match the pseudo's owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selector {
    /// Alternating, starting and ending with a compound.
    pub parts: Vec<SelectorPart>,
    pub pseudo_element: Option<PseudoElement>,
}

// ---------------------------------------------------------------------------
// Declarations
// ---------------------------------------------------------------------------

/// One value token of a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    Ident(String),
    Number(f32),
    /// Number and unit suffix: `10px`, `50%`, `90deg`.
    Dimension(f32, String),
    /// Hex digits without the `#`.
    Color(String),
    String(String),
    /// Lowercased name and arguments: `rgba(0, 0, 0, 0.5)`, `steps(4)`.
    Function(String, Vec<DeclarationValue>),
    /// A top-level comma separating list items (`box-shadow: a, b`).
    Comma,
}

/// `property: values [!important]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub values: Vec<DeclarationValue>,
    pub important: bool,
}

/// Selectors paired with the declarations of one `{ ... }` block.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub rules: Vec<RuleSet>,
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("::before"),
            Self::After => f.write_str("::after"),
        }
    }
}

impl fmt::Display for SelectorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(tag) => f.write_str(tag),
            Self::Universal => f.write_str("*"),
            Self::Class(class) => write!(f, ".{class}"),
            Self::Id(id) => write!(f, "#{id}"),
            Self::PseudoClass(name) => write!(f, ":{name}"),
        }
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.components.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SelectorPart::Compound(compound) => write!(f, "{compound}")?,
                SelectorPart::Combinator(Combinator::Descendant) => f.write_str(" ")?,
                SelectorPart::Combinator(Combinator::Child) => f.write_str(" > ")?,
            }
        }
        if let Some(pseudo) = self.pseudo_element {
            write!(f, "{pseudo}")?;
        }
        Ok(())
    }
}

impl fmt::Display for DeclarationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(name) => f.write_str(name),
            Self::Number(n) => write!(f, "{n}"),
            Self::Dimension(n, unit) => write!(f, "{n}{unit}"),
            Self::Color(hex) => write!(f, "#{hex}"),
            Self::String(text) => write!(f, "{text:?}"),
            Self::Function(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Comma => f.write_str(","),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.property)?;
        for value in &self.values {
            match value {
                DeclarationValue::Comma => f.write_str(",")?,
                other => write!(f, " {other}")?,
            }
        }
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}
