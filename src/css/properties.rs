//! Property registry and value parsing: declaration tokens → [`StyleValue`]s.
//!
//! Every supported property is described by a [`PropertyDef`]: whether it is
//! inherited, which layout field it drives (if any), and the syntax its value
//! is parsed with. Shorthands (`margin`, `padding`, `gap`) expand to their
//! per-edge longhands at parse time.

use crate::animation::computed::Computed;
use crate::animation::list::ValueList;
use crate::css::model::{Declaration, DeclarationValue};
use crate::css::scalar::{Scalar, Scalar2, ScalarBox};
use crate::geometry::{Quat, Vec2};
use crate::layout::property::{LayoutProp, LayoutValue};
use crate::style::value::{BoxShadow, Color, StyleValue};

/// Errors from property parsing.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

/// How a property's value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// A length; `auto` allowed if set, `em`/`rem` allowed if `relative`.
    Length { auto: bool, relative: bool },
    Color,
    Number,
    Integer,
    /// One of a fixed set of identifiers.
    Keyword(&'static [&'static str]),
    /// An angle in `deg`, stored as a rotation.
    Angle,
    /// One or two numbers (`scale: 2` or `scale: 1 0.5`).
    Vec2,
    /// One or two lengths.
    Length2,
    /// Comma-separated shadows, or `none`.
    ShadowList,
    /// A quoted string, or `none`.
    Text,
}

/// Static description of one property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    pub name: &'static str,
    pub inherited: bool,
    pub layout: Option<LayoutProp>,
    pub syntax: Syntax,
}

const LENGTH: Syntax = Syntax::Length {
    auto: false,
    relative: false,
};
const LENGTH_AUTO: Syntax = Syntax::Length {
    auto: true,
    relative: false,
};
const LENGTH_RELATIVE: Syntax = Syntax::Length {
    auto: false,
    relative: true,
};

const CONTENT_ALIGN: &[&str] = &[
    "start",
    "end",
    "flex-start",
    "flex-end",
    "center",
    "stretch",
    "space-between",
    "space-around",
    "space-evenly",
];
const ITEM_ALIGN: &[&str] = &[
    "start",
    "end",
    "flex-start",
    "flex-end",
    "center",
    "baseline",
    "stretch",
];

const fn visual(name: &'static str, syntax: Syntax) -> PropertyDef {
    PropertyDef {
        name,
        inherited: false,
        layout: None,
        syntax,
    }
}

const fn inherited(name: &'static str, syntax: Syntax) -> PropertyDef {
    PropertyDef {
        name,
        inherited: true,
        layout: None,
        syntax,
    }
}

const fn layout(name: &'static str, prop: LayoutProp, syntax: Syntax) -> PropertyDef {
    PropertyDef {
        name,
        inherited: false,
        layout: Some(prop),
        syntax,
    }
}

static PROPERTIES: &[PropertyDef] = &[
    // Inherited
    inherited("color", Syntax::Color),
    inherited("font-size", LENGTH_RELATIVE),
    inherited("line-height", Syntax::Number),
    inherited("text-align", Syntax::Keyword(&["left", "center", "right", "justify"])),
    inherited("visibility", Syntax::Keyword(&["visible", "hidden"])),
    inherited(
        "cursor",
        Syntax::Keyword(&["auto", "default", "pointer", "text", "move", "grab", "not-allowed"]),
    ),
    // Visual
    visual("background-color", Syntax::Color),
    visual("border-color", Syntax::Color),
    visual("border-radius", LENGTH_RELATIVE),
    visual("opacity", Syntax::Number),
    visual("z-index", Syntax::Integer),
    visual("box-shadow", Syntax::ShadowList),
    visual("rotate", Syntax::Angle),
    visual("scale", Syntax::Vec2),
    visual("translate", Syntax::Length2),
    visual("transform-origin", Syntax::Length2),
    visual("content", Syntax::Text),
    // Layout
    layout(
        "display",
        LayoutProp::Display,
        Syntax::Keyword(&["flex", "block", "grid", "none"]),
    ),
    layout(
        "position",
        LayoutProp::Position,
        Syntax::Keyword(&["relative", "absolute"]),
    ),
    layout(
        "overflow",
        LayoutProp::Overflow,
        Syntax::Keyword(&["visible", "clip", "hidden", "scroll"]),
    ),
    layout(
        "flex-direction",
        LayoutProp::FlexDirection,
        Syntax::Keyword(&["row", "column", "row-reverse", "column-reverse"]),
    ),
    layout(
        "flex-wrap",
        LayoutProp::FlexWrap,
        Syntax::Keyword(&["nowrap", "wrap", "wrap-reverse"]),
    ),
    layout("justify-content", LayoutProp::JustifyContent, Syntax::Keyword(CONTENT_ALIGN)),
    layout("align-content", LayoutProp::AlignContent, Syntax::Keyword(CONTENT_ALIGN)),
    layout("align-items", LayoutProp::AlignItems, Syntax::Keyword(ITEM_ALIGN)),
    layout("align-self", LayoutProp::AlignSelf, Syntax::Keyword(ITEM_ALIGN)),
    layout("flex-grow", LayoutProp::FlexGrow, Syntax::Number),
    layout("flex-shrink", LayoutProp::FlexShrink, Syntax::Number),
    layout("flex-basis", LayoutProp::FlexBasis, LENGTH_AUTO),
    layout("width", LayoutProp::Width, LENGTH_AUTO),
    layout("height", LayoutProp::Height, LENGTH_AUTO),
    layout("min-width", LayoutProp::MinWidth, LENGTH_AUTO),
    layout("min-height", LayoutProp::MinHeight, LENGTH_AUTO),
    layout("max-width", LayoutProp::MaxWidth, LENGTH_AUTO),
    layout("max-height", LayoutProp::MaxHeight, LENGTH_AUTO),
    layout("margin-top", LayoutProp::MarginTop, LENGTH_AUTO),
    layout("margin-right", LayoutProp::MarginRight, LENGTH_AUTO),
    layout("margin-bottom", LayoutProp::MarginBottom, LENGTH_AUTO),
    layout("margin-left", LayoutProp::MarginLeft, LENGTH_AUTO),
    layout("padding-top", LayoutProp::PaddingTop, LENGTH),
    layout("padding-right", LayoutProp::PaddingRight, LENGTH),
    layout("padding-bottom", LayoutProp::PaddingBottom, LENGTH),
    layout("padding-left", LayoutProp::PaddingLeft, LENGTH),
    layout("top", LayoutProp::Top, LENGTH_AUTO),
    layout("right", LayoutProp::Right, LENGTH_AUTO),
    layout("bottom", LayoutProp::Bottom, LENGTH_AUTO),
    layout("left", LayoutProp::Left, LENGTH_AUTO),
    layout("row-gap", LayoutProp::RowGap, LENGTH),
    layout("column-gap", LayoutProp::ColumnGap, LENGTH),
    layout("border-width", LayoutProp::BorderWidth, LENGTH),
    layout("aspect-ratio", LayoutProp::AspectRatio, Syntax::Number),
];

/// Look up a longhand property by name.
pub fn lookup(name: &str) -> Option<&'static PropertyDef> {
    PROPERTIES.iter().find(|def| def.name == name)
}

/// Whether `name` is an inherited property. Unknown names are not inherited.
pub fn is_inherited(name: &str) -> bool {
    lookup(name).is_some_and(|def| def.inherited)
}

/// All registered longhands.
pub fn all() -> &'static [PropertyDef] {
    PROPERTIES
}

/// One parsed longhand: its definition and value.
pub type ParsedProperty = (&'static PropertyDef, StyleValue);

/// Parse a declaration into one or more longhand values.
pub fn parse_declaration(decl: &Declaration) -> Result<Vec<ParsedProperty>, PropertyError> {
    parse_property(&decl.property, &decl.values)
}

/// Parse `property: values` into longhand values, expanding shorthands.
pub fn parse_property(
    property: &str,
    values: &[DeclarationValue],
) -> Result<Vec<ParsedProperty>, PropertyError> {
    let property = property.to_ascii_lowercase();
    match property.as_str() {
        "margin" | "padding" => {
            let edges = parse_scalar_box(&property, values)?;
            let mut out = Vec::with_capacity(4);
            for (side, value) in [
                ("top", edges.top),
                ("right", edges.right),
                ("bottom", edges.bottom),
                ("left", edges.left),
            ] {
                let name = format!("{property}-{side}");
                let def = lookup(&name).ok_or(PropertyError::UnknownProperty(name.clone()))?;
                check_length(def, value)?;
                out.push((def, StyleValue::Length(value)));
            }
            Ok(out)
        }
        "gap" => {
            let lengths = values
                .iter()
                .map(|v| parse_scalar(&property, v, false))
                .collect::<Result<Vec<_>, _>>()?;
            let (row, column) = match lengths.as_slice() {
                [both] => (*both, *both),
                [row, column] => (*row, *column),
                _ => return Err(invalid(&property, "expected 1 or 2 lengths")),
            };
            Ok(vec![
                (lookup_known("row-gap")?, StyleValue::Length(row)),
                (lookup_known("column-gap")?, StyleValue::Length(column)),
            ])
        }
        name => {
            let def =
                lookup(name).ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))?;
            Ok(vec![(def, parse_value(def, values)?)])
        }
    }
}

fn lookup_known(name: &str) -> Result<&'static PropertyDef, PropertyError> {
    lookup(name).ok_or_else(|| PropertyError::UnknownProperty(name.to_string()))
}

/// Parse values with a property's syntax.
pub fn parse_value(
    def: &PropertyDef,
    values: &[DeclarationValue],
) -> Result<StyleValue, PropertyError> {
    let name = def.name;
    match def.syntax {
        Syntax::Length { auto, relative } => {
            let value = require_single(values, name)?;
            if relative {
                if let Some(expr) = parse_relative(value) {
                    return Ok(StyleValue::computed(expr));
                }
            }
            let scalar = parse_scalar(name, value, auto)?;
            Ok(StyleValue::Length(scalar))
        }
        Syntax::Color => Ok(StyleValue::Color(parse_color(name, require_single(values, name)?)?)),
        Syntax::Number => match require_single(values, name)? {
            DeclarationValue::Number(n) => Ok(StyleValue::Float(*n)),
            other => Err(invalid(name, format!("expected number, got: {other:?}"))),
        },
        Syntax::Integer => match require_single(values, name)? {
            DeclarationValue::Number(n) if n.fract() == 0.0 => Ok(StyleValue::Int(*n as i32)),
            other => Err(invalid(name, format!("expected integer, got: {other:?}"))),
        },
        Syntax::Keyword(allowed) => {
            let ident = require_single_ident(values, name)?.to_ascii_lowercase();
            if allowed.contains(&ident.as_str()) {
                Ok(StyleValue::keyword(&ident))
            } else {
                Err(invalid(
                    name,
                    format!("expected {}, got: {ident}", allowed.join("|")),
                ))
            }
        }
        Syntax::Angle => match require_single(values, name)? {
            DeclarationValue::Dimension(deg, unit) if unit == "deg" => {
                Ok(StyleValue::Rotation(Quat::from_rotation_z(*deg)))
            }
            DeclarationValue::Number(n) if *n == 0.0 => Ok(StyleValue::Rotation(Quat::IDENTITY)),
            other => Err(invalid(name, format!("expected angle in deg, got: {other:?}"))),
        },
        Syntax::Vec2 => {
            let nums = values
                .iter()
                .map(|v| match v {
                    DeclarationValue::Number(n) => Ok(*n),
                    other => Err(invalid(name, format!("expected number, got: {other:?}"))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            match nums.as_slice() {
                [both] => Ok(StyleValue::Vec2(Vec2::new(*both, *both))),
                [x, y] => Ok(StyleValue::Vec2(Vec2::new(*x, *y))),
                _ => Err(invalid(name, "expected 1 or 2 numbers")),
            }
        }
        Syntax::Length2 => Ok(StyleValue::Length2(parse_length2(name, values)?)),
        Syntax::ShadowList => parse_shadow_list(values),
        Syntax::Text => match require_single(values, name)? {
            DeclarationValue::String(text) => Ok(StyleValue::text(text)),
            DeclarationValue::Ident(none) if none.eq_ignore_ascii_case("none") => {
                Ok(StyleValue::keyword("none"))
            }
            other => Err(invalid(name, format!("expected string, got: {other:?}"))),
        },
    }
}

/// Parse values and convert to a [`LayoutValue`] when the property drives layout.
pub fn to_layout_value(def: &PropertyDef, value: &StyleValue) -> Option<LayoutValue> {
    def.layout.map(|prop| LayoutValue::new(prop, value.clone()))
}

/// Check an already-typed value against a property's syntax, as
/// [`parse_value`] would have produced it.
pub fn check_value(def: &PropertyDef, value: &StyleValue) -> Result<(), PropertyError> {
    let fits = match (def.syntax, value) {
        (Syntax::Length { .. }, StyleValue::Length(scalar)) => return check_length(def, *scalar),
        (Syntax::Length { relative, .. }, StyleValue::Computed(_)) => relative,
        (Syntax::Keyword(allowed), StyleValue::Keyword(keyword)) => allowed.contains(&&**keyword),
        (Syntax::Text, StyleValue::Keyword(keyword)) => &**keyword == "none",
        (Syntax::Color, StyleValue::Color(_))
        | (Syntax::Number, StyleValue::Float(_))
        | (Syntax::Integer, StyleValue::Int(_))
        | (Syntax::Angle, StyleValue::Rotation(_))
        | (Syntax::Vec2, StyleValue::Vec2(_))
        | (Syntax::Length2, StyleValue::Length2(_))
        | (Syntax::ShadowList, StyleValue::ShadowList(_) | StyleValue::Shadow(_))
        | (Syntax::Text, StyleValue::Text(_)) => true,
        _ => false,
    };
    if fits {
        Ok(())
    } else {
        Err(invalid(
            def.name,
            format!("{:?} value does not fit {:?}", value.kind(), def.syntax),
        ))
    }
}

fn check_length(def: &PropertyDef, value: Scalar) -> Result<(), PropertyError> {
    match def.syntax {
        Syntax::Length { auto: false, .. } if value.is_auto() => {
            Err(invalid(def.name, "'auto' is not allowed"))
        }
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Value helpers
// ---------------------------------------------------------------------------

fn parse_relative(value: &DeclarationValue) -> Option<Computed> {
    match value {
        DeclarationValue::Dimension(n, unit) if unit == "em" => Some(Computed::Em(*n)),
        DeclarationValue::Dimension(n, unit) if unit == "rem" => Some(Computed::Rem(*n)),
        _ => None,
    }
}

/// Parse a single declaration value into a [`Scalar`].
pub fn parse_scalar(
    property: &str,
    value: &DeclarationValue,
    allow_auto: bool,
) -> Result<Scalar, PropertyError> {
    match value {
        DeclarationValue::Number(n) => Ok(Scalar::point(*n)),
        DeclarationValue::Dimension(n, unit) => match unit.as_str() {
            "px" => Ok(Scalar::point(*n)),
            "%" => Ok(Scalar::percent(*n)),
            other => Err(invalid(property, format!("unsupported unit: {other}"))),
        },
        DeclarationValue::Ident(name) if allow_auto && name.eq_ignore_ascii_case("auto") => {
            Ok(Scalar::auto())
        }
        other => Err(invalid(
            property,
            format!("expected number or length, got: {other:?}"),
        )),
    }
}

/// Parse 1-4 scalar values into a [`ScalarBox`] (CSS shorthand).
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
pub fn parse_scalar_box(
    property: &str,
    values: &[DeclarationValue],
) -> Result<ScalarBox, PropertyError> {
    let s = |i: usize| parse_scalar(property, &values[i], true);
    match values.len() {
        1 => Ok(ScalarBox::all(s(0)?)),
        2 => Ok(ScalarBox::symmetric(s(0)?, s(1)?)),
        3 => {
            let horizontal = s(1)?;
            Ok(ScalarBox::new(s(0)?, horizontal, s(2)?, horizontal))
        }
        4 => Ok(ScalarBox::new(s(0)?, s(1)?, s(2)?, s(3)?)),
        n => Err(invalid(property, format!("expected 1-4 values, got {n}"))),
    }
}

fn parse_length2(property: &str, values: &[DeclarationValue]) -> Result<Scalar2, PropertyError> {
    match values {
        [both] => {
            let s = parse_scalar(property, both, false)?;
            Ok(Scalar2::new(s, s))
        }
        [x, y] => Ok(Scalar2::new(
            parse_scalar(property, x, false)?,
            parse_scalar(property, y, false)?,
        )),
        _ => Err(invalid(property, "expected 1 or 2 lengths")),
    }
}

/// Parse a color from an identifier, hex literal or `rgb()`/`rgba()` function.
pub fn parse_color(property: &str, value: &DeclarationValue) -> Result<Color, PropertyError> {
    match value {
        DeclarationValue::Ident(name) => {
            Color::named(name).ok_or_else(|| invalid(property, format!("unknown color: {name}")))
        }
        DeclarationValue::Color(hex) => {
            Color::from_hex(hex).ok_or_else(|| invalid(property, format!("invalid hex color: #{hex}")))
        }
        DeclarationValue::Function(name, args) if name == "rgb" || name == "rgba" => {
            let nums = args
                .iter()
                .map(|a| match a {
                    DeclarationValue::Number(n) => Ok(*n),
                    DeclarationValue::Dimension(n, unit) if unit == "%" => Ok(*n / 100.0 * 255.0),
                    other => Err(invalid(property, format!("invalid color channel: {other:?}"))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            match nums.as_slice() {
                [r, g, b] => Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, 1.0)),
                [r, g, b, a] => Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, *a)),
                _ => Err(invalid(property, "expected 3 or 4 color channels")),
            }
        }
        other => Err(invalid(
            property,
            format!("expected color name, hex or rgba(), got: {other:?}"),
        )),
    }
}

/// Parse `box-shadow`: `[inset] x y [blur [spread]] [color]`, comma separated.
fn parse_shadow_list(values: &[DeclarationValue]) -> Result<StyleValue, PropertyError> {
    const NAME: &str = "box-shadow";

    if let [DeclarationValue::Ident(none)] = values {
        if none.eq_ignore_ascii_case("none") {
            return Ok(StyleValue::ShadowList(ValueList::new(Vec::new())));
        }
    }

    let mut shadows = Vec::new();
    for layer in values.split(|v| *v == DeclarationValue::Comma) {
        let mut shadow = BoxShadow {
            color: Color::BLACK,
            ..BoxShadow::DEFAULT
        };
        let mut lengths = Vec::new();
        for value in layer {
            match value {
                DeclarationValue::Ident(kw) if kw.eq_ignore_ascii_case("inset") => {
                    shadow.inset = true
                }
                DeclarationValue::Number(_) | DeclarationValue::Dimension(..) => {
                    let s = parse_scalar(NAME, value, false)?;
                    if s.unit != crate::css::scalar::Unit::Point {
                        return Err(invalid(NAME, "shadow lengths must be in px"));
                    }
                    lengths.push(s.value);
                }
                other => shadow.color = parse_color(NAME, other)?,
            }
        }
        match lengths.as_slice() {
            [x, y] => shadow.offset = Vec2::new(*x, *y),
            [x, y, blur] => {
                shadow.offset = Vec2::new(*x, *y);
                shadow.blur = *blur;
            }
            [x, y, blur, spread] => {
                shadow.offset = Vec2::new(*x, *y);
                shadow.blur = *blur;
                shadow.spread = *spread;
            }
            _ => return Err(invalid(NAME, "expected 2-4 lengths per shadow")),
        }
        shadows.push(shadow);
    }
    Ok(StyleValue::ShadowList(ValueList::new(shadows)))
}

fn require_single<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a DeclarationValue, PropertyError> {
    match values {
        [single] => Ok(single),
        _ => Err(invalid(
            property,
            format!("expected 1 value, got {}", values.len()),
        )),
    }
}

/// Extract a single identifier from values, returning an error using the given property name.
fn require_single_ident<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a str, PropertyError> {
    match require_single(values, property)? {
        DeclarationValue::Ident(name) => Ok(name.as_str()),
        other => Err(invalid(
            property,
            format!("expected identifier, got: {other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_declaration_list;

    fn parse_one(text: &str) -> Vec<ParsedProperty> {
        let decls = parse_declaration_list(text).unwrap();
        parse_declaration(&decls[0]).unwrap_or_else(|e| panic!("{text}: {e}"))
    }

    fn value_of(text: &str) -> StyleValue {
        parse_one(text).remove(0).1
    }

    fn fails(text: &str) -> bool {
        let decls = parse_declaration_list(text).unwrap();
        parse_declaration(&decls[0]).is_err()
    }

    // ── Registry ─────────────────────────────────────────────────────

    #[test]
    fn inherited_properties() {
        for name in ["color", "font-size", "line-height", "text-align", "visibility", "cursor"] {
            assert!(is_inherited(name), "{name} should inherit");
        }
        assert!(!is_inherited("background-color"));
        assert!(!is_inherited("width"));
        assert!(!is_inherited("no-such-property"));
    }

    #[test]
    fn layout_properties_map_to_layout_fields() {
        assert_eq!(lookup("width").unwrap().layout, Some(LayoutProp::Width));
        assert_eq!(lookup("opacity").unwrap().layout, None);
        assert!(all().iter().all(|d| !(d.inherited && d.layout.is_some())));
    }

    #[test]
    fn typed_values_are_checked_against_syntax() {
        let def = |name| lookup(name).unwrap();
        let red = StyleValue::Color(Color::rgba(1.0, 0.0, 0.0, 1.0));
        assert!(check_value(def("width"), &StyleValue::Length(Scalar::auto())).is_ok());
        assert!(check_value(def("width"), &red).is_err());
        assert!(check_value(def("padding-top"), &StyleValue::Length(Scalar::auto())).is_err());
        assert!(check_value(def("color"), &red).is_ok());
        assert!(check_value(def("display"), &StyleValue::keyword("grid")).is_ok());
        assert!(check_value(def("display"), &StyleValue::keyword("inline")).is_err());
        assert!(check_value(def("z-index"), &StyleValue::Float(1.0)).is_err());
        assert!(check_value(def("font-size"), &StyleValue::computed(Computed::Em(2.0))).is_ok());
        assert!(check_value(def("width"), &StyleValue::computed(Computed::Em(2.0))).is_err());
        assert!(check_value(def("content"), &StyleValue::text("x")).is_ok());
    }

    #[test]
    fn unknown_property() {
        let err = parse_property("colour", &[DeclarationValue::Ident("red".into())]).unwrap_err();
        assert!(matches!(err, PropertyError::UnknownProperty(ref p) if p == "colour"));
    }

    // ── Values ───────────────────────────────────────────────────────

    #[test]
    fn lengths() {
        assert_eq!(value_of("width: 10px"), StyleValue::Length(Scalar::point(10.0)));
        assert_eq!(value_of("width: 50%"), StyleValue::Length(Scalar::percent(50.0)));
        assert_eq!(value_of("width: auto"), StyleValue::Length(Scalar::auto()));
        assert_eq!(value_of("row-gap: 4"), StyleValue::Length(Scalar::point(4.0)));
        assert!(fails("padding-top: auto"));
        assert!(fails("width: 3em"));
        assert!(fails("width: 10px 20px"));
    }

    #[test]
    fn relative_font_size_is_deferred() {
        assert_eq!(
            value_of("font-size: 1.5rem"),
            StyleValue::computed(Computed::Rem(1.5))
        );
        assert_eq!(
            value_of("font-size: 2em"),
            StyleValue::computed(Computed::Em(2.0))
        );
        assert_eq!(value_of("font-size: 18px"), StyleValue::Length(Scalar::point(18.0)));
    }

    #[test]
    fn colors() {
        assert_eq!(value_of("color: red"), StyleValue::Color(Color::rgb8(255, 0, 0)));
        assert_eq!(value_of("color: #00f"), StyleValue::Color(Color::rgb8(0, 0, 255)));
        assert_eq!(
            value_of("background-color: rgba(255, 0, 0, 0.5)"),
            StyleValue::Color(Color::rgba(1.0, 0.0, 0.0, 0.5))
        );
        assert!(fails("color: reddish"));
    }

    #[test]
    fn keywords() {
        assert_eq!(value_of("display: NONE"), StyleValue::keyword("none"));
        assert_eq!(value_of("justify-content: space-between"), StyleValue::keyword("space-between"));
        assert!(fails("display: table"));
    }

    #[test]
    fn numbers_and_integers() {
        assert_eq!(value_of("opacity: 0.5"), StyleValue::Float(0.5));
        assert_eq!(value_of("z-index: 3"), StyleValue::Int(3));
        assert!(fails("z-index: 1.5"));
    }

    #[test]
    fn rotation_and_scale() {
        assert_eq!(
            value_of("rotate: 90deg"),
            StyleValue::Rotation(Quat::from_rotation_z(90.0))
        );
        assert_eq!(value_of("scale: 2"), StyleValue::Vec2(Vec2::new(2.0, 2.0)));
        assert_eq!(value_of("scale: 1 0.5"), StyleValue::Vec2(Vec2::new(1.0, 0.5)));
    }

    #[test]
    fn content_text() {
        assert_eq!(value_of("content: '→'"), StyleValue::text("→"));
        assert_eq!(value_of("content: none"), StyleValue::keyword("none"));
    }

    #[test]
    fn shadows() {
        let StyleValue::ShadowList(list) = value_of("box-shadow: 1px 2px 3px red, inset 0 0 4px 1px")
        else {
            panic!("expected a shadow list");
        };
        let shadows = list.to_vec();
        assert_eq!(shadows.len(), 2);
        assert_eq!(shadows[0].offset, Vec2::new(1.0, 2.0));
        assert_eq!(shadows[0].blur, 3.0);
        assert_eq!(shadows[0].color, Color::rgb8(255, 0, 0));
        assert!(shadows[1].inset);
        assert_eq!(shadows[1].spread, 1.0);
        assert_eq!(shadows[1].color, Color::BLACK);

        let StyleValue::ShadowList(none) = value_of("box-shadow: none") else {
            panic!("expected a shadow list");
        };
        assert!(none.is_empty());
    }

    // ── Shorthands ───────────────────────────────────────────────────

    #[test]
    fn margin_shorthand_expands() {
        let parsed = parse_one("margin: 1px 2px 3px");
        let names: Vec<_> = parsed.iter().map(|(d, _)| d.name).collect();
        assert_eq!(names, ["margin-top", "margin-right", "margin-bottom", "margin-left"]);
        assert_eq!(parsed[1].1, StyleValue::Length(Scalar::point(2.0)));
        assert_eq!(parsed[3].1, StyleValue::Length(Scalar::point(2.0)));
        assert_eq!(parsed[2].1, StyleValue::Length(Scalar::point(3.0)));
    }

    #[test]
    fn padding_shorthand_rejects_auto() {
        assert!(fails("padding: auto"));
        assert_eq!(parse_one("padding: 4px").len(), 4);
    }

    #[test]
    fn gap_shorthand() {
        let parsed = parse_one("gap: 4px 8px");
        assert_eq!(parsed[0].0.name, "row-gap");
        assert_eq!(parsed[1].1, StyleValue::Length(Scalar::point(8.0)));
    }

    #[test]
    fn scalar_box_arities() {
        let v = |n: f32| DeclarationValue::Dimension(n, "px".into());
        let b = parse_scalar_box("margin", &[v(1.0), v(2.0), v(3.0), v(4.0)]).unwrap();
        assert_eq!(b.left, Scalar::point(4.0));
        assert!(parse_scalar_box("margin", &[]).is_err());
        assert!(parse_scalar_box("margin", &vec![v(1.0); 5]).is_err());
    }
}
