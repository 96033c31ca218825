//! decode::types
//!
//! Field type grammar.
//!
//! # Type descriptors
//!
//! A descriptor is a list whose first element is a marker:
//!
//! | Marker | Shape              | Result                                       |
//! |--------|--------------------|----------------------------------------------|
//! | `#`    | `{"#",<id>}`       | `Reference`                                  |
//! | `B`    | `{"B"}`            | `Boolean`                                    |
//! | `S`    | `{"S"[,len,var]}`  | `String`; `var == 0` means fixed length      |
//! | `N`    | `{"N",len,prec,s}` | `Numeric`; `s == 0` means non-negative       |
//! | `D`    | `{"D"[,"D"/"T"]}`  | `DateTime` with kind Date / Time / DateTime  |
//!
//! Any other marker is `UnknownFormat`.
//!
//! # Type lists
//!
//! A field's type list comes in two shapes, told apart by the first
//! element:
//!
//! ```text
//! {"Pattern", <descriptor>, <descriptor>, ...}
//! {<tag>, <count>, <descriptor> x count, ...}
//! ```

use super::identity::object_id;
use super::layout::type_list as offsets;
use super::DecodeError;
use crate::core::model::{DateTimeKind, TypeDescriptor};
use crate::tree::{Cursor, Node};

/// Leading element of the uncounted type list shape.
pub const PATTERN_MARKER: &str = "Pattern";

/// Shape of a type list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeListShape {
    /// `{"Pattern", d1, d2, ...}`: every element after the marker.
    Pattern,
    /// `{tag, n, d1, .., dn}`: explicit count.
    Counted,
}

impl TypeListShape {
    /// Select the shape by inspecting the first element.
    pub fn of(list: &Cursor<'_>) -> Self {
        let is_pattern = list
            .at(offsets::MARKER)
            .ok()
            .and_then(|marker| marker.as_str().ok())
            == Some(PATTERN_MARKER);
        if is_pattern {
            TypeListShape::Pattern
        } else {
            TypeListShape::Counted
        }
    }
}

/// Decode a field type list in either shape.
pub fn decode_type_list(list: &Cursor<'_>) -> Result<Vec<TypeDescriptor>, DecodeError> {
    let (first, count) = match TypeListShape::of(list) {
        TypeListShape::Pattern => (
            offsets::FIRST_PATTERN,
            list.child_count().saturating_sub(offsets::FIRST_PATTERN),
        ),
        TypeListShape::Counted => (
            offsets::FIRST_COUNTED,
            list.at(offsets::COUNT)?.as_count()?,
        ),
    };

    (first..first + count)
        .map(|i| decode_type(&list.at(&[i])?))
        .collect()
}

/// Decode a single type descriptor.
pub fn decode_type(node: &Cursor<'_>) -> Result<TypeDescriptor, DecodeError> {
    let marker = node.at(&[0])?.as_str()?;
    let has_details = node.child_count() > 1;

    match marker {
        "#" => Ok(TypeDescriptor::Reference {
            target: object_id(&node.at(&[1])?)?,
        }),
        "B" => Ok(TypeDescriptor::Boolean),
        "S" if has_details => Ok(TypeDescriptor::String {
            max_length: as_u32(node, 1)?,
            fixed_length: node.at(&[2])?.as_int()? == 0,
        }),
        "S" => Ok(TypeDescriptor::String {
            max_length: 0,
            fixed_length: false,
        }),
        "N" => Ok(TypeDescriptor::Numeric {
            length: as_u32(node, 1)?,
            precision: as_u32(node, 2)?,
            non_negative: node.at(&[3])?.as_int()? == 0,
        }),
        "D" if has_details => {
            let kind = match node.at(&[1])?.as_str()? {
                "D" => DateTimeKind::Date,
                "T" => DateTimeKind::Time,
                other => {
                    return Err(DecodeError::UnknownFormat(format!(
                        "unknown date-time kind marker {:?} at {}",
                        other,
                        node.path()
                    )))
                }
            };
            Ok(TypeDescriptor::DateTime { kind })
        }
        "D" => Ok(TypeDescriptor::DateTime {
            kind: DateTimeKind::DateTime,
        }),
        other => Err(DecodeError::UnknownFormat(format!(
            "unknown type marker {:?} at {}",
            other,
            node.path()
        ))),
    }
}

fn as_u32(node: &Cursor<'_>, index: usize) -> Result<u32, DecodeError> {
    let value = node.at(&[index])?;
    let count = value.as_count()?;
    u32::try_from(count).map_err(|_| DecodeError::TypeMismatch {
        path: value.path().clone(),
        expected: "32-bit length",
        found: count.to_string(),
    })
}

/// Encode a descriptor in the stored grammar.
///
/// Strings and numbers are written with explicit details, so
/// `decode_type(encode_type(t)) == t` for every descriptor.
pub fn encode_type(descriptor: &TypeDescriptor) -> Node {
    let s = |v: &str| Node::Str(v.to_string());
    let n = |v: u32| Node::Atom(v.to_string());
    let flag = |set: bool| Node::Atom(if set { "0" } else { "1" }.to_string());

    let items = match descriptor {
        TypeDescriptor::Boolean => vec![s("B")],
        TypeDescriptor::String {
            max_length,
            fixed_length,
        } => vec![s("S"), n(*max_length), flag(*fixed_length)],
        TypeDescriptor::Numeric {
            length,
            precision,
            non_negative,
        } => vec![s("N"), n(*length), n(*precision), flag(*non_negative)],
        TypeDescriptor::DateTime { kind } => match kind {
            DateTimeKind::Date => vec![s("D"), s("D")],
            DateTimeKind::Time => vec![s("D"), s("T")],
            DateTimeKind::DateTime => vec![s("D")],
        },
        TypeDescriptor::Reference { target } => {
            vec![s("#"), Node::Atom(target.as_str().to_string())]
        }
    };
    Node::List(items)
}
