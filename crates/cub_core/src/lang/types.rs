//! Primitive type vocabulary.
//!
//! Primitive type names are scanned as `TYPE` tokens rather than identifiers. That distinction is
//! what lets the disambiguator treat `u8 x;` and `Thing x;` differently in expression position.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `void` is a primitive type name here; the grammar rejects `void` variables later.
//!
//! ## Examples
//! ```rust
//! use cub_core::lang::types::{self, PrimitiveType};
//!
//! assert_eq!(types::from_str("u32"), Some(PrimitiveType::U32));
//! assert_eq!(types::smallest_unsigned_for(300), PrimitiveType::U16);
//! ```

/// Stable identifier for each primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    F32,
    F64,
    F128,
    S8,
    S16,
    S32,
    S64,
    U8,
    U16,
    U32,
    U64,
    String,
    Void,
}

/// Metadata for a primitive type.
#[derive(Debug, Clone, Copy)]
pub struct PrimitiveTypeInfo {
    pub id: PrimitiveType,
    pub canonical: &'static str,
}

/// Registry of primitive types.
pub const PRIMITIVE_TYPES: &[PrimitiveTypeInfo] = &[
    info(PrimitiveType::Bool, "bool"),
    info(PrimitiveType::F32, "f32"),
    info(PrimitiveType::F64, "f64"),
    info(PrimitiveType::F128, "f128"),
    info(PrimitiveType::S8, "s8"),
    info(PrimitiveType::S16, "s16"),
    info(PrimitiveType::S32, "s32"),
    info(PrimitiveType::S64, "s64"),
    info(PrimitiveType::U8, "u8"),
    info(PrimitiveType::U16, "u16"),
    info(PrimitiveType::U32, "u32"),
    info(PrimitiveType::U64, "u64"),
    info(PrimitiveType::String, "string"),
    info(PrimitiveType::Void, "void"),
];

/// Canonical spelling.
pub fn as_str(id: PrimitiveType) -> &'static str {
    info_for(id).canonical
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PrimitiveType) -> &'static PrimitiveTypeInfo {
    PRIMITIVE_TYPES
        .iter()
        .find(|t| t.id == id)
        .expect("INVARIANT: every PrimitiveType has a PRIMITIVE_TYPES entry")
}

/// Resolve a type name to a [`PrimitiveType`].
pub fn from_str(name: &str) -> Option<PrimitiveType> {
    PRIMITIVE_TYPES.iter().find(|t| t.canonical == name).map(|t| t.id)
}

/// Pick the narrowest unsigned type able to hold `value`.
///
/// Integer literals are typed this way before any contextual conversion.
pub fn smallest_unsigned_for(value: u64) -> PrimitiveType {
    match 64 - value.leading_zeros() {
        0..=8 => PrimitiveType::U8,
        9..=16 => PrimitiveType::U16,
        17..=32 => PrimitiveType::U32,
        _ => PrimitiveType::U64,
    }
}

// --- helpers -----------------------------------------------------------------

const fn info(id: PrimitiveType, canonical: &'static str) -> PrimitiveTypeInfo {
    PrimitiveTypeInfo { id, canonical }
}
