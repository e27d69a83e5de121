//! Numeric field parsing.
//!
//! Every number in a project file is stored as decimal text, either as the
//! text of a child element or as an attribute value.

use thiserror::Error;

/// What was wrong with a numeric field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldProblem {
    /// The element or attribute is absent or blank.
    #[error("value is missing")]
    Missing,

    /// The text is not a decimal unsigned 32-bit integer.
    #[error("{0:?} is not a decimal unsigned 32-bit integer")]
    Invalid(String),

    /// The value is larger than its packed field allows.
    #[error("{value} does not fit in {bits} bits")]
    TooWide { value: u32, bits: u32 },
}

/// A numeric project field that could not be transcoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field {field} in {scope}: {problem}")]
pub struct FieldParseError {
    /// Where the field lives, e.g. `Header` or `ARM9Ovt/RomOVT[3]`.
    pub scope: String,
    /// Element or attribute name.
    pub field: &'static str,
    /// The problem found.
    pub problem: FieldProblem,
}

impl FieldParseError {
    /// Create a new field error.
    pub fn new(scope: impl Into<String>, field: &'static str, problem: FieldProblem) -> Self {
        Self {
            scope: scope.into(),
            field,
            problem,
        }
    }
}

/// Parse decimal text as a `u32`.
///
/// Surrounding whitespace is ignored. `None` and blank text are
/// [`FieldProblem::Missing`]; signs other than `+`, hex prefixes and
/// out-of-range values are [`FieldProblem::Invalid`].
pub fn parse_u32(text: Option<&str>) -> Result<u32, FieldProblem> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(FieldProblem::Missing);
    }
    text.parse::<u32>()
        .map_err(|_| FieldProblem::Invalid(text.to_string()))
}

/// Check that `value` fits in the low `bits` bits.
pub(crate) fn check_width(value: u32, bits: u32) -> Result<u32, FieldProblem> {
    if bits < 32 && value >> bits != 0 {
        return Err(FieldProblem::TooWide { value, bits });
    }
    Ok(value)
}
