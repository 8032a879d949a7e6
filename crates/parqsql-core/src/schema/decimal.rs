//! Physical width selection for decimal columns.
//!
//! Both the schema and every value of a decimal column go through
//! [`DecimalWidth::for_precision`], so the two always agree.

use super::PhysicalKind;

/// Precision assumed when a column declares none.
pub const DEFAULT_PRECISION: u32 = 18;

/// Largest precision whose unscaled values always fit in an `i32`.
pub const MAX_INT32_PRECISION: u32 = 9;

/// Largest precision whose unscaled values always fit in an `i64`.
pub const MAX_INT64_PRECISION: u32 = 18;

/// Storage chosen for the unscaled value of a decimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalWidth {
    Int32,
    Int64,
    /// Big-endian two's-complement bytes
    Binary,
}

impl DecimalWidth {
    pub fn for_precision(precision: u32) -> DecimalWidth {
        if precision <= MAX_INT32_PRECISION {
            DecimalWidth::Int32
        } else if precision <= MAX_INT64_PRECISION {
            DecimalWidth::Int64
        } else {
            DecimalWidth::Binary
        }
    }

    pub fn physical(self) -> PhysicalKind {
        match self {
            DecimalWidth::Int32 => PhysicalKind::Int32,
            DecimalWidth::Int64 => PhysicalKind::Int64,
            DecimalWidth::Binary => PhysicalKind::Binary,
        }
    }
}

/// Declared precision if positive, [`DEFAULT_PRECISION`] otherwise.
pub fn effective_precision(declared: i32) -> u32 {
    if declared > 0 {
        declared as u32
    } else {
        DEFAULT_PRECISION
    }
}

/// Declared scale clamped at zero.
pub fn effective_scale(declared: i32) -> u32 {
    declared.max(0) as u32
}
