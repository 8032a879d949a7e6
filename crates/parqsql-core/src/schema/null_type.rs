use super::{ColumnarType, Logical, PhysicalKind, SqlType};
use crate::field::SqlOp;

impl ColumnarType {
    /// The setter used to bind a null for this column.
    ///
    /// Every column gets one. Combinations with no relational counterpart
    /// fall back to an untyped null, which some drivers bind slowly.
    pub fn null_op(&self) -> SqlOp {
        let ty = match (self.logical, self.physical) {
            (Some(Logical::String), _) => SqlType::VARCHAR,
            (Some(Logical::Timestamp { .. }), _) => SqlType::TIMESTAMP,
            (Some(Logical::Date), _) => SqlType::DATE,
            (Some(Logical::Int { .. }), _) => SqlType::NUMERIC,
            (Some(Logical::Decimal { .. }), _) => SqlType::DECIMAL,
            (None, PhysicalKind::Double) => SqlType::DECIMAL,
            (None, PhysicalKind::Float) => SqlType::FLOAT,
            (None, PhysicalKind::Boolean) => SqlType::BOOLEAN,
            (None, PhysicalKind::Int32) => SqlType::INTEGER,
            (None, PhysicalKind::Int64) => SqlType::NUMERIC,
            (None, PhysicalKind::Int96) => SqlType::TIMESTAMP,
            _ => {
                log::debug!(
                    "column `{}` of type {self} has no typed null; binding untyped nulls may be slow",
                    self.name
                );
                return SqlOp::NullObject;
            }
        };
        SqlOp::Null(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TimeUnit;

    #[test]
    fn null_typing_table() {
        let cases = [
            (ColumnarType::new("a", PhysicalKind::Double), SqlOp::Null(SqlType::DECIMAL)),
            (ColumnarType::new("b", PhysicalKind::Float), SqlOp::Null(SqlType::FLOAT)),
            (ColumnarType::new("c", PhysicalKind::Boolean), SqlOp::Null(SqlType::BOOLEAN)),
            (ColumnarType::new("d", PhysicalKind::Int32), SqlOp::Null(SqlType::INTEGER)),
            (ColumnarType::new("e", PhysicalKind::Int64), SqlOp::Null(SqlType::NUMERIC)),
            (ColumnarType::new("f", PhysicalKind::Int96), SqlOp::Null(SqlType::TIMESTAMP)),
            (
                ColumnarType::new("g", PhysicalKind::Binary).with_logical(Logical::String),
                SqlOp::Null(SqlType::VARCHAR),
            ),
            (
                ColumnarType::new("h", PhysicalKind::Int64).with_logical(Logical::Timestamp {
                    unit: TimeUnit::Micros,
                    utc: false,
                }),
                SqlOp::Null(SqlType::TIMESTAMP),
            ),
            (
                ColumnarType::new("i", PhysicalKind::Int32).with_logical(Logical::Date),
                SqlOp::Null(SqlType::DATE),
            ),
            (
                ColumnarType::new("j", PhysicalKind::Int32).with_logical(Logical::Int {
                    bit_width: 16,
                    signed: true,
                }),
                SqlOp::Null(SqlType::NUMERIC),
            ),
            (
                ColumnarType::new("k", PhysicalKind::Binary).with_logical(Logical::Decimal {
                    scale: 2,
                    precision: 30,
                }),
                SqlOp::Null(SqlType::DECIMAL),
            ),
        ];

        for (ty, expected) in cases {
            assert_eq!(ty.null_op(), expected, "{ty}");
        }
    }

    #[test]
    fn unknown_combinations_fall_back() {
        let cases = [
            ColumnarType::new("a", PhysicalKind::Binary),
            ColumnarType::new("b", PhysicalKind::FixedLenByteArray(16)).with_logical(Logical::Uuid),
            ColumnarType::new("c", PhysicalKind::Binary).with_logical(Logical::Json),
            ColumnarType::new("d", PhysicalKind::Binary).with_logical(Logical::Enum),
            ColumnarType::new("e", PhysicalKind::Int64).with_logical(Logical::Time {
                unit: TimeUnit::Micros,
                utc: true,
            }),
        ];

        for ty in cases {
            assert_eq!(ty.null_op(), SqlOp::NullObject, "{ty}");
        }
    }
}
