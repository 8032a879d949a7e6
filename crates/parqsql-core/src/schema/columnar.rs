use crate::{Error, Result};

/// Primitive on-disk storage kind of a columnar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalKind {
    Boolean,
    Int32,
    Int64,
    /// Legacy 12-byte timestamp: nanoseconds of day followed by a Julian day
    Int96,
    Float,
    Double,
    Binary,
    /// Fixed-length bytes of the given length
    FixedLenByteArray(i32),
}

/// Unit of a timestamp or time annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Millis,
    Micros,
    Nanos,
}

/// Semantic annotation refining a [`PhysicalKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Logical {
    /// UTF-8 text
    String,

    Enum,

    Json,

    Uuid,

    /// A point in time. `utc` is the adjusted-to-UTC flag.
    Timestamp { unit: TimeUnit, utc: bool },

    /// Time of day
    Time { unit: TimeUnit, utc: bool },

    /// Days since the Unix epoch
    Date,

    /// Integer narrower than (or unsigned unlike) its physical kind
    Int { bit_width: u8, signed: bool },

    /// `unscaled / 10^scale`
    Decimal { scale: u32, precision: u32 },
}

/// Type of one columnar column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnarType {
    pub name: String,
    pub physical: PhysicalKind,
    pub logical: Option<Logical>,
    pub nullable: bool,
}

/// Ordered set of columnar column types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnarSchema {
    /// Name of the message (table) the columns belong to
    pub name: String,
    pub columns: Vec<ColumnarType>,
}

impl ColumnarType {
    /// A nullable column with no logical annotation.
    pub fn new(name: impl Into<String>, physical: PhysicalKind) -> ColumnarType {
        ColumnarType {
            name: name.into(),
            physical,
            logical: None,
            nullable: true,
        }
    }

    pub fn with_logical(mut self, logical: Logical) -> Self {
        self.logical = Some(logical);
        self
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Checks that the physical kind can hold the logical annotation.
    pub fn verify(&self) -> Result<()> {
        let Some(logical) = self.logical else {
            return Ok(());
        };

        let ok = match logical {
            Logical::String | Logical::Enum | Logical::Json => {
                self.physical == PhysicalKind::Binary
            }
            Logical::Uuid => self.physical == PhysicalKind::FixedLenByteArray(16),
            Logical::Timestamp { .. } => self.physical == PhysicalKind::Int64,
            Logical::Time { unit, .. } => match unit {
                TimeUnit::Millis => self.physical == PhysicalKind::Int32,
                TimeUnit::Micros | TimeUnit::Nanos => self.physical == PhysicalKind::Int64,
            },
            Logical::Date => self.physical == PhysicalKind::Int32,
            Logical::Int { bit_width, .. } => match bit_width {
                8 | 16 | 32 => self.physical == PhysicalKind::Int32,
                64 => self.physical == PhysicalKind::Int64,
                _ => false,
            },
            Logical::Decimal { scale, precision } => {
                precision > 0
                    && scale <= precision
                    && match self.physical {
                        PhysicalKind::Int32 => precision <= super::decimal::MAX_INT32_PRECISION,
                        PhysicalKind::Int64 => precision <= super::decimal::MAX_INT64_PRECISION,
                        PhysicalKind::Binary | PhysicalKind::FixedLenByteArray(_) => true,
                        _ => false,
                    }
            }
        };

        if ok {
            Ok(())
        } else {
            Err(Error::invalid_schema(format!(
                "column `{}`: {} cannot be stored as {}",
                self.name, logical, self.physical
            )))
        }
    }
}

impl ColumnarSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnarType>) -> ColumnarSchema {
        ColumnarSchema {
            name: name.into(),
            columns,
        }
    }

    /// Looks up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnarType> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Verifies every column.
    pub fn verify(&self) -> Result<()> {
        for column in &self.columns {
            column.verify()?;
        }
        Ok(())
    }
}

impl core::fmt::Display for PhysicalKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            PhysicalKind::Boolean => f.write_str("BOOLEAN"),
            PhysicalKind::Int32 => f.write_str("INT32"),
            PhysicalKind::Int64 => f.write_str("INT64"),
            PhysicalKind::Int96 => f.write_str("INT96"),
            PhysicalKind::Float => f.write_str("FLOAT"),
            PhysicalKind::Double => f.write_str("DOUBLE"),
            PhysicalKind::Binary => f.write_str("BINARY"),
            PhysicalKind::FixedLenByteArray(len) => write!(f, "FIXED_LEN_BYTE_ARRAY({len})"),
        }
    }
}

impl core::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            TimeUnit::Millis => "MILLIS",
            TimeUnit::Micros => "MICROS",
            TimeUnit::Nanos => "NANOS",
        })
    }
}

impl core::fmt::Display for Logical {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Logical::String => f.write_str("STRING"),
            Logical::Enum => f.write_str("ENUM"),
            Logical::Json => f.write_str("JSON"),
            Logical::Uuid => f.write_str("UUID"),
            Logical::Timestamp { unit, .. } => write!(f, "TIMESTAMP({unit})"),
            Logical::Time { unit, .. } => write!(f, "TIME({unit})"),
            Logical::Date => f.write_str("DATE"),
            Logical::Int { bit_width, signed } => write!(f, "INT({bit_width},{signed})"),
            Logical::Decimal { scale, precision } => write!(f, "DECIMAL({precision},{scale})"),
        }
    }
}

impl core::fmt::Display for ColumnarType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.logical {
            Some(logical) => write!(f, "{} ({logical})", self.physical),
            None => write!(f, "{}", self.physical),
        }
    }
}
