/// A relational column type code.
///
/// The codes are the ones relational drivers conventionally report for result
/// columns (the `java.sql.Types` numbering), so metadata captured from any
/// driver can be carried without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SqlType(pub i32);

impl SqlType {
    pub const BIT: SqlType = SqlType(-7);
    pub const TINYINT: SqlType = SqlType(-6);
    pub const SMALLINT: SqlType = SqlType(5);
    pub const INTEGER: SqlType = SqlType(4);
    pub const BIGINT: SqlType = SqlType(-5);
    pub const FLOAT: SqlType = SqlType(6);
    pub const REAL: SqlType = SqlType(7);
    pub const DOUBLE: SqlType = SqlType(8);
    pub const NUMERIC: SqlType = SqlType(2);
    pub const DECIMAL: SqlType = SqlType(3);
    pub const CHAR: SqlType = SqlType(1);
    pub const VARCHAR: SqlType = SqlType(12);
    pub const LONGVARCHAR: SqlType = SqlType(-1);
    pub const DATE: SqlType = SqlType(91);
    pub const TIME: SqlType = SqlType(92);
    pub const TIMESTAMP: SqlType = SqlType(93);
    pub const BINARY: SqlType = SqlType(-2);
    pub const VARBINARY: SqlType = SqlType(-3);
    pub const LONGVARBINARY: SqlType = SqlType(-4);
    pub const NULL: SqlType = SqlType(0);
    pub const OTHER: SqlType = SqlType(1111);
    pub const BLOB: SqlType = SqlType(2004);
    pub const CLOB: SqlType = SqlType(2005);
    pub const BOOLEAN: SqlType = SqlType(16);

    /// The conventional name of the type code, if it is a known one.
    pub fn name(self) -> Option<&'static str> {
        Some(match self {
            SqlType::BIT => "BIT",
            SqlType::TINYINT => "TINYINT",
            SqlType::SMALLINT => "SMALLINT",
            SqlType::INTEGER => "INTEGER",
            SqlType::BIGINT => "BIGINT",
            SqlType::FLOAT => "FLOAT",
            SqlType::REAL => "REAL",
            SqlType::DOUBLE => "DOUBLE",
            SqlType::NUMERIC => "NUMERIC",
            SqlType::DECIMAL => "DECIMAL",
            SqlType::CHAR => "CHAR",
            SqlType::VARCHAR => "VARCHAR",
            SqlType::LONGVARCHAR => "LONGVARCHAR",
            SqlType::DATE => "DATE",
            SqlType::TIME => "TIME",
            SqlType::TIMESTAMP => "TIMESTAMP",
            SqlType::BINARY => "BINARY",
            SqlType::VARBINARY => "VARBINARY",
            SqlType::LONGVARBINARY => "LONGVARBINARY",
            SqlType::NULL => "NULL",
            SqlType::OTHER => "OTHER",
            SqlType::BLOB => "BLOB",
            SqlType::CLOB => "CLOB",
            SqlType::BOOLEAN => "BOOLEAN",
            _ => return None,
        })
    }
}

impl core::fmt::Display for SqlType {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "SqlType({})", self.0),
        }
    }
}
