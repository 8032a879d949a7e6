use bigdecimal::BigDecimal;
use jiff::civil::date;
use parqsql_core::{
    async_trait,
    driver::{RelationalSink, SoftErrors},
    ColumnarOp, Field, Result, Row, SqlOp, SqlType, Value,
};
use pretty_assertions::assert_eq;

/// Records every setter call as text.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    errors: SoftErrors,
}

#[async_trait]
impl RelationalSink for Recorder {
    fn set_boolean(&mut self, index: usize, value: bool) {
        self.calls.push(format!("boolean {index} {value}"));
    }

    fn set_byte(&mut self, index: usize, value: i8) {
        self.calls.push(format!("byte {index} {value}"));
    }

    fn set_short(&mut self, index: usize, value: i16) {
        self.calls.push(format!("short {index} {value}"));
    }

    fn set_int(&mut self, index: usize, value: i32) {
        self.calls.push(format!("int {index} {value}"));
    }

    fn set_long(&mut self, index: usize, value: i64) {
        self.calls.push(format!("long {index} {value}"));
    }

    fn set_float(&mut self, index: usize, value: f32) {
        self.calls.push(format!("float {index} {value}"));
    }

    fn set_double(&mut self, index: usize, value: f64) {
        self.calls.push(format!("double {index} {value}"));
    }

    fn set_decimal(&mut self, index: usize, value: &BigDecimal) {
        self.calls.push(format!("decimal {index} {value}"));
    }

    fn set_string(&mut self, index: usize, value: &str) {
        self.calls.push(format!("string {index} {value}"));
    }

    fn set_bytes(&mut self, index: usize, value: &[u8]) {
        self.calls.push(format!("bytes {index} {value:?}"));
    }

    fn set_date(&mut self, index: usize, value: jiff::civil::Date) {
        self.calls.push(format!("date {index} {value}"));
    }

    fn set_timestamp(&mut self, index: usize, value: jiff::Timestamp) {
        self.calls.push(format!("timestamp {index} {value}"));
    }

    fn set_object(&mut self, index: usize, value: &Value) {
        if let Value::Bool(_) = value {
            self.errors.push(index, "booleans are not objects");
        }
        self.calls.push(format!("object {index} {value:?}"));
    }

    fn set_null(&mut self, index: usize, ty: SqlType) {
        self.calls.push(format!("null {index} {ty}"));
    }

    fn add_batch(&mut self) -> Result<()> {
        self.errors.take()
    }

    async fn execute_batch(&mut self) -> Result<usize> {
        Ok(0)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn row_binds_fields_in_order() {
    let row = Row::new(vec![
        Field::new("username", "Robert", SqlOp::String),
        Field::new("value", 7_i32, SqlOp::Int),
        Field::null("comment", SqlOp::Null(SqlType::VARCHAR)),
        Field::new("born", date(1990, 4, 2), SqlOp::Date),
        Field::null("extra", SqlOp::NullObject),
    ]);

    let mut sink = Recorder::default();
    row.apply(&mut sink);

    assert_eq!(
        sink.calls,
        [
            "string 1 Robert",
            "int 2 7",
            "null 3 VARCHAR",
            "date 4 1990-04-02",
            "object 5 Null",
        ]
    );
    assert!(sink.add_batch().is_ok());
}

#[test]
fn mismatched_value_goes_through_object_setter() {
    let mut sink = Recorder::default();
    Field::new("value", 7_i64, SqlOp::Int).apply(&mut sink, 1);
    assert_eq!(sink.calls, ["object 1 I64(7)"]);
}

#[test]
fn soft_errors_surface_at_add_batch() {
    let mut sink = Recorder::default();
    Field::new("flag", true, SqlOp::Object).apply(&mut sink, 1);
    Field::new("other", false, SqlOp::Object).apply(&mut sink, 2);

    let err = sink.add_batch().unwrap_err();
    assert!(err.is_sink_apply());
    assert_eq!(err.sink_apply_errors().unwrap().len(), 2);

    // the next row starts clean
    assert!(sink.add_batch().is_ok());
}

#[test]
fn columnar_field_writes_physical_value() {
    let mut out: Vec<Value> = vec![];

    Field::new("a", 1_i32, ColumnarOp::Int32).apply(&mut out).unwrap();
    Field::new("b", "hi", ColumnarOp::Binary).apply(&mut out).unwrap();
    Field::<ColumnarOp>::skip("c").apply(&mut out).unwrap();
    Field::new("d", 2.5_f64, ColumnarOp::Double).apply(&mut out).unwrap();

    assert_eq!(
        out,
        [Value::I32(1), Value::Bytes(b"hi".to_vec()), Value::F64(2.5)]
    );
}

#[test]
fn columnar_field_rejects_mismatched_value() {
    let mut out: Vec<Value> = vec![];
    let err = Field::new("a", "text", ColumnarOp::Int32)
        .apply(&mut out)
        .unwrap_err();

    assert!(err.is_convert());
    assert_eq!(
        err.to_string(),
        "cannot convert field `a`: Int32 cannot write a string value"
    );
    assert!(out.is_empty());
}
