mod record;
pub use record::RecordBridge;

mod schema;
pub use schema::SchemaBridge;
