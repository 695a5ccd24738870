use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown {table} value: {value}")]
    UnknownReference { table: &'static str, value: String },
}
