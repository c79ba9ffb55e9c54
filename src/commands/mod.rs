pub mod qc;
pub mod schema;
