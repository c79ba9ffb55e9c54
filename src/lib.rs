pub mod cli;
pub mod commands;
pub mod qc;
pub mod schema;
pub mod table;
pub mod utils;
