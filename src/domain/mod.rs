pub mod models;
pub mod stress;
