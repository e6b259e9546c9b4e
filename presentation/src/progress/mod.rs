//! Progress display while a query is pending

pub mod spinner;
