pub mod analyze;
pub mod sections;
