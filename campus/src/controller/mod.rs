pub mod root;
pub mod student;
