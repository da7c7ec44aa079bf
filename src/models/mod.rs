pub mod migration;
pub mod month;
pub mod student;
