pub mod hr;
pub mod resume;
pub mod user;
