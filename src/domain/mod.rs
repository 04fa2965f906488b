pub mod attendance;
pub mod cascade;
pub mod departments;
pub mod error;
pub mod fees;
pub mod model;
pub mod notices;
pub mod results;
pub mod students;
pub mod subjects;
pub mod teachers;
