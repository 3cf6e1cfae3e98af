pub mod job;
pub mod skills;
