pub mod fee;
pub mod schedule;
