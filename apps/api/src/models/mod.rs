pub mod candidate;
pub mod email;
