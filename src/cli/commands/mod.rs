pub mod check;
pub mod notes;
pub mod solve;
