pub mod check;
pub mod quiz;
pub mod situations;
pub mod substances;
