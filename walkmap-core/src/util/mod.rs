pub mod sequence;
pub mod timeout;
