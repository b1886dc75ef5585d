//! Decision logic: the rule-based risk scorer and the model-serving adapter.
//!
//! Everything here is framework-free - the HTTP layer in `handlers` composes
//! these pieces but neither side depends on the other's types beyond the
//! results they produce.

pub mod risk;
pub mod serving;
