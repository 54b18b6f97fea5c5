pub mod conflation;
pub mod normalize;
pub mod partition;
