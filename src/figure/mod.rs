pub mod sampler;
pub mod star;
