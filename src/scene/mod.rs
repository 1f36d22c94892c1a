pub mod model;
pub mod picker;
