pub mod detection;
pub mod pipeline;
pub mod visualization;
