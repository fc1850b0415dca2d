pub mod fallback;
pub mod learned;
