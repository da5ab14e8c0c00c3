pub mod converge;
pub mod render;
