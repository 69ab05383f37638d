pub mod address;
pub mod derived;
pub mod lifecycle;
pub mod page;
pub mod profile;
pub mod render;
pub mod surface;
