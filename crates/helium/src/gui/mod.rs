pub mod app;
pub mod dial;
pub mod remote;
pub mod theme;
