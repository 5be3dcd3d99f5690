//! Terminal plotting.

pub mod gauge;

pub use gauge::render_ascii_gauge;
