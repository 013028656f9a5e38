pub mod crew;
pub mod timeline;
