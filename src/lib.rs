pub mod fetch;
pub mod loader;
pub mod model;
pub mod output;
pub mod scale;
pub mod traffic;
