pub mod global;
pub mod model;


pub use global::CONFIG;
