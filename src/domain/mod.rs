pub mod market;
pub mod plant;
pub mod request;

pub use market::*;
pub use plant::*;
pub use request::*;
