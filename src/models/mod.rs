pub mod case;
pub mod document;
pub mod drafting;

pub use case::*;
pub use document::*;
pub use drafting::*;
