pub mod analysis;
pub mod consts;
pub mod error;
pub mod inference;
pub mod layout;
pub mod merge;
pub mod parse;

// Re-export commonly used types
pub use layout::{
    document::{GroundingResult, LayoutDocument},
    element::Block,
};
pub use merge::{MergeOptions, merge_picture};
pub use parse::parser::{PageParser, ParserConfig};
