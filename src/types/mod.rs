//! Data types for the dataset pipeline
//!
//! Plain value types shared by the loader, the vocabularies and the graph builder.

mod split;
mod token;
mod triple;

pub use split::Split;
pub use token::{TokenKind, OOV_INDEX, OOV_TOKEN, PAD_INDEX, PAD_TOKEN, RESERVED_COUNT};
pub use triple::{IndexedTriple, Triple};
