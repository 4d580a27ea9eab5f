//! Page-primitive model.
//!
//! These types are the contract between a page-primitive extractor and the
//! layout core: positioned words and located tables, per page.

mod document;
mod geometry;
mod page;
mod table;
mod word;

pub use document::Document;
pub use geometry::BBox;
pub use page::PagePrimitives;
pub use table::{Cell, Grid, TableRegion};
pub use word::Word;
