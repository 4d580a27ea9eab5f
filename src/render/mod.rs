//! Rendering of laid-out pages to Markdown, and JSON export of primitives.

mod json;
mod markdown;
mod options;
mod result;
mod table;

pub use json::{to_json, JsonFormat};
pub use markdown::{
    join_pages, render_elements, to_markdown, to_markdown_with_stats, MarkdownRenderer,
    PAGE_SEPARATOR, SOFT_BREAK,
};
pub use options::{PageSelection, RenderOptions};
pub use result::{RenderResult, RenderStats};
pub use table::{clean_cell, table_to_markdown};
