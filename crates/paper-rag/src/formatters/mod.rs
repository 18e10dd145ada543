//! Output formatters for Markdown and HTML.

mod html;
mod markdown;

pub use self::html::*;
pub use markdown::*;
