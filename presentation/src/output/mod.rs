//! Output formatting for tool results

pub mod formatter;
pub mod markdown;
pub mod tool_result;

pub use formatter::OutputFormatter;
pub use markdown::MarkdownFormatter;
pub use tool_result::ToolResultFormatter;
