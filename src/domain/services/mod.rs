mod chat_session;
mod code_blocks;
mod orchestrator;
mod page;
mod renderer;
mod syntaxes;
mod themes;
mod webview;

pub use chat_session::*;
pub use code_blocks::*;
pub use orchestrator::*;
pub use page::*;
pub use renderer::*;
pub use syntaxes::*;
pub use themes::*;
pub use webview::*;
