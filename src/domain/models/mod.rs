mod composer;
mod context;
mod editor;
mod engine;
mod event;
mod file_link;
mod markdown;
mod message;
mod provider;
mod role;
mod slash_commands;
mod status;
mod surface;

pub use composer::*;
pub use context::*;
pub use editor::*;
pub use engine::*;
pub use event::*;
pub use file_link::*;
pub use markdown::*;
pub use message::*;
pub use provider::*;
pub use role::*;
pub use slash_commands::*;
pub use status::*;
pub use surface::*;
