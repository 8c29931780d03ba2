pub mod neovim;
pub mod noop;
pub mod terminal;

use anyhow::Result;

use crate::domain::models::EditorBox;
use crate::domain::models::EditorName;

pub struct EditorManager {}

impl EditorManager {
    pub fn get(name: EditorName) -> Result<EditorBox> {
        match name {
            EditorName::Neovim => return Ok(Box::<neovim::Neovim>::default()),
            EditorName::Terminal => return Ok(Box::<terminal::Terminal>::default()),
            EditorName::None => return Ok(Box::<noop::NoopEditor>::default()),
        }
    }
}
