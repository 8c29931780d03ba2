use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Thinking,
    Error,
}

impl Status {
    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => return "Ready",
            Status::Thinking => return "Processing...",
            Status::Error => return "Error",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Status::Idle => return "#16825d",
            Status::Thinking => return "#0078d4",
            Status::Error => return "#e51400",
        }
    }
}
