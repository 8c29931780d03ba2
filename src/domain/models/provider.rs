use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ProviderName {
    Gemini,
    Claude,
    Ollama,
}

impl ProviderName {
    pub fn parse(text: &str) -> Option<ProviderName> {
        return ProviderName::iter().find(|e| return e.to_string() == text);
    }

    /// Ollama runs locally and is the only provider usable without an API key.
    pub fn requires_api_key(&self) -> bool {
        return *self != ProviderName::Ollama;
    }
}
