use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Locales carried by every label in a form definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::PtBr => "pt-BR",
            Locale::En => "en",
        }
    }
}

/// Error returned when parsing an unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown locale `{0}`")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input {
            "pt-BR" => Ok(Locale::PtBr),
            "en" => Ok(Locale::En),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

/// Display text carried either as one plain string or per locale.
///
/// The per-locale form requires both locale keys; a document carrying only
/// one of them is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    PerLocale {
        #[serde(rename = "pt-BR")]
        pt_br: String,
        en: String,
    },
}

impl LocalizedText {
    /// Text for the requested locale. Plain text serves every locale.
    pub fn resolve(&self, locale: Locale) -> &str {
        match self {
            LocalizedText::Plain(text) => text,
            LocalizedText::PerLocale { pt_br, en } => match locale {
                Locale::PtBr => pt_br,
                Locale::En => en,
            },
        }
    }
}

impl From<&str> for LocalizedText {
    fn from(text: &str) -> Self {
        LocalizedText::Plain(text.to_string())
    }
}

impl From<String> for LocalizedText {
    fn from(text: String) -> Self {
        LocalizedText::Plain(text)
    }
}
