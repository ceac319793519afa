//! Placeholder substitution for content text

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::ContentItem;

lazy_static! {
    static ref PLACEHOLDER: Regex =
        Regex::new(r"\{(name1|name2|relationship|memory|message)\}").unwrap();
}

/// Answers collected by the visitor form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name1: String,
    pub name2: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub favorite_memory: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
}

impl FormData {
    pub fn new(
        name1: impl Into<String>,
        name2: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            name1: name1.into(),
            name2: name2.into(),
            relationship: relationship.into(),
            ..Default::default()
        }
    }

    /// Value for a placeholder name, empty when unset
    fn value(&self, token: &str) -> &str {
        match token {
            "name1" => &self.name1,
            "name2" => &self.name2,
            "relationship" => &self.relationship,
            "memory" => self.favorite_memory.as_deref().unwrap_or(""),
            "message" => self.message.as_deref().unwrap_or(""),
            _ => "",
        }
    }
}

/// Replace every known placeholder in `text` with the form value.
///
/// Runs in a single pass, so substituted values are never scanned again.
pub fn substitute(text: &str, form: &FormData) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| form.value(&caps[1]).to_string())
        .into_owned()
}

/// Personalized body of a content item
pub fn render(item: &ContentItem, form: &FormData) -> String {
    substitute(&item.content, form)
}
