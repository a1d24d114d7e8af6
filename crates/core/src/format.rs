//! Serialization adapter: document files <-> document records

use crate::document::Document;
use crate::error::CodecError;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// On-disk text format of a document file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the parser for a source file from its extension
    ///
    /// `.yml` and `.yaml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Format::Yaml
            }
            _ => Format::Json,
        }
    }

    /// Parse document text into a record, extracting `_key`
    pub fn parse(self, text: &str) -> Result<Document, CodecError> {
        let value: Value = match self {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => {
                // JSON values cannot hold .inf/.nan; refuse rather than store null
                let yaml: serde_yaml::Value = serde_yaml::from_str(text)?;
                if let Some(field) = non_finite_field(&yaml) {
                    return Err(CodecError::NonFiniteNumber { field });
                }
                serde_json::to_value(yaml)?
            }
        };
        Document::from_value(value)
    }

    /// Serialize a record with `_key` injected
    pub fn render(self, document: &Document) -> Result<String, CodecError> {
        let value = document.to_value();
        match self {
            Format::Json => {
                let mut text = serde_json::to_string_pretty(&value)?;
                text.push('\n');
                Ok(text)
            }
            Format::Yaml => Ok(serde_yaml::to_string(&value)?),
        }
    }
}

/// Dotted path of the first non-finite float in a YAML tree
fn non_finite_field(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Number(n) => match n.as_f64() {
            Some(f) if !f.is_finite() => Some(String::new()),
            _ => None,
        },
        Yaml::Sequence(items) => items.iter().enumerate().find_map(|(i, item)| {
            non_finite_field(item).map(|rest| join_field(&i.to_string(), rest))
        }),
        Yaml::Mapping(map) => map.iter().find_map(|(key, item)| {
            let name = match key.as_str() {
                Some(name) => name.to_string(),
                None => format!("{:?}", key),
            };
            non_finite_field(item).map(|rest| join_field(&name, rest))
        }),
        Yaml::Tagged(tagged) => non_finite_field(&tagged.value),
        Yaml::Null | Yaml::Bool(_) | Yaml::String(_) => None,
    }
}

fn join_field(head: &str, rest: String) -> String {
    if rest.is_empty() {
        head.to_string()
    } else {
        format!("{}.{}", head, rest)
    }
}

/// Output format requested for unpack
///
/// `yml` and `yaml` both render YAML; they only differ in the file
/// extension that gets written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Yml,
    Yaml,
}

impl OutputFormat {
    pub fn format(self) -> Format {
        match self {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yml | OutputFormat::Yaml => Format::Yaml,
        }
    }

    /// File extension (without the dot)
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yml => "yml",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Yml
    }
}

impl FromStr for OutputFormat {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "yml" => Ok(OutputFormat::Yml),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(CodecError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
