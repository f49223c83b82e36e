//! Lookup of operation documentation in an OpenAPI definition.
//!
//! Only the `paths` object is read. Each path item is kept as raw JSON and
//! decoded on lookup, so one malformed operation does not make the whole
//! definition unusable.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Summary of every operation that could not be found.
pub const UNDOCUMENTED: &str = "Operation not documented";

/// What a `{param}` placeholder in a templated path matches.
const PARAM_PATTERN: &str = "[a-zA-Z0-9_{}]+";

/// Keys of a path item that name operations.
const OPERATION_KEYS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace", "connect",
];

/// Serialization of an API definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecFormat {
    Json,
    Yaml,
}

impl SpecFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SpecFormat::Json,
            _ => SpecFormat::Yaml,
        }
    }
}

impl std::fmt::Display for SpecFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecFormat::Json => write!(f, "json"),
            SpecFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Error loading an API definition.
#[derive(Debug)]
pub enum ApiSpecError {
    Io {
        path: PathBuf,
        error: std::io::Error,
    },
    Parse {
        format: SpecFormat,
        error: String,
    },
}

impl std::fmt::Display for ApiSpecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiSpecError::Io { path, error } => {
                write!(f, "could not read file {}: {}", path.display(), error)
            }
            ApiSpecError::Parse { format, error } => {
                write!(f, "could not parse {} file: {}", format, error)
            }
        }
    }
}

impl std::error::Error for ApiSpecError {}

#[derive(Deserialize)]
struct RawSpec {
    #[serde(default)]
    paths: serde_json::Map<String, Value>,
}

struct PathItem {
    template: String,
    pattern: Option<Regex>,
    content: Value,
}

/// A parsed API definition. The default value documents nothing.
#[derive(Default)]
pub struct ApiSpec {
    paths: Vec<PathItem>,
}

impl std::fmt::Debug for ApiSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSpec")
            .field("paths", &self.paths().collect::<Vec<_>>())
            .finish()
    }
}

/// Documentation of one operation, as shown in signature help.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct OperationDetail {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "in")]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

/// Result of an operation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Method as it was asked for.
    pub method: String,
    /// Matched path template, or the requested path when nothing matched.
    pub path: String,
    pub detail: OperationDetail,
}

impl Operation {
    fn undocumented(method: &str, path: &str, description: String) -> Self {
        Operation {
            method: method.to_string(),
            path: path.to_string(),
            detail: OperationDetail {
                summary: UNDOCUMENTED.to_string(),
                description,
                parameters: Vec::new(),
            },
        }
    }

    pub fn is_documented(&self) -> bool {
        self.detail.summary != UNDOCUMENTED
    }
}

impl ApiSpec {
    /// Read and parse a definition file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self, ApiSpecError> {
        let source = std::fs::read_to_string(path).map_err(|error| ApiSpecError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        Self::parse(SpecFormat::from_path(path), &source)
    }

    pub fn parse(format: SpecFormat, source: &str) -> Result<Self, ApiSpecError> {
        let fail = |error: String| ApiSpecError::Parse { format, error };
        let raw: RawSpec = match format {
            SpecFormat::Json => serde_json::from_str(source).map_err(|e| fail(e.to_string()))?,
            SpecFormat::Yaml => serde_yaml::from_str(source).map_err(|e| fail(e.to_string()))?,
        };

        let paths = raw
            .paths
            .into_iter()
            .map(|(template, content)| {
                let pattern = match template_regex(&template) {
                    Ok(re) => Some(re),
                    Err(error) => {
                        warn!(%template, %error, "Skipping path template");
                        None
                    }
                };
                PathItem {
                    template,
                    pattern,
                    content,
                }
            })
            .collect::<Vec<_>>();

        debug!(paths = paths.len(), "Parsed API definition");
        Ok(ApiSpec { paths })
    }

    /// Path templates in definition order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(|item| item.template.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Documentation for `method` on a concrete request `path`.
    ///
    /// Of all templates matching the path, the longest one wins, so
    /// `/pet/{petId}` is preferred over `/pet` for `/pet/12`.
    pub fn operation(&self, method: &str, path: &str) -> Operation {
        let mut best: Option<&PathItem> = None;
        for item in &self.paths {
            let Some(pattern) = &item.pattern else {
                continue;
            };
            let longer = best.is_none_or(|b| item.template.len() > b.template.len());
            if longer && pattern.is_match(path) {
                best = Some(item);
            }
        }

        let Some(item) = best else {
            return Operation::undocumented(
                method,
                path,
                "Path not found in provided openapi spec".to_string(),
            );
        };

        let malformed = || {
            Operation::undocumented(
                method,
                &item.template,
                "Documentation of is malformed json/yaml".to_string(),
            )
        };

        let Value::Object(operations) = &item.content else {
            return malformed();
        };

        let Some(raw) = operations.get(&method.to_lowercase()) else {
            let documented = operations
                .keys()
                .filter(|key| OPERATION_KEYS.contains(&key.as_str()))
                .map(|key| key.to_uppercase())
                .collect::<Vec<_>>()
                .join(",");
            return Operation::undocumented(
                method,
                &item.template,
                format!(
                    "{}: undocumented method {}. The following methods are documented for this path {}.",
                    item.template,
                    method.to_uppercase(),
                    documented
                ),
            );
        };

        match OperationDetail::deserialize(raw) {
            Ok(detail) => Operation {
                method: method.to_string(),
                path: item.template.clone(),
                detail,
            },
            Err(error) => {
                debug!(template = %item.template, %error, "Malformed operation");
                malformed()
            }
        }
    }
}

/// Turn `/pet/{petId}` into an unanchored regex matching `/pet/12`.
fn template_regex(template: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if after[..close].chars().all(|c| c.is_alphanumeric() || c == '_') => {
                pattern.push_str(&regex::escape(&rest[..open]));
                pattern.push_str(PARAM_PATTERN);
                rest = &after[close + 1..];
            }
            _ => {
                pattern.push_str(&regex::escape(&rest[..=open]));
                rest = after;
            }
        }
    }
    pattern.push_str(&regex::escape(rest));

    Regex::new(&pattern)
}
