//! Named query catalog.
//!
//! Definitions are read from a plain-text source where each query starts with
//! a `-- name:` header:
//!
//! ```text
//! -- name: fert_by_year(year)
//! -- Fertility rate of every country for one year.
//! ?[country, year, fertility] := *fertility{country, year, fertility}, year == $year
//! :order country
//! ```
//!
//! The parameter list is optional; without it the parameters are the `$name`
//! placeholders found in the body. Comment lines right after the header are
//! kept as the query's doc. Each definition is bound to the engine's calling
//! convention once, when the catalog loads.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::backend::{Engine, Statement};

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--\s*name:\s*(?P<name>\S+?)\s*(?:\((?P<params>[^)]*)\))?\s*$").unwrap()
});

static IDENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

pub(crate) static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").unwrap());

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read query definitions from '{path}': {message}")]
    ReadFailed { path: String, message: String },

    #[error("{origin}:{line}: {message}")]
    Malformed {
        origin: String,
        line: usize,
        message: String,
    },

    #[error("{origin}: query '{name}' is defined more than once")]
    Duplicate { origin: String, name: String },

    #[error("{origin}: query '{name}' has no body")]
    EmptyBody { origin: String, name: String },

    #[error("{origin}: query '{name}' uses undeclared parameter '${param}'")]
    UndeclaredParam {
        origin: String,
        name: String,
        param: String,
    },

    #[error("Cannot bind query '{name}': {message}")]
    BindFailed { name: String, message: String },
}

/// Where query definitions come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// A definitions file on disk.
    Path(PathBuf),
    /// Definitions already in memory, labelled for error messages.
    Text { origin: String, text: String },
}

impl CatalogSource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        CatalogSource::Path(path.into())
    }

    pub fn text(origin: impl Into<String>, text: impl Into<String>) -> Self {
        CatalogSource::Text {
            origin: origin.into(),
            text: text.into(),
        }
    }

    /// Label used in log lines and error messages.
    pub fn origin(&self) -> String {
        match self {
            CatalogSource::Path(p) => p.display().to_string(),
            CatalogSource::Text { origin, .. } => origin.clone(),
        }
    }

    fn read(&self) -> Result<String, CatalogError> {
        match self {
            CatalogSource::Path(p) => read_path(p),
            CatalogSource::Text { text, .. } => Ok(text.clone()),
        }
    }
}

fn read_path(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|e| CatalogError::ReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// One parsed definition, before engine binding.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDefinition {
    pub name: String,
    /// Parameter names, declared or in first-use order.
    pub params: Vec<String>,
    pub doc: Option<String>,
    pub text: String,
}

/// A definition bound to the engine it will run on.
#[derive(Debug, Clone)]
pub struct BoundQuery {
    pub definition: QueryDefinition,
    pub statement: Statement,
}

/// Summary of one catalog entry, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct QueryDescription {
    pub name: String,
    pub params: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    pub text: String,
}

/// Query name → bound query. Read-only once loaded.
#[derive(Debug, Default)]
pub struct QueryCatalog {
    origin: String,
    queries: HashMap<String, BoundQuery>,
    order: Vec<String>,
}

impl QueryCatalog {
    /// Read, parse and bind every definition in `source`.
    pub fn load(source: &CatalogSource, engine: &dyn Engine) -> Result<Self, CatalogError> {
        let origin = source.origin();
        let definitions = parse_definitions(&origin, &source.read()?)?;
        Self::bind_all(origin, definitions, engine)
    }

    fn bind_all(
        origin: String,
        definitions: Vec<QueryDefinition>,
        engine: &dyn Engine,
    ) -> Result<Self, CatalogError> {
        let mut queries = HashMap::with_capacity(definitions.len());
        let mut order = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let statement = engine.bind(&definition)?;
            order.push(definition.name.clone());
            queries.insert(
                definition.name.clone(),
                BoundQuery {
                    definition,
                    statement,
                },
            );
        }
        Ok(Self {
            origin,
            queries,
            order,
        })
    }

    pub fn resolve(&self, name: &str) -> Option<&BoundQuery> {
        self.queries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    /// Query names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Every definition with its text, in definition order.
    pub fn describe(&self) -> Vec<QueryDescription> {
        self.order
            .iter()
            .filter_map(|name| self.queries.get(name))
            .map(|q| QueryDescription {
                name: q.definition.name.clone(),
                params: q.definition.params.clone(),
                doc: q.definition.doc.clone(),
                text: q.definition.text.clone(),
            })
            .collect()
    }
}

/// `$name` placeholders in `text`, in first-use order, without duplicates.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .filter(|p| seen.insert(p.clone()))
        .collect()
}

struct Pending {
    name: String,
    declared: Option<Vec<String>>,
    doc: Vec<String>,
    body: Vec<String>,
    in_doc: bool,
}

/// Split a definitions source into query definitions.
pub fn parse_definitions(origin: &str, source: &str) -> Result<Vec<QueryDefinition>, CatalogError> {
    let mut definitions: Vec<QueryDefinition> = Vec::new();
    let mut current: Option<Pending> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line_no = idx + 1;
        let trimmed = raw.trim();

        if trimmed.starts_with("--") && trimmed[2..].trim_start().starts_with("name:") {
            let caps = HEADER_REGEX
                .captures(trimmed)
                .ok_or_else(|| malformed(origin, line_no, "malformed query header"))?;
            let name = caps["name"].to_string();
            if !IDENT_REGEX.is_match(&name) {
                return Err(malformed(
                    origin,
                    line_no,
                    &format!("invalid query name '{}'", name),
                ));
            }
            let declared = caps
                .name("params")
                .map(|m| parse_param_list(origin, line_no, m.as_str()))
                .transpose()?;
            if let Some(done) = current.take() {
                push_definition(origin, &mut definitions, done)?;
            }
            current = Some(Pending {
                name,
                declared,
                doc: Vec::new(),
                body: Vec::new(),
                in_doc: true,
            });
            continue;
        }

        match current.as_mut() {
            Some(pending) => {
                if pending.in_doc && trimmed.starts_with("--") {
                    let doc = trimmed.trim_start_matches('-').trim();
                    if !doc.is_empty() {
                        pending.doc.push(doc.to_string());
                    }
                } else {
                    pending.in_doc = false;
                    pending.body.push(raw.to_string());
                }
            }
            None => {
                if !trimmed.is_empty() && !trimmed.starts_with("--") {
                    return Err(malformed(
                        origin,
                        line_no,
                        "query text before the first '-- name:' header",
                    ));
                }
            }
        }
    }

    if let Some(done) = current.take() {
        push_definition(origin, &mut definitions, done)?;
    }
    Ok(definitions)
}

fn parse_param_list(origin: &str, line: usize, list: &str) -> Result<Vec<String>, CatalogError> {
    list.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if IDENT_REGEX.is_match(p) {
                Ok(p.to_string())
            } else {
                Err(malformed(origin, line, &format!("invalid parameter name '{}'", p)))
            }
        })
        .collect()
}

fn push_definition(
    origin: &str,
    definitions: &mut Vec<QueryDefinition>,
    mut pending: Pending,
) -> Result<(), CatalogError> {
    // Comments and blank lines after the body belong to the next section.
    while pending
        .body
        .last()
        .is_some_and(|line| line.trim().is_empty() || line.trim().starts_with("--"))
    {
        pending.body.pop();
    }
    let text = pending.body.join("\n").trim().to_string();
    if text.is_empty() {
        return Err(CatalogError::EmptyBody {
            origin: origin.to_string(),
            name: pending.name,
        });
    }
    if definitions.iter().any(|d| d.name == pending.name) {
        return Err(CatalogError::Duplicate {
            origin: origin.to_string(),
            name: pending.name,
        });
    }

    let used = placeholders(&text);
    let params = match pending.declared {
        Some(declared) => {
            if let Some(param) = used.iter().find(|p| !declared.contains(p)) {
                return Err(CatalogError::UndeclaredParam {
                    origin: origin.to_string(),
                    name: pending.name,
                    param: param.clone(),
                });
            }
            declared
        }
        None => used,
    };

    let doc = (!pending.doc.is_empty()).then(|| pending.doc.join(" "));
    definitions.push(QueryDefinition {
        name: pending.name,
        params,
        doc,
        text,
    });
    Ok(())
}

fn malformed(origin: &str, line: usize, message: &str) -> CatalogError {
    CatalogError::Malformed {
        origin: origin.to_string(),
        line,
        message: message.to_string(),
    }
}
