use std::fmt;

use crate::domain::gw2::errors::Gw2Error;
use crate::domain::gw2::errors::IdListError;

/// Shape of the identifiers a resource accepts in its `ids` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Numeric,
    Text,
}

/// Validated, comma-separated list of resource identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdList(Vec<String>);

impl IdList {
    /// Parse a comma-separated list, trimming whitespace around each entry.
    ///
    /// # Errors
    /// * `EmptyEntry` - An entry is blank (e.g. `1,,2`)
    /// * `InvalidNumber` - A numeric resource got a non-numeric entry
    pub fn parse(raw: &str, kind: IdKind) -> Result<Self, IdListError> {
        raw.split(',')
            .map(str::trim)
            .map(|id| match kind {
                _ if id.is_empty() => Err(IdListError::EmptyEntry),
                IdKind::Numeric => id
                    .parse::<u64>()
                    .map(|n| n.to_string())
                    .map_err(|_| IdListError::InvalidNumber(id.to_string())),
                IdKind::Text => Ok(id.to_string()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(IdList)
    }

    /// Parse an optional query value. Absent or blank means "no filter".
    pub fn parse_optional(raw: Option<&str>, kind: IdKind) -> Result<Option<Self>, IdListError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Self::parse(raw, kind).map(Some),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value for the upstream `ids` parameter.
    pub fn to_query_value(&self) -> String {
        self.0.join(",")
    }
}

/// Game-data API key supplied by the caller.
///
/// Forwarded upstream as `access_token`; never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// # Errors
    /// * `MissingApiKey` - Key is blank
    pub fn new(key: String) -> Result<Self, Gw2Error> {
        let key = key.trim().to_string();
        if key.is_empty() {
            return Err(Gw2Error::MissingApiKey);
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// A GET request against the upstream API, relative to its base URL.
///
/// Path segments are kept apart so that caller-supplied values (character
/// names, guild ids) are percent-encoded as single segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    segments: Vec<String>,
    query: Vec<(String, String)>,
    api_key: Option<ApiKey>,
}

impl UpstreamRequest {
    /// Start a request for a static resource path such as `achievements/daily`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
            api_key: None,
        }
    }

    /// Append a single dynamic path segment.
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Add the `ids` filter when present.
    pub fn ids(self, ids: Option<IdList>) -> Self {
        match ids {
            Some(ids) => self.query("ids", ids.to_query_value()),
            None => self,
        }
    }

    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    /// Slash-joined path, for logs.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}
