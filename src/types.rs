//
//  types.rs
//  Ghostbusters
//

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// HTTP verb attached to a call-site or route.
///
/// Routes are always declared with one of the five concrete verbs.
/// `Unknown` only appears on call-sites whose verb could not be recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Unknown,
}

impl HttpMethod {
    /// Map a lower-case router/client member name (`get`, `post`, ...) to a verb.
    pub fn from_verb(name: &str) -> Option<Self> {
        match name {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "delete" => Some(Self::Delete),
            "patch" => Some(Self::Patch),
            _ => None,
        }
    }

    /// Parse a method name as written in a fetch options object.
    /// Anything outside the five recognized verbs is `Unknown`.
    pub fn parse_loose(name: &str) -> Self {
        Self::from_verb(&name.trim().to_ascii_lowercase()).unwrap_or(Self::Unknown)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An outbound HTTP request found in client code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub method: HttpMethod,
    /// Resolved target path. `None` marks a dynamic call-site.
    pub path: Option<String>,
    pub file: PathBuf,
    pub line: usize,
}

impl CallSite {
    /// True when the target could not be resolved to a literal or template.
    pub fn is_dynamic(&self) -> bool {
        self.path.is_none()
    }
}

// `isDynamic` is derived from `path`, so it is written out but never stored.
impl Serialize for CallSite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CallSite", 5)?;
        state.serialize_field("method", &self.method)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("isDynamic", &self.is_dynamic())?;
        state.serialize_field("file", &self.file)?;
        state.serialize_field("line", &self.line)?;
        state.end()
    }
}

/// An endpoint declaration found in server code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub method: HttpMethod,
    pub path: String,
    pub file: PathBuf,
    pub line: usize,
}

/// A sub-router prefix registration such as `app.use("/api", router)`.
///
/// Carried through the pipeline as an inert artifact; never matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountPoint {
    pub path: String,
    pub target: String,
    pub file: PathBuf,
    pub line: usize,
}

/// A file that could not be read or parsed. The file contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: PathBuf,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verb() {
        assert_eq!(HttpMethod::from_verb("delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::from_verb("use"), None);
        assert_eq!(HttpMethod::from_verb("GET"), None);
    }

    #[test]
    fn test_parse_loose() {
        assert_eq!(HttpMethod::parse_loose("post"), HttpMethod::Post);
        assert_eq!(HttpMethod::parse_loose("PATCH"), HttpMethod::Patch);
        assert_eq!(HttpMethod::parse_loose("HEAD"), HttpMethod::Unknown);
    }

    #[test]
    fn test_call_site_json_carries_dynamic_flag() {
        let dynamic = CallSite {
            method: HttpMethod::Get,
            path: None,
            file: PathBuf::from("src/app.js"),
            line: 7,
        };
        let json = serde_json::to_value(&dynamic).unwrap();
        assert_eq!(json["isDynamic"], true);
        assert!(json["path"].is_null());
        assert_eq!(json["file"], "src/app.js");
        assert_eq!(json["line"], 7);

        let literal = CallSite {
            path: Some("/api/users".to_string()),
            ..dynamic
        };
        let json = serde_json::to_value(&literal).unwrap();
        assert_eq!(json["isDynamic"], false);
        assert_eq!(json["method"], "GET");
    }

    #[test]
    fn test_serialize_method_uppercase() {
        let json = serde_json::to_string(&HttpMethod::Unknown).unwrap();
        assert_eq!(json, "\"UNKNOWN\"");
    }
}
