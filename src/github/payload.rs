//! Gist request and response bodies
//!
//! Builders for the JSON documents sent to the gists API, plus the decoded
//! shapes of its replies.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GilbertError, Result};

/// One named snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GistFile {
    pub content: String,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    pub description: String,
    pub public: bool,
    pub files: BTreeMap<String, GistFile>,
}

/// A gist as fetched, or as sent in an update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gist {
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,

    /// New description on update; current description on fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remote identifier, only present in fetched gists
    #[serde(default, skip_serializing)]
    pub id: Option<String>,

    /// Web location, only present in fetched gists
    #[serde(default, skip_serializing)]
    pub html_url: Option<String>,
}

/// The part of a create/update reply the caller needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GistResponse {
    /// Web-viewable location of the gist; empty when nothing was created
    #[serde(rename = "html_url", default)]
    pub url: String,
}

/// Build a create payload from a local file
///
/// The file is read line by line and every line, including the last one,
/// ends up terminated by `\n`. The file name is the final path segment.
pub fn build_from_file(description: &str, path: impl AsRef<Path>) -> Result<Payload> {
    let path = path.as_ref();
    let content = read_lines(path)?;
    let filename = file_name(path)?;

    Ok(Payload {
        description: description.to_string(),
        public: false,
        files: BTreeMap::from([(filename, GistFile { content })]),
    })
}

/// Build a create payload from content already in memory
pub fn build_from_content(description: &str, filename: &str, content: &str) -> Payload {
    Payload {
        description: description.to_string(),
        public: false,
        files: BTreeMap::from([(
            filename.to_string(),
            GistFile {
                content: content.to_string(),
            },
        )]),
    }
}

/// Build an update body from local files, keyed by their final path segment
pub fn build_gist_from_files<P: AsRef<Path>>(
    description: Option<&str>,
    paths: &[P],
) -> Result<Gist> {
    let mut files = BTreeMap::new();

    for path in paths {
        let path = path.as_ref();
        let content = read_lines(path)?;
        let filename = file_name(path)?;
        if files.insert(filename.clone(), GistFile { content }).is_some() {
            return Err(GilbertError::InvalidInput(format!(
                "'{}' was given more than once",
                filename
            )));
        }
    }

    Ok(Gist {
        files,
        description: description.map(str::to_string),
        ..Gist::default()
    })
}

fn read_lines(path: &Path) -> Result<String> {
    let to_err = |source: std::io::Error| GilbertError::FileRead {
        path: path.to_path_buf(),
        source,
    };

    let reader = BufReader::new(File::open(path).map_err(to_err)?);
    let mut content = String::new();
    for line in reader.lines() {
        content.push_str(&line.map_err(to_err)?);
        content.push('\n');
    }

    Ok(content)
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| {
            GilbertError::InvalidInput(format!("'{}' does not name a file", path.display()))
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_build_from_file_terminates_every_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "first\r\nsecond\nlast").unwrap();

        let payload = build_from_file("my notes", &path).unwrap();

        assert_eq!(payload.description, "my notes");
        assert!(!payload.public);
        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.files["notes.txt"].content, "first\nsecond\nlast\n");
    }

    #[test]
    fn test_build_from_file_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.rs");
        fs::write(&path, "").unwrap();

        let payload = build_from_file("", &path).unwrap();
        assert_eq!(payload.files["empty.rs"].content, "");
    }

    #[test]
    fn test_build_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_from_file("", dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, GilbertError::FileRead { .. }));
        assert!(err.to_string().contains("nope.txt"));
    }

    #[test]
    fn test_build_from_file_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        let err = build_from_file("", &path).unwrap_err();
        assert!(matches!(err, GilbertError::FileRead { .. }));
    }

    #[test]
    fn test_build_from_content_is_verbatim() {
        let payload = build_from_content("desc", "snippet.go", "package main");

        assert_eq!(payload.description, "desc");
        assert!(!payload.public);
        assert_eq!(payload.files.len(), 1);
        assert_eq!(payload.files["snippet.go"].content, "package main");
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = build_from_content("d", "a.txt", "hi\n");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "description": "d",
                "public": false,
                "files": { "a.txt": { "content": "hi\n" } }
            })
        );
    }

    #[test]
    fn test_update_body_omits_fetched_metadata() {
        let gist = Gist {
            files: BTreeMap::from([("a.txt".to_string(), GistFile { content: "x".into() })]),
            description: None,
            id: Some("abc".to_string()),
            html_url: Some("https://gist.example/abc".to_string()),
        };
        let json = serde_json::to_value(&gist).unwrap();
        assert_eq!(json, serde_json::json!({ "files": { "a.txt": { "content": "x" } } }));
    }

    #[test]
    fn test_fetched_gist_ignores_unknown_fields() {
        let gist: Gist = serde_json::from_str(
            r#"{"id":"abc","html_url":"https://gist.example/abc","public":false,
                "files":{"a.txt":{"filename":"a.txt","size":3,"content":"hi\n"}}}"#,
        )
        .unwrap();
        assert_eq!(gist.id.as_deref(), Some("abc"));
        assert_eq!(gist.files["a.txt"].content, "hi\n");
    }

    #[test]
    fn test_build_gist_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "one").unwrap();
        fs::write(&b, "two\n").unwrap();

        let gist = build_gist_from_files(Some("updated"), &[&a, &b]).unwrap();
        assert_eq!(gist.description.as_deref(), Some("updated"));
        assert_eq!(gist.files.len(), 2);
        assert_eq!(gist.files["a.txt"].content, "one\n");
        assert_eq!(gist.files["b.txt"].content, "two\n");
    }

    #[test]
    fn test_build_gist_from_files_rejects_duplicate_names() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let a = dir.path().join("a.txt");
        let a2 = sub.join("a.txt");
        fs::write(&a, "one").unwrap();
        fs::write(&a2, "two").unwrap();

        let err = build_gist_from_files(None, &[&a, &a2]).unwrap_err();
        assert!(matches!(err, GilbertError::InvalidInput(_)));
    }

    #[test]
    fn test_response_decodes_html_url() {
        let response: GistResponse =
            serde_json::from_str(r#"{"html_url":"https://gist.example/abc","id":"abc"}"#).unwrap();
        assert_eq!(response.url, "https://gist.example/abc");
    }
}
