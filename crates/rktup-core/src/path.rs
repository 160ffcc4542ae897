//! Request path parsing and path joining

use thiserror::Error;

use crate::types::RequestPath;

/// Errors from parsing an inbound request path
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Owner or repository segment missing or empty
    #[error("not enough path segments in {path:?}: expected <owner>/<repository>[/<subpath>]")]
    InsufficientSegments { path: String },
}

/// Split a URL path into owner, repository and subpath
///
/// Whitespace and slashes are trimmed from both ends, then the remainder is
/// split on `/` into at most three parts. Anything after the repository is
/// kept verbatim as the subpath. Owner and repository must both be non-empty.
pub fn parse_request_path(path: &str) -> Result<RequestPath, ParseError> {
    let trimmed = path.trim_matches(|c: char| c == '/' || c == ' ');
    let mut parts = trimmed.splitn(3, '/');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(repository), subpath)
            if !owner.is_empty() && !repository.is_empty() =>
        {
            Ok(RequestPath::new(
                owner,
                repository,
                subpath.unwrap_or_default(),
            ))
        }
        _ => Err(ParseError::InsufficientSegments {
            path: path.to_string(),
        }),
    }
}

/// Join path elements with `/` and lexically clean the result
///
/// Empty elements are skipped, repeated separators collapse, `.` is dropped,
/// `..` removes the preceding element and no trailing slash is kept. An empty
/// result becomes `.`.
pub fn join_path<'a>(elements: impl IntoIterator<Item = &'a str>) -> String {
    let joined = elements
        .into_iter()
        .filter(|e| !e.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    clean_path(&joined)
}

fn clean_path(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut out: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match out.last() {
                Some(&last) if last != ".." => {
                    out.pop();
                }
                // ".." directly under the root has nowhere to go
                _ if rooted => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }

    let body = out.join("/");
    match (rooted, body.is_empty()) {
        (true, _) => format!("/{body}"),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
