use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::format::{self, DocumentFormat, FormatError};
use crate::core::value::Value;

/// Upper bound for a fetched body.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// Where the initial document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    File(PathBuf),
}

impl DocumentSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    /// Format the body is parsed with.
    pub fn format(&self) -> DocumentFormat {
        match self {
            Self::Url(url) => DocumentFormat::from_location(url),
            Self::File(path) => DocumentFormat::from_location(&path.to_string_lossy()),
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] FormatError),
}

pub fn load(source: &DocumentSource) -> Result<Value, LoadError> {
    let body = match source {
        DocumentSource::Url(url) => fetch(url)?,
        DocumentSource::File(path) => {
            std::fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.display().to_string(),
                source,
            })?
        }
    };
    Ok(format::deserialize(&body, source.format())?)
}

/// Loads `source`, falling back to an empty object. The failure is logged and
/// handed back so the UI can mention it.
pub fn load_or_empty(source: &DocumentSource) -> (Value, Option<String>) {
    match load(source) {
        Ok(document) => {
            tracing::info!(%source, "document loaded");
            (document, None)
        }
        Err(err) => {
            tracing::error!(%source, error = %err, "error loading document");
            (Value::empty_object(), Some(err.to_string()))
        }
    }
}

fn fetch(url: &str) -> Result<String, LoadError> {
    let response = match ureq::get(url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(status, _)) => {
            return Err(LoadError::Status {
                url: url.to_string(),
                status,
            });
        }
        Err(err) => {
            return Err(LoadError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            });
        }
    };
    let mut body = String::new();
    response
        .into_reader()
        .take(MAX_BODY_BYTES)
        .read_to_string(&mut body)
        .map_err(|err| LoadError::Transport {
            url: url.to_string(),
            message: err.to_string(),
        })?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::{DocumentSource, LoadError, load, load_or_empty};
    use crate::core::format::DocumentFormat;
    use crate::core::value::Value;
    use serde_json::json;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::path::PathBuf;
    use std::thread;

    /// Answers the next `requests` connections with `response` and returns a
    /// URL pointing at the listener.
    fn serve(response: &'static str, requests: usize) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        thread::spawn(move || {
            for stream in listener.incoming().take(requests) {
                let Ok(mut stream) = stream else { continue };
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk) {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }
                let _ = stream.write_all(response.as_bytes());
            }
        });
        format!("http://{addr}/data.json")
    }

    #[test]
    fn urls_and_files_are_told_apart() {
        assert_eq!(
            DocumentSource::parse("https://example.org/data.json"),
            DocumentSource::Url("https://example.org/data.json".to_string())
        );
        assert_eq!(
            DocumentSource::parse("data.json"),
            DocumentSource::File(PathBuf::from("data.json"))
        );
        assert_eq!(DocumentSource::parse("cfg.yml").format(), DocumentFormat::Yaml);
    }

    #[test]
    fn loads_json_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, r#"{{"a": [1, 2]}}"#).expect("write");
        let source = DocumentSource::File(file.path().to_path_buf());
        assert_eq!(load(&source).expect("load"), Value::from(json!({"a": [1, 2]})));
    }

    #[test]
    fn loads_yaml_file_by_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .expect("tempfile");
        writeln!(file, "a: 1\nb: [x, y]").expect("write");
        let source = DocumentSource::File(file.path().to_path_buf());
        assert_eq!(
            load(&source).expect("load"),
            Value::from(json!({"a": 1, "b": ["x", "y"]}))
        );
    }

    #[test]
    fn missing_file_falls_back_to_empty_object() {
        let source = DocumentSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(load(&source), Err(LoadError::Read { .. })));
        let (document, failure) = load_or_empty(&source);
        assert_eq!(document, Value::empty_object());
        assert!(failure.is_some_and(|message| message.contains("cannot read")));
    }

    #[test]
    fn unparsable_file_is_a_parse_failure() {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("tempfile");
        write!(file, "{{nope").expect("write");
        let source = DocumentSource::File(file.path().to_path_buf());
        assert!(matches!(load(&source), Err(LoadError::Parse(_))));
    }

    #[test]
    fn fetches_json_over_http() {
        let url = serve(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 8\r\nConnection: close\r\n\r\n{\"a\": 1}",
            1,
        );
        let source = DocumentSource::parse(&url);
        assert_eq!(load(&source).expect("load"), Value::from(json!({"a": 1})));
    }

    #[test]
    fn not_found_response_is_a_fetch_failure() {
        let url = serve(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            2,
        );
        let source = DocumentSource::parse(&url);
        assert!(matches!(
            load(&source),
            Err(LoadError::Status { status: 404, .. })
        ));
        let (document, failure) = load_or_empty(&source);
        assert_eq!(document, Value::empty_object());
        assert!(failure.is_some_and(|message| message.contains("status 404")));
    }

    #[test]
    fn refused_connection_is_a_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);
        let source = DocumentSource::parse(&format!("http://{addr}/data.json"));
        assert!(matches!(load(&source), Err(LoadError::Transport { .. })));
    }
}
