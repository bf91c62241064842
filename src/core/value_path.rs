use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Address of a node inside a document. The empty path is the root.
///
/// Displays as the dot-joined form used by approval patterns (`a.b.2.c`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    pub fn joined(&self) -> String {
        self.to_string()
    }

    /// Splits a dot-joined path. Pieces made only of ASCII digits become
    /// indices; empty input is the root.
    pub fn parse_dotted(input: &str) -> Self {
        let raw = input.trim();
        if raw.is_empty() {
            return Self::empty();
        }
        let segments = raw
            .split('.')
            .map(|piece| {
                if !piece.is_empty() && piece.bytes().all(|b| b.is_ascii_digit()) {
                    if let Ok(index) = piece.parse::<usize>() {
                        return PathSegment::Index(index);
                    }
                }
                PathSegment::Key(piece.to_string())
            })
            .collect();
        Self { segments }
    }
}

impl fmt::Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PathSegment, ValuePath};

    #[test]
    fn parse_dotted_path_with_indexes() {
        let path = ValuePath::parse_dotted("users.0.profile.name");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("users".to_string()),
                PathSegment::Index(0),
                PathSegment::Key("profile".to_string()),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn display_joins_with_dots() {
        let path = ValuePath::empty()
            .child_key("a")
            .child_key("b")
            .child_index(2)
            .child_key("c");
        assert_eq!(path.to_string(), "a.b.2.c");
        assert_eq!(ValuePath::empty().to_string(), "");
    }

    #[test]
    fn equal_paths_compare_segment_wise() {
        assert_eq!(ValuePath::parse_dotted("a.b"), ValuePath::empty().child_key("a").child_key("b"));
        assert_ne!(ValuePath::parse_dotted("a.0"), ValuePath::empty().child_key("a").child_key("0"));
    }
}
