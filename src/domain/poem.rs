//! Poem domain model.
//!
//! A [`Poem`] is exactly what the remote lookup returns for one match: a title,
//! an author and the ordered lines of the text. Poems are immutable once
//! received; the browser hands out shared references only.

use serde::{Deserialize, Serialize};

/// One poem returned by the lookup service.
///
/// Unknown fields in the service payload (such as `linecount`) are ignored
/// during deserialization. All three fields are required; a payload missing
/// any of them is rejected at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    pub title: String,
    pub author: String,
    pub lines: Vec<String>,
}

impl Poem {
    /// Creates a poem from its parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use poemseek::domain::Poem;
    ///
    /// let poem = Poem::new("Hope", "Emily Dickinson", vec!["\"Hope\" is the thing with feathers -"]);
    /// assert_eq!(poem.line_count(), 1);
    /// ```
    #[must_use]
    pub fn new<S: Into<String>>(title: impl Into<String>, author: impl Into<String>, lines: Vec<S>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of lines in the poem, blank stanza separators included.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Ordered poems in the order the service returned them.
pub type ResultSet = Vec<Poem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_service_shape_and_ignores_extra_fields() {
        let json = r#"{"title":"Ozymandias","author":"Percy Bysshe Shelley","lines":["I met a traveller"],"linecount":"14"}"#;
        let poem: Poem = serde_json::from_str(json).unwrap();
        assert_eq!(poem, Poem::new("Ozymandias", "Percy Bysshe Shelley", vec!["I met a traveller"]));
    }

    #[test]
    fn missing_lines_is_rejected() {
        let json = r#"{"title":"Ozymandias","author":"Percy Bysshe Shelley"}"#;
        assert!(serde_json::from_str::<Poem>(json).is_err());
    }
}
