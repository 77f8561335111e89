use serde::{Deserialize, Serialize, Serializer};

/// Category of a detected layout block.
///
/// The recognized set matches what the layout model emits, plus
/// `PictureText`, which is never produced by a detection pass: it only
/// exists as a child synthesized under a `Picture` during the merge.
/// Category strings outside the recognized set round-trip through `Other`
/// so a document with a newer model's vocabulary survives re-serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Caption,
    Footnote,
    Formula,
    ListItem,
    PageFooter,
    PageHeader,
    Picture,
    PictureText,
    SectionHeader,
    Table,
    Text,
    Title,
    Other(String),
}

impl Category {
    pub fn name(&self) -> &str {
        match self {
            Category::Caption => "Caption",
            Category::Footnote => "Footnote",
            Category::Formula => "Formula",
            Category::ListItem => "List-Item",
            Category::PageFooter => "Page-Footer",
            Category::PageHeader => "Page-Header",
            Category::Picture => "Picture",
            Category::PictureText => "PictureText",
            Category::SectionHeader => "Section-Header",
            Category::Table => "Table",
            Category::Text => "Text",
            Category::Title => "Title",
            Category::Other(name) => name,
        }
    }

    pub fn is_picture(&self) -> bool {
        matches!(self, Category::Picture)
    }

    /// Whether a grounding fragment of this category can become a
    /// `PictureText` child. Plain text always qualifies; formulas do too,
    /// since equations rendered inside figures are exactly what the second
    /// pass exists to recover.
    pub fn is_textual(&self) -> bool {
        matches!(self, Category::Text | Category::Formula)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        match name {
            "Caption" => Category::Caption,
            "Footnote" => Category::Footnote,
            "Formula" => Category::Formula,
            "List-Item" => Category::ListItem,
            "Page-Footer" => Category::PageFooter,
            "Page-Header" => Category::PageHeader,
            "Picture" => Category::Picture,
            "PictureText" => Category::PictureText,
            "Section-Header" => Category::SectionHeader,
            "Table" => Category::Table,
            "Text" => Category::Text,
            "Title" => Category::Title,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Category::from(name.as_str())
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Category::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_names_round_trip() {
        let categories = [
            Category::Caption,
            Category::Footnote,
            Category::Formula,
            Category::ListItem,
            Category::PageFooter,
            Category::PageHeader,
            Category::Picture,
            Category::PictureText,
            Category::SectionHeader,
            Category::Table,
            Category::Text,
            Category::Title,
        ];

        for category in categories {
            assert_eq!(Category::from(category.name()), category);
        }
    }

    #[test]
    fn test_unknown_name_preserved() {
        let category = Category::from("Sidebar");
        assert_eq!(category, Category::Other("Sidebar".to_string()));
        assert_eq!(category.name(), "Sidebar");

        let json = serde_json::to_string(&category).unwrap();
        assert_eq!(json, "\"Sidebar\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
    }

    #[test]
    fn test_textual_kinds() {
        assert!(Category::Text.is_textual());
        assert!(Category::Formula.is_textual());

        assert!(!Category::Picture.is_textual());
        assert!(!Category::Table.is_textual());
        assert!(!Category::PictureText.is_textual());
        assert!(!Category::Other("Sidebar".to_string()).is_textual());
    }
}
