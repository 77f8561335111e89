use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::analysis::{bbox::Bbox, labels::Category};

/// One detected region of a page.
///
/// Blocks come off the model as loosely-typed JSON, so the geometry and
/// confidence fields deserialize leniently: a bbox that is not exactly four
/// numbers becomes `None` (the block is then excluded from every geometric
/// operation but kept in the document), and a confidence that cannot be
/// read as a number is dropped rather than failing the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, deserialize_with = "category_lenient")]
    pub category: Category,
    #[serde(
        default,
        deserialize_with = "bbox_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub bbox: Option<Bbox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "conf_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub conf: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Present only on `Picture` blocks that have at least one merged
    /// child; never an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl Block {
    pub fn is_picture(&self) -> bool {
        self.category.is_picture()
    }

    /// Whether this block carries usable geometry.
    pub fn has_geometry(&self) -> bool {
        self.bbox.is_some()
    }
}

fn category_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Category, D::Error> {
    // A non-string category marks a malformed detection; keep the block
    // but give it a category nothing will ever match on.
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(name) => Category::from(name),
        other => Category::Other(other.to_string()),
    })
}

fn bbox_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Bbox>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(bbox_from_value))
}

fn bbox_from_value(value: &Value) -> Option<Bbox> {
    let coords = value.as_array()?;
    if coords.len() != 4 {
        return None;
    }
    let mut xyxy = [0f32; 4];
    for (slot, coord) in xyxy.iter_mut().zip(coords) {
        *slot = coord.as_f64()? as f32;
    }
    Some(Bbox::from_xyxy(xyxy))
}

fn conf_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Number(number) => number.as_f64().map(|conf| conf as f32),
        Value::String(text) => text.trim().parse::<f32>().ok(),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_deserialize_minimal() {
        let block: Block =
            serde_json::from_str(r#"{"category": "Picture", "bbox": [100, 100, 400, 300]}"#)
                .unwrap();

        assert!(block.is_picture());
        assert_eq!(
            block.bbox,
            Some(Bbox::from_xyxy([100.0, 100.0, 400.0, 300.0]))
        );
        assert_eq!(block.text, None);
        assert_eq!(block.children, None);
    }

    #[test]
    fn test_malformed_bbox_becomes_geometry_less() {
        // Three coordinates
        let short: Block =
            serde_json::from_str(r#"{"category": "Text", "bbox": [1, 2, 3], "text": "x"}"#)
                .unwrap();
        assert!(!short.has_geometry());

        // Non-numeric entry
        let non_numeric: Block =
            serde_json::from_str(r#"{"category": "Text", "bbox": [1, "2", 3, 4], "text": "x"}"#)
                .unwrap();
        assert!(!non_numeric.has_geometry());

        // Missing entirely
        let missing: Block = serde_json::from_str(r#"{"category": "Text", "text": "x"}"#).unwrap();
        assert!(!missing.has_geometry());

        // The block itself survives with its other fields intact
        assert_eq!(missing.text.as_deref(), Some("x"));
        assert_eq!(missing.category, Category::Text);
    }

    #[test]
    fn test_conf_lenient_conversion() {
        let numeric: Block =
            serde_json::from_str(r#"{"category": "Text", "conf": 0.92}"#).unwrap();
        assert_eq!(numeric.conf, Some(0.92));

        // Numeric string converts
        let stringly: Block =
            serde_json::from_str(r#"{"category": "Text", "conf": "0.75"}"#).unwrap();
        assert_eq!(stringly.conf, Some(0.75));

        // Garbage is silently dropped, not an error
        let garbage: Block =
            serde_json::from_str(r#"{"category": "Text", "conf": "high"}"#).unwrap();
        assert_eq!(garbage.conf, None);

        let object: Block =
            serde_json::from_str(r#"{"category": "Text", "conf": {"v": 1}}"#).unwrap();
        assert_eq!(object.conf, None);
    }

    #[test]
    fn test_non_string_category_degrades() {
        let block: Block = serde_json::from_str(r#"{"category": 7}"#).unwrap();
        assert_eq!(block.category, Category::Other("7".to_string()));
        assert!(!block.category.is_textual());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let block = Block {
            category: Category::Picture,
            bbox: Some(Bbox::from_xyxy([0.0, 0.0, 10.0, 10.0])),
            text: None,
            conf: None,
            source: None,
            children: None,
        };

        let json = serde_json::to_value(&block).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("category"));
        assert!(object.contains_key("bbox"));
    }
}
