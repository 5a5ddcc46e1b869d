//! Content blocks: one node of page content with a type tag and
//! type-specific properties.

use std::collections::BTreeMap;

use super::property::PropertyValue;
use super::text::RichTextSpan;

/// Closed set of block type tags, with an `Unknown` fallback so new tags are
/// an explicit case rather than a silent string comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    Text,
    Header,
    SubHeader,
    SubSubHeader,
    Image,
    BulletedList,
    NumberedList,
    Quote,
    Code,
    Callout,
    ToDo,
    Divider,
    Toggle,
    CollectionView,
    /// A page record: the page's own block, a collection member row, or a
    /// child page embedded in a body.
    Page,
    Unknown(String),
}

impl BlockType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" => BlockType::Text,
            "header" => BlockType::Header,
            "sub_header" => BlockType::SubHeader,
            "sub_sub_header" => BlockType::SubSubHeader,
            "image" => BlockType::Image,
            "bulleted_list" => BlockType::BulletedList,
            "numbered_list" => BlockType::NumberedList,
            "quote" => BlockType::Quote,
            "code" => BlockType::Code,
            "callout" => BlockType::Callout,
            "to_do" => BlockType::ToDo,
            "divider" => BlockType::Divider,
            "toggle" => BlockType::Toggle,
            "collection_view" => BlockType::CollectionView,
            "page" => BlockType::Page,
            other => BlockType::Unknown(other.to_string()),
        }
    }

    /// The wire tag for this type.
    pub fn tag(&self) -> &str {
        match self {
            BlockType::Text => "text",
            BlockType::Header => "header",
            BlockType::SubHeader => "sub_header",
            BlockType::SubSubHeader => "sub_sub_header",
            BlockType::Image => "image",
            BlockType::BulletedList => "bulleted_list",
            BlockType::NumberedList => "numbered_list",
            BlockType::Quote => "quote",
            BlockType::Code => "code",
            BlockType::Callout => "callout",
            BlockType::ToDo => "to_do",
            BlockType::Divider => "divider",
            BlockType::Toggle => "toggle",
            BlockType::CollectionView => "collection_view",
            BlockType::Page => "page",
            BlockType::Unknown(tag) => tag,
        }
    }
}

/// Auxiliary display attributes carried outside the property map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockFormat {
    pub block_color: Option<String>,
    pub page_icon: Option<String>,
}

/// Reference to a collection embedded in a page (a `collection_view` block).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRef {
    pub space_id: String,
    pub collection_id: String,
    pub view_id: String,
}

/// One node of page content.
///
/// `properties` is `None` when the record carries no property map at all;
/// which keys are meaningful depends on `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockType,
    pub parent_id: String,
    pub properties: Option<BTreeMap<String, PropertyValue>>,
    pub format: BlockFormat,
    /// Present on `collection_view` blocks.
    pub collection: Option<CollectionRef>,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockType, parent_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            parent_id: parent_id.into(),
            properties: None,
            format: BlockFormat::default(),
            collection: None,
        }
    }

    pub fn with_properties(mut self, properties: BTreeMap<String, PropertyValue>) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_format(mut self, format: BlockFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_collection(mut self, collection: CollectionRef) -> Self {
        self.collection = Some(collection);
        self
    }

    /// The literal spans of a property, when the property is present and
    /// holds literal text.
    pub fn literal_property(&self, key: &str) -> Option<&[RichTextSpan]> {
        self.properties.as_ref()?.get(key)?.as_literal()
    }

    /// The first span's text of a literal property.
    pub fn property_text(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.first_text()
    }
}
