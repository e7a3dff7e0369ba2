/// Kind of a top-level element in the .osm file. Only nodes and ways are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Way,
    Other,
}

impl ElementKind {
    pub fn from_tag_name(name: &[u8]) -> Self {
        match name {
            b"node" => ElementKind::Node,
            b"way" => ElementKind::Way,
            _ => ElementKind::Other,
        }
    }
}

/// One top-level element. Attributes and tags keep document order.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: ElementKind,
    pub attributes: Vec<(String, String)>,
    pub tags: Vec<(String, String)>,
    pub refs: Vec<String>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Element {
            kind,
            attributes: Vec::new(),
            tags: Vec::new(),
            refs: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_tag(mut self, key: &str, value: &str) -> Self {
        self.tags.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_ref(mut self, node_ref: &str) -> Self {
        self.refs.push(node_ref.to_string());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }
}
