pub mod attributes;
pub mod normalize;
pub mod tags;

use crate::data::{Element, ElementKind, Record, RecordBuilder, RecordType};
use crate::errors::ShapeError;

use self::attributes::partition_attributes;
use self::tags::classify_tags;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShapeOptions {
    /// Ignore tags whose key contains quotes, spaces, punctuation and the like.
    pub skip_problem_keys: bool,
}

/// Turns OSM elements into flat records. Holds no state besides its options,
/// so one shaper can be reused for any number of elements.
#[derive(Debug, Clone, Default)]
pub struct Shaper {
    options: ShapeOptions,
}

impl Shaper {
    pub fn new(options: ShapeOptions) -> Self {
        Shaper {
            options
        }
    }

    /// Shapes a node or a way. Any other kind of element yields `Ok(None)`.
    pub fn shape(&self, element: &Element) -> Result<Option<Record>, ShapeError> {
        let record_type = match element.kind {
            ElementKind::Node => RecordType::Node,
            ElementKind::Way => RecordType::Way,
            ElementKind::Other => return Ok(None),
        };

        let mut builder = RecordBuilder::new();
        partition_attributes(element, &mut builder)?;
        classify_tags(element, &self.options, &mut builder);

        if element.kind == ElementKind::Way {
            for node_ref in &element.refs {
                builder.push_node_ref(node_ref.clone());
            }
        }

        Ok(Some(builder.build(record_type)))
    }
}

/// Shapes an element with default options.
pub fn shape_element(element: &Element) -> Result<Option<Record>, ShapeError> {
    Shaper::default().shape(element)
}
