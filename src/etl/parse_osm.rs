use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use xz::bufread::XzDecoder;

use crate::data::{Element, ElementKind};
use crate::errors::Result;

/// Depth of the elements we shape: direct children of the `<osm>` root.
const ELEMENT_DEPTH: usize = 1;
const CHILD_DEPTH: usize = 2;

/// Opens a .osm file for streaming. Files ending in `.xz` are decompressed on the fly.
pub fn create_osm_reader(path: &Path) -> Result<Reader<Box<dyn BufRead>>> {
    let file = fs::File::open(path)?;
    let file_reader = BufReader::new(file);
    let source: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "xz") {
        Box::new(BufReader::new(XzDecoder::new(file_reader)))
    } else {
        Box::new(file_reader)
    };
    let mut reader = Reader::from_reader(source);
    reader.trim_text(true);

    Ok(reader)
}

fn attributes(el: &BytesStart) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attribute_res in el.attributes() {
        let attribute = attribute_res?;
        let key = str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

fn take_attribute(attributes: &mut Vec<(String, String)>, name: &str) -> Option<String> {
    let index = attributes.iter().position(|(key, _)| key == name)?;
    Some(attributes.swap_remove(index).1)
}

fn parse_element(el: &BytesStart) -> Result<Element> {
    let mut element = Element::new(ElementKind::from_tag_name(el.name().as_ref()));
    element.attributes = attributes(el)?;
    Ok(element)
}

/// Attaches a `<tag k v>` or `<nd ref>` child to its element. Other children are ignored.
fn parse_child(element: &mut Element, el: &BytesStart) -> Result<()> {
    match el.name().as_ref() {
        b"tag" => {
            let mut attributes = attributes(el)?;
            let key = take_attribute(&mut attributes, "k").ok_or("Tag without a k attribute.")?;
            let value = take_attribute(&mut attributes, "v").unwrap_or_default();
            element.tags.push((key, value));
        },
        b"nd" => {
            let mut attributes = attributes(el)?;
            let node_ref = take_attribute(&mut attributes, "ref").ok_or("Node reference without a ref attribute.")?;
            element.refs.push(node_ref);
        },
        _ => (),
    }
    Ok(())
}

fn open(el: &BytesStart, depth: usize, current: &mut Option<Element>) -> Result<()> {
    match depth {
        ELEMENT_DEPTH => *current = Some(parse_element(el)?),
        CHILD_DEPTH => {
            if let Some(element) = current.as_mut() {
                parse_child(element, el)?;
            }
        },
        _ => (),
    }
    Ok(())
}

/// Reads every top-level element of an OSM document, in document order.
pub fn read_elements<R: BufRead>(mut reader: Reader<R>) -> Result<Vec<Element>> {
    let mut buf = Vec::new();
    let mut elements: Vec<Element> = Vec::new();
    let mut current: Option<Element> = None;
    let mut depth = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => {
                open(&e, depth, &mut current)?;
                depth += 1;
            },
            Event::Empty(e) => {
                open(&e, depth, &mut current)?;
                if depth == ELEMENT_DEPTH {
                    elements.extend(current.take());
                }
            },
            Event::End(_e) => {
                depth = depth.saturating_sub(1);
                if depth == ELEMENT_DEPTH {
                    elements.extend(current.take());
                }
            },
            // Declarations, comments and whitespace carry nothing we shape.
            _ => (),
        }
        buf.clear();
    }
    Ok(elements)
}

pub fn read_osm_file(path: &Path) -> Result<Vec<Element>> {
    read_elements(create_osm_reader(path)?)
}
