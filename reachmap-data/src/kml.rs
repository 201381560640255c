//! KML 2.2 encoding for river documents.
//!
//! The encoder writes one `<Document>` holding the shared styles first, then
//! one `<Folder>` per reach. Styles appear once each, in first-use order, and
//! placemarks refer to them by `#token`.

use std::io::Write;

use geo::Coord;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use reachmap_core::{Folder, IconStyle, KmlDocument, LineFeature, LineStyle, PointFeature};
use thiserror::Error;

/// KML namespace declared on the root element.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Errors raised while encoding a document.
#[derive(Debug, Error)]
pub enum KmlError {
    /// The XML writer rejected an event or the sink failed.
    #[error("failed to encode KML: {source}")]
    Encode {
        /// Underlying writer error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn encode_err<E>(source: E) -> KmlError
where
    E: std::error::Error + Send + Sync + 'static,
{
    KmlError::Encode {
        source: Box::new(source),
    }
}

/// Encode `document` into `sink` and hand the sink back.
///
/// # Errors
///
/// Returns [`KmlError::Encode`] when writing to `sink` fails.
///
/// # Examples
///
/// ```
/// use reachmap_core::KmlDocument;
/// use reachmap_data::kml::encode_document;
///
/// let bytes = encode_document(&KmlDocument::new("Rogue"), Vec::new())?;
/// let xml = String::from_utf8(bytes)?;
/// assert!(xml.contains("<name>Rogue</name>"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encode_document<W: Write>(document: &KmlDocument, sink: W) -> Result<W, KmlError> {
    let mut writer = Writer::new_with_indent(sink, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_err)?;

    let root = BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]);
    writer
        .write_event(Event::Start(root))
        .map_err(encode_err)?;
    start(&mut writer, "Document")?;
    text_element(&mut writer, "name", &document.name)?;

    for style in document.line_styles() {
        write_line_style(&mut writer, style)?;
    }
    for style in document.icon_styles() {
        write_icon_style(&mut writer, style)?;
    }
    for folder in &document.folders {
        write_folder(&mut writer, folder)?;
    }

    end(&mut writer, "Document")?;
    end(&mut writer, "kml")?;
    Ok(writer.into_inner())
}

/// Encode `document` into an in-memory string.
///
/// # Errors
///
/// Returns [`KmlError::Encode`] if encoding fails.
pub fn document_to_string(document: &KmlDocument) -> Result<String, KmlError> {
    let bytes = encode_document(document, Vec::new())?;
    String::from_utf8(bytes).map_err(encode_err)
}

fn write_line_style<W: Write>(writer: &mut Writer<W>, style: &LineStyle) -> Result<(), KmlError> {
    start_with_id(writer, "Style", style.token)?;
    start(writer, "LineStyle")?;
    text_element(writer, "color", style.color)?;
    text_element(writer, "width", &style.width.to_string())?;
    end(writer, "LineStyle")?;
    end(writer, "Style")
}

fn write_icon_style<W: Write>(writer: &mut Writer<W>, style: &IconStyle) -> Result<(), KmlError> {
    start_with_id(writer, "Style", style.token)?;
    start(writer, "IconStyle")?;
    start(writer, "Icon")?;
    text_element(writer, "href", style.href)?;
    end(writer, "Icon")?;
    end(writer, "IconStyle")?;
    end(writer, "Style")
}

fn write_folder<W: Write>(writer: &mut Writer<W>, folder: &Folder) -> Result<(), KmlError> {
    start(writer, "Folder")?;
    text_element(writer, "name", &folder.name)?;
    write_line(writer, &folder.features.line)?;
    for point in &folder.features.points {
        write_point(writer, point)?;
    }
    end(writer, "Folder")
}

fn write_line<W: Write>(writer: &mut Writer<W>, line: &LineFeature) -> Result<(), KmlError> {
    start(writer, "Placemark")?;
    text_element(writer, "name", &line.name)?;
    if !line.description.is_empty() {
        text_element(writer, "description", &line.description)?;
    }
    text_element(writer, "styleUrl", &format!("#{}", line.style.token))?;
    start(writer, "LineString")?;
    text_element(writer, "coordinates", &format_coordinates(&line.coordinates))?;
    end(writer, "LineString")?;
    end(writer, "Placemark")
}

fn write_point<W: Write>(writer: &mut Writer<W>, point: &PointFeature) -> Result<(), KmlError> {
    start(writer, "Placemark")?;
    text_element(writer, "name", &point.name)?;
    text_element(writer, "styleUrl", &format!("#{}", point.style.token))?;
    start(writer, "Point")?;
    text_element(writer, "coordinates", &format_coordinate(point.location))?;
    end(writer, "Point")?;
    end(writer, "Placemark")
}

/// Format a coordinate as a KML `lon,lat,alt` tuple with zero altitude.
#[must_use]
pub fn format_coordinate(coord: Coord) -> String {
    format!("{},{},0", coord.x, coord.y)
}

/// Format a coordinate list as space-separated KML tuples.
#[must_use]
pub fn format_coordinates(coords: &[Coord]) -> String {
    coords
        .iter()
        .map(|&coord| format_coordinate(coord))
        .collect::<Vec<_>>()
        .join(" ")
}

fn start<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), KmlError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(encode_err)
}

fn start_with_id<W: Write>(writer: &mut Writer<W>, name: &str, id: &str) -> Result<(), KmlError> {
    let element = BytesStart::new(name).with_attributes([("id", id)]);
    writer
        .write_event(Event::Start(element))
        .map_err(encode_err)
}

fn end<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), KmlError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(encode_err)
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), KmlError> {
    start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(encode_err)?;
    end(writer, name)
}
