//! On-disk drawing format.
//!
//! A file is a JSON array of records in paint order, one per shape:
//!
//! ```text
//! {"type":"line","start":[x1,y1],"end":[x2,y2],"color":"#rrggbb","width":1}
//! {"type":"rect","rect":[x,y,w,h],"color":"#rrggbb","width":1,"brush-color":"#rrggbb","brush-style":11}
//! {"type":"path","path":[[[x,y],...],...],"color":"#rrggbb","width":1}
//! {"type":"polygon","points":[[x,y],...],"color":"#rrggbb","width":1}
//! {"type":"text","text":"...","pos":[x,y],"font":"Sans Serif,12,-1,5,50,0,0,0,0,0","color":"#rrggbb"}
//! ```
//!
//! Shape ids are not stored. Any record that cannot be turned into a shape
//! rejects the whole file.

use super::{StorageError, StorageResult};
use crate::document::Document;
use crate::shapes::{
    FillPattern, FontDescriptor, Line, Path, Polygon, Rectangle, SerializableColor, Shape,
    ShapeStyle, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

type Xy = [f64; 2];

/// One shape as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Record {
    Line {
        start: Xy,
        end: Xy,
        color: String,
        width: u32,
    },
    Rect {
        rect: [f64; 4],
        color: String,
        width: u32,
        #[serde(rename = "brush-color")]
        brush_color: String,
        #[serde(rename = "brush-style")]
        brush_style: i64,
    },
    Path {
        path: Vec<Vec<Xy>>,
        color: String,
        width: u32,
    },
    Polygon {
        points: Vec<Xy>,
        color: String,
        width: u32,
    },
    Text {
        text: String,
        pos: Xy,
        font: String,
        color: String,
    },
}

fn xy(point: Point) -> Xy {
    [point.x, point.y]
}

fn point([x, y]: Xy) -> Point {
    Point::new(x, y)
}

fn parse_color(value: &str) -> Result<SerializableColor, String> {
    SerializableColor::from_hex(value).ok_or_else(|| format!("invalid color {value:?}"))
}

fn stroke(value: &str, width: u32) -> Result<ShapeStyle, String> {
    Ok(ShapeStyle::new(parse_color(value)?, width))
}

impl Record {
    fn from_shape(shape: &Shape) -> Self {
        match shape {
            Shape::Line(line) => Record::Line {
                start: xy(line.start),
                end: xy(line.end),
                color: line.style.stroke_color.to_hex(),
                width: line.style.stroke_width,
            },
            Shape::Rectangle(rect) => Record::Rect {
                rect: [rect.position.x, rect.position.y, rect.width, rect.height],
                color: rect.style.stroke_color.to_hex(),
                width: rect.style.stroke_width,
                brush_color: rect.fill_color.to_hex(),
                brush_style: rect.fill_pattern.code(),
            },
            Shape::Path(path) => Record::Path {
                path: path
                    .subpaths
                    .iter()
                    .map(|sub| sub.iter().copied().map(xy).collect())
                    .collect(),
                color: path.style.stroke_color.to_hex(),
                width: path.style.stroke_width,
            },
            Shape::Polygon(polygon) => Record::Polygon {
                points: polygon.vertices.iter().copied().map(xy).collect(),
                color: polygon.style.stroke_color.to_hex(),
                width: polygon.style.stroke_width,
            },
            Shape::Text(text) => Record::Text {
                text: text.content.clone(),
                pos: xy(text.position),
                font: text.font.to_descriptor_string(),
                color: text.color.to_hex(),
            },
        }
    }

    fn into_shape(self) -> Result<Shape, String> {
        let shape = match self {
            Record::Line {
                start,
                end,
                color,
                width,
            } => Shape::Line(Line::new(point(start), point(end)).with_style(stroke(&color, width)?)),
            Record::Rect {
                rect: [x, y, w, h],
                color,
                width,
                brush_color,
                brush_style,
            } => {
                let pattern = FillPattern::from_code(brush_style)
                    .ok_or_else(|| format!("unknown brush style {brush_style}"))?;
                Shape::Rectangle(
                    Rectangle::new(Point::new(x, y), w, h)
                        .with_style(stroke(&color, width)?)
                        .with_fill(parse_color(&brush_color)?, pattern),
                )
            }
            Record::Path { path, color, width } => Shape::Path(
                Path::new(
                    path.into_iter()
                        .map(|sub| sub.into_iter().map(point).collect())
                        .collect(),
                )
                .with_style(stroke(&color, width)?),
            ),
            Record::Polygon {
                points,
                color,
                width,
            } => {
                if points.len() < Polygon::MIN_VERTICES {
                    return Err(format!(
                        "polygon needs at least {} points, found {}",
                        Polygon::MIN_VERTICES,
                        points.len()
                    ));
                }
                Shape::Polygon(
                    Polygon::new(points.into_iter().map(point).collect())
                        .with_style(stroke(&color, width)?),
                )
            }
            Record::Text {
                text,
                pos,
                font,
                color,
            } => Shape::Text(
                Text::new(point(pos), text)
                    .with_font(FontDescriptor::parse(&font)?)
                    .with_color(parse_color(&color)?),
            ),
        };
        Ok(shape)
    }
}

/// Serialize a document, shapes in paint order.
pub fn to_json(document: &Document) -> StorageResult<String> {
    let records: Vec<Record> = document.shapes_ordered().map(Record::from_shape).collect();
    serde_json::to_string_pretty(&records).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Parse a document. Every shape gets a fresh id.
///
/// Fails with [`StorageError::Serialization`] if the text is not a JSON
/// array, and with [`StorageError::MalformedRecord`] naming the first record
/// that is not a valid shape.
pub fn from_json(json: &str) -> StorageResult<Document> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut document = Document::new();
    for (index, value) in values.into_iter().enumerate() {
        let malformed = |reason: String| StorageError::MalformedRecord { index, reason };
        let record: Record = serde_json::from_value(value).map_err(|e| malformed(e.to_string()))?;
        let shape = record.into_shape().map_err(malformed)?;
        document.add_shape(shape);
    }
    Ok(document)
}
