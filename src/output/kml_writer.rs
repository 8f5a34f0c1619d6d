use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use kml::types::{AltitudeMode, Coord, Element, Geometry, LineString, Placemark, Point};
use kml::{Kml, KmlDocument, KmlVersion, KmlWriter};

use super::error::OutputError;
use super::field_value;
use crate::config::{PointStyle, Settings};
use crate::track::{TelemetrySample, Trajectory};

const TRACK_STYLE: &str = "track";
const MEASURED_STYLE: &str = "measured";
const INTERPOLATED_STYLE: &str = "interpolated";

pub fn save_kml(trajectory: &Trajectory, name: &str, settings: &Settings, path: &Path) -> Result<(), OutputError> {
    let file = BufWriter::new(File::create(path)?);
    write_kml(trajectory, name, settings, file)?;
    log::info!("wrote {} placemarks to {}", trajectory.samples.len() + 1, path.display());
    Ok(())
}

/// Render the trajectory as a KML document: the flight path as one line
/// plus a styled placemark per sample.
pub fn write_kml<W: io::Write>(trajectory: &Trajectory, name: &str, settings: &Settings, out: W) -> Result<(), OutputError> {
    let doc = build_document(trajectory, name, settings);
    let mut writer = KmlWriter::from_writer(out);
    writer.write(&doc)?;
    Ok(())
}

fn build_document(trajectory: &Trajectory, name: &str, settings: &Settings) -> Kml {
    let mut elements = vec![
        Kml::Element(text_element("name", name)),
        Kml::Element(line_style(settings)),
        Kml::Element(point_style(MEASURED_STYLE, &settings.point_style.icon_color, &settings.point_style)),
        Kml::Element(point_style(
            INTERPOLATED_STYLE,
            &settings.point_style.interp_icon_color,
            &settings.point_style,
        )),
        flight_path(trajectory, name),
    ];
    elements.extend(
        trajectory
            .samples
            .iter()
            .map(|s| sample_placemark(s, settings)),
    );

    let doc = Kml::Document {
        attrs: HashMap::new(),
        elements,
    };
    let doc = KmlDocument {
        attrs: HashMap::new(),
        elements: vec![doc],
        version: KmlVersion::V22,
    };
    Kml::KmlDocument(doc)
}

fn flight_path(trajectory: &Trajectory, name: &str) -> Kml {
    let coords = trajectory
        .samples
        .iter()
        .filter_map(|s| {
            let c = s.coordinate?;
            Some(Coord::new(c.longitude(), c.latitude(), s.height_above_ground))
        })
        .collect::<Vec<_>>();

    let ls = LineString {
        tessellate: false,
        extrude: false,
        altitude_mode: AltitudeMode::RelativeToGround,
        coords,
        ..Default::default()
    };
    Kml::Placemark(Placemark {
        name: Some(format!("{} Flight Path", name)),
        geometry: Some(Geometry::LineString(ls)),
        children: vec![text_element("styleUrl", &format!("#{}", TRACK_STYLE))],
        ..Default::default()
    })
}

fn sample_placemark(sample: &TelemetrySample, settings: &Settings) -> Kml {
    let label = settings
        .point_style
        .label_points
        .then(|| sample.timestamp.time().format("%H:%M:%S%.f").to_string());

    let description = settings
        .displayed_fields
        .iter()
        .filter_map(|field| field_value(sample, field).map(|v| format!("{}: {}", field, v)))
        .collect::<Vec<_>>()
        .join("\n");

    let geometry = sample.coordinate.map(|c| {
        Geometry::Point(Point {
            altitude_mode: AltitudeMode::RelativeToGround,
            ..Point::new(c.longitude(), c.latitude(), sample.height_above_ground)
        })
    });

    let style = if sample.interpolated {
        INTERPOLATED_STYLE
    } else {
        MEASURED_STYLE
    };
    let when = sample.timestamp.format("%Y-%m-%dT%H:%M:%S%.f").to_string();

    Kml::Placemark(Placemark {
        name: label,
        description: Some(description),
        geometry,
        children: vec![
            text_element("styleUrl", &format!("#{}", style)),
            parent_element("TimeStamp", vec![text_element("when", &when)]),
        ],
        ..Default::default()
    })
}

fn line_style(settings: &Settings) -> Element {
    style_element(
        TRACK_STYLE,
        vec![parent_element(
            "LineStyle",
            vec![
                text_element("color", &settings.line_style.color),
                text_element("width", &settings.line_style.width.to_string()),
            ],
        )],
    )
}

fn point_style(id: &str, color: &str, style: &PointStyle) -> Element {
    style_element(
        id,
        vec![
            parent_element(
                "IconStyle",
                vec![
                    text_element("color", color),
                    text_element("scale", &style.icon_scale.to_string()),
                    parent_element("Icon", vec![text_element("href", &style.icon_href)]),
                ],
            ),
            parent_element(
                "LabelStyle",
                vec![
                    text_element("color", &style.label_color),
                    text_element("scale", &style.label_scale.to_string()),
                ],
            ),
        ],
    )
}

fn style_element(id: &str, children: Vec<Element>) -> Element {
    Element {
        name: "Style".to_string(),
        attrs: HashMap::from([("id".to_string(), id.to_string())]),
        children,
        ..Default::default()
    }
}

fn text_element(name: &str, content: &str) -> Element {
    Element {
        name: name.to_string(),
        content: Some(content.to_string()),
        ..Default::default()
    }
}

fn parent_element(name: &str, children: Vec<Element>) -> Element {
    Element {
        name: name.to_string(),
        children,
        ..Default::default()
    }
}
