use geojsonlib::serialization::{GeoJson, to_geojson_string};
use geojsonlib::{Geometry, GeometricObject, GeometryParser};
use serde_json::Value;
use std::fs::{self, File};
use std::io::Write;

/// Load the raw GeoJSON text, either given inline or read from a file
pub fn read_input(input: String, from_file: bool) -> Result<String, String> {
    if from_file {
        log::debug!("Reading GeoJSON from '{input}'");
        fs::read_to_string(&input).map_err(|e| format!("Failed to read '{input}': {e}"))
    } else {
        Ok(input)
    }
}

// Decode the text and parse it, keeping the typed error in the document
fn load_document(text: &str, parser: &GeometryParser) -> Result<GeoJson, String> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| format!("Failed to decode JSON: {e}"))?;
    Ok(GeoJson::with_parser(&value, parser))
}

fn load_geometry(text: &str, parser: &GeometryParser) -> Result<Geometry, String> {
    load_document(text, parser)?
        .into_result()
        .map_err(|e| {
            format!(
                "Failed to parse GeoJSON ({}, code {}): {e}",
                e.domain(),
                e.code() as i32
            )
        })
}

/// One-line summaries of a geometry, nested collections indented
pub fn describe(geometry: &Geometry, indent: usize) -> Vec<String> {
    let pad = "  ".repeat(indent);
    let mut lines = Vec::new();
    match geometry {
        Geometry::Point(pt) => {
            let pos = pt.position();
            match pos.alt() {
                Some(alt) => {
                    lines.push(format!("{pad}Point ({}, {}, {alt})", pos.lon(), pos.lat()))
                }
                None => lines.push(format!("{pad}Point ({}, {})", pos.lon(), pos.lat())),
            }
        }
        Geometry::MultiPoint(mp) => {
            lines.push(format!("{pad}MultiPoint with {} points", mp.points().len()));
        }
        Geometry::LineString(ls) => {
            let ring = if ls.is_linear_ring() { ", closed ring" } else { "" };
            lines.push(format!(
                "{pad}LineString with {} vertices{ring}",
                ls.total_vertices()
            ));
        }
        Geometry::MultiLineString(mls) => {
            lines.push(format!(
                "{pad}MultiLineString with {} line strings",
                mls.line_strings().len()
            ));
        }
        Geometry::Polygon(poly) => match poly.exterior() {
            None => lines.push(format!("{pad}Polygon (empty)")),
            Some(outer) => lines.push(format!(
                "{pad}Polygon with {} exterior vertices and {} holes",
                outer.total_vertices() - 1,
                poly.holes().len()
            )),
        },
        Geometry::MultiPolygon(mp) => {
            lines.push(format!("{pad}MultiPolygon with {} polygons", mp.polygons().len()));
        }
        Geometry::GeometryCollection(gc) => {
            lines.push(format!(
                "{pad}GeometryCollection with {} geometries",
                gc.geometries().len()
            ));
            for child in gc.geometries() {
                lines.extend(describe(child, indent + 1));
            }
        }
    }
    lines
}

/// Parse an input string and print some details about the geometry
pub fn parse_show_detail(text: String, parser: &GeometryParser) -> Result<(), String> {
    let doc = load_document(&text, parser)?;
    match (doc.geometry(), doc.error()) {
        (Some(geom), _) => {
            println!("Parsed a Geometry of Type {}!", geom.geometry_type());
            for line in describe(geom, 0) {
                println!("{line}");
            }
            Ok(())
        }
        (None, Some(err)) => {
            println!("Invalid GeoJSON geometry");
            println!("Error domain: {}", err.domain());
            println!("Error code: {} ({:?})", err.code() as i32, err.code());
            Err(err.to_string())
        }
        (None, None) => Err(String::from("Document holds neither a geometry nor an error")),
    }
}

/// Parse the given input and print its WKT representation
pub fn show_wkt(text: String, parser: &GeometryParser) -> Result<(), String> {
    let geom = load_geometry(&text, parser)?;
    println!("{}", geom.wkt());
    Ok(())
}

/// Parse the given input, re-encode it and optionally save the result
pub fn format_geojson(
    text: String,
    parser: &GeometryParser,
    pretty: bool,
    output_path: Option<String>,
) -> Result<(), String> {
    let geom = load_geometry(&text, parser)?;
    let encoded = to_geojson_string(&geom, pretty);
    match output_path {
        None => {
            println!("{encoded}");
            Ok(())
        }
        Some(ref fp) => {
            let mut file = match File::create(fp) {
                Ok(f) => f,
                Err(e) => return Err(format!("Failed to create file: {}", e)),
            };
            match file.write_all(encoded.as_bytes()) {
                Err(_) => Err(String::from("Failed to write to file!")),
                Ok(_) => {
                    println!("Geometry saved to file: '{fp}'");
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_collection() {
        let geom = Geometry::from_json(&json!({
            "type": "GeometryCollection",
            "geometries": [
                {"type": "Point", "coordinates": [1.0, 2.0]},
                {"type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [0, 0]]]}
            ]
        }))
        .unwrap();
        let lines = describe(&geom, 0);
        assert_eq!(
            lines,
            vec![
                String::from("GeometryCollection with 2 geometries"),
                String::from("  Point (1, 2)"),
                String::from("  Polygon with 3 exterior vertices and 0 holes"),
            ]
        );
    }

    #[test]
    fn test_load_geometry_errors() {
        let parser = GeometryParser::default();
        match load_geometry(r#"{"type": "Blob", "coordinates": []}"#, &parser) {
            Err(msg) => assert!(msg.contains("code 2"), "{msg}"),
            Ok(_) => panic!("Loaded an unsupported geometry"),
        }
        if let Ok(_) = load_geometry("not json", &parser) {
            panic!("Loaded invalid JSON");
        }
    }

    #[test]
    fn test_read_inline_input() {
        let text = read_input(String::from("{}"), false).unwrap();
        assert_eq!(text, "{}");
        if let Ok(_) = read_input(String::from("/definitely/not/a/file.geojson"), true) {
            panic!("Read a missing file");
        }
    }
}
