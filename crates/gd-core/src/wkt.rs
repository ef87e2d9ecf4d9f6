//! Minimal well-known-text support.
//!
//! Input tables carry POI centroids, POI footprints and TAZ boundaries as
//! WKT strings.  Only the shapes those tables use are handled: `POINT`,
//! `POLYGON` and `MULTIPOLYGON` (2-D; a trailing `Z`/`M` tag is rejected).
//!
//! ```
//! use gd_core::wkt::{self, Geometry};
//!
//! let g = wkt::parse("POINT (-111.93 33.42)").unwrap();
//! assert!(matches!(g, Geometry::Point(p) if p.x == -111.93));
//! ```

use std::fmt::Write;

use crate::{GdError, GdResult, Point, Polygon};

/// Deepest parenthesis nesting any supported shape needs (`MULTIPOLYGON`).
const MAX_DEPTH: usize = 3;

/// A parsed WKT geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    Point(Point),
    Polygon(Polygon),
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a WKT string.
pub fn parse(s: &str) -> GdResult<Geometry> {
    let s = s.trim();
    let open = s
        .find('(')
        .ok_or_else(|| GdError::Wkt(format!("missing '(' in {s:?}")))?;
    let tag = s[..open].trim().to_ascii_uppercase();

    let mut cur = Cursor { bytes: s.as_bytes(), pos: open };
    let group = cur.group(1)?;
    cur.skip_ws();
    if cur.pos != cur.bytes.len() {
        return Err(GdError::Wkt(format!("trailing input after geometry in {s:?}")));
    }

    match tag.as_str() {
        "POINT" => match group {
            Group::Coords(pts) if pts.len() == 1 => Ok(Geometry::Point(pts[0])),
            _ => Err(GdError::Wkt(format!("POINT must hold exactly one coordinate: {s:?}"))),
        },
        "POLYGON" => {
            let (exterior, holes) = polygon_part(group)?;
            Ok(Geometry::Polygon(Polygon::new(exterior, holes)?))
        }
        "MULTIPOLYGON" => {
            let Group::List(parts) = group else {
                return Err(GdError::Wkt(format!("MULTIPOLYGON must nest polygons: {s:?}")));
            };
            let parts = parts.into_iter().map(polygon_part).collect::<GdResult<Vec<_>>>()?;
            Ok(Geometry::Polygon(Polygon::from_parts(parts)?))
        }
        other => Err(GdError::Wkt(format!("unsupported geometry type {other:?}"))),
    }
}

/// Parse a WKT string that must be a `POINT`.
pub fn parse_point(s: &str) -> GdResult<Point> {
    match parse(s)? {
        Geometry::Point(p) => Ok(p),
        Geometry::Polygon(_) => Err(GdError::Wkt(format!("expected POINT, got polygon: {s:?}"))),
    }
}

fn polygon_part(group: Group) -> GdResult<(Vec<Point>, Vec<Vec<Point>>)> {
    let Group::List(rings) = group else {
        return Err(GdError::Wkt("polygon must be a list of rings".into()));
    };
    let mut rings = rings.into_iter().map(|r| match r {
        Group::Coords(pts) => Ok(pts),
        Group::List(_) => Err(GdError::Wkt("ring must be a coordinate list".into())),
    });
    let exterior = rings
        .next()
        .ok_or_else(|| GdError::Wkt("polygon has no rings".into()))??;
    let holes = rings.collect::<GdResult<Vec<_>>>()?;
    Ok((exterior, holes))
}

/// One parenthesised level of a WKT body.
enum Group {
    Coords(Vec<Point>),
    List(Vec<Group>),
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.bytes.get(self.pos).copied()
    }

    fn expect(&mut self, c: u8) -> GdResult<()> {
        match self.peek() {
            Some(b) if b == c => {
                self.pos += 1;
                Ok(())
            }
            other => Err(GdError::Wkt(format!(
                "expected {:?} at byte {}, found {:?}",
                c as char,
                self.pos,
                other.map(|b| b as char)
            ))),
        }
    }

    /// Parse one parenthesised group at nesting level `depth` (1-based).
    fn group(&mut self, depth: usize) -> GdResult<Group> {
        if depth > MAX_DEPTH {
            return Err(GdError::Wkt(format!("geometry nested deeper than {MAX_DEPTH} levels (byte {})", self.pos)));
        }
        self.expect(b'(')?;
        let group = if self.peek() == Some(b'(') {
            let mut items = vec![self.group(depth + 1)?];
            while self.peek() == Some(b',') {
                self.pos += 1;
                items.push(self.group(depth + 1)?);
            }
            Group::List(items)
        } else {
            let mut pts = vec![self.coord()?];
            while self.peek() == Some(b',') {
                self.pos += 1;
                pts.push(self.coord()?);
            }
            Group::Coords(pts)
        };
        self.expect(b')')?;
        Ok(group)
    }

    fn coord(&mut self) -> GdResult<Point> {
        let x = self.number()?;
        let y = self.number()?;
        if matches!(self.peek(), Some(b) if b != b',' && b != b')') {
            return Err(GdError::Wkt(format!("only 2-D coordinates are supported (byte {})", self.pos)));
        }
        Ok(Point::new(x, y))
    }

    fn number(&mut self) -> GdResult<f64> {
        self.skip_ws();
        let start = self.pos;
        while self.pos < self.bytes.len()
            && matches!(self.bytes[self.pos], b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E')
        {
            self.pos += 1;
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|e| GdError::Wkt(e.to_string()))?;
        text.parse::<f64>()
            .map_err(|_| GdError::Wkt(format!("invalid number {text:?} at byte {start}")))
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// Format a polygon as `POLYGON` (one part) or `MULTIPOLYGON`.
pub fn polygon_to_wkt(poly: &Polygon) -> String {
    let parts = poly.parts();
    let mut out = String::new();
    if parts.len() == 1 {
        out.push_str("POLYGON ");
        write_part(&mut out, &parts[0]);
    } else {
        out.push_str("MULTIPOLYGON (");
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write_part(&mut out, part);
        }
        out.push(')');
    }
    out
}

fn write_part(out: &mut String, (exterior, holes): &(Vec<Point>, Vec<Vec<Point>>)) {
    out.push('(');
    write_ring(out, exterior);
    for hole in holes {
        out.push_str(", ");
        write_ring(out, hole);
    }
    out.push(')');
}

fn write_ring(out: &mut String, ring: &[Point]) {
    out.push('(');
    for (i, p) in ring.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{} {}", p.x, p.y);
    }
    out.push(')');
}
