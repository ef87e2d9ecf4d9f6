//! Regular-grid zoning with boundary gates.
//!
//! # Layout
//!
//! The extent of all non-boundary nodes is expanded by [`EXTENT_EPSILON`] and
//! split into `num_x × num_y` rectangles.  Cells are emitted row-major with
//! the **top** row first and named `{row}{col}`: `A0, A1, …, B0, …`, where
//! the row label runs `A…Z, AA, AB, …` (see [`row_label`]) and the column
//! number is 0-based.  Zone ids are sequential from 0 in that order.
//!
//! Gates follow the cells.  Each edge cell contributes one gate, placed a full
//! cell step beyond the cell's centroid (so half a cell outside the grid
//! edge), in the order: upper row, lower row, left column, right column.
//! Gates are named `gate0, gate1, …`.  A `2 × 2` grid therefore has 4 cells
//! and 8 gates.

use gd_core::{Bounds, DistanceUnit, Node, Point, Polygon, ZoneId};

use crate::{Zone, ZoneError, ZoneKind, ZoneResult, ZoneSet};

/// Margin added on every side of the node extent so that extreme nodes fall
/// strictly inside the outer cells.
pub const EXTENT_EPSILON: f64 = 0.000_001;

// ── ZoningSpec ────────────────────────────────────────────────────────────────

/// How to divide the study area.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoningSpec {
    /// A fixed number of columns and rows.
    Blocks { num_x: usize, num_y: usize },
    /// Cells of (at most) this physical size; counts are derived from the
    /// great-circle width and height of the extent.
    CellSize { width: f64, height: f64, unit: DistanceUnit },
}

impl ZoningSpec {
    /// Resolve raw, individually optional options into a spec.
    ///
    /// Exactly one of the two pairs must be given, and each pair must be
    /// complete.
    pub fn from_options(
        num_x_blocks: Option<usize>,
        num_y_blocks: Option<usize>,
        cell_width: Option<f64>,
        cell_height: Option<f64>,
        unit: DistanceUnit,
    ) -> ZoneResult<Self> {
        let has_blocks = num_x_blocks.is_some() || num_y_blocks.is_some();
        let has_cells = cell_width.is_some() || cell_height.is_some();

        match (has_blocks, has_cells) {
            (true, true) => Err(ZoneError::AmbiguousZoning),
            (false, false) => Err(ZoneError::MissingZoning),
            (true, false) => match (num_x_blocks, num_y_blocks) {
                (Some(num_x), Some(num_y)) if num_x > 0 && num_y > 0 => {
                    Ok(ZoningSpec::Blocks { num_x, num_y })
                }
                (Some(_), Some(_)) => Err(ZoneError::InvalidGrid(
                    "num_x_blocks and num_y_blocks must be positive".into(),
                )),
                _ => Err(ZoneError::InvalidGrid(
                    "num_x_blocks and num_y_blocks must be given together".into(),
                )),
            },
            (false, true) => match (cell_width, cell_height) {
                (Some(width), Some(height)) if width > 0.0 && height > 0.0 => {
                    Ok(ZoningSpec::CellSize { width, height, unit })
                }
                (Some(_), Some(_)) => Err(ZoneError::InvalidGrid(
                    "cell_width and cell_height must be positive".into(),
                )),
                _ => Err(ZoneError::InvalidGrid(
                    "cell_width and cell_height must be given together".into(),
                )),
            },
        }
    }

    /// Column and row counts for `extent`.
    pub fn resolve(&self, extent: &Bounds) -> (usize, usize) {
        match *self {
            ZoningSpec::Blocks { num_x, num_y } => (num_x, num_y),
            ZoningSpec::CellSize { width, height, unit } => {
                let sw = Point::new(extent.x_min, extent.y_min);
                let x_dist = sw.distance(Point::new(extent.x_max, extent.y_min), unit);
                let y_dist = sw.distance(Point::new(extent.x_min, extent.y_max), unit);
                let num_x = (x_dist / width).ceil().max(1.0) as usize;
                let num_y = (y_dist / height).ceil().max(1.0) as usize;
                (num_x, num_y)
            }
        }
    }
}

// ── Row labels ────────────────────────────────────────────────────────────────

/// Spreadsheet-style row label: `0 → A`, `25 → Z`, `26 → AA`, `27 → AB`.
pub fn row_label(n: usize) -> String {
    let mut out = Vec::new();
    let mut n = n;
    loop {
        out.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Builds a grid [`ZoneSet`] from a node extent.
///
/// # Example
///
/// ```
/// use gd_core::{Node, NodeId, Point};
/// use gd_zone::{GridBuilder, ZoningSpec};
///
/// let nodes: Vec<Node> = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]
///     .iter()
///     .enumerate()
///     .map(|(i, &(x, y))| Node::new(NodeId(i as u64), Point::new(x, y)))
///     .collect();
/// let zones = GridBuilder::new(ZoningSpec::Blocks { num_x: 2, num_y: 2 })
///     .build(&nodes)
///     .unwrap();
/// assert_eq!(zones.len(), 4 + 8);
/// ```
#[derive(Clone, Debug)]
pub struct GridBuilder {
    spec: ZoningSpec,
    gates: bool,
}

impl GridBuilder {
    pub fn new(spec: ZoningSpec) -> Self {
        Self { spec, gates: true }
    }

    /// Emit gate zones around the grid (default: `true`).
    pub fn gates(mut self, enabled: bool) -> Self {
        self.gates = enabled;
        self
    }

    /// Extent of all non-boundary nodes, expanded by [`EXTENT_EPSILON`].
    pub fn extent(nodes: &[Node]) -> ZoneResult<Bounds> {
        Bounds::covering(nodes.iter().filter(|n| !n.is_boundary()).map(|n| n.point))
            .map(|b| b.expand(EXTENT_EPSILON))
            .ok_or(ZoneError::EmptyExtent)
    }

    pub fn build(&self, nodes: &[Node]) -> ZoneResult<ZoneSet> {
        let extent = Self::extent(nodes)?;
        self.build_in(extent)
    }

    /// Build over an explicit extent (no epsilon is added).
    pub fn build_in(&self, extent: Bounds) -> ZoneResult<ZoneSet> {
        let (num_x, num_y) = self.spec.resolve(&extent);
        if num_x == 0 || num_y == 0 {
            return Err(ZoneError::InvalidGrid(format!("{num_x} x {num_y} grid")));
        }

        let dx = extent.width() / num_x as f64;
        let dy = extent.height() / num_y as f64;

        // Column edges left→right, row edges top→bottom.  The outermost edge
        // is pinned to the extent so float error never leaves a sliver.
        let x_edge = |i: usize| if i == num_x { extent.x_max } else { extent.x_min + i as f64 * dx };
        let y_edge = |j: usize| if j == num_y { extent.y_min } else { extent.y_max - j as f64 * dy };

        let mut zones = Vec::with_capacity(num_x * num_y + 2 * (num_x + num_y));
        let mut next_id = 0u64;

        for row in 0..num_y {
            let label = row_label(row);
            for col in 0..num_x {
                let cell = Bounds {
                    x_min: x_edge(col),
                    x_max: x_edge(col + 1),
                    y_min: y_edge(row + 1),
                    y_max: y_edge(row),
                };
                let mut zone = Zone::from_polygon(
                    ZoneId(next_id),
                    format!("{label}{col}"),
                    ZoneKind::Cell,
                    Polygon::rectangle(cell),
                )?;
                zone.bounds = cell;
                zones.push(zone);
                next_id += 1;
            }
        }

        if self.gates {
            let centroid = |row: usize, col: usize| zones[row * num_x + col].centroid;

            let mut gate_points = Vec::with_capacity(2 * (num_x + num_y));
            gate_points.extend((0..num_x).map(|c| {
                let p = centroid(0, c);
                Point::new(p.x, p.y + dy)
            }));
            gate_points.extend((0..num_x).map(|c| {
                let p = centroid(num_y - 1, c);
                Point::new(p.x, p.y - dy)
            }));
            gate_points.extend((0..num_y).map(|r| {
                let p = centroid(r, 0);
                Point::new(p.x - dx, p.y)
            }));
            gate_points.extend((0..num_y).map(|r| {
                let p = centroid(r, num_x - 1);
                Point::new(p.x + dx, p.y)
            }));

            for (i, p) in gate_points.into_iter().enumerate() {
                zones.push(Zone::from_centroid(ZoneId(next_id), format!("gate{i}"), ZoneKind::Gate, p));
                next_id += 1;
            }
        }

        log::debug!(
            "grid {num_x} x {num_y} over [{:.6}, {:.6}] x [{:.6}, {:.6}]: {} zones",
            extent.x_min,
            extent.x_max,
            extent.y_min,
            extent.y_max,
            zones.len()
        );
        ZoneSet::new(zones)
    }
}
