//! SVG preview of a placement run.

use std::path::Path;

use anyhow::{Context, Result};
use svg::node::element::{Rectangle, Text};
use svg::Document;

use crate::geometry::{nm_to_mm, Rect};
use crate::session::{PlacementOutcome, PlacementSummary};

const MARGIN_MM: f64 = 5.0;

fn rectangle(r: &Rect) -> Rectangle {
    Rectangle::new()
        .set("x", nm_to_mm(r.min.x))
        .set("y", nm_to_mm(r.min.y))
        .set("width", nm_to_mm(r.width()))
        .set("height", nm_to_mm(r.height()))
}

/// Draw the placement area, every placed box and a marker at the target of
/// each skipped component. Units are millimetres.
pub fn render_svg(summary: &PlacementSummary) -> Document {
    let area = &summary.area;
    let (x, y) = (nm_to_mm(area.min.x) - MARGIN_MM, nm_to_mm(area.min.y) - MARGIN_MM);
    let (w, h) = (
        nm_to_mm(area.width()) + 2.0 * MARGIN_MM,
        nm_to_mm(area.height()) + 2.0 * MARGIN_MM,
    );

    let mut document = Document::new()
        .set("width", format!("{w}mm"))
        .set("height", format!("{h}mm"))
        .set("viewBox", (x, y, w, h))
        .add(
            rectangle(area)
                .set("fill", "none")
                .set("stroke", "gray")
                .set("stroke-dasharray", "1,1")
                .set("stroke-width", 0.2),
        );

    for report in &summary.reports {
        match &report.outcome {
            PlacementOutcome::Placed { bounds, .. } => {
                document = document
                    .add(
                        rectangle(bounds)
                            .set("fill", "lightblue")
                            .set("stroke", "blue")
                            .set("stroke-width", 0.1),
                    )
                    .add(
                        Text::new()
                            .set("x", nm_to_mm(bounds.min.x) + 0.2)
                            .set("y", nm_to_mm(bounds.min.y) + 1.0)
                            .set("font-size", "1px")
                            .add(svg::node::Text::new(report.label.as_str())),
                    );
            }
            PlacementOutcome::Skipped => {
                let marker = Rect::from_center_half_extents(report.target, 250_000, 250_000);
                document = document
                    .add(rectangle(&marker).set("fill", "red"))
                    .add(
                        Text::new()
                            .set("x", nm_to_mm(marker.max.x) + 0.2)
                            .set("y", nm_to_mm(marker.max.y))
                            .set("font-size", "1px")
                            .set("fill", "red")
                            .add(svg::node::Text::new(report.label.as_str())),
                    );
            }
        }
    }

    document
}

pub fn write_svg(summary: &PlacementSummary, path: &Path) -> Result<()> {
    svg::save(path, &render_svg(summary))
        .with_context(|| format!("Failed to save SVG to {}", path.display()))
}
