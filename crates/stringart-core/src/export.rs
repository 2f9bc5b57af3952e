//! Print-ready SVG export. One scene unit is one millimeter.

use crate::scene::Scene;
use crate::shapes::Line;
use std::fmt::Write;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the scene has no lines")]
    EmptyScene,
}

const NAIL_LINE_STYLE: &str = r#"fill="none" stroke="black" stroke-width="0.5""#;

fn push_line(svg: &mut String, line: &Line) {
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"    <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" />"#,
        line.p1.x, line.p1.y, line.p2.x, line.p2.y
    );
}

/// Render the scene as a standalone SVG sized to the bounding box of all
/// line endpoints. Lines come first, then fans, each in z-order.
pub fn to_svg(scene: &Scene) -> Result<String, ExportError> {
    let bounds = scene.bounds().ok_or(ExportError::EmptyScene)?;
    let (width, height) = (bounds.width(), bounds.height());

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    let _ = writeln!(
        svg,
        r#"<svg width="{width:.3}mm" height="{height:.3}mm" viewBox="{:.3} {:.3} {width:.3} {height:.3}" xmlns="http://www.w3.org/2000/svg">"#,
        bounds.x0, bounds.y0
    );

    let _ = writeln!(svg, r#"  <g class="lines" {NAIL_LINE_STYLE}>"#);
    for (_, line) in scene.lines() {
        push_line(&mut svg, line);
    }
    svg.push_str("  </g>\n");

    for (id, fan) in scene.fans() {
        let _ = writeln!(
            svg,
            r#"  <g class="fans" fill="none" stroke="{}" stroke-width="{:.3}">"#,
            fan.color, fan.stroke_width
        );
        for string in scene.fan_strings(id).unwrap_or_default() {
            push_line(&mut svg, &string);
        }
        svg.push_str("  </g>\n");
    }

    svg.push_str("</svg>\n");
    log::info!(
        "Exported {} lines and {} fans ({width:.1}mm x {height:.1}mm)",
        scene.line_count(),
        scene.fan_count()
    );
    Ok(svg)
}
