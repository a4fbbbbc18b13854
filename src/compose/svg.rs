use std::fmt::Write as _;

use crate::{
    compose::bounds::filter_region,
    foundation::core::{Rect, Size},
    foundation::math::{fmt_num, write_num},
    scene::model::{SceneDocument, Shape},
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const GRAIN_FILTER_ID: &str = "grain";
const DEBUG_VERTEX_RADIUS: f64 = 4.0;
const DEBUG_CROSSHAIR: f64 = 12.0;

/// Composition options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeOpts {
    /// Declared pixel size of the document. Defaults to the logical canvas size.
    pub output_size: Option<Size>,
    /// Draw vertex markers and center crosshairs on top. Never used for export.
    pub debug_overlay: bool,
}

/// Serialize a scene as a self-contained SVG document.
///
/// The `viewBox` is always the logical canvas; `output_size` only changes the declared
/// `width`/`height`, stretching content non-uniformly when the aspect ratio differs.
pub fn compose(doc: &SceneDocument, output_size: Option<Size>) -> String {
    compose_with(
        doc,
        &ComposeOpts {
            output_size,
            debug_overlay: false,
        },
    )
}

/// Serialize a scene as SVG with explicit options.
///
/// Output depends only on `doc` and `opts`: identical input gives byte-identical markup.
#[tracing::instrument(skip(doc), fields(shapes = doc.shapes.len()))]
pub fn compose_with(doc: &SceneDocument, opts: &ComposeOpts) -> String {
    let canvas = &doc.canvas;
    let out = opts.output_size.unwrap_or(canvas.size());
    let region = filter_region(doc);

    let mut svg = String::with_capacity(1024 + doc.shapes.len() * 512);
    let _ = writeln!(
        svg,
        r#"<svg xmlns="{SVG_NS}" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="none">"#,
        out.width, out.height, canvas.width, canvas.height
    );

    // One filter per distinct effective blur, in first-use order.
    let mut blurs: Vec<f64> = Vec::new();
    for shape in &doc.shapes {
        let b = shape.effective_blur(&doc.filters);
        if b > 0.0 && !blurs.contains(&b) {
            blurs.push(b);
        }
    }
    let grain = doc.filters.grain_enabled && doc.filters.grain > 0.0;

    if !blurs.is_empty() || grain {
        svg.push_str("<defs>\n");
        for &b in &blurs {
            write_filter_open(&mut svg, &blur_filter_id(b), region);
            svg.push_str(r#"<feGaussianBlur stdDeviation=""#);
            write_num(&mut svg, b);
            svg.push_str("\"/></filter>\n");
        }
        if grain {
            write_filter_open(&mut svg, GRAIN_FILTER_ID, region);
            svg.push_str(concat!(
                r#"<feTurbulence type="fractalNoise" baseFrequency="0.65" numOctaves="3" stitchTiles="stitch" result="noise"/>"#,
                r##"<feSpecularLighting in="noise" surfaceScale="2" specularConstant="0.75" specularExponent="20" lighting-color="#ffffff">"##,
                r#"<feDistantLight azimuth="3" elevation="100"/></feSpecularLighting>"#,
                "</filter>\n",
            ));
        }
        svg.push_str("</defs>\n");
    }

    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        canvas.width,
        canvas.height,
        escape_attr(&canvas.background.color)
    );

    for shape in &doc.shapes {
        let Some(fill) = doc.fill_for(shape) else {
            continue;
        };
        svg.push_str(r#"<path d=""#);
        write_path_data(&mut svg, shape.points.iter().map(|p| (p.x, p.y)));
        let _ = write!(svg, r#"" fill="{}" fill-opacity=""#, escape_attr(&fill.value));
        write_num(&mut svg, shape.effective_opacity(&doc.filters));
        svg.push('"');
        let blur = shape.effective_blur(&doc.filters);
        if blur > 0.0 {
            let _ = write!(svg, r#" filter="url(#{})""#, blur_filter_id(blur));
        }
        write_rotation(&mut svg, shape);
        svg.push_str("/>\n");
    }

    if grain {
        let _ = write!(
            svg,
            r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff" filter="url(#{GRAIN_FILTER_ID})" opacity=""##,
            canvas.width, canvas.height
        );
        write_num(&mut svg, doc.filters.grain.clamp(0.0, 100.0) / 100.0);
        svg.push_str("\"/>\n");
    }

    if opts.debug_overlay {
        write_debug_overlay(&mut svg, doc);
    }

    svg.push_str("</svg>\n");
    svg
}

/// Filter id for a blur value: `blur-96`, `blur-12_5`.
fn blur_filter_id(blur: f64) -> String {
    format!("blur-{}", fmt_num(blur).replace('.', "_"))
}

fn write_filter_open(svg: &mut String, id: &str, region: Rect) {
    let _ = write!(svg, r#"<filter id="{id}" filterUnits="userSpaceOnUse" x=""#);
    write_num(svg, region.x0);
    svg.push_str(r#"" y=""#);
    write_num(svg, region.y0);
    svg.push_str(r#"" width=""#);
    write_num(svg, region.width());
    svg.push_str(r#"" height=""#);
    write_num(svg, region.height());
    svg.push_str(r#"" color-interpolation-filters="sRGB">"#);
}

/// `M x y L x y ... Z` over the outline in stored order.
fn write_path_data(svg: &mut String, points: impl Iterator<Item = (f64, f64)>) {
    for (i, (x, y)) in points.enumerate() {
        svg.push_str(if i == 0 { "M" } else { " L" });
        svg.push(' ');
        write_num(svg, x);
        svg.push(' ');
        write_num(svg, y);
    }
    svg.push_str(" Z");
}

/// Rotation hint as `rotate(deg cx cy)` about the stored center.
fn write_rotation(svg: &mut String, shape: &Shape) {
    let Some(deg) = shape.rotation.filter(|d| d.is_finite() && *d != 0.0) else {
        return;
    };
    svg.push_str(r#" transform="rotate("#);
    write_num(svg, deg);
    svg.push(' ');
    write_num(svg, shape.center.x);
    svg.push(' ');
    write_num(svg, shape.center.y);
    svg.push_str(")\"");
}

fn write_debug_overlay(svg: &mut String, doc: &SceneDocument) {
    svg.push_str(r##"<g id="debug-overlay" fill="none" stroke="#000000" stroke-width="1.5">"##);
    svg.push('\n');
    for shape in &doc.shapes {
        for p in &shape.points {
            svg.push_str(r#"<circle cx=""#);
            write_num(svg, p.x);
            svg.push_str(r#"" cy=""#);
            write_num(svg, p.y);
            let _ = writeln!(svg, r##"" r="{DEBUG_VERTEX_RADIUS}" fill="#ffffff"/>"##);
        }
        let c = shape.center;
        svg.push_str(r#"<path d=""#);
        let _ = write!(
            svg,
            "M {} {} L {} {} M {} {} L {} {}",
            fmt_num(c.x - DEBUG_CROSSHAIR),
            fmt_num(c.y),
            fmt_num(c.x + DEBUG_CROSSHAIR),
            fmt_num(c.y),
            fmt_num(c.x),
            fmt_num(c.y - DEBUG_CROSSHAIR),
            fmt_num(c.x),
            fmt_num(c.y + DEBUG_CROSSHAIR),
        );
        svg.push_str("\"/>\n");
    }
    svg.push_str("</g>\n");
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/compose/svg.rs"]
mod tests;
