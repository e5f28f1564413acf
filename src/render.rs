use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::indicator::{Animation, GradientDef, IndicatorScene, Paint, Primitive, Stroke};
use crate::layout::{LabelLayout, RatingLayout, fmt_coord};
use crate::shape::{ALL_SHAPES, Outline};
use crate::tooltip::TooltipItem;
use anyhow::Result;
use std::path::Path;

pub fn render_svg(
    layout: &RatingLayout,
    scene: &IndicatorScene,
    background: Option<&str>,
    tooltips: &[TooltipItem],
) -> String {
    let mut svg = String::new();

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{}\">",
        fmt_coord(layout.width),
        fmt_coord(layout.height),
        layout.offsets.view_box
    ));

    if !tooltips.is_empty() {
        let text = tooltips
            .iter()
            .map(|item| format!("{}: {}", item.display_name, item.value))
            .collect::<Vec<_>>()
            .join("\n");
        svg.push_str(&format!("<title>{}</title>", escape_xml(&text)));
    }

    if let Some(background) = background {
        let view_box = &layout.offsets.view_box;
        svg.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            fmt_coord(view_box.min_x),
            fmt_coord(view_box.min_y),
            fmt_coord(view_box.width),
            fmt_coord(view_box.height),
            escape_xml(background)
        ));
    }

    svg.push_str("<defs>");
    for shape in ALL_SHAPES {
        svg.push_str(&format!("<clipPath id=\"{}\">", shape.clip_id));
        svg.push_str(&outline_svg(&shape.outline, "", ""));
        svg.push_str("</clipPath>");
    }
    for gradient in &scene.gradients {
        svg.push_str(&gradient_svg(gradient));
    }
    svg.push_str("</defs>");

    let (shift_x, shift_y) = layout.indicator_shift;
    svg.push_str(&format!(
        "<g class=\"indicators\" transform=\"translate({},{})\">",
        fmt_coord(shift_x),
        fmt_coord(shift_y)
    ));
    for primitive in &scene.primitives {
        svg.push_str(&primitive_svg(primitive));
    }
    svg.push_str("</g>");

    if let Some(label) = &layout.label {
        svg.push_str(&format!(
            "<g class=\"label\" transform=\"translate(0,{})\">",
            fmt_coord(layout.label_shift_y)
        ));
        svg.push_str(&label_svg(label));
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

fn primitive_svg(primitive: &Primitive) -> String {
    match primitive {
        Primitive::Shape {
            outline,
            fill,
            stroke,
            translate_x,
            animation,
        } => {
            let mut attrs = format!(" fill=\"{}\"", escape_xml(&fill.to_string()));
            attrs.push_str(&stroke_attrs(stroke.as_ref()));
            attrs.push_str(&translate_attr(*translate_x));
            let children = match (animation, fill) {
                (Some(animation), Paint::Solid(color)) => animate_svg("fill", animation, color),
                _ => String::new(),
            };
            outline_svg(outline, &attrs, &children)
        }
        Primitive::Rect {
            x,
            width,
            height,
            fill,
        } => format!(
            "<rect x=\"{x:.2}\" width=\"{width:.2}\" height=\"{}\" fill=\"{}\"/>",
            fmt_coord(*height),
            escape_xml(&fill.to_string())
        ),
        Primitive::ClipGroup {
            clip_id,
            translate_x,
            children,
        } => {
            let mut group = format!(
                "<g clip-path=\"url(#{clip_id})\"{}>",
                translate_attr(*translate_x)
            );
            for child in children {
                group.push_str(&primitive_svg(child));
            }
            group.push_str("</g>");
            group
        }
    }
}

fn outline_svg(outline: &Outline, attrs: &str, children: &str) -> String {
    let open = match outline {
        Outline::Polygon { points } => format!("<polygon points=\"{points}\"{attrs}"),
        Outline::Circle { cx, cy, r } => format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{attrs}",
            fmt_coord(*cx),
            fmt_coord(*cy),
            fmt_coord(*r)
        ),
    };
    let tag = match outline {
        Outline::Polygon { .. } => "polygon",
        Outline::Circle { .. } => "circle",
    };
    if children.is_empty() {
        format!("{open}/>")
    } else {
        format!("{open}>{children}</{tag}>")
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            " stroke=\"{}\" stroke-width=\"{}\"",
            escape_xml(&stroke.color),
            fmt_coord(stroke.width)
        ),
        None => String::new(),
    }
}

fn translate_attr(x: f32) -> String {
    if x == 0.0 {
        String::new()
    } else {
        format!(" transform=\"translate({})\"", fmt_coord(x))
    }
}

fn gradient_svg(gradient: &GradientDef) -> String {
    let mut svg = format!(
        "<linearGradient id=\"{}\" x1=\"0%\" y1=\"0%\" x2=\"100%\" y2=\"0%\">",
        crate::indicator::gradient_id(gradient.index)
    );
    let stops = [("0%", gradient.segment.start), ("100%", gradient.segment.end)];
    for (offset, color) in stops {
        let color = color.to_string();
        let animation = gradient
            .animation
            .as_ref()
            .map(|animation| animate_svg("stop-color", animation, &color))
            .unwrap_or_default();
        svg.push_str(&format!(
            "<stop offset=\"{offset}\" stop-color=\"{color}\" stop-opacity=\"1\">{animation}</stop>"
        ));
    }
    svg.push_str("</linearGradient>");
    svg
}

/// SMIL color ramp that holds `from` through the delay and settles on `to`.
/// Static renderers ignore it and show `to`.
fn animate_svg(attribute: &str, animation: &Animation, to: &str) -> String {
    let total = animation.delay_ms + animation.duration_ms;
    let from = escape_xml(&animation.from);
    let to = escape_xml(to);
    if animation.delay_ms == 0 || total == 0 {
        return format!(
            "<animate attributeName=\"{attribute}\" values=\"{from};{to}\" dur=\"{total}ms\" fill=\"freeze\"/>"
        );
    }
    let hold = animation.delay_ms as f32 / total as f32;
    format!(
        "<animate attributeName=\"{attribute}\" values=\"{from};{from};{to}\" keyTimes=\"0;{hold:.3};1\" dur=\"{total}ms\" fill=\"freeze\"/>"
    )
}

fn label_svg(label: &LabelLayout) -> String {
    format!(
        "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
        label.x,
        label.y,
        escape_xml(&label.font_family),
        fmt_coord(label.font_size),
        escape_xml(&label.color),
        escape_xml(&label.text)
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn rasterize_png(svg: &str, render_cfg: &RenderConfig) -> Result<Vec<u8>, RenderError> {
    let mut opt = usvg::Options::default();
    opt.font_family = crate::config::DEFAULT_FONT_FAMILY.to_string();
    opt.fontdb_mut().load_system_fonts();
    opt.default_size = usvg::Size::from_wh(render_cfg.width, render_cfg.height).ok_or(
        RenderError::InvalidViewport {
            width: render_cfg.width,
            height: render_cfg.height,
        },
    )?;

    let tree =
        usvg::Tree::from_str(svg, &opt).map_err(|err| RenderError::Rasterize(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| RenderError::Rasterize("failed to allocate pixmap".to_string()))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(&tree, resvg::tiny_skia::Transform::default(), &mut pixmap_mut);
    pixmap
        .encode_png()
        .map_err(|err| RenderError::Rasterize(err.to_string()))
}

#[cfg(feature = "png")]
pub fn write_output_png(svg: &str, output: &Path, render_cfg: &RenderConfig) -> Result<()> {
    let png = rasterize_png(svg, render_cfg)?;
    std::fs::write(output, png)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
pub fn write_output_png(_svg: &str, _output: &Path, _render_cfg: &RenderConfig) -> Result<()> {
    Err(RenderError::Rasterize("built without the `png` feature".to_string()).into())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
