use std::path::Path;

use ratings_rs_renderer::config::load_config;
use ratings_rs_renderer::layout_dump::LayoutDump;
use ratings_rs_renderer::{Config, DataView, RenderedRating, render_rating};

fn assert_valid_svg(svg: &str, fixture: &str) {
    assert!(svg.contains("<svg"), "{fixture}: missing <svg tag");
    assert!(svg.contains("</svg>"), "{fixture}: missing </svg tag");
    assert_eq!(
        svg.matches("<clipPath").count(),
        4,
        "{fixture}: every shape needs a clip path"
    );
}

fn fast_config() -> Config {
    let mut config = Config::default();
    config.layout.fast_text_metrics = true;
    config
}

fn load_fixture(name: &str) -> DataView {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let input = std::fs::read_to_string(&path).expect("fixture read failed");
    DataView::from_json(&input).expect("fixture parse failed")
}

fn render_fixture(name: &str) -> RenderedRating {
    render_rating(&load_fixture(name), &fast_config()).expect("render failed")
}

#[test]
fn render_all_fixtures() {
    // Keep this list explicit so new fixtures must be added intentionally.
    let candidates = [
        "star_partial.json5",
        "gradient_ten.json5",
        "circle_left_stroke.json5",
        "percent_top.json5",
    ];
    for name in candidates {
        let rendered = render_fixture(name);
        assert_valid_svg(&rendered.svg, name);
    }
}

#[test]
fn star_partial_matches_default_layout() {
    let rendered = render_fixture("star_partial.json5");
    let svg = &rendered.svg;
    assert!(svg.contains("viewBox=\"0 0 350 106.60\""));
    assert!(svg.contains("width=\"400\" height=\"120\""));
    assert!(svg.contains("clip-path=\"url(#starClipPath)\" transform=\"translate(210)\""));
    assert!(svg.contains("y=\"85.28\""));
    assert!(svg.contains(">3.7</text>"));
    // solid fills animate, the empty indicator does not
    assert_eq!(svg.matches("<animate ").count(), 4);
    assert!(!svg.contains("<linearGradient"));
}

#[test]
fn gradient_ten_uses_one_gradient_per_indicator() {
    let rendered = render_fixture("gradient_ten.json5");
    let svg = &rendered.svg;
    assert_eq!(rendered.scene.gradients.len(), 10);
    assert!(svg.contains("id=\"gradient9\""));
    assert!(svg.contains("stop-color=\"rgb(26, 26, 26)\""));
    assert!(svg.contains("stop-color=\"rgb(255, 255, 255)\""));
    assert!(svg.contains("clip-path=\"url(#triangleClipPath)\" transform=\"translate(536)\""));
    assert!(svg.contains("fill=\"url(#gradient8)\""));
    assert!(svg.contains("class=\"indicators\" transform=\"translate(6,0)\""));
    assert!(svg.contains(">8.3</text>"));

    let label = rendered.layout.label.as_ref().expect("label shown");
    assert_eq!(label.x, 670.0);
    assert_eq!(label.y, 46.0);
}

#[test]
fn circle_left_stroke_offsets_follow_label() {
    let rendered = render_fixture("circle_left_stroke.json5");
    let svg = &rendered.svg;
    assert!(svg.contains("viewBox=\"0 0 367.38 106.60\""));
    assert!(svg.contains("height=\"110\""));
    assert!(svg.contains(
        "<circle cx=\"30\" cy=\"37\" r=\"30\" fill=\"none\" stroke=\"#333333\" stroke-width=\"3\" transform=\"translate(166.38)\"/>"
    ));
    assert!(svg.contains("fill=\"#222222\">2.4</text>"));
    assert!(!svg.contains("<animate"));

    let offsets = &rendered.layout.offsets.translate_x;
    assert_eq!(offsets.len(), 5);
    assert!((offsets[0] - 32.38).abs() < 1e-3);
    assert!((offsets[1] - offsets[0] - 67.0).abs() < 1e-3);
}

#[test]
fn percent_top_shifts_large_label() {
    let rendered = render_fixture("percent_top.json5");
    let svg = &rendered.svg;
    assert!(rendered.config.value_as_percent);
    assert_eq!(rendered.config.normalized().value_label, "62%");
    assert!(svg.contains("viewBox=\"0 -30 335 138.52\""));
    assert!(svg.contains("class=\"indicators\" transform=\"translate(0,20)\""));
    assert!(svg.contains("class=\"label\" transform=\"translate(0,20)\""));
    assert!(svg.contains(">3.1</text>"));
    assert!(svg.contains("clip-path=\"url(#invertedTriangleClipPath)\""));
}

#[test]
fn tooltips_embed_as_title() {
    let mut config = fast_config();
    config.render.tooltips = true;
    let view = load_fixture("circle_left_stroke.json5");
    let rendered = render_rating(&view, &config).expect("render failed");
    assert!(rendered.svg.contains("<title>Satisfaction: 2.4\nScale: 5</title>"));
}

#[test]
fn config_file_objects_are_overridden_by_data_view() {
    let path = std::env::temp_dir().join(format!("ratings-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r##"{
            "objects": {
                "starproperties": { "visualSymbol": "circle", "numStars": 4 },
                "dataLabel": { "direction": "left" }
            },
            "render": { "width": 500, "height": 90, "background": "#FFFFFF" },
            "layout": { "fastTextMetrics": true }
        }"##,
    )
    .expect("temp config write failed");
    let config = load_config(Some(path.as_path())).expect("config should load");
    std::fs::remove_file(&path).ok();

    let rendered = render_rating(&load_fixture("star_partial.json5"), &config).expect("render failed");
    assert_eq!(rendered.config.style.indicator_count, 4);
    assert!(rendered.svg.contains("width=\"500\" height=\"80\""));
    assert!(rendered.svg.contains("fill=\"#FFFFFF\""));

    let overrides = load_fixture("percent_top.json5");
    let rendered = render_rating(&overrides, &config).expect("render failed");
    assert_eq!(
        rendered.config.style.direction,
        ratings_rs_renderer::LabelPosition::Top
    );
    assert_eq!(
        rendered.config.style.shape_kind,
        ratings_rs_renderer::ShapeKind::InvertedTriangle
    );
}

#[test]
fn layout_dump_serializes_rendered_layout() {
    let rendered = render_fixture("gradient_ten.json5");
    let json = serde_json::to_value(LayoutDump::from_rendered(&rendered)).expect("dump serializes");
    assert_eq!(json["shape"], "triangle");
    assert_eq!(json["gradientCount"], 10);
    assert_eq!(json["indicators"].as_array().map(Vec::len), Some(10));
    assert_eq!(json["indicators"][8]["kind"], "partial");
    assert_eq!(json["indicators"][9]["kind"], "empty");
}
