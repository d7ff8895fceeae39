// src/render/svg.rs

use crate::{
    config::ChartConfig,
    encode::{Frame, Point, NICE_TICKS},
    numfmt::tick_label,
    scale::{color::interpolate_rdylgn, LinearScale},
};

use super::{id_slug, xml_escape};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
/// Room around the canvas for the title and axis labels, which sit outside it.
const OUTER_PAD: f64 = 40.0;
const TEXT_FILL: &str = "white";
const AXIS_STROKE: &str = "#c8d0da";

pub(crate) const GRADIENT_ID: &str = "legendGradient";

fn axis_bottom(scale: &LinearScale, at_y: f64) -> String {
    let [r0, r1] = scale.range();
    let precision = scale.tick_precision(NICE_TICKS);
    let mut out = format!(
        r##"<g class="axis axis-x" transform="translate(0,{at_y})" font-size="10" text-anchor="middle">"##
    );
    out.push_str(&format!(
        r##"<path d="M{r0},{TICK_SIZE}V0H{r1}V{TICK_SIZE}" fill="none" stroke="{AXIS_STROKE}"/>"##
    ));
    for t in scale.ticks(NICE_TICKS) {
        let x = scale.apply(t);
        out.push_str(&format!(
            r##"<g class="tick" transform="translate({x:.2},0)"><line y2="{TICK_SIZE}" stroke="{AXIS_STROKE}"/><text y="{}" dy="0.71em" fill="{TEXT_FILL}">{}</text></g>"##,
            TICK_SIZE + TICK_PADDING,
            tick_label(t, precision)
        ));
    }
    out.push_str("</g>");
    out
}

fn axis_left(scale: &LinearScale, at_x: f64) -> String {
    let [r0, r1] = scale.range();
    let precision = scale.tick_precision(NICE_TICKS);
    let mut out = format!(
        r##"<g class="axis axis-y" transform="translate({at_x},0)" font-size="10" text-anchor="end">"##
    );
    out.push_str(&format!(
        r##"<path d="M-{TICK_SIZE},{r0}H0V{r1}H-{TICK_SIZE}" fill="none" stroke="{AXIS_STROKE}"/>"##
    ));
    for t in scale.ticks(NICE_TICKS) {
        let y = scale.apply(t);
        out.push_str(&format!(
            r##"<g class="tick" transform="translate(0,{y:.2})"><line x2="-{TICK_SIZE}" stroke="{AXIS_STROKE}"/><text x="-{}" dy="0.32em" fill="{TEXT_FILL}">{}</text></g>"##,
            TICK_SIZE + TICK_PADDING,
            tick_label(t, precision)
        ));
    }
    out.push_str("</g>");
    out
}

/// Both axes for one frame, plus a note when the year has nothing to plot.
pub fn axes_group(frame: &Frame, cfg: &ChartConfig) -> String {
    let area = cfg.plot_area();
    let mut out = format!(r##"<g class="axes" data-year="{}">"##, frame.year);
    out.push_str(&axis_bottom(&frame.scales.x, area.bottom));
    out.push_str(&axis_left(&frame.scales.y, area.left));
    if frame.is_empty() {
        out.push_str(&format!(
            r##"<text class="empty-note" x="{}" y="{}" text-anchor="middle" fill="{TEXT_FILL}" font-size="16">No data for {}</text>"##,
            area.left + area.width / 2.0,
            area.top + area.height / 2.0,
            frame.year
        ));
    }
    out.push_str("</g>");
    out
}

/// One `<circle>`; `data-*` attributes feed the page's hover panel.
pub fn circle(p: &Point, cfg: &ChartConfig) -> String {
    let t = &p.tooltip;
    format!(
        r##"<circle id="pt-{}" data-key="{}" data-country="{}" data-gdp="{}" data-life="{}" data-population="{}" data-aggregate="{}" cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" fill-opacity="{}"><title>{}</title></circle>"##,
        id_slug(&p.key),
        xml_escape(&p.key),
        xml_escape(&t.country),
        xml_escape(&t.gdp),
        xml_escape(&t.life_expectancy),
        xml_escape(&t.population),
        xml_escape(&t.aggregate),
        p.cx,
        p.cy,
        p.r,
        p.fill,
        cfg.fill_opacity,
        xml_escape(&t.summary()),
    )
}

/// Circles in draw order, so small bubbles land on top of large ones.
pub fn points_group(frame: &Frame, cfg: &ChartConfig) -> String {
    let mut out = String::from(r##"<g class="dots">"##);
    for p in &frame.points {
        out.push_str(&circle(p, cfg));
    }
    out.push_str("</g>");
    out
}

pub fn titles(cfg: &ChartConfig) -> String {
    let (w, h) = (cfg.width, cfg.height);
    format!(
        r##"<text class="title" x="{}" y="-15" text-anchor="middle" fill="{TEXT_FILL}" font-size="25" font-weight="bold">{}</text>
<text class="x-label" x="{}" y="{}" text-anchor="middle" fill="{TEXT_FILL}" font-weight="bold">{}</text>
<text class="y-label" x="{}" y="-20" transform="rotate(-90)" text-anchor="middle" fill="{TEXT_FILL}" font-weight="bold">{}</text>"##,
        w / 2.0,
        xml_escape(&cfg.title),
        w / 2.0,
        h + 15.0,
        xml_escape(&cfg.x_label),
        -h / 2.0,
        xml_escape(&cfg.y_label),
    )
}

/// Gradient definition shared by the legend bar.
pub fn defs() -> String {
    format!(
        r##"<defs><linearGradient id="{GRADIENT_ID}" x1="0%" x2="100%"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></linearGradient></defs>"##,
        interpolate_rdylgn(0.0),
        interpolate_rdylgn(1.0)
    )
}

pub fn legend(cfg: &ChartConfig) -> String {
    format!(
        r##"<g class="legend" transform="translate({},{})">
<rect width="260" height="100" x="-20" y="-20" rx="10" ry="10" style="fill: rgba(0, 0, 0, 0.3); stroke: rgba(255,255,255,0.2); stroke-width: 1"/>
<rect width="200" height="10" style="fill: url(#{GRADIENT_ID})"/>
<text x="0" y="-5" fill="{TEXT_FILL}" font-size="12">Lower (Poorer)</text>
<text x="200" y="-5" text-anchor="end" fill="{TEXT_FILL}" font-size="12">Higher (Better)</text>
<text x="100" y="25" text-anchor="middle" fill="{TEXT_FILL}" font-size="13" font-weight="bold">Aggregate Score</text>
<text x="100" y="45" text-anchor="middle" fill="{TEXT_FILL}" font-size="11">Composite of Life Expectancy, GDP, Water,</text>
<text x="100" y="65" text-anchor="middle" fill="{TEXT_FILL}" font-size="11">Immunization, Unemployment</text>
</g>"##,
        cfg.width - 280.0,
        cfg.height - 200.0
    )
}

/// Standalone SVG document for one year.
pub fn render_frame_svg(frame: &Frame, cfg: &ChartConfig) -> String {
    let (w, h) = (cfg.width, cfg.height);
    let mut out = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" font-family="sans-serif">
<rect x="{}" y="{}" width="{}" height="{}" fill="#1b2430"/>
"##,
        -OUTER_PAD,
        -OUTER_PAD,
        w + 2.0 * OUTER_PAD,
        h + 2.0 * OUTER_PAD,
        -OUTER_PAD,
        -OUTER_PAD,
        w + 2.0 * OUTER_PAD,
        h + 2.0 * OUTER_PAD,
    );
    out.push_str(&defs());
    out.push('\n');
    out.push_str(&axes_group(frame, cfg));
    out.push('\n');
    out.push_str(&titles(cfg));
    out.push('\n');
    out.push_str(&points_group(frame, cfg));
    out.push('\n');
    out.push_str(&legend(cfg));
    out.push_str("\n</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{load_csv, NUMERIC_FIELDS};
    use crate::encode::build_encoding;
    use std::io::Cursor;

    const CSV: &str = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
Small <Island>,2021,1.0,50,100,0.2
Big & Co,2021,2.0,70,400,0.9
";

    #[test]
    fn draws_large_bubbles_first() {
        let data = load_csv(Cursor::new(CSV), NUMERIC_FIELDS).unwrap();
        let cfg = ChartConfig::default();
        let frame = build_encoding(&data, 2021, &cfg).frame();
        let svg = render_frame_svg(&frame, &cfg);

        let big = svg.find(r#"data-key="Big &amp; Co""#).unwrap();
        let small = svg.find(r#"data-key="Small &lt;Island&gt;""#).unwrap();
        assert!(big < small);
        assert!(!svg.contains("<Island>"));
        assert!(svg.contains(r#"r="30.00""#));
        assert!(svg.contains(r##"fill="#006837""##));
    }

    #[test]
    fn look_alike_countries_get_distinct_ids() {
        let csv = "Country,Year,log_GDP_Per_Capita,Life_Expectancy,Total_Population,Aggregate_Score
Côte d'Ivoire,2021,1.0,50,100,0.2
C te d Ivoire,2021,2.0,70,400,0.9
";
        let data = load_csv(Cursor::new(csv), NUMERIC_FIELDS).unwrap();
        let cfg = ChartConfig::default();
        let svg = render_frame_svg(&build_encoding(&data, 2021, &cfg).frame(), &cfg);
        assert!(svg.contains(r#"id="pt-C_f4_te_20_d_27_Ivoire""#));
        assert!(svg.contains(r#"id="pt-C_20_te_20_d_20_Ivoire""#));
    }

    #[test]
    fn includes_axes_titles_and_legend() {
        let data = load_csv(Cursor::new(CSV), NUMERIC_FIELDS).unwrap();
        let cfg = ChartConfig::default();
        let svg = render_frame_svg(&build_encoding(&data, 2021, &cfg).frame(), &cfg);
        for needle in [
            "Global Health Data Analysis",
            "GDP per Capita (log, USD)",
            "Life Expectancy(Years)",
            "Lower (Poorer)",
            "Higher (Better)",
            "Aggregate Score",
            "legendGradient",
            r##"stop-color="#a50026""##,
            ">1.0<",
            ">70<",
        ] {
            assert!(svg.contains(needle), "missing {needle}");
        }
    }

    #[test]
    fn empty_year_still_renders() {
        let data = load_csv(Cursor::new(CSV), NUMERIC_FIELDS).unwrap();
        let cfg = ChartConfig::default();
        let svg = render_frame_svg(&build_encoding(&data, 1999, &cfg).frame(), &cfg);
        assert!(svg.contains("No data for 1999"));
        assert!(!svg.contains("<circle"));
        assert!(svg.ends_with("</svg>\n"));
    }
}
