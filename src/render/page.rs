// src/render/page.rs

use anyhow::Result;
use serde::Serialize;

use crate::{
    context::ChartContext,
    encode::{build_encoding, Frame},
    scale::Rgb,
    tooltip::Tooltip,
};

use super::{id_slug, script_json, svg, xml_escape};

#[derive(Serialize)]
struct PagePoint<'a> {
    key: &'a str,
    id: String,
    cx: f64,
    cy: f64,
    r: f64,
    fill: Rgb,
    tooltip: &'a Tooltip,
}

#[derive(Serialize)]
struct PageFrame<'a> {
    year: i32,
    points: Vec<PagePoint<'a>>,
}

impl<'a> From<&'a Frame> for PageFrame<'a> {
    fn from(f: &'a Frame) -> Self {
        Self {
            year: f.year,
            points: f
                .points
                .iter()
                .map(|p| PagePoint {
                    key: &p.key,
                    id: format!("pt-{}", id_slug(&p.key)),
                    cx: p.cx,
                    cy: p.cy,
                    r: p.r,
                    fill: p.fill,
                    tooltip: &p.tooltip,
                })
                .collect(),
        }
    }
}

const STYLE: &str = r#"
body { margin: 0; padding: 60px 40px; background: #1b2430; color: #e6edf7; font-family: sans-serif; }
.controls { display: flex; gap: 12px; align-items: center; margin-bottom: 40px; }
#chart svg { width: 100%; max-width: 1100px; overflow: visible; }
#chart circle { transition: cx var(--t), cy var(--t), r var(--t), fill var(--t); }
#chart circle.hover { stroke: white; stroke-width: 2; fill-opacity: 1; }
.tooltip { position: fixed; margin: 0; padding: 8px 12px; display: grid; grid-template-columns: auto auto; gap: 2px 10px;
  background: rgba(255, 255, 255, 0.92); color: #111; border-radius: 6px; box-shadow: 0 4px 16px rgba(0,0,0,0.4); pointer-events: none; }
.tooltip[hidden] { display: none; }
.tooltip dt { font-weight: bold; }
.tooltip dd { margin: 0; }
"#;

const SCRIPT: &str = r#"
const frames = JSON.parse(document.getElementById('frames-data').textContent);
const byYear = new Map(frames.map(f => [f.year, f]));
const svgNS = 'http://www.w3.org/2000/svg';
const dots = document.querySelector('#chart g.dots');
const slider = document.getElementById('yearSlider');
const label = document.getElementById('yearLabel');
const tooltip = document.getElementById('chart-tooltip');
const fields = {
  country: 'tooltip-country', gdp: 'tooltip-gdp', life: 'tooltip-life-expectancy',
  population: 'tooltip-population', aggregate: 'tooltip-aggregate'
};

function place(event) {
  tooltip.style.left = `${event.pageX + 10}px`;
  tooltip.style.top = `${event.pageY - 10}px`;
}

function wire(c) {
  c.addEventListener('mouseenter', event => {
    c.classList.add('hover');
    c.setAttribute('r', +c.dataset.r * 1.3);
    for (const [k, id] of Object.entries(fields)) {
      document.getElementById(id).textContent = c.dataset[k];
    }
    tooltip.hidden = false;
    place(event);
  });
  c.addEventListener('mousemove', place);
  c.addEventListener('mouseleave', () => {
    c.classList.remove('hover');
    c.setAttribute('r', c.dataset.r);
    c.setAttribute('fill-opacity', dots.dataset.restOpacity);
    tooltip.hidden = true;
  });
}

function show(year) {
  label.textContent = year;
  const known = byYear.has(year);
  document.querySelectorAll('#chart g.axes').forEach(g => {
    const shown = known ? +g.dataset.year === year : g.dataset.year === 'gap';
    g.style.display = shown ? '' : 'none';
  });
  if (!known) {
    const note = document.querySelector('#chart g.axes[data-year="gap"] .empty-note');
    if (note) note.textContent = `No data for ${year}`;
  }
  const frame = byYear.get(year) || { year, points: [] };
  const existing = new Map([...dots.querySelectorAll('circle')].map(c => [c.dataset.key, c]));
  for (const p of frame.points) {
    let c = existing.get(p.key);
    if (c) {
      existing.delete(p.key);
    } else {
      c = document.createElementNS(svgNS, 'circle');
      c.setAttribute('r', 0);
      c.setAttribute('fill-opacity', dots.dataset.opacity);
      wire(c);
    }
    dots.appendChild(c);
    c.id = p.id;
    c.dataset.key = p.key;
    c.dataset.r = p.r;
    c.dataset.country = p.tooltip.country;
    c.dataset.gdp = p.tooltip.gdp;
    c.dataset.life = p.tooltip.life_expectancy;
    c.dataset.population = p.tooltip.population;
    c.dataset.aggregate = p.tooltip.aggregate;
    c.setAttribute('cx', p.cx);
    c.setAttribute('cy', p.cy);
    c.setAttribute('r', p.r);
    c.setAttribute('fill', p.fill);
  }
  existing.forEach(c => c.remove());
}

dots.querySelectorAll('circle').forEach(c => {
  c.dataset.r = c.getAttribute('r');
  wire(c);
});
slider.addEventListener('input', () => show(+slider.value));
"#;

/// Self-contained page: one pre-computed frame per year present in the data, a year
/// slider over the full range, and a hover panel. Bubbles are keyed by country across years.
pub fn render_page_html(ctx: &ChartContext) -> Result<String> {
    let cfg = ctx.config();
    let current = ctx.frame();
    let (lo, hi) = match ctx.year_bounds() {
        Some((lo, hi)) => (lo.min(current.year), hi.max(current.year)),
        None => (current.year, current.year),
    };

    let mut years: Vec<i32> = ctx.years().to_vec();
    if !years.contains(&current.year) {
        years.push(current.year);
        years.sort_unstable();
    }
    let frames: Vec<Frame> = years
        .iter()
        .map(|&y| {
            if y == current.year {
                current.clone()
            } else {
                build_encoding(ctx.dataset(), y, cfg).frame()
            }
        })
        .collect();
    let page_frames: Vec<PageFrame> = frames.iter().map(PageFrame::from).collect();

    let mut axes = String::new();
    for f in &frames {
        let group = svg::axes_group(f, cfg);
        if f.year == current.year {
            axes.push_str(&group);
        } else {
            axes.push_str(&group.replacen(
                r#"<g class="axes""#,
                r#"<g class="axes" style="display: none""#,
                1,
            ));
        }
        axes.push('\n');
    }

    // every gap year in the slider range shares one hidden empty-axes group
    if let Some(gap) = (lo..=hi).find(|y| years.binary_search(y).is_err()) {
        let placeholder = build_encoding(ctx.dataset(), gap, cfg).frame();
        axes.push_str(&svg::axes_group(&placeholder, cfg).replacen(
            &format!(r#"<g class="axes" data-year="{}">"#, gap),
            r#"<g class="axes" style="display: none" data-year="gap">"#,
            1,
        ));
        axes.push('\n');
    }

    let title = xml_escape(&cfg.title);
    let dots = svg::points_group(current, cfg).replacen(
        r#"<g class="dots">"#,
        &format!(
            r#"<g class="dots" data-opacity="{}" data-rest-opacity="{}">"#,
            cfg.fill_opacity, cfg.rest_opacity
        ),
        1,
    );

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>:root {{ --t: {transition}ms; }}{STYLE}</style>
</head>
<body>
<div class="controls">
<label for="yearSlider">Year: <span id="yearLabel">{year}</span></label>
<input type="range" id="yearSlider" min="{lo}" max="{hi}" step="1" value="{year}">
</div>
<div id="chart">
<svg viewBox="0 0 {w} {h}" font-family="sans-serif">
{defs}
{axes}{titles}
{dots}
{legend}
</svg>
</div>
<dl id="chart-tooltip" class="info tooltip" hidden>
<dt>Country</dt><dd id="tooltip-country"></dd>
<dt>GDP (log)</dt><dd id="tooltip-gdp"></dd>
<dt>Life Expectancy</dt><dd id="tooltip-life-expectancy"></dd>
<dt>Population</dt><dd id="tooltip-population"></dd>
<dt>Aggregate Score</dt><dd id="tooltip-aggregate"></dd>
</dl>
<script type="application/json" id="frames-data">{data}</script>
<script type="module">{SCRIPT}</script>
</body>
</html>
"##,
        transition = cfg.transition_ms,
        year = current.year,
        w = cfg.width,
        h = cfg.height,
        defs = svg::defs(),
        titles = svg::titles(cfg),
        legend = svg::legend(cfg),
        data = script_json(&page_frames)?,
    ))
}
