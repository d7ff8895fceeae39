// src/render/mod.rs
pub mod page;
pub mod svg;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::encode::Frame;

pub use page::render_page_html;
pub use svg::render_frame_svg;

// `_` is reserved as the escape delimiter, so it is escaped too.
static NOT_ID_SAFE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9-]+").expect("static regex"));

/// Escape text for XML attribute values and element content.
pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// DOM-id-safe fragment for a point key. Every other character is written as
/// `_<hex code point>_`, so distinct keys never share a slug:
/// `"Côte d'Ivoire#1"` → `"C_f4_te_20_d_27_Ivoire_23_1"`.
pub fn id_slug(key: &str) -> String {
    NOT_ID_SAFE
        .replace_all(key, |caps: &Captures| {
            caps[0]
                .chars()
                .map(|c| format!("_{:x}_", c as u32))
                .collect::<String>()
        })
        .into_owned()
}

#[derive(Serialize)]
struct FramesDoc<'a> {
    years: Vec<i32>,
    frames: &'a [Frame],
}

/// JSON document of every frame, for renderers outside this crate.
pub fn frames_json(frames: &[Frame]) -> Result<String> {
    let doc = FramesDoc {
        years: frames.iter().map(|f| f.year).collect(),
        frames,
    };
    serde_json::to_string_pretty(&doc).context("serializing frames")
}

/// JSON that is safe to inline inside a `<script>` element.
pub(crate) fn script_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("serializing page data")?;
    Ok(json.replace("</", "<\\/"))
}
