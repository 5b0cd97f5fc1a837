//! 1200×630 summary card, drawn as an SVG scene and rasterized with resvg.

use super::domain::ReportModel;
use super::report::escape_html;
use crate::config::MarketProfile;
use resvg::tiny_skia;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use usvg::fontdb;

pub const IMAGE_WIDTH: u32 = 1200;
pub const IMAGE_HEIGHT: u32 = 630;

const CARD_MARGIN: u32 = 60;
const CARD_GAP: u32 = 24;
const CARD_TOP: u32 = 300;
const CARD_HEIGHT: u32 = 180;

#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("no usable font among {} candidate path(s)", .candidates.len())]
    FontUnavailable { candidates: Vec<PathBuf> },
    #[error("summary scene could not be parsed: {0}")]
    Svg(#[from] usvg::Error),
    #[error("could not allocate the 1200x630 canvas")]
    Canvas,
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Count shown in one of the four category boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTile {
    pub label: &'static str,
    pub accent: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct SummaryImageComposer {
    profile: MarketProfile,
    font_paths: Vec<PathBuf>,
}

impl SummaryImageComposer {
    pub fn new(profile: MarketProfile, font_paths: Vec<PathBuf>) -> Self {
        Self {
            profile,
            font_paths,
        }
    }

    /// Renders the PNG bytes for `model`.
    pub fn compose(&self, model: &ReportModel) -> Result<Vec<u8>, ImageError> {
        let (fontdb, family) = self.load_font()?;
        let svg = self.scene(model, &family);

        let options = usvg::Options {
            font_family: family,
            fontdb: Arc::new(fontdb),
            ..usvg::Options::default()
        };
        let tree = usvg::Tree::from_str(&svg, &options)?;

        let mut pixmap =
            tiny_skia::Pixmap::new(IMAGE_WIDTH, IMAGE_HEIGHT).ok_or(ImageError::Canvas)?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        pixmap
            .encode_png()
            .map_err(|err| ImageError::Encode(err.to_string()))
    }

    pub fn tiles(&self, model: &ReportModel) -> Vec<CategoryTile> {
        model
            .datasets()
            .iter()
            .map(|dataset| {
                let spec = self.profile.spec(dataset.category);
                CategoryTile {
                    label: spec.label,
                    accent: spec.accent,
                    count: dataset.total(),
                }
            })
            .collect()
    }

    /// SVG markup of the card. Text is set in `family`.
    pub fn scene(&self, model: &ReportModel, family: &str) -> String {
        let period = model.period;
        let title = format!(
            "{}년 {}월 {} 부동산 실거래가",
            period.year, period.month, self.profile.region_name
        );
        let subtitle = format!("{} 기준 · 총 {}건", period.label(), model.total_records());
        let family = escape_html(family);

        let mut svg = String::with_capacity(4096);
        writeln!(
            svg,
            "<svg xmlns='http://www.w3.org/2000/svg' width='{IMAGE_WIDTH}' height='{IMAGE_HEIGHT}' viewBox='0 0 {IMAGE_WIDTH} {IMAGE_HEIGHT}'>"
        )
        .expect("write svg root");
        svg.push_str(
            "  <defs>\n    <linearGradient id='bg' x1='0' y1='0' x2='0' y2='1'>\n      <stop offset='0%' stop-color='#2e1065'/>\n      <stop offset='100%' stop-color='#0f0a1e'/>\n    </linearGradient>\n    <filter id='soft' x='-50%' y='-50%' width='200%' height='200%'>\n      <feGaussianBlur stdDeviation='60'/>\n    </filter>\n  </defs>\n",
        );
        writeln!(
            svg,
            "  <rect width='{IMAGE_WIDTH}' height='{IMAGE_HEIGHT}' fill='url(#bg)'/>"
        )
        .expect("write background");
        svg.push_str(
            "  <circle cx='80' cy='40' r='260' fill='#7c3aed' fill-opacity='0.45' filter='url(#soft)'/>\n",
        );
        svg.push_str(
            "  <circle cx='1140' cy='620' r='280' fill='#2563eb' fill-opacity='0.35' filter='url(#soft)'/>\n",
        );
        writeln!(
            svg,
            "  <text x='{CARD_MARGIN}' y='130' fill='#ffffff' font-family='{family}' font-size='52' font-weight='700'>{}</text>",
            escape_html(&title)
        )
        .expect("write title");
        writeln!(
            svg,
            "  <text x='{CARD_MARGIN}' y='185' fill='#ffffff' fill-opacity='0.7' font-family='{family}' font-size='28'>{}</text>",
            escape_html(&subtitle)
        )
        .expect("write subtitle");
        writeln!(
            svg,
            "  <rect x='{CARD_MARGIN}' y='235' width='{}' height='2' fill='#ffffff' fill-opacity='0.25'/>",
            IMAGE_WIDTH - 2 * CARD_MARGIN
        )
        .expect("write divider");

        let tiles = self.tiles(model);
        let count = tiles.len().max(1) as u32;
        let width = (IMAGE_WIDTH - 2 * CARD_MARGIN - CARD_GAP * (count - 1)) / count;
        for (index, tile) in tiles.iter().enumerate() {
            let x = CARD_MARGIN + index as u32 * (width + CARD_GAP);
            let center = x + width / 2;
            let accent = escape_html(tile.accent);
            writeln!(
                svg,
                "  <rect x='{x}' y='{CARD_TOP}' width='{width}' height='{CARD_HEIGHT}' rx='20' fill='#ffffff' fill-opacity='0.08' stroke='{accent}' stroke-opacity='0.6' stroke-width='2'/>"
            )
            .expect("write tile");
            writeln!(
                svg,
                "  <text x='{center}' y='{}' text-anchor='middle' fill='#ffffff' fill-opacity='0.8' font-family='{family}' font-size='26'>{}</text>",
                CARD_TOP + 62,
                escape_html(tile.label)
            )
            .expect("write tile label");
            writeln!(
                svg,
                "  <text x='{center}' y='{}' text-anchor='middle' fill='{accent}' font-family='{family}' font-size='56' font-weight='700'>{}건</text>",
                CARD_TOP + 140,
                tile.count
            )
            .expect("write tile count");
        }

        writeln!(
            svg,
            "  <text x='{}' y='{}' text-anchor='middle' fill='#ffffff' fill-opacity='0.45' font-family='{family}' font-size='20'>{} · {}</text>",
            IMAGE_WIDTH / 2,
            IMAGE_HEIGHT - 40,
            escape_html(self.profile.brand),
            escape_html(self.profile.source_label)
        )
        .expect("write footer");
        svg.push_str("</svg>\n");
        svg
    }

    /// First candidate that parses as a font; its first family names the text.
    fn load_font(&self) -> Result<(fontdb::Database, String), ImageError> {
        for path in &self.font_paths {
            if let Some(loaded) = load_font_file(path) {
                return Ok(loaded);
            }
        }
        Err(ImageError::FontUnavailable {
            candidates: self.font_paths.clone(),
        })
    }
}

fn load_font_file(path: &Path) -> Option<(fontdb::Database, String)> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "font candidate unreadable");
            return None;
        }
    };

    let mut db = fontdb::Database::new();
    db.load_font_data(bytes);
    let family = db
        .faces()
        .find_map(|face| face.families.first().map(|(name, _)| name.clone()))?;
    debug!(path = %path.display(), family = %family, "font loaded");
    Some((db, family))
}
