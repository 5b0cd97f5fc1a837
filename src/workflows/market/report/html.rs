use super::assets::{SCRIPT, STYLE};
use super::views::{CategoryView, ReportPayload};
use crate::workflows::market::format::format_optional_price;
use crate::workflows::market::stats::OverallStats;
use std::fmt::Write as _;

pub(crate) struct HtmlContext<'a> {
    pub title: &'a str,
    pub heading: &'a str,
    pub overall: &'a OverallStats,
    pub source_label: &'a str,
    pub source_url: &'a str,
    pub payload: &'a ReportPayload,
    pub payload_json: &'a str,
    pub recent_window_days: i64,
}

/// Markup that can be dropped into a host page as is.
pub(crate) fn render_fragment(ctx: &HtmlContext<'_>) -> String {
    let payload = ctx.payload;
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<div class=\"rr\" id=\"rr-report\">\n");
    writeln!(html, "<style>{STYLE}</style>").expect("write style");

    html.push_str("<div class=\"rr-head\">\n");
    writeln!(html, "  <h2>{}</h2>", escape_html(ctx.heading)).expect("write heading");
    writeln!(
        html,
        "  <p>{} 기준 · {}</p>",
        escape_html(&payload.period_label),
        escape_html(ctx.source_label)
    )
    .expect("write period");
    html.push_str("  <div class=\"rr-stats\">\n");
    write_stat(&mut html, &ctx.overall.total.to_string(), "총 거래");
    write_stat(
        &mut html,
        &format_optional_price(ctx.overall.average_amount),
        "평균가",
    );
    write_stat(
        &mut html,
        &format_optional_price(ctx.overall.max_amount),
        "최고가",
    );
    write_stat(
        &mut html,
        &ctx.overall.recent_count.to_string(),
        &format!("최근 {}일", ctx.recent_window_days),
    );
    html.push_str("  </div>\n</div>\n");

    html.push_str("<div class=\"rr-tabs\" role=\"tablist\">\n");
    for category in &payload.categories {
        writeln!(
            html,
            "  <button type=\"button\" class=\"rr-tab\" role=\"tab\" data-tab=\"{slug}\" style=\"--accent:{accent}\"><span class=\"num\" style=\"color:{accent}\">{total}</span><span class=\"lbl\">{label}</span></button>",
            slug = category.slug,
            accent = escape_html(category.accent),
            total = category.stats.total,
            label = escape_html(category.label),
        )
        .expect("write tab");
    }
    html.push_str("</div>\n");

    for category in &payload.categories {
        write_panel(&mut html, category, ctx.recent_window_days);
    }

    writeln!(
        html,
        "<div class=\"rr-footer\">자료: <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a><br>업데이트: {}</div>",
        escape_html(ctx.source_url),
        escape_html(ctx.source_label),
        escape_html(&payload.generated_at)
    )
    .expect("write footer");
    html.push_str("</div>\n");

    writeln!(
        html,
        "<script type=\"application/json\" id=\"rr-data\">{}</script>",
        ctx.payload_json
    )
    .expect("write payload");
    writeln!(html, "<script>{SCRIPT}</script>").expect("write script");
    html
}

/// Standalone document around [`render_fragment`].
pub(crate) fn render_document(ctx: &HtmlContext<'_>) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>{}</title>\n</head>\n<body style=\"background:#000;margin:0;padding:12px;\">\n{}</body>\n</html>\n",
        escape_html(ctx.title),
        render_fragment(ctx)
    )
}

fn write_stat(html: &mut String, value: &str, label: &str) {
    writeln!(
        html,
        "    <div class=\"rr-stat\"><strong>{}</strong><span>{}</span></div>",
        escape_html(value),
        escape_html(label)
    )
    .expect("write stat");
}

fn write_panel(html: &mut String, category: &CategoryView, recent_window_days: i64) {
    let stats = &category.stats;
    writeln!(
        html,
        "<section class=\"rr-panel\" role=\"tabpanel\" data-panel=\"{}\" style=\"--accent:{}\">",
        category.slug,
        escape_html(category.accent)
    )
    .expect("write panel");
    html.push_str("  <div class=\"rr-panel-head\">");
    write!(
        html,
        "<span>{} · <b>{}건</b></span>",
        escape_html(&category.period_label),
        stats.total
    )
    .expect("write panel total");
    write!(
        html,
        "<span>평균 <b>{}</b></span>",
        escape_html(&stats.average_label)
    )
    .expect("write panel average");
    write!(
        html,
        "<span>최고 <b>{}</b></span>",
        escape_html(&stats.max_label)
    )
    .expect("write panel max");
    if let Some(name) = &stats.top_name {
        write!(
            html,
            "<span>최다 <b>{}</b> ({}건)</span>",
            escape_html(name),
            stats.top_name_count
        )
        .expect("write panel top name");
    }
    if stats.recent_count > 0 {
        write!(
            html,
            "<span>최근 {}일 <b>{}건</b></span>",
            recent_window_days, stats.recent_count
        )
        .expect("write panel recent");
    }
    if stats.shown < stats.total {
        write!(html, "<span>최신 {}건 표시</span>", stats.shown).expect("write panel shown");
    }
    html.push_str("</div>\n");
    writeln!(
        html,
        "  <div class=\"rr-list\" data-list=\"{}\"></div>\n</section>",
        category.slug
    )
    .expect("write panel list");
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// JSON made safe for an inline `<script>` element.
pub(crate) fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html("<b>\"여주\" & 'co'</b>"),
            "&lt;b&gt;&quot;여주&quot; &amp; &#39;co&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn script_json_cannot_close_the_element() {
        let json = r#"{"name":"</script><script>alert(1)</script>"}"#;
        let escaped = escape_script_json(json);
        assert!(!escaped.contains('<'));
        assert!(escaped.contains(r"\u003c/script>"));
        let decoded: serde_json::Value = serde_json::from_str(&escaped).expect("still valid json");
        assert_eq!(decoded["name"], "</script><script>alert(1)</script>");
    }
}
