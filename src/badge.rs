//! Badge rendering.
//!
//! Consumes a flat record and produces an encoded image; the rest of the
//! system treats this as opaque. The badge is an SVG document built from
//! its inputs alone, so the same classification always renders to the
//! same bytes, which keeps cached entries stable.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::DateTime;

use crate::types::{BadgeColor, ClassificationResult, Confidence};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 650;

/// Flat renderer input, decoupled from the classification types.
#[derive(Debug, Clone)]
pub struct BadgeInput {
    pub badge_title: String,
    pub badge_color: BadgeColor,
    pub exit_type: String,
    pub exit_venue: String,
    pub token_symbol: String,
    pub wallet: String,
    pub token: String,
    pub sell_timestamp: i64,
    pub confidence: Confidence,
}

impl BadgeInput {
    pub fn from_result(result: &ClassificationResult) -> Self {
        Self {
            badge_title: result.badge_title.clone(),
            badge_color: result.badge_color,
            exit_type: result.exit_type.clone(),
            exit_venue: result.exit_venue.clone(),
            token_symbol: result.token_symbol.clone(),
            wallet: result.wallet.clone(),
            token: result.token.clone(),
            sell_timestamp: result.sell_timestamp,
            confidence: result.confidence,
        }
    }
}

/// Color palette for one badge tier.
struct ColorScheme {
    primary: &'static str,
    grad_start: &'static str,
    grad_end: &'static str,
    accent: &'static str,
    emblem: &'static str,
    background: &'static str,
}

fn scheme(color: BadgeColor) -> ColorScheme {
    match color {
        BadgeColor::Red => ColorScheme {
            primary: "#DC2626",
            grad_start: "#7F1D1D",
            grad_end: "#DC2626",
            accent: "#FCA5A5",
            emblem: "\u{1F414}",
            background: "#1A0A0A",
        },
        BadgeColor::Gold => ColorScheme {
            primary: "#F59E0B",
            grad_start: "#78350F",
            grad_end: "#F59E0B",
            accent: "#FDE68A",
            emblem: "\u{1F393}",
            background: "#1A1400",
        },
        BadgeColor::Platinum => ColorScheme {
            primary: "#94A3B8",
            grad_start: "#334155",
            grad_end: "#94A3B8",
            accent: "#CBD5E1",
            emblem: "\u{1F451}",
            background: "#0F172A",
        },
    }
}

fn confidence_color(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "#22C55E",
        Confidence::Medium => "#F59E0B",
        Confidence::Low => "#EF4444",
    }
}

/// Render the badge and encode it as a `data:image/svg+xml;base64` URL.
pub fn render_badge(input: &BadgeInput) -> String {
    let svg = render_svg(input);
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg))
}

fn render_svg(input: &BadgeInput) -> String {
    let c = scheme(input.badge_color);
    let conf_color = confidence_color(input.confidence);
    let conf_text = format!("{} CONFIDENCE", input.confidence);
    // Approximate pill width from the monospace glyph count.
    let conf_width = conf_text.len() as u32 * 8 + 20;
    let conf_x = WIDTH / 2 - conf_width / 2;
    let center = WIDTH / 2;

    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
    ));
    svg.push_str(&format!(
        r#"<defs><radialGradient id="medal" cx="50%" cy="50%" r="50%"><stop offset="0%" stop-color="{}"/><stop offset="100%" stop-color="{}"/></radialGradient></defs>"#,
        c.grad_end, c.grad_start
    ));

    // Background and glowing border.
    svg.push_str(&format!(
        r#"<rect width="{WIDTH}" height="{HEIGHT}" fill="{}"/>"#,
        c.background
    ));
    svg.push_str(&format!(
        r#"<rect x="20" y="20" width="{}" height="{}" rx="16" fill="none" stroke="{}" stroke-width="3"/>"#,
        WIDTH - 40,
        HEIGHT - 40,
        c.primary
    ));

    // Medal with emblem.
    svg.push_str(&format!(
        r#"<circle cx="{center}" cy="140" r="70" fill="url(#medal)" stroke="{}" stroke-width="2"/>"#,
        c.accent
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="155" font-size="40" text-anchor="middle">{}</text>"#,
        c.emblem
    ));

    // Token symbol, title, venue.
    svg.push_str(&format!(
        r#"<text x="{center}" y="250" font-family="monospace" font-size="24" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
        c.accent,
        escape(&input.token_symbol)
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="290" font-family="monospace" font-size="26" font-weight="bold" fill="{}" text-anchor="middle">{}</text>"#,
        c.primary,
        escape(&input.badge_title)
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="318" font-family="monospace" font-size="14" fill="{}" opacity="0.8" text-anchor="middle">{}</text>"#,
        c.accent,
        escape(&input.exit_venue)
    ));

    // Confidence pill.
    svg.push_str(&format!(
        r#"<rect x="{conf_x}" y="335" width="{conf_width}" height="22" rx="11" fill="{conf_color}" fill-opacity="0.2" stroke="{conf_color}" stroke-width="1"/>"#
    ));
    svg.push_str(&format!(
        r#"<text x="{center}" y="350" font-family="monospace" font-size="12" font-weight="bold" fill="{conf_color}" text-anchor="middle">{conf_text}</text>"#
    ));

    // Divider.
    svg.push_str(&format!(
        r#"<line x1="100" y1="375" x2="{}" y2="375" stroke="{}" stroke-width="1" opacity="0.3"/>"#,
        WIDTH - 100,
        c.primary
    ));

    // Detail rows.
    let rows = [
        ("WALLET", truncated_address(&input.wallet)),
        ("TOKEN", truncated_address(&input.token)),
        ("EXIT DATE", format_date(input.sell_timestamp)),
    ];
    for (index, (label, value)) in rows.iter().enumerate() {
        let y = 405 + index as u32 * 30;
        svg.push_str(&format!(
            r##"<text x="100" y="{y}" font-family="monospace" font-size="12" fill="#6B7280">{label}</text>"##
        ));
        svg.push_str(&format!(
            r##"<text x="230" y="{y}" font-family="monospace" font-size="12" fill="#D1D5DB">{}</text>"##,
            escape(value)
        ));
    }

    // Flavor text and footer.
    svg.push_str(&format!(
        r#"<text x="{center}" y="520" font-family="monospace" font-size="14" font-style="italic" fill="{}" text-anchor="middle">&quot;{}&quot;</text>"#,
        c.primary,
        escape(&input.exit_type)
    ));
    svg.push_str(&format!(
        r##"<text x="{center}" y="610" font-family="monospace" font-size="10" fill="#374151" text-anchor="middle">Verified on-chain · Bonding Curve Exit Badge v2</text>"##
    ));

    svg.push_str("</svg>");
    svg
}

fn truncated_address(address: &str) -> String {
    if address.len() <= 16 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|datetime| datetime.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> BadgeInput {
        BadgeInput {
            badge_title: "PRE-MIGRATION EXIT".to_string(),
            badge_color: BadgeColor::Red,
            exit_type: "Curve Jeet".to_string(),
            exit_venue: "Pump.fun Bonding Curve".to_string(),
            token_symbol: "PEPE".to_string(),
            wallet: "WaLLetAddr1111111111111111111111".to_string(),
            token: "MintAddr111111111111111111111111".to_string(),
            sell_timestamp: 1714003200,
            confidence: Confidence::High,
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_badge(&input()), render_badge(&input()));
    }

    #[test]
    fn badge_is_a_base64_svg_data_url() {
        let badge = render_badge(&input());
        let payload = badge
            .strip_prefix("data:image/svg+xml;base64,")
            .expect("data URL prefix");

        let decoded = STANDARD.decode(payload).expect("valid base64");
        let svg = String::from_utf8(decoded).expect("utf-8 svg");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("PRE-MIGRATION EXIT"));
        assert!(svg.contains("PEPE"));
        assert!(svg.contains("HIGH CONFIDENCE"));
        assert!(svg.contains("2024-04-25"));
    }

    #[test]
    fn addresses_are_truncated_for_display() {
        let badge = render_badge(&input());
        let svg = String::from_utf8(
            STANDARD
                .decode(badge.strip_prefix("data:image/svg+xml;base64,").unwrap())
                .unwrap(),
        )
        .unwrap();
        assert!(svg.contains("WaLLet...1111"));
        assert!(!svg.contains("WaLLetAddr1111111111111111111111"));
    }

    #[test]
    fn markup_sensitive_symbols_are_escaped() {
        let mut hostile = input();
        hostile.token_symbol = "<PEPE&CO>".to_string();
        let badge = render_badge(&hostile);
        let svg = String::from_utf8(
            STANDARD
                .decode(badge.strip_prefix("data:image/svg+xml;base64,").unwrap())
                .unwrap(),
        )
        .unwrap();
        assert!(svg.contains("&lt;PEPE&amp;CO&gt;"));
    }
}
