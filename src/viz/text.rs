//! Text measurement and truncation utilities.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: f64) -> u32 {
    ((text.chars().count() as f64) * font_px * 0.60).ceil() as u32
}

/// Widest of several strings.
pub fn max_text_width_px<'a, I>(texts: I, font_px: f64) -> u32
where
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|t| estimate_text_width_px(t, font_px))
        .max()
        .unwrap_or(0)
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: f64, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}
