use unicode_width::UnicodeWidthChar;

/// `MM:SS` countdown label
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Cut `text` so it occupies at most `max_width` terminal columns
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    let mut width = 0;
    text.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}
