//! Category colours (Tableau 10) and hex parsing

/// d3 `schemeTableau10`
pub const TABLEAU_10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Hex colour for a category index, cycling past ten
pub fn category_hex(category: u32) -> &'static str {
    TABLEAU_10[category as usize % TABLEAU_10.len()]
}

/// `#rrggbb` to linear 0-1 rgb
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex() {
        assert_eq!(hex_to_rgb("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(hex_to_rgb("00ff00"), Some([0.0, 1.0, 0.0]));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn palette_cycles() {
        assert_eq!(category_hex(0), "#4e79a7");
        assert_eq!(category_hex(10), category_hex(0));
        assert!(TABLEAU_10.iter().all(|h| hex_to_rgb(h).is_some()));
    }
}
