//! 3x5 bitmap digits for node labels.
//!
//! Node labels are plain numbers, so a digit-only font avoids depending on
//! system fonts being installed.

pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;

/// Each row is 3 bits, most significant bit on the left.
const DIGITS: [[u8; GLYPH_HEIGHT]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b010, 0b010, 0b010],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

pub fn glyph(ch: char) -> Option<&'static [u8; GLYPH_HEIGHT]> {
    ch.to_digit(10).map(|d| &DIGITS[d as usize])
}

/// Lit cells `(column, row)` of `text`, laid out left to right with one blank
/// column between glyphs. Characters without a glyph leave a gap.
pub fn text_cells(text: &str) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    for (i, ch) in text.chars().enumerate() {
        let Some(rows) = glyph(ch) else {
            continue;
        };
        let x0 = i * (GLYPH_WIDTH + 1);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    cells.push((x0 + col, row));
                }
            }
        }
    }
    cells
}

/// Width of `text` in cells.
pub fn text_width(text: &str) -> usize {
    let n = text.chars().count();
    if n == 0 { 0 } else { n * (GLYPH_WIDTH + 1) - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_has_a_centre_stem() {
        let cells = text_cells("1");
        assert!(cells.contains(&(1, 0)));
        assert!(cells.contains(&(1, 3)));
        assert!(!cells.contains(&(0, 0)));
        assert_eq!(cells.len(), 8);
    }

    #[test]
    fn glyphs_are_spaced_by_one_column() {
        assert_eq!(text_width("12"), 7);
        assert!(text_cells("12").iter().all(|&(x, _)| x != 3));
        assert!(text_cells("12").iter().any(|&(x, _)| x == 4));
    }

    #[test]
    fn non_digits_have_no_glyph() {
        assert!(glyph('a').is_none());
        assert_eq!(text_width(""), 0);
    }
}
