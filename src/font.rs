use crate::types::Pt;

/// Base-14 Helvetica variants. Text is never embedded as a font program; the
/// viewer supplies the face and we only need advance widths for wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
    BoldOblique,
}

impl FontFace {
    pub fn base_font_name(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
            FontFace::Oblique => "Helvetica-Oblique",
            FontFace::BoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(self) -> bool {
        matches!(self, FontFace::Bold | FontFace::BoldOblique)
    }
}

// AFM advance widths (1/1000 em) for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // '0'..'?'
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 'P'..'_'
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // '`'..'o'
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 'p'..'~'
];

// Latin-1 letters are mostly accented forms of ASCII glyphs; an average
// lowercase advance keeps wrapping conservative without a full table.
const FALLBACK_WIDTH: u16 = 556;

pub(crate) fn char_width_units(face: FontFace, ch: char) -> u16 {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        let idx = (code - 0x20) as usize;
        if face.is_bold() {
            HELVETICA_BOLD_WIDTHS[idx]
        } else {
            HELVETICA_WIDTHS[idx]
        }
    } else if code == 0xA0 {
        278
    } else if code < 0x20 {
        0
    } else {
        FALLBACK_WIDTH
    }
}

pub fn measure_text_width(face: FontFace, font_size: Pt, text: &str) -> Pt {
    let units: i64 = text
        .chars()
        .map(|ch| char_width_units(face, ch) as i64)
        .sum();
    let milli = font_size.to_milli_i64() as i128 * units as i128;
    Pt::from_milli_i64((milli / 1000) as i64)
}

/// Greedy word wrap. Explicit newlines always break; words wider than the
/// line are split by character so nothing runs past the right edge.
pub fn wrap_lines(face: FontFace, font_size: Pt, max_width: Pt, text: &str) -> Vec<String> {
    let max_width = max_width.max(Pt::from_f32(1.0));
    let space_width = measure_text_width(face, font_size, " ");
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let segment = segment.trim_end_matches('\r');
        if segment.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        let mut current_width = Pt::ZERO;
        for word in segment.split_whitespace() {
            let word_width = measure_text_width(face, font_size, word);
            if word_width > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = split_long_word(face, font_size, max_width, word);
                let tail = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = measure_text_width(face, font_size, &tail);
                current = tail;
                continue;
            }
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }
            let next_width = current_width + space_width + word_width;
            if next_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width = next_width;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_long_word(face: FontFace, font_size: Pt, max_width: Pt, word: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = Pt::ZERO;
    for ch in word.chars() {
        let mut buf = [0u8; 4];
        let w = measure_text_width(face, font_size, ch.encode_utf8(&mut buf));
        if !current.is_empty() && current_width + w > max_width {
            pieces.push(std::mem::take(&mut current));
            current_width = Pt::ZERO;
        }
        current.push(ch);
        current_width = current_width + w;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_afm_tables() {
        let size = Pt::from_f32(10.0);
        assert_eq!(
            measure_text_width(FontFace::Regular, size, "i").to_milli_i64(),
            2220
        );
        assert_eq!(
            measure_text_width(FontFace::Bold, size, "i").to_milli_i64(),
            2780
        );
        assert_eq!(
            measure_text_width(FontFace::Oblique, size, "W").to_milli_i64(),
            9440
        );
    }

    #[test]
    fn wrap_breaks_between_words() {
        let size = Pt::from_f32(10.0);
        let width = measure_text_width(FontFace::Regular, size, "alpha beta");
        let lines = wrap_lines(FontFace::Regular, size, width, "alpha beta gamma");
        assert_eq!(lines, vec!["alpha beta".to_string(), "gamma".to_string()]);
    }

    #[test]
    fn wrap_keeps_blank_lines_and_empty_text() {
        let size = Pt::from_f32(10.0);
        let lines = wrap_lines(FontFace::Regular, size, Pt::from_f32(500.0), "a\n\nb");
        assert_eq!(lines, vec!["a", "", "b"]);
        let lines = wrap_lines(FontFace::Regular, size, Pt::from_f32(500.0), "");
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn overlong_word_is_split_by_character() {
        let size = Pt::from_f32(10.0);
        let width = measure_text_width(FontFace::Regular, size, "abcde");
        let lines = wrap_lines(FontFace::Regular, size, width, "abcdefghij");
        assert_eq!(lines, vec!["abcde", "fghij"]);
        for line in &lines {
            assert!(measure_text_width(FontFace::Regular, size, line) <= width);
        }
    }
}
