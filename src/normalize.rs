//! Text safety for the single-byte output encoding.

const SUBSTITUTIONS: [(char, &str); 7] = [
    ('\u{2022}', "- "),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
];

/// Replaces common typographic characters with plain equivalents, then drops
/// everything outside Latin-1. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if let Some((_, replacement)) = SUBSTITUTIONS.iter().find(|(from, _)| *from == ch) {
            out.push_str(replacement);
        } else if is_single_byte(ch) {
            out.push(ch);
        }
    }
    out
}

pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

pub fn is_single_byte(ch: char) -> bool {
    (ch as u32) <= 0xFF
}

pub fn is_normalized(text: &str) -> bool {
    text.chars().all(is_single_byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_before_filtering() {
        assert_eq!(normalize("caf\u{2019}e \u{2022} item"), "caf'e -  item");
        assert_eq!(
            normalize("\u{201C}quoted\u{201D} \u{2013} \u{2014} \u{2018}x\u{2019}"),
            "\"quoted\" - - 'x'"
        );
    }

    #[test]
    fn drops_unrepresentable_characters() {
        assert_eq!(normalize("om \u{0950} shanti \u{1F64F}"), "om  shanti ");
        assert_eq!(normalize("\u{6C14}"), "");
    }

    #[test]
    fn keeps_latin1_and_newlines() {
        let text = "Café naïve\nsecond line ©";
        assert_eq!(normalize(text), text);
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "",
            "plain",
            "\u{2022}\u{2022} bullets \u{2014} dashes",
            "mixed \u{1F600} emoji \u{2019} and ümlauts",
            "\u{20AC} euro sign is not Latin-1",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "sample {sample:?}");
            assert!(is_normalized(&once));
        }
    }

    #[test]
    fn absent_text_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize_opt(Some("\u{2013}")), "-");
    }
}
