//! The Helvetica family from the PDF base-14 set. These faces are never
//! embedded; viewers supply them, so only their metrics live here.

use unicode_normalization::UnicodeNormalization;

/// Advance widths (1/1000 em) for printable ASCII, starting at `' '`.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const DEFAULT_WIDTH: u16 = 556;

/// One of the four Helvetica faces every PDF viewer must provide
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl StandardFont {
    /// The PostScript name written as the font's `BaseFont`
    pub fn base_name(&self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            StandardFont::HelveticaBold | StandardFont::HelveticaBoldOblique
        )
    }

    /// The advance width of `ch` in 1/1000 em, or [None] if the character has
    /// no code in `WinAnsiEncoding`
    pub fn advance(&self, ch: char) -> Option<u16> {
        win_ansi_code(ch)?;

        let ascii = if self.is_bold() {
            &HELVETICA_BOLD_ASCII
        } else {
            &HELVETICA_ASCII
        };

        if let Some(w) = ascii_width(ascii, ch) {
            return Some(w);
        }
        if let Some(w) = symbol_width(ch, self.is_bold()) {
            return Some(w);
        }

        // accented latin letters share the advance of their base letter
        let base = std::iter::once(ch).nfd().next().unwrap_or(ch);
        Some(ascii_width(ascii, base).unwrap_or(DEFAULT_WIDTH))
    }
}

fn ascii_width(table: &[u16; 95], ch: char) -> Option<u16> {
    match ch {
        ' '..='~' => Some(table[ch as usize - 0x20]),
        _ => None,
    }
}

fn symbol_width(ch: char, bold: bool) -> Option<u16> {
    let (regular, heavy) = match ch {
        '\u{a0}' => (278, 278),
        '\u{ad}' => (333, 333),
        '‚' | '‘' | '’' => (222, 278),
        '„' | '“' | '”' => (333, 500),
        '…' | '‰' | 'Œ' | '™' | '—' | 'Æ' => (1000, 1000),
        '€' | 'ƒ' | '†' | '‡' | '–' | '¢' | '£' | '¤' | '¥' | '§' | '«' | '»' => (556, 556),
        'ˆ' | '˜' | '‹' | '›' | '¡' | '¨' | '¯' | '²' | '³' | '´' | '¸' | '¹' => (333, 333),
        '•' => (350, 350),
        'œ' | 'Ø' => (944, 944),
        '¦' => (260, 280),
        '©' | '®' => (737, 737),
        'ª' => (370, 370),
        'º' => (365, 365),
        '¬' | '±' | '×' | '÷' => (584, 584),
        '°' => (400, 400),
        'µ' | 'ð' | 'þ' => (556, 611),
        '¶' => (537, 556),
        '·' => (278, 278),
        '¼' | '½' | '¾' => (834, 834),
        '¿' | 'ß' | 'ø' => (611, 611),
        'æ' => (889, 889),
        'Ð' => (722, 722),
        'Þ' => (667, 667),
        _ => return None,
    };
    Some(if bold { heavy } else { regular })
}

/// Map a character to its single-byte code in `WinAnsiEncoding`
pub fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch {
        ' '..='~' | '\u{a0}'..='\u{ff}' => ch as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_widths_match_the_afm_tables() {
        assert_eq!(StandardFont::Helvetica.advance(' '), Some(278));
        assert_eq!(StandardFont::Helvetica.advance('W'), Some(944));
        assert_eq!(StandardFont::Helvetica.advance('i'), Some(222));
        assert_eq!(StandardFont::HelveticaBold.advance('i'), Some(278));
        assert_eq!(StandardFont::HelveticaOblique.advance('m'), Some(833));
        assert_eq!(StandardFont::HelveticaBoldOblique.advance('m'), Some(889));
        assert_eq!(StandardFont::Helvetica.advance('~'), Some(584));
    }

    #[test]
    fn accented_letters_use_their_base_width() {
        assert_eq!(StandardFont::Helvetica.advance('é'), Some(556));
        assert_eq!(StandardFont::HelveticaBold.advance('Ç'), Some(722));
    }

    #[test]
    fn typographic_punctuation_is_encodable() {
        assert_eq!(win_ansi_code('’'), Some(0x92));
        assert_eq!(win_ansi_code('—'), Some(0x97));
        assert_eq!(StandardFont::Helvetica.advance('—'), Some(1000));
        assert_eq!(StandardFont::HelveticaBold.advance('“'), Some(500));
    }

    #[test]
    fn characters_outside_win_ansi_have_no_advance() {
        assert_eq!(win_ansi_code('€'), Some(0x80));
        assert_eq!(win_ansi_code('₂'), None);
        assert_eq!(StandardFont::Helvetica.advance('☃'), None);
        assert_eq!(StandardFont::Helvetica.advance('\n'), None);
    }
}
