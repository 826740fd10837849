// Phase 3: グリフ表: グループ名 → (FontForge グリフ名, コードポイント) の並び

use serde::Serialize;

/// A glyph identity: its FontForge name (pure ASCII) and Unicode scalar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlyphSpec {
    pub name: String,
    pub codepoint: char,
}

/// Position of a glyph inside a [`Repertoire`].
///
/// Names are not unique across groups, so glyphs are addressed by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlyphId {
    pub group: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlyphGroup {
    pub name: String,
    pub glyphs: Vec<GlyphSpec>,
}

/// Ordered set of glyph groups that can be assigned to boxes.
#[derive(Debug, Clone, Serialize)]
pub struct Repertoire {
    groups: Vec<GlyphGroup>,
}

impl Repertoire {
    pub fn new(groups: Vec<GlyphGroup>) -> Self {
        Self { groups }
    }

    /// The built-in glyph tables.
    pub fn builtin() -> Self {
        let groups = BUILTIN_GROUPS
            .iter()
            .map(|(name, table)| GlyphGroup {
                name: name.to_string(),
                glyphs: table
                    .iter()
                    .map(|&(glyph, codepoint)| GlyphSpec {
                        name: glyph.to_string(),
                        codepoint,
                    })
                    .collect(),
            })
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[GlyphGroup] {
        &self.groups
    }

    pub fn get(&self, id: GlyphId) -> Option<&GlyphSpec> {
        self.groups.get(id.group)?.glyphs.get(id.index)
    }

    /// Every glyph id in table order.
    pub fn ids(&self) -> impl Iterator<Item = GlyphId> + '_ {
        self.groups.iter().enumerate().flat_map(|(group, g)| {
            (0..g.glyphs.len()).map(move |index| GlyphId { group, index })
        })
    }

    /// First glyph named `name`, searching groups in order.
    pub fn find(&self, name: &str) -> Option<GlyphId> {
        self.ids()
            .find(|&id| self.get(id).is_some_and(|g| g.name == name))
    }

    /// Glyph named `name` inside the group called `group`.
    pub fn find_in_group(&self, group: &str, name: &str) -> Option<GlyphId> {
        let group_idx = self.groups.iter().position(|g| g.name == group)?;
        let index = self.groups[group_idx]
            .glyphs
            .iter()
            .position(|g| g.name == name)?;
        Some(GlyphId {
            group: group_idx,
            index,
        })
    }

    /// Total number of glyphs over all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.glyphs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

const BUILTIN_GROUPS: &[(&str, &[(&str, char)])] = &[
    ("latin lower case", LATIN_LOWER),
    ("latin upper case", LATIN_UPPER),
    ("latin accented lower case", LATIN_ACCENTED_LOWER),
    ("latin accented upper case", LATIN_ACCENTED_UPPER),
    ("latin extra lower case", LATIN_EXTRA_LOWER),
    ("latin extra upper case", LATIN_EXTRA_UPPER),
    ("numbers", NUMBERS),
    ("brackets", BRACKETS),
    ("punctuation", PUNCTUATION),
    ("quotation", QUOTATION),
    ("symbols", SYMBOLS),
    ("currency", CURRENCY),
    ("cyrillic lowercase", CYRILLIC_LOWER),
    ("cyrillic uppercase", CYRILLIC_UPPER),
];

#[rustfmt::skip]
const LATIN_LOWER: &[(&str, char)] = &[
    ("a", 'a'), ("b", 'b'), ("c", 'c'), ("d", 'd'), ("e", 'e'), ("f", 'f'), ("g", 'g'),
    ("h", 'h'), ("i", 'i'), ("j", 'j'), ("k", 'k'), ("l", 'l'), ("m", 'm'), ("n", 'n'),
    ("o", 'o'), ("p", 'p'), ("q", 'q'), ("r", 'r'), ("s", 's'), ("t", 't'), ("u", 'u'),
    ("v", 'v'), ("w", 'w'), ("x", 'x'), ("y", 'y'), ("z", 'z'),
];

#[rustfmt::skip]
const LATIN_UPPER: &[(&str, char)] = &[
    ("A", 'A'), ("B", 'B'), ("C", 'C'), ("D", 'D'), ("E", 'E'), ("F", 'F'), ("G", 'G'),
    ("H", 'H'), ("I", 'I'), ("J", 'J'), ("K", 'K'), ("L", 'L'), ("M", 'M'), ("N", 'N'),
    ("O", 'O'), ("P", 'P'), ("Q", 'Q'), ("R", 'R'), ("S", 'S'), ("T", 'T'), ("U", 'U'),
    ("V", 'V'), ("W", 'W'), ("X", 'X'), ("Y", 'Y'), ("Z", 'Z'),
];

#[rustfmt::skip]
const LATIN_ACCENTED_LOWER: &[(&str, char)] = &[
    ("agrave", '\u{00e0}'), ("aacute", '\u{00e1}'), ("acircumflex", '\u{00e2}'),
    ("atilde", '\u{00e3}'), ("adieresis", '\u{00e4}'), ("aring", '\u{00e5}'),
    ("egrave", '\u{00e8}'), ("eacute", '\u{00e9}'), ("ecircumflex", '\u{00ea}'),
    ("edieresis", '\u{00eb}'), ("igrave", '\u{00ec}'), ("iacute", '\u{00ed}'),
    ("icircumflex", '\u{00ee}'), ("idieresis", '\u{00ef}'), ("ntilde", '\u{00f1}'),
    ("ograve", '\u{00f2}'), ("oacute", '\u{00f3}'), ("ocircumflex", '\u{00f4}'),
    ("otilde", '\u{00f5}'), ("odieresis", '\u{00f6}'), ("ugrave", '\u{00f9}'),
    ("uacute", '\u{00fa}'), ("ucircumflex", '\u{00fb}'), ("udieresis", '\u{00fc}'),
    ("yacute", '\u{00fd}'), ("ydieresis", '\u{00ff}'),
];

#[rustfmt::skip]
const LATIN_ACCENTED_UPPER: &[(&str, char)] = &[
    ("Agrave", '\u{00c0}'), ("Aacute", '\u{00c1}'), ("Acircumflex", '\u{00c2}'),
    ("Atilde", '\u{00c3}'), ("Adieresis", '\u{00c4}'), ("Aring", '\u{00c5}'),
    ("Egrave", '\u{00c8}'), ("Eacute", '\u{00c9}'), ("Ecircumflex", '\u{00ca}'),
    ("Edieresis", '\u{00cb}'), ("Igrave", '\u{00cc}'), ("Iacute", '\u{00cd}'),
    ("Icircumflex", '\u{00ce}'), ("Idieresis", '\u{00cf}'), ("Ntilde", '\u{00d1}'),
    ("Ograve", '\u{00d2}'), ("Oacute", '\u{00d3}'), ("Ocircumflex", '\u{00d4}'),
    ("Otilde", '\u{00d5}'), ("Odieresis", '\u{00d6}'), ("Ugrave", '\u{00d9}'),
    ("Uacute", '\u{00da}'), ("Ucircumflex", '\u{00db}'), ("Udieresis", '\u{00dc}'),
    ("Yacute", '\u{00dd}'), ("Ydieresis", '\u{0178}'),
];

#[rustfmt::skip]
const LATIN_EXTRA_LOWER: &[(&str, char)] = &[
    ("ccedilla", '\u{00e7}'), ("eth", '\u{00f0}'), ("oslash", '\u{00f8}'),
    ("thorn", '\u{00fe}'), ("ae", '\u{00e6}'), ("oe", '\u{0153}'), ("germandbls", '\u{00df}'),
];

#[rustfmt::skip]
const LATIN_EXTRA_UPPER: &[(&str, char)] = &[
    ("Ccedilla", '\u{00c7}'), ("Eth", '\u{00d0}'), ("Oslash", '\u{00d8}'),
    ("Thorn", '\u{00de}'), ("AE", '\u{00c6}'), ("OE", '\u{0152}'),
];

#[rustfmt::skip]
const NUMBERS: &[(&str, char)] = &[
    ("zero", '0'), ("one", '1'), ("two", '2'), ("three", '3'), ("four", '4'), ("five", '5'),
    ("six", '6'), ("seven", '7'), ("eight", '8'), ("nine", '9'),
];

#[rustfmt::skip]
const BRACKETS: &[(&str, char)] = &[
    ("parenleft", '('), ("parenright", ')'), ("bracketleft", '['), ("bracketright", ']'),
    ("braceleft", '{'), ("braceright", '}'), ("less", '<'), ("greater", '>'),
];

#[rustfmt::skip]
const PUNCTUATION: &[(&str, char)] = &[
    ("exclam", '!'), ("exclamdown", '\u{00a1}'), ("question", '?'),
    ("questiondown", '\u{00bf}'), ("period", '.'), ("comma", ','), ("colon", ':'),
    ("semicolon", ';'), ("slash", '/'), ("backslash", '\\'), ("hyphen", '-'),
    ("underscore", '_'), ("endash", '\u{2013}'), ("emdash", '\u{2014}'),
    ("ellipsis", '\u{2026}'), ("periodcenter", '\u{00b7}'),
];

#[rustfmt::skip]
const QUOTATION: &[(&str, char)] = &[
    ("quotesingle", '\''), ("quotedbl", '"'), ("quoteleft", '\u{2018}'),
    ("quoteright", '\u{2019}'), ("quotesinglbase", '\u{201a}'), ("quotedblleft", '\u{201c}'),
    ("quotedblright", '\u{201d}'), ("quotedblbase", '\u{201e}'), ("guillemotleft", '\u{00ab}'),
    ("guillemotright", '\u{00bb}'), ("guilsinglleft", '\u{2039}'),
    ("guilsinglright", '\u{203a}'),
];

#[rustfmt::skip]
const SYMBOLS: &[(&str, char)] = &[
    ("numbersign", '#'), ("percent", '%'), ("ampersand", '&'), ("asterisk", '*'), ("plus", '+'),
    ("multiply", '\u{00d7}'), ("divide", '\u{00f7}'), ("equal", '='), ("at", '@'),
    ("asciitilde", '~'), ("copyright", '\u{00a9}'), ("registered", '\u{00ae}'),
    ("trademark", '\u{2122}'), ("paragraph", '\u{00b6}'), ("section", '\u{00a7}'),
    ("brokenbar", '\u{00a6}'), ("uniFFFD", '\u{fffd}'),
];

#[rustfmt::skip]
const CURRENCY: &[(&str, char)] = &[
    ("dollar", '$'), ("cent", '\u{00a2}'), ("euro", '\u{20ac}'), ("sterling", '\u{00a3}'),
    ("yen", '\u{00a5}'), ("currency", '\u{00a4}'),
];

#[rustfmt::skip]
const CYRILLIC_LOWER: &[(&str, char)] = &[
    ("afii10065", '\u{0430}'), ("afii10066", '\u{0431}'), ("afii10067", '\u{0432}'),
    ("afii10068", '\u{0433}'), ("afii10069", '\u{0434}'), ("afii10070", '\u{0435}'),
    ("afii10072", '\u{0436}'), ("afii10073", '\u{0437}'), ("afii10074", '\u{0438}'),
    ("afii10075", '\u{0439}'), ("afii10076", '\u{043a}'), ("afii10077", '\u{043b}'),
    ("afii10078", '\u{043c}'), ("afii10079", '\u{043d}'), ("afii10080", '\u{043e}'),
    ("afii10081", '\u{043f}'), ("afii10082", '\u{0440}'), ("afii10083", '\u{0441}'),
    ("afii10084", '\u{0442}'), ("afii10085", '\u{0443}'), ("afii10086", '\u{0444}'),
    ("afii10087", '\u{0445}'), ("afii10088", '\u{0446}'), ("afii10089", '\u{0447}'),
    ("afii10090", '\u{0448}'), ("afii10091", '\u{0449}'), ("afii10092", '\u{044a}'),
    ("afii10093", '\u{044b}'), ("afii10094", '\u{044c}'), ("afii10095", '\u{044d}'),
    ("afii10096", '\u{044e}'), ("afii10097", '\u{044f}'),
];

#[rustfmt::skip]
const CYRILLIC_UPPER: &[(&str, char)] = &[
    ("afii10017", '\u{0410}'), ("afii10018", '\u{0411}'), ("afii10019", '\u{0412}'),
    ("afii10020", '\u{0413}'), ("afii10021", '\u{0414}'), ("afii10022", '\u{0415}'),
    ("afii10024", '\u{0416}'), ("afii10025", '\u{0417}'), ("afii10026", '\u{0418}'),
    ("afii10027", '\u{0419}'), ("afii10028", '\u{041a}'), ("afii10029", '\u{041b}'),
    ("afii10030", '\u{041c}'), ("afii10031", '\u{041d}'), ("afii10032", '\u{041e}'),
    ("afii10033", '\u{041f}'), ("afii10034", '\u{0420}'), ("afii10035", '\u{0421}'),
    ("afii10036", '\u{0422}'), ("afii10037", '\u{0423}'), ("afii10038", '\u{0424}'),
    ("afii10039", '\u{0425}'), ("afii10040", '\u{0426}'), ("afii10041", '\u{0427}'),
    ("afii10042", '\u{0428}'), ("afii10043", '\u{0429}'), ("afii10044", '\u{042a}'),
    ("afii10045", '\u{042b}'), ("afii10046", '\u{042c}'), ("afii10047", '\u{042d}'),
    ("afii10048", '\u{042e}'), ("afii10049", '\u{042f}'),
];
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names_unique_within_groups() {
        let rep = Repertoire::builtin();
        for group in rep.groups() {
            let mut names: Vec<&str> = group.glyphs.iter().map(|g| g.name.as_str()).collect();
            names.sort();
            let before = names.len();
            names.dedup();
            assert_eq!(before, names.len(), "duplicate name in '{}'", group.name);
        }
    }

    #[test]
    fn test_builtin_names_are_ascii() {
        let rep = Repertoire::builtin();
        assert!(rep.ids().all(|id| rep.get(id).is_some_and(|g| g.name.is_ascii())));
    }
}
