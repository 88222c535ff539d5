//! Static symbol tables shared by the normalizer and the Vietnamese composer.

use phf::{Map, Set, phf_map, phf_set};

/// Latin-1 Supplement characters treated as separators.
pub static LATIN1_EXCLUDE: Set<char> = phf_set! {
    '\u{00A0}', // NO-BREAK SPACE
    '\u{00AB}', // LEFT-POINTING DOUBLE ANGLE QUOTATION MARK
    '\u{00B0}', // DEGREE SIGN
    '\u{00BB}', // RIGHT-POINTING DOUBLE ANGLE QUOTATION MARK
};

// ---------------------------------------------------------------------------
//  Vietnamese composition
// ---------------------------------------------------------------------------

/// Base letters that take a combining tone mark, in column order of
/// [`VI_COMPOSED`].
pub static VI_BASE_INDEX: Map<char, u8> = phf_map! {
    'A' => 0, 'E' => 1, 'I' => 2, 'O' => 3, 'U' => 4, 'Y' => 5,
    'a' => 6, 'e' => 7, 'i' => 8, 'o' => 9, 'u' => 10, 'y' => 11,
    '\u{00C2}' => 12, '\u{00CA}' => 13, '\u{00D4}' => 14,
    '\u{00E2}' => 15, '\u{00EA}' => 16, '\u{00F4}' => 17,
    '\u{0102}' => 18, '\u{0103}' => 19,
    '\u{01A0}' => 20, '\u{01A1}' => 21,
    '\u{01AF}' => 22, '\u{01B0}' => 23,
};

/// Combining marks, in row order of [`VI_COMPOSED`].
pub static VI_MARK_INDEX: Map<char, u8> = phf_map! {
    '\u{0300}' => 0, // grave
    '\u{0301}' => 1, // acute
    '\u{0303}' => 2, // tilde
    '\u{0309}' => 3, // hook above
    '\u{0323}' => 4, // dot below
};

pub const VI_BASE_COUNT: usize = 24;
pub const VI_MARK_COUNT: usize = 5;

/// Precomposed results, `VI_COMPOSED[mark][base]`.
pub static VI_COMPOSED: [[char; VI_BASE_COUNT]; VI_MARK_COUNT] = [
    // U+0300 grave
    [
        '\u{00C0}', '\u{00C8}', '\u{00CC}', '\u{00D2}', '\u{00D9}', '\u{1EF2}', '\u{00E0}',
        '\u{00E8}', '\u{00EC}', '\u{00F2}', '\u{00F9}', '\u{1EF3}', '\u{1EA6}', '\u{1EC0}',
        '\u{1ED2}', '\u{1EA7}', '\u{1EC1}', '\u{1ED3}', '\u{1EB0}', '\u{1EB1}', '\u{1EDC}',
        '\u{1EDD}', '\u{1EEA}', '\u{1EEB}',
    ],
    // U+0301 acute
    [
        '\u{00C1}', '\u{00C9}', '\u{00CD}', '\u{00D3}', '\u{00DA}', '\u{00DD}', '\u{00E1}',
        '\u{00E9}', '\u{00ED}', '\u{00F3}', '\u{00FA}', '\u{00FD}', '\u{1EA4}', '\u{1EBE}',
        '\u{1ED0}', '\u{1EA5}', '\u{1EBF}', '\u{1ED1}', '\u{1EAE}', '\u{1EAF}', '\u{1EDA}',
        '\u{1EDB}', '\u{1EE8}', '\u{1EE9}',
    ],
    // U+0303 tilde
    [
        '\u{00C3}', '\u{1EBC}', '\u{0128}', '\u{00D5}', '\u{0168}', '\u{1EF8}', '\u{00E3}',
        '\u{1EBD}', '\u{0129}', '\u{00F5}', '\u{0169}', '\u{1EF9}', '\u{1EAA}', '\u{1EC4}',
        '\u{1ED6}', '\u{1EAB}', '\u{1EC5}', '\u{1ED7}', '\u{1EB4}', '\u{1EB5}', '\u{1EE0}',
        '\u{1EE1}', '\u{1EEE}', '\u{1EEF}',
    ],
    // U+0309 hook above
    [
        '\u{1EA2}', '\u{1EBA}', '\u{1EC8}', '\u{1ECE}', '\u{1EE6}', '\u{1EF6}', '\u{1EA3}',
        '\u{1EBB}', '\u{1EC9}', '\u{1ECF}', '\u{1EE7}', '\u{1EF7}', '\u{1EA8}', '\u{1EC2}',
        '\u{1ED4}', '\u{1EA9}', '\u{1EC3}', '\u{1ED5}', '\u{1EB2}', '\u{1EB3}', '\u{1EDE}',
        '\u{1EDF}', '\u{1EEC}', '\u{1EED}',
    ],
    // U+0323 dot below
    [
        '\u{1EA0}', '\u{1EB8}', '\u{1ECA}', '\u{1ECC}', '\u{1EE4}', '\u{1EF4}', '\u{1EA1}',
        '\u{1EB9}', '\u{1ECB}', '\u{1ECD}', '\u{1EE5}', '\u{1EF5}', '\u{1EAC}', '\u{1EC6}',
        '\u{1ED8}', '\u{1EAD}', '\u{1EC7}', '\u{1ED9}', '\u{1EB6}', '\u{1EB7}', '\u{1EE2}',
        '\u{1EE3}', '\u{1EF0}', '\u{1EF1}',
    ],
];

// ---------------------------------------------------------------------------
//  CJK symbol classes
// ---------------------------------------------------------------------------

/// Built-in seed table of CJK ideograph classes. The first character of each
/// class is its representative.
///
/// This is a partial table of ten classes. Applications that detect Chinese or
/// Japanese text install the complete table (several thousand ideographs)
/// through [`crate::cjk::install_classes`].
pub static CJK_SEED_CLASSES: &[&str] = &[
    "\u{4F7C}\u{6934}",
    "\u{88CF}\u{95B2}",
    "\u{4E27}\u{532E}",
    "\u{4E01}\u{4E03}\u{4E47}\u{4E5C}",
    "\u{4E13}\u{4E24}\u{4E25}\u{4E3A}\u{4E3D}",
    "\u{4E9F}\u{4EBF}\u{4F09}\u{4F36}",
    "\u{5742}\u{5A9A}\u{5D16}\u{6046}",
    "\u{6CAB}\u{6E0A}\u{6F20}\u{7011}",
    "\u{7AE5}\u{7FC1}\u{8568}\u{8A8A}",
    "\u{9042}\u{9283}\u{95A5}\u{97CB}",
];
