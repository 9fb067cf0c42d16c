/// Bullet glyphs that mark list items rather than headers or prose.
pub const BULLET_GLYPHS: &[char] = &['•', 'ᐧ', '◦', '-', '*'];

/// Clean extracted content: fold odd code points, collapse whitespace runs
/// to single spaces, and strip a leading bullet marker.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let folded = fold_unicode(text);
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_leading_bullet(&collapsed).to_string()
}

/// Normalize common ligature and accented code points to canonical letters.
///
/// PDF text layers frequently carry typographic ligatures and composed
/// accents that break token matching downstream.
pub fn fold_unicode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ﬁ' => out.push_str("fi"),
            'ﬂ' => out.push_str("fl"),
            'ﬀ' => out.push_str("ff"),
            'ﬃ' => out.push_str("ffi"),
            'ﬄ' => out.push_str("ffl"),
            'à' | 'á' | 'â' | 'ä' | 'ã' => out.push('a'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ò' | 'ó' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'À' | 'Á' | 'Â' | 'Ä' => out.push('A'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'ñ' => out.push('n'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201c}' | '\u{201d}' => out.push('"'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{00a0}' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

fn strip_leading_bullet(text: &str) -> &str {
    match text.chars().next() {
        Some(c) if BULLET_GLYPHS.contains(&c) => text[c.len_utf8()..].trim_start(),
        _ => text,
    }
}
