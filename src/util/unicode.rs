use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Wrap text into rows of at most `width` cells.
///
/// Breaks after whitespace; a word wider than a row is split between
/// graphemes. Whitespace at a break is dropped, all other text is kept.
pub fn wrap_to_width(s: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(s) <= width {
        return vec![s.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;
    let mut flush = |row: &mut String, row_width: &mut usize| {
        rows.push(row.trim_end().to_string());
        row.clear();
        *row_width = 0;
    };

    for token in s.split_inclusive(char::is_whitespace) {
        let word = token.trim_end();
        let word_width = display_width(word);
        if !row.is_empty() && row_width + word_width > width {
            flush(&mut row, &mut row_width);
        }
        if word_width > width {
            for grapheme in word.graphemes(true) {
                let gw = grapheme_display_width(grapheme);
                if !row.is_empty() && row_width + gw > width {
                    flush(&mut row, &mut row_width);
                }
                row.push_str(grapheme);
                row_width += gw;
            }
            let space = &token[word.len()..];
            row.push_str(space);
            row_width += display_width(space);
        } else {
            row.push_str(token);
            row_width += display_width(token);
        }
    }
    if !row.trim_end().is_empty() {
        flush(&mut row, &mut row_width);
    }
    rows
}

/// Remove the last grapheme cluster. Returns false if the string was empty.
pub fn pop_grapheme(s: &mut String) -> bool {
    match s.grapheme_indices(true).next_back() {
        Some((i, _)) => {
            s.truncate(i);
            true
        }
        None => false,
    }
}

/// Display width of a grapheme cluster.
fn grapheme_display_width(g: &str) -> usize {
    if g == "\t" {
        return 4;
    }
    UnicodeWidthStr::width(g)
}
