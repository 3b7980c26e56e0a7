use crate::units::Pt;

/// Greedily wraps `text` on whitespace so that no line is wider than
/// `max_width`.
///
/// Words are appended to a candidate line one at a time and the candidate is
/// measured after each addition. Once it is *wider* than `max_width` (a line
/// that fits exactly is kept), the candidate without its last word becomes a
/// finished line and the word starts the next one. A single word that is
/// wider than `max_width` on its own is kept whole on its own line.
///
/// Runs of whitespace collapse to single spaces. Returns no lines for text
/// without words.
pub fn wrap_words<E, F>(text: &str, max_width: Pt, measure: F) -> Result<Vec<String>, E>
where
    F: Fn(&str) -> Result<Pt, E>,
{
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_len = current.len();
        current.push(' ');
        current.push_str(word);

        if measure(&current)? > max_width {
            current.truncate(candidate_len);
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Ok(lines)
}

/// Splits a URL into lines no wider than `max_width`, breaking only in front
/// of a `/` so path segments stay intact.
///
/// While the remainder does not fit, the break point moves back to the
/// previous `/` until the prefix before it fits. Slashes that belong to the
/// `scheme://` prefix are never used. When no such slash exists the whole
/// remainder goes on one line, even though it overflows.
pub fn wrap_url<E, F>(url: &str, max_width: Pt, measure: F) -> Result<Vec<&str>, E>
where
    F: Fn(&str) -> Result<Pt, E>,
{
    let authority_start = url.find("://").map(|i| i + 3).unwrap_or(0);
    let mut lines: Vec<&str> = Vec::new();
    let mut rest = url;
    let mut offset = 0usize;

    while !rest.is_empty() {
        if measure(rest)? <= max_width {
            lines.push(rest);
            break;
        }

        // break points are byte offsets of '/' within `rest`
        let floor = authority_start.saturating_sub(offset);
        let mut break_point = rest.len();
        loop {
            match rest[..break_point].rfind('/') {
                Some(i) if i > 0 && i >= floor => {
                    break_point = i;
                    if measure(&rest[..break_point])? <= max_width {
                        break;
                    }
                }
                _ => {
                    break_point = rest.len();
                    break;
                }
            }
        }

        let (line, remainder) = rest.split_at(break_point);
        lines.push(line);
        offset += break_point;
        rest = remainder;
    }

    Ok(lines)
}
