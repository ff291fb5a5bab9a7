//! Visit and plate placeholders in map labels.
//!
//! | Token | Replacement |
//! |---|---|
//! | `%S` | visit number |
//! | `%{n.S}` | first `n` characters of the visit padded to 5 digits |
//! | `%{S.n}` | last `n` characters of the padded visit |
//! | `%P` | plate number |
//! | `%{n.P}` | first `n` characters of the plate padded to 3 digits |
//! | `%{P.n}` | last `n` characters of the padded plate |
//!
//! Braced tokens are substituted before the bare `%S`/`%P`.

const VISIT_WIDTH: usize = 5;
const PLATE_WIDTH: usize = 3;

/// Expand visit tokens in `template`.
pub fn expand_visit(template: &str, visit: i64) -> String {
    expand(template, 'S', VISIT_WIDTH, visit)
}

/// Expand visit tokens, then plate tokens, in `template`.
pub fn expand_page(template: &str, visit: i64, plate: i64) -> String {
    let label = expand_visit(template, visit);
    expand(&label, 'P', PLATE_WIDTH, plate)
}

fn expand(template: &str, key: char, width: usize, value: i64) -> String {
    let padded = format!("{value:0width$}");
    let mut label = template.to_string();
    for n in (1..=width).rev() {
        label = label.replace(&format!("%{{{n}.{key}}}"), prefix(&padded, n));
    }
    for n in (1..=width).rev() {
        label = label.replace(&format!("%{{{key}.{n}}}"), suffix(&padded, n));
    }
    label.replace(&format!("%{key}"), &value.to_string())
}

fn prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn suffix(text: &str, n: usize) -> &str {
    let count = text.chars().count();
    if n >= count {
        return text;
    }
    match text.char_indices().nth(count - n) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_prefix_and_suffix_tokens() {
        assert_eq!(expand_visit("Visit %S Day %{2.S}", 7), "Visit 7 Day 00");
        assert_eq!(expand_visit("%{S.2}/%{S.5}/%{5.S}", 1234), "34/01234/01234");
        assert_eq!(expand_visit("%{1.S}", 123456), "1");
        assert_eq!(expand_visit("%{S.3}", 123456), "456");
    }

    #[test]
    fn page_tokens_use_three_digit_plates() {
        assert_eq!(
            expand_page("V%S P%P (%{P.2}) %{1.P}", 12, 5),
            "V12 P5 (05) 0"
        );
    }

    #[test]
    fn unknown_tokens_are_left_alone() {
        assert_eq!(expand_visit("%{6.S} %X", 3), "%{6.S} %X");
    }
}
