pub fn has_only_phone_characters(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_digit() || ch.is_whitespace() || matches!(ch, '-' | '+' | '(' | ')'))
}

pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

pub fn count_phone_digits(value: &str) -> usize {
    value.chars().filter(|ch| ch.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::{count_phone_digits, has_only_phone_characters, phone_digits};

    #[test]
    fn phone_characters_allow_formatting() {
        assert!(has_only_phone_characters("+91 (22) 5555-1212"));
    }

    #[test]
    fn phone_characters_reject_letters_and_extensions() {
        assert!(!has_only_phone_characters("abc-123-4567"));
        assert!(!has_only_phone_characters("415-555-1212 x89"));
        assert!(!has_only_phone_characters(""));
    }

    #[test]
    fn phone_digits_strips_formatting() {
        assert_eq!(phone_digits("  (415) 555-1212  "), "4155551212");
        assert_eq!(count_phone_digits("+1 (415) 555-1212"), 11);
    }
}
