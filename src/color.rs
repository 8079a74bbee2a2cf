pub const DEFAULT_COLOR: &str = "FFFFFF";

/// Display color for an issue type, as an uppercase hex triplet without `#`.
pub fn color_of(issue_type: &str) -> &'static str {
    match issue_type {
        "Task" => "ADD8E6",
        "Epic" => "CBC3E3",
        "Story" => "90EE90",
        "Bug" => "FFCCCB",
        _ => DEFAULT_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_types() {
        assert_eq!(color_of("Task"), "ADD8E6");
        assert_eq!(color_of("Epic"), "CBC3E3");
        assert_eq!(color_of("Story"), "90EE90");
        assert_eq!(color_of("Bug"), "FFCCCB");
    }

    #[test]
    fn test_unknown_type() {
        assert_eq!(color_of("Chore"), DEFAULT_COLOR);
    }

    #[test]
    fn test_empty_type() {
        assert_eq!(color_of(""), DEFAULT_COLOR);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(color_of("bug"), DEFAULT_COLOR);
    }

    proptest! {
        #[test]
        fn prop_always_six_hex_digits(issue_type in "\\PC*") {
            let color = color_of(&issue_type);
            prop_assert_eq!(color.len(), 6);
            prop_assert!(color.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
