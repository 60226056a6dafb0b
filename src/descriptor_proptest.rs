//! Property-based tests for descriptor parsing.
//!
//! These tests use proptest to generate random descriptor lines and verify
//! that the parsing invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::descriptor::parse_str;
    use proptest::prelude::*;
    use std::path::Path;

    fn parse(content: &str) -> crate::descriptor::Descriptor {
        parse_str(content, Path::new("Prop.s4ext")).unwrap()
    }

    proptest! {
        /// Property: a "key value" line maps key to the trimmed value
        #[test]
        fn key_value_line_maps_key_to_value(
            key in "[A-Za-z_][A-Za-z0-9_]{0,15}",
            sep in "[ \t]{1,4}",
            value in "[!-~]([ !-~]{0,30}[!-~])?",
        ) {
            let descriptor = parse(&format!("{}{}{}\n", key, sep, value));
            prop_assert_eq!(descriptor.len(), 1);
            prop_assert_eq!(descriptor.get(&key), Some(value.as_str()));
        }

        /// Property: a lone key maps to an absent value
        #[test]
        fn lone_key_has_no_value(key in "[A-Za-z_][A-Za-z0-9_]{0,15}", trailing in "[ \t]{0,4}") {
            let descriptor = parse(&format!("{}{}\n", key, trailing));
            prop_assert!(descriptor.contains(&key));
            prop_assert_eq!(descriptor.get(&key), None);
        }

        /// Property: comment and blank lines contribute nothing
        #[test]
        fn comments_and_blank_lines_are_ignored(
            comment in "[ \t]{0,4}#[ -~]{0,40}",
            blank in "[ \t]{0,8}",
        ) {
            let descriptor = parse(&format!("{}\n{}\n", comment, blank));
            prop_assert!(descriptor.is_empty());
        }

        /// Property: the last occurrence of a repeated key wins
        #[test]
        fn later_duplicates_overwrite(
            key in "[a-z]{1,10}",
            first in "[A-Za-z0-9]{1,10}",
            second in "[A-Za-z0-9]{1,10}",
        ) {
            prop_assume!(key != "other");
            let descriptor = parse(&format!("{key} {first}\nother x\n{key} {second}\n"));
            prop_assert_eq!(descriptor.get(&key), Some(second.as_str()));
            prop_assert_eq!(descriptor.len(), 2);
        }

        /// Property: parsing never fails on arbitrary printable text
        #[test]
        fn parse_never_fails_on_text(content in "[ -~\t\n]{0,200}") {
            prop_assert!(parse_str(&content, Path::new("Prop.s4ext")).is_ok());
        }
    }
}
