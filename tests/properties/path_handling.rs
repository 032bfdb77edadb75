//! Property tests for index path normalization.

use proptest::prelude::*;

use portship::domain::value_objects::{escape_literal, OutputPath};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Normalization never panics on arbitrary input.
    #[test]
    fn property_normalization_never_panics(path in "(?s).{0,128}") {
        if let Ok(output) = OutputPath::from_stored(&path) {
            let _ = output.split_extension();
        }
    }

    /// PROPERTY: Splitting an extension loses nothing.
    #[test]
    fn property_split_extension_is_lossless(path in "[A-Za-z0-9_.\\\\/ ]{0,64}") {
        let Ok(output) = OutputPath::from_stored(&path) else {
            return Ok(());
        };
        let (stem, ext) = output.split_extension();
        prop_assert_eq!(format!("{stem}{ext}"), output.as_str());
        prop_assert!(ext.is_empty() || ext.starts_with('.'));
        prop_assert!(!ext.contains('/'));
    }

    /// PROPERTY: ASCII paths normalize to lowercase canonical relative paths.
    #[test]
    fn property_ascii_paths_lowercase(path in "[A-Za-z0-9_.\\\\/]{0,64}") {
        let Ok(output) = OutputPath::from_stored(&path) else {
            return Ok(());
        };
        let text = output.as_str();
        prop_assert_eq!(text, text.to_ascii_lowercase());
        prop_assert!(!text.contains('\\'));
        prop_assert!(!text.starts_with('/'));
        prop_assert!(text.split('/').all(|part| !matches!(part, "" | "." | "..")));
    }

    /// PROPERTY: Spellings that differ only in redundant separators and `.`
    /// components normalize to the same output.
    #[test]
    fn property_redundant_components_are_dropped(
        parts in prop::collection::vec("[A-Za-z0-9_]{1,8}", 1..5),
        noise in prop::collection::vec(
            prop::sample::select(vec!["/", "\\", "//", "\\.\\", "/./"]),
            4,
        ),
    ) {
        let plain = parts.join("\\");
        let mut noisy = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                noisy.push_str(noise[i % noise.len()]);
            }
            noisy.push_str(part);
        }

        prop_assert_eq!(
            OutputPath::from_stored(&plain).unwrap(),
            OutputPath::from_stored(&noisy).unwrap()
        );
    }

    /// PROPERTY: After escaping, every `$` is part of a `$$` pair.
    #[test]
    fn property_escape_literal_doubles_dollars(text in "[a-z$ ]{0,32}") {
        let escaped = escape_literal(&text);
        prop_assert_eq!(escaped.matches('$').count(), 2 * text.matches('$').count());
        prop_assert_eq!(escaped.replace("$$", "$"), text);
    }
}
