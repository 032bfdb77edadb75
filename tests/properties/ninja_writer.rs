//! Property tests for Ninja rendering.

use proptest::prelude::*;

use portship::domain::entities::BuildEdge;
use portship::domain::ports::GraphWriter;
use portship::infrastructure::ninja::NinjaWriter;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Rendering never panics, whatever the width or content.
    #[test]
    fn property_writer_never_panics(
        width in 0usize..64,
        words in proptest::collection::vec("(?s).{0,16}", 0..=12),
    ) {
        let mut writer = NinjaWriter::new(Vec::new()).with_width(width);
        writer.comment(&words.join(" ")).unwrap();
        writer.variable("v", &words.join(" ")).unwrap();
        writer
            .build(&BuildEdge::new("phony", "all").inputs(words.iter().cloned()))
            .unwrap();
        let _ = writer.into_inner().unwrap();
    }

    /// PROPERTY: Wrapped lines, joined back at their continuations, restore the line.
    #[test]
    fn property_wrapping_preserves_content(
        width in 16usize..48,
        words in proptest::collection::vec("[a-z]{1,10}", 1..=16),
    ) {
        let value = words.join(" ");
        let mut writer = NinjaWriter::new(Vec::new()).with_width(width);
        writer.variable("v", &value).unwrap();
        let out = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let joined = out
            .trim_end_matches('\n')
            .split(" $\n    ")
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(joined, format!("v = {value}"));
    }
}
