//! Property tests for graph compilation.

use proptest::prelude::*;

use portship::domain::entities::{Entry, VfsIndex};
use portship::domain::policies::ConversionPolicy;
use portship::domain::services::{CompilerSettings, GraphCompiler, AGGREGATE_TARGET};
use portship::infrastructure::graph::RecordingGraphWriter;
use portship::infrastructure::ninja::NinjaWriter;

#[derive(Debug, Clone)]
struct EntryShape {
    dir: String,
    name: String,
    ext: String,
    root: bool,
    encrypted: bool,
    deleted: bool,
    compressed: bool,
    offset: u64,
    length: u64,
}

fn entry_shape() -> impl Strategy<Value = EntryShape> {
    (
        "[A-Za-z0-9_]{1,8}",
        "[A-Za-z0-9_ ]{1,12}",
        prop_oneof![
            Just(".DDS".to_string()),
            Just(".dds".to_string()),
            Just(".XML".to_string()),
            Just(".zon".to_string()),
            Just(String::new()),
        ],
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(
            |(dir, name, ext, root, encrypted, deleted, compressed, offset, length)| EntryShape {
                dir,
                name,
                ext,
                root,
                encrypted,
                deleted,
                compressed,
                offset: u64::from(offset),
                length: u64::from(length),
            },
        )
}

/// Entry names carry their position, so no two entries share an output
fn build_index(shapes: &[EntryShape]) -> VfsIndex {
    shapes
        .iter()
        .enumerate()
        .fold(
            VfsIndex::new("/games/rose", "/games/rose/data.idx"),
            |index, (i, shape)| {
                let path = format!("{}\\{}_{i}{}", shape.dir, shape.name, shape.ext);
                let archive = if shape.root { "ROOT.VFS" } else { "DATA.VFS" };
                index.with_entry(
                    format!("entry{i}"),
                    Entry::new(path, archive)
                        .with_range(shape.offset, shape.length)
                        .with_encrypted(shape.encrypted)
                        .with_deleted(shape.deleted)
                        .with_compressed(shape.compressed),
                )
            },
        )
}

fn compiler() -> GraphCompiler {
    let settings = CompilerSettings {
        tool_source_root: "/opt/portship/tools".to_string(),
        ..CompilerSettings::default()
    };
    GraphCompiler::new(settings, ConversionPolicy::default())
}

fn render(index: &VfsIndex) -> Vec<u8> {
    let mut writer = NinjaWriter::new(Vec::new());
    compiler().compile(index, &mut writer).unwrap();
    writer.into_inner().unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: The same index always renders the same bytes.
    #[test]
    fn property_compilation_is_deterministic(
        shapes in proptest::collection::vec(entry_shape(), 0..=24),
    ) {
        let index = build_index(&shapes);
        prop_assert_eq!(render(&index), render(&index));
    }

    /// PROPERTY: Exactly the eligible entries reach the aggregate, each once.
    #[test]
    fn property_aggregate_matches_eligible_entries(
        shapes in proptest::collection::vec(entry_shape(), 0..=24),
    ) {
        let index = build_index(&shapes);
        let mut writer = RecordingGraphWriter::new();
        let summary = compiler().compile(&index, &mut writer).unwrap();

        let eligible = shapes
            .iter()
            .filter(|s| !(s.encrypted || s.deleted || s.compressed))
            .count();
        let aggregate = writer.edge_for_output(AGGREGATE_TARGET).unwrap();

        prop_assert_eq!(summary.compiled, eligible);
        prop_assert_eq!(summary.skipped, shapes.len() - eligible);
        prop_assert_eq!(aggregate.inputs.len(), eligible);
        prop_assert_eq!(summary.edges, 2 * eligible + 3);
    }

    /// PROPERTY: Every extraction output is lowercase and rooted at the raw root.
    #[test]
    fn property_raw_outputs_are_normalized(
        shapes in proptest::collection::vec(entry_shape(), 1..=16),
    ) {
        let index = build_index(&shapes);
        let mut writer = RecordingGraphWriter::new();
        compiler().compile(&index, &mut writer).unwrap();

        for edge in writer.edges().filter(|e| e.rule.starts_with("extract_")) {
            let relative = edge.output().strip_prefix("$raw_output_root/").unwrap();
            prop_assert_eq!(relative.to_string(), relative.to_lowercase());
            prop_assert!(!relative.contains('\\'));
        }
    }
}
