//! Generate Use Case Tests

use super::*;
use crate::config::Config;
use crate::domain::entities::{Entry, VfsIndex};
use crate::domain::ports::{CompileEvent, CompileEventSink, IndexError, IndexReader};
use crate::error::PortshipError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

// Mock implementations for testing

struct StaticIndexReader {
    index: VfsIndex,
}

impl IndexReader for StaticIndexReader {
    fn read_index(&self, _path: &Path) -> Result<VfsIndex, IndexError> {
        Ok(self.index.clone())
    }
}

struct FailingIndexReader;

impl IndexReader for FailingIndexReader {
    fn read_index(&self, path: &Path) -> Result<VfsIndex, IndexError> {
        Err(IndexError::Decode {
            path: path.to_path_buf(),
            message: "truncated".to_string(),
        })
    }
}

#[derive(Default)]
struct CountingSink {
    events: Mutex<Vec<CompileEvent>>,
}

impl CompileEventSink for CountingSink {
    fn on_event(&self, event: CompileEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn sample_index() -> VfsIndex {
    VfsIndex::new("/games/rose", "/games/rose/data.idx")
        .with_entry("wall", Entry::new("Textures\\Wall.DDS", "DATA.VFS").with_range(0, 64))
        .with_entry("list", Entry::new("List.XML", "ROOT.VFS"))
}

fn config() -> Config {
    let mut config = Config::default();
    config.paths.tool_source_root = Some("/opt/portship/tools".to_string());
    config
}

fn use_case() -> GenerateUseCase<StaticIndexReader> {
    GenerateUseCase::new(
        StaticIndexReader {
            index: sample_index(),
        },
        config(),
    )
}

#[test]
fn writes_build_file_into_dest() {
    let dir = tempdir().unwrap();
    let options = GenerateOptions::new("data.idx").with_dest(dir.path());

    let result = use_case().execute(&options).unwrap();

    assert_eq!(result.output, dir.path().join("build.ninja"));
    assert_eq!(result.status, WriteStatus::Written);
    assert_eq!(result.summary.compiled, 2);

    let content = fs::read_to_string(&result.output).unwrap();
    assert!(content.starts_with("#\n# Generated by Portship\n"));
    assert!(content.contains("build $raw_output_root/textures/wall.dds: extract_archive"));
    assert!(content.ends_with(
        "build raw_assets: phony $raw_output_root/textures/wall.dds $raw_output_root/list.xml\n"
    ));
}

#[test]
fn unchanged_content_is_not_rewritten() {
    let dir = tempdir().unwrap();
    let options = GenerateOptions::new("data.idx").with_dest(dir.path());
    let use_case = use_case();

    let first = use_case.execute(&options).unwrap();
    let second = use_case.execute(&options).unwrap();

    assert_eq!(first.status, WriteStatus::Written);
    assert_eq!(second.status, WriteStatus::Unchanged);
    assert_eq!(first.hash, second.hash);
    assert!(!second.has_changes());
}

#[test]
fn force_rewrites_unchanged_content() {
    let dir = tempdir().unwrap();
    let options = GenerateOptions::new("data.idx").with_dest(dir.path());
    let use_case = use_case();

    use_case.execute(&options).unwrap();
    let forced = use_case.execute(&options.clone().with_force(true)).unwrap();

    assert_eq!(forced.status, WriteStatus::Written);
}

#[test]
fn changed_content_is_rewritten() {
    let dir = tempdir().unwrap();
    let options = GenerateOptions::new("data.idx").with_dest(dir.path());
    fs::write(dir.path().join("build.ninja"), "stale").unwrap();

    let result = use_case().execute(&options).unwrap();

    assert_eq!(result.status, WriteStatus::Written);
    assert_ne!(fs::read_to_string(&result.output).unwrap(), "stale");
}

#[test]
fn configured_file_name_is_used() {
    let dir = tempdir().unwrap();
    let mut config = config();
    config.ninja.file_name = "assets.ninja".to_string();
    let use_case = GenerateUseCase::new(
        StaticIndexReader {
            index: sample_index(),
        },
        config,
    );

    let result = use_case
        .execute(&GenerateOptions::new("data.idx").with_dest(dir.path()))
        .unwrap();

    assert_eq!(result.output, dir.path().join("assets.ninja"));
}

#[test]
fn duplicate_outputs_leave_existing_file_untouched() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("build.ninja"), "previous").unwrap();
    let index = VfsIndex::new("/games/rose", "/games/rose/data.idx")
        .with_entry("a", Entry::new("A.DDS", "DATA.VFS"))
        .with_entry("b", Entry::new("a.dds", "DATA.VFS"));
    let use_case = GenerateUseCase::new(StaticIndexReader { index }, config());

    let err = use_case
        .execute(&GenerateOptions::new("data.idx").with_dest(dir.path()))
        .unwrap_err();

    assert!(matches!(err, PortshipError::Compile(_)));
    assert_eq!(
        fs::read_to_string(dir.path().join("build.ninja")).unwrap(),
        "previous"
    );
}

#[test]
fn index_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    let use_case = GenerateUseCase::new(FailingIndexReader, config());

    let err = use_case
        .execute(&GenerateOptions::new("data.idx").with_dest(dir.path()))
        .unwrap_err();

    assert!(matches!(err, PortshipError::Index(_)));
    assert!(!dir.path().join("build.ninja").exists());
}

#[test]
fn invalid_config_is_rejected_before_reading() {
    let dir = tempdir().unwrap();
    let mut config = config();
    config.ninja.line_width = 1;
    let use_case = GenerateUseCase::new(FailingIndexReader, config);

    let err = use_case
        .execute(&GenerateOptions::new("data.idx").with_dest(dir.path()))
        .unwrap_err();

    assert!(matches!(err, PortshipError::InvalidSetting { .. }));
}

#[test]
fn events_are_forwarded() {
    let dir = tempdir().unwrap();
    let sink = Arc::new(CountingSink::default());

    use_case()
        .execute_with_events(
            &GenerateOptions::new("data.idx").with_dest(dir.path()),
            sink.clone(),
        )
        .unwrap();

    let events = sink.events.lock().unwrap();
    assert!(matches!(events.first(), Some(CompileEvent::Started { .. })));
    assert!(matches!(
        events.last(),
        Some(CompileEvent::Completed {
            compiled: 2,
            skipped: 0
        })
    ));
}

#[test]
fn missing_dest_directory_is_created() {
    let dir = tempdir().unwrap();
    let dest: PathBuf = dir.path().join("out/ninja");

    let result = use_case()
        .execute(&GenerateOptions::new("data.idx").with_dest(&dest))
        .unwrap();

    assert!(result.output.exists());
}
