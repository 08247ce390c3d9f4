/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use capsync::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists distinguishes directories
#[test]
fn test_dir_exists_withExistingDir_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));

    Ok(())
}

/// Test that generate_output_path creates the correct paths
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/talk.json");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, None, "srt"),
        Path::new("/tmp/output/talk.srt")
    );
    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, Some("captions"), "json"),
        Path::new("/tmp/output/talk.captions.json")
    );
}

/// Test writing creates missing parent directories
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.srt");

    FileManager::write_to_file(&path, "content")?;

    assert_eq!(FileManager::read_to_string(&path)?, "content");

    Ok(())
}

/// Test transcript discovery skips generated bundles and other files
#[test]
fn test_find_transcript_files_withMixedFolder_shouldReturnTranscriptsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("nested");
    FileManager::ensure_dir(&nested)?;

    common::create_test_transcript(temp_dir.path(), "b.json")?;
    common::create_test_transcript(&nested, "a.json")?;
    common::create_test_file(temp_dir.path(), "b.captions.json", "{}")?;
    common::create_test_subtitle(temp_dir.path(), "b.srt")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "x")?;

    let files = FileManager::find_transcript_files(temp_dir.path())?;

    let names: Vec<String> = files
        .iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .collect();
    assert_eq!(files.len(), 2);
    assert!(names.contains(&"a.json".to_string()));
    assert!(names.contains(&"b.json".to_string()));

    Ok(())
}

/// Test file type detection by extension and by content
#[test]
fn test_detect_file_type_withVariousFiles_shouldClassify() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let json = common::create_test_transcript(temp_dir.path(), "t.json")?;
    let srt = common::create_test_subtitle(temp_dir.path(), "s.srt")?;
    let json_no_ext = common::create_test_file(temp_dir.path(), "transcript", common::SAMPLE_TRANSCRIPT_JSON)?;
    let srt_no_ext = common::create_test_subtitle(temp_dir.path(), "subs.txt")?;
    let other = common::create_test_file(temp_dir.path(), "readme.txt", "hello")?;

    assert_eq!(FileManager::detect_file_type(&json)?, FileType::Transcript);
    assert_eq!(FileManager::detect_file_type(&srt)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&json_no_ext)?, FileType::Transcript);
    assert_eq!(FileManager::detect_file_type(&srt_no_ext)?, FileType::Subtitle);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.srt")).is_err());

    Ok(())
}
