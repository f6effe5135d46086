use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::TempDir;

use exascan::collection::VectorCollection;
use exascan::error::{ExascanError, Result};
use exascan::util::simd;

#[test]
fn load_normalizes_every_row_to_unit_length() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vector_file(
        dir.path(),
        "sample.vec",
        &[3.0, 4.0, 0.0, -2.0, 0.0, 0.5, 10.0, 10.0, 10.0],
    )?;

    let collection = VectorCollection::load(&path, 3)?;

    assert_eq!(collection.len(), 3);
    assert_eq!(collection.dimension(), 3);
    for id in 0..collection.len() {
        let norm = simd::l2_norm(collection.row(id));
        assert!(
            (norm - 1.0).abs() < 1e-5,
            "row {id} has norm {norm} after load"
        );
    }
    Ok(())
}

#[test]
fn load_preserves_row_major_order() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vector_file(dir.path(), "rows.vec", &[1.0, 0.0, 0.0, 2.0])?;

    let collection = VectorCollection::load(&path, 2)?;

    // Row 0 points along the first axis, row 1 along the second.
    assert_eq!(collection.row(0), &[1.0, 0.0]);
    assert_eq!(collection.row(1), &[0.0, 1.0]);
    Ok(())
}

#[test]
fn load_derives_count_from_file_size() -> Result<()> {
    let dir = TempDir::new()?;
    let values: Vec<f32> = (0..40).map(|i| i as f32 + 1.0).collect();
    let path = write_vector_file(dir.path(), "forty.vec", &values)?;

    assert_eq!(VectorCollection::load(&path, 8)?.len(), 5);
    assert_eq!(VectorCollection::load(&path, 40)?.len(), 1);
    Ok(())
}

#[test]
fn load_rejects_truncated_file() -> Result<()> {
    let dir = TempDir::new()?;
    // 7 floats cannot tile a dimension of 4.
    let path = write_vector_file(dir.path(), "truncated.vec", &[1.0; 7])?;

    let result = VectorCollection::load(&path, 4);
    assert!(matches!(result, Err(ExascanError::Data(_))));
    Ok(())
}

#[test]
fn load_rejects_odd_byte_length() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("ragged.vec");
    let mut file = File::create(&path)?;
    file.write_all(&[0u8; 10])?; // not a multiple of 4 * dimension

    let result = VectorCollection::load(&path, 2);
    assert!(matches!(result, Err(ExascanError::Data(_))));
    Ok(())
}

#[test]
fn load_rejects_zero_norm_row() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vector_file(dir.path(), "zeros.vec", &[1.0, 2.0, 0.0, 0.0, 5.0, 6.0])?;

    let result = VectorCollection::load(&path, 2);
    match result {
        Err(ExascanError::Data(msg)) => assert!(msg.contains("row 1"), "message: {msg}"),
        other => panic!("expected data error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn load_rejects_missing_file() {
    let result = VectorCollection::load("/nonexistent/missing.vec", 4);
    assert!(matches!(result, Err(ExascanError::Data(_))));
}

#[test]
fn load_names_collection_after_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_vector_file(dir.path(), "articles.vec", &[1.0, 0.0])?;

    let collection = VectorCollection::load(&path, 2)?;
    assert_eq!(collection.name(), "articles");
    Ok(())
}

fn write_vector_file(dir: &Path, name: &str, values: &[f32]) -> std::io::Result<PathBuf> {
    let path = dir.join(name);
    let mut file = File::create(&path)?;
    for &value in values {
        file.write_f32::<LittleEndian>(value)?;
    }
    file.flush()?;
    Ok(path)
}
