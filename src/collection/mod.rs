//! In-memory vector collections.
//!
//! A collection is an immutable, row-major matrix of unit-normalized
//! embedding vectors. Collections are built once at startup, either from a
//! raw packed float file or from an in-memory buffer, and are read-only
//! scan targets afterward; there is no mutation API.

pub mod registry;

use std::fs::File;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};
use memmap2::Mmap;
use rayon::prelude::*;

use crate::error::{ExascanError, Result};
use crate::util::simd;

/// Bytes per stored component (IEEE-754 f32).
const BYTES_PER_COMPONENT: usize = 4;

/// An immutable, normalized, row-major matrix of embedding vectors.
///
/// Row `i` occupies `data[i * dimension .. (i + 1) * dimension]`. Every row
/// has unit L2 norm; normalization happens exactly once at construction.
#[derive(Debug, Clone)]
pub struct VectorCollection {
    name: String,
    dimension: usize,
    count: usize,
    data: Box<[f32]>,
}

impl VectorCollection {
    /// Build a collection from an in-memory buffer of row-major floats.
    ///
    /// The buffer length must be an exact multiple of `dimension`, and no
    /// row may have zero norm; either case is a fatal data error.
    pub fn from_vectors(
        name: impl Into<String>,
        dimension: usize,
        mut data: Vec<f32>,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(ExascanError::invalid_parameter(
                "vector dimension must be greater than zero",
            ));
        }
        if data.len() % dimension != 0 {
            return Err(ExascanError::data(format!(
                "buffer of {} values is not a multiple of dimension {dimension}",
                data.len()
            )));
        }

        let count = data.len() / dimension;

        // One-time normalization pass, parallel across rows.
        data.par_chunks_mut(dimension)
            .enumerate()
            .try_for_each(|(row, chunk)| {
                if simd::l2_normalize(chunk) {
                    Ok(())
                } else {
                    Err(ExascanError::data(format!(
                        "row {row} has zero norm and cannot be normalized"
                    )))
                }
            })?;

        Ok(Self {
            name: name.into(),
            dimension,
            count,
            data: data.into_boxed_slice(),
        })
    }

    /// Load a collection from a headerless file of packed little-endian
    /// f32 values, row-major, `dimension` values per row.
    ///
    /// The vector count is derived from the file size; a size that is not
    /// an exact multiple of `dimension * 4` bytes is a fatal data error.
    /// The collection is named after the file, with any `.vec` suffix
    /// stripped.
    pub fn load(path: impl AsRef<Path>, dimension: usize) -> Result<Self> {
        let path = path.as_ref();
        let name = collection_name(path);

        let file = File::open(path)
            .map_err(|e| ExascanError::data(format!("cannot open {}: {e}", path.display())))?;
        let mmap = unsafe {
            Mmap::map(&file)
                .map_err(|e| ExascanError::data(format!("cannot map {}: {e}", path.display())))?
        };

        let bytes_per_row = dimension
            .checked_mul(BYTES_PER_COMPONENT)
            .ok_or_else(|| ExascanError::invalid_parameter("vector dimension is too large"))?;
        if bytes_per_row == 0 {
            return Err(ExascanError::invalid_parameter(
                "vector dimension must be greater than zero",
            ));
        }
        if mmap.len() % bytes_per_row != 0 {
            return Err(ExascanError::data(format!(
                "{}: file size {} is not a multiple of the {bytes_per_row}-byte vector size",
                path.display(),
                mmap.len()
            )));
        }

        let mut data = vec![0.0f32; mmap.len() / BYTES_PER_COMPONENT];
        LittleEndian::read_f32_into(&mmap[..], &mut data);

        Self::from_vectors(name, dimension, data)
    }

    /// Collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dimensionality of every vector in this collection.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of vectors.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether the collection holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Row `id` as a slice of `dimension` floats.
    ///
    /// # Panics
    ///
    /// Panics if `id >= len()`.
    pub fn row(&self, id: usize) -> &[f32] {
        &self.data[id * self.dimension..(id + 1) * self.dimension]
    }
}

/// Derive a collection name from a file path: the file name with everything
/// from the first `.vec` onward removed.
fn collection_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    match file_name.find(".vec") {
        Some(pos) => file_name[..pos].to_string(),
        None => file_name,
    }
}
