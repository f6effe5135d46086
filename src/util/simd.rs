//! SIMD-accelerated float kernels for the scan path.
//!
//! These process 8 values at a time using `wide::f32x8`, with a scalar
//! fallback for short slices and for the tail of longer ones.

use wide::f32x8;

/// SIMD-accelerated inner product of two equal-length slices.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());

    if a.len() < 8 {
        return a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    }

    let mut acc = f32x8::splat(0.0);

    let chunks_a = a.chunks_exact(8);
    let chunks_b = b.chunks_exact(8);
    let remainder_a = chunks_a.remainder();
    let remainder_b = chunks_b.remainder();

    for (chunk_a, chunk_b) in chunks_a.zip(chunks_b) {
        let arr_a: [f32; 8] = chunk_a.try_into().unwrap();
        let arr_b: [f32; 8] = chunk_b.try_into().unwrap();
        let va = f32x8::new(arr_a);
        let vb = f32x8::new(arr_b);
        acc = acc + va * vb;
    }

    let mut total = acc.to_array().iter().sum::<f32>();
    total += remainder_a
        .iter()
        .zip(remainder_b.iter())
        .map(|(x, y)| x * y)
        .sum::<f32>();

    total
}

/// L2 norm (Euclidean length) of a slice.
pub fn l2_norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}

/// Scale a vector to unit L2 norm in place.
///
/// Returns `false` without modifying the slice when the norm is zero.
pub fn l2_normalize(v: &mut [f32]) -> bool {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return false;
    }
    for value in v.iter_mut() {
        *value /= norm;
    }
    true
}
