//! Row-parallel execution helpers.
//!
//! Every output row (or sample) is a pure function of read-only inputs, so
//! rows are handed to Rayon workers with no synchronization beyond the final
//! join. Each worker writes only into the rows it was given.
//!
//! Without the `parallel` feature the same helpers run sequentially and
//! produce identical results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(row_index, row)` for every `row_len`-sized chunk of `dst`.
///
/// # Example
///
/// ```rust
/// use hiboost_ops::parallel::for_each_row;
///
/// let mut dst = vec![0.0f32; 4 * 3];
/// for_each_row(&mut dst, 3, |y, row| row.fill(y as f32));
/// assert_eq!(&dst[9..], &[3.0, 3.0, 3.0]);
/// ```
pub fn for_each_row<F>(dst: &mut [f32], row_len: usize, f: F)
where
    F: Fn(usize, &mut [f32]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, row)| f(y, row));
}

/// Elementwise `f(a[i])` into a new vector.
pub fn map<F>(a: &[f32], f: F) -> Vec<f32>
where
    F: Fn(f32) -> f32 + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        a.par_iter().map(|&x| f(x)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        a.iter().map(|&x| f(x)).collect()
    }
}

/// Elementwise `f(a[i], b[i])` into a new vector.
///
/// Callers check that both slices have the same length.
pub fn zip_map<F>(a: &[f32], b: &[f32], f: F) -> Vec<f32>
where
    F: Fn(f32, f32) -> f32 + Sync + Send,
{
    debug_assert_eq!(a.len(), b.len());

    #[cfg(feature = "parallel")]
    {
        a.par_iter().zip(b.par_iter()).map(|(&x, &y)| f(x, y)).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_each_row_indices() {
        let mut dst = vec![0.0f32; 100 * 7];
        for_each_row(&mut dst, 7, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = (y * 7 + x) as f32;
            }
        });
        for (i, v) in dst.iter().enumerate() {
            assert_eq!(*v, i as f32);
        }
    }

    #[test]
    fn test_zero_row_len() {
        let mut dst: Vec<f32> = Vec::new();
        for_each_row(&mut dst, 0, |_, _| panic!("no rows expected"));
    }

    #[test]
    fn test_map_preserves_order() {
        let a: Vec<f32> = (0..10_000).map(|i| i as f32).collect();
        let b = vec![1.0f32; 10_000];
        let sum = zip_map(&a, &b, |x, y| x + y);
        let doubled = map(&a, |x| x * 2.0);
        for i in 0..10_000 {
            assert_eq!(sum[i], i as f32 + 1.0);
            assert_eq!(doubled[i], i as f32 * 2.0);
        }
    }
}
