//! Data-parallel dispatch over the particle array.
//!
//! Each pass is one dispatch: every output index is computed independently by
//! a pure kernel reading only the frozen prior buffer. With the `parallel`
//! feature the dispatch fans out over a rayon pool; otherwise it is a serial
//! indexed loop. The bounds are identical either way, so enabling the feature
//! cannot change what compiles.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Fill `write` by evaluating `kernel` at every index.
#[cfg(feature = "parallel")]
pub fn fill<T, K>(write: &mut [T], kernel: K)
where
    T: Send,
    K: Fn(usize) -> T + Sync,
{
    write
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = kernel(i));
}

/// Fill `write` by evaluating `kernel` at every index.
#[cfg(not(feature = "parallel"))]
pub fn fill<T, K>(write: &mut [T], kernel: K)
where
    T: Send,
    K: Fn(usize) -> T + Sync,
{
    for (i, slot) in write.iter_mut().enumerate() {
        *slot = kernel(i);
    }
}
