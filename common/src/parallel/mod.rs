//! Row-aligned parallel iteration over row-major image buffers.

use rayon::prelude::*;


/// Chunks handed out per worker thread, so uneven rows still balance.
const CHUNKS_PER_THREAD: usize = 3;

/// Rows per chunk for a buffer of `len` elements split into rows of `row_len`.
fn rows_per_chunk(len: usize, row_len: usize) -> usize {
    assert!(row_len > 0, "row length must be positive");
    let height = len / row_len;
    (height / (rayon::current_num_threads() * CHUNKS_PER_THREAD)).max(1)
}

/// Split a row-major buffer into mutable chunks of whole rows.
pub trait RowChunksMut<T: Send> {
    /// Parallel chunks of complete rows, each paired with the index of its
    /// first row. `row_len` is the element count of one row
    /// (`width * channels` for interleaved images).
    fn par_row_chunks_mut<'a>(
        &'a mut self,
        row_len: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, &'a mut [T])>
    where
        T: 'a;
}

impl<T: Send> RowChunksMut<T> for [T] {
    fn par_row_chunks_mut<'a>(
        &'a mut self,
        row_len: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, &'a mut [T])>
    where
        T: 'a,
    {
        let rows = rows_per_chunk(self.len(), row_len);
        self.par_chunks_mut(row_len * rows)
            .enumerate()
            .map(move |(i, chunk)| (i * rows, chunk))
    }
}

/// Pair two output buffers of the same layout for lock-step row iteration.
pub trait ZipRowsMut<'a, A: Send> {
    fn zip_rows<B: Send>(self, other: &'a mut [B]) -> ZippedRows<'a, A, B>;
}

impl<'a, A: Send> ZipRowsMut<'a, A> for &'a mut [A] {
    fn zip_rows<B: Send>(self, other: &'a mut [B]) -> ZippedRows<'a, A, B> {
        ZippedRows { a: self, b: other }
    }
}

/// Two equally sized row-major buffers walked together.
pub struct ZippedRows<'a, A, B> {
    a: &'a mut [A],
    b: &'a mut [B],
}

impl<'a, A: Send, B: Send> ZippedRows<'a, A, B> {
    /// Like [`RowChunksMut::par_row_chunks_mut`], yielding the matching
    /// chunk of both buffers.
    ///
    /// Panics if the buffers differ in length.
    pub fn par_row_chunks_mut(
        self,
        row_len: usize,
    ) -> impl IndexedParallelIterator<Item = (usize, (&'a mut [A], &'a mut [B]))> {
        assert_eq!(
            self.a.len(),
            self.b.len(),
            "zipped buffers must have equal length"
        );
        let rows = rows_per_chunk(self.a.len(), row_len);
        let chunk_len = row_len * rows;
        self.a
            .par_chunks_mut(chunk_len)
            .zip(self.b.par_chunks_mut(chunk_len))
            .enumerate()
            .map(move |(i, pair)| (i * rows, pair))
    }
}
