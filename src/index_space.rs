use core::ops::Range;




/**
 * Identifier for a Cartesian axis
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    I,
    J,
    K,
}




/**
 * Represents a rectangular region in a 3D discrete index space. The index
 * type is signed 64-bit integer and each axis is a half-open range. Index
 * spaces have positive volume by construction: empty regions indicate a
 * meshing error upstream and are rejected.
 */
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexSpace {
    di: Range<i64>,
    dj: Range<i64>,
    dk: Range<i64>,
}




// ============================================================================
impl IndexSpace {


    pub fn new(di: Range<i64>, dj: Range<i64>, dk: Range<i64>) -> Self {

        assert!(
            di.start < di.end && dj.start < dj.end && dk.start < dk.end,
            "index space has non-positive volume ({}..{} {}..{} {}..{})",
            di.start, di.end, dj.start, dj.end, dk.start, dk.end);

        Self { di, dj, dk }
    }


    /**
     * Return the number of indexes on each axis.
     */
    pub fn dim(&self) -> (usize, usize, usize) {
        ((self.di.end - self.di.start) as usize,
         (self.dj.end - self.dj.start) as usize,
         (self.dk.end - self.dk.start) as usize)
    }


    /**
     * Return the number of elements in this index space.
     */
    pub fn len(&self) -> usize {
        let (l, m, n) = self.dim();
        l * m * n
    }


    /**
     * Return the minimum index (inclusive).
     */
    pub fn start(&self) -> (i64, i64, i64) {
        (self.di.start, self.dj.start, self.dk.start)
    }


    /**
     * Return the maximum index (exclusive).
     */
    pub fn end(&self) -> (i64, i64, i64) {
        (self.di.end, self.dj.end, self.dk.end)
    }


    /**
     * Determine whether this index space contains the given index.
     */
    pub fn contains(&self, index: (i64, i64, i64)) -> bool {
        self.di.contains(&index.0) && self.dj.contains(&index.1) && self.dk.contains(&index.2)
    }


    /**
     * Determine whether another index space is a subset of this one.
     */
    pub fn contains_space(&self, other: &Self) -> bool {
        other.di.start >= self.di.start && other.di.end <= self.di.end &&
        other.dj.start >= self.dj.start && other.dj.end <= self.dj.end &&
        other.dk.start >= self.dk.start && other.dk.end <= self.dk.end
    }


    /**
     * Expand this index space by the given number of elements on each axis.
     */
    pub fn extend_all(&self, delta: i64) -> Self {
        Self::new(
            self.di.start - delta .. self.di.end + delta,
            self.dj.start - delta .. self.dj.end + delta,
            self.dk.start - delta .. self.dk.end + delta)
    }


    /**
     * Trim this index space by the given number of elements on each axis.
     */
    pub fn trim_all(&self, delta: i64) -> Self {
        self.extend_all(-delta)
    }


    /**
     * Shift this index space by the given amount on the given axis.
     */
    pub fn translate(&self, delta: i64, axis: Axis) -> Self {
        match axis {
            Axis::I => Self::new(self.di.start + delta .. self.di.end + delta, self.dj.clone(), self.dk.clone()),
            Axis::J => Self::new(self.di.clone(), self.dj.start + delta .. self.dj.end + delta, self.dk.clone()),
            Axis::K => Self::new(self.di.clone(), self.dj.clone(), self.dk.start + delta .. self.dk.end + delta),
        }
    }


    /**
     * Return the smallest index space at the next coarser granularity
     * covering this one. Both bounds are floored, so the coarse parent of
     * index n is floor(n / factor) for negative indexes too.
     */
    pub fn coarsen_by(&self, factor: i64) -> Self {
        let coarsen = |r: &Range<i64>| {
            r.start.div_euclid(factor) .. (r.end - 1).div_euclid(factor) + 1
        };
        Self::new(coarsen(&self.di), coarsen(&self.dj), coarsen(&self.dk))
    }


    /**
     * Return this index space refined by the given factor.
     */
    pub fn refine_by(&self, factor: i64) -> Self {
        Self::new(
            self.di.start * factor .. self.di.end * factor,
            self.dj.start * factor .. self.dj.end * factor,
            self.dk.start * factor .. self.dk.end * factor)
    }


    /**
     * Return the intersection of this index space with another one. The
     * intersection must be non-empty.
     */
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            self.di.start.max(other.di.start) .. self.di.end.min(other.di.end),
            self.dj.start.max(other.dj.start) .. self.dj.end.min(other.dj.end),
            self.dk.start.max(other.dk.start) .. self.dk.end.min(other.dk.end))
    }


    /**
     * Return the linear offset for the given index, in a memory buffer
     * aligned with the start of this index space. The i index increases
     * fastest in memory, then j, then k.
     */
    pub fn memory_offset(&self, index: (i64, i64, i64)) -> usize {
        let i = (index.0 - self.di.start) as usize;
        let j = (index.1 - self.dj.start) as usize;
        let k = (index.2 - self.dk.start) as usize;
        linear_index(i, j, k, self.dim(), self.dim())
    }


    /**
     * Return an iterator which traverses the index space in memory order
     * (the first index increases fastest).
     */
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, i64)> + '_ {
        self.dk.clone().flat_map(move |k| {
            self.dj.clone().flat_map(move |j| {
                self.di.clone().map(move |i| (i, j, k))
            })
        })
    }
}




// ============================================================================
impl From<(Range<i64>, Range<i64>, Range<i64>)> for IndexSpace {
    fn from(range: (Range<i64>, Range<i64>, Range<i64>)) -> Self {
        Self::new(range.0, range.1, range.2)
    }
}

impl From<IndexSpace> for (Range<i64>, Range<i64>, Range<i64>) {
    fn from(space: IndexSpace) -> Self {
        (space.di, space.dj, space.dk)
    }
}




/**
 * Less imposing factory function to construct an IndexSpace object.
 */
pub fn range3d(di: Range<i64>, dj: Range<i64>, dk: Range<i64>) -> IndexSpace {
    IndexSpace::new(di, dj, dk)
}




/**
 * Return the linear offset of the element (i, j, k) in a flat buffer whose
 * allocated (padded) extent is `padext`. The padded extent may exceed the
 * valid extent `ext`; indexes are asserted against the valid extent in
 * debug builds only.
 */
#[inline]
pub fn linear_index(
    i: usize,
    j: usize,
    k: usize,
    padext: (usize, usize, usize),
    ext: (usize, usize, usize)) -> usize
{
    debug_assert!(i < ext.0, "index i={} outside valid extent {}", i, ext.0);
    debug_assert!(j < ext.1, "index j={} outside valid extent {}", j, ext.1);
    debug_assert!(k < ext.2, "index k={} outside valid extent {}", k, ext.2);

    i + padext.0 * (j + padext.1 * k)
}




/**
 * This is an access pattern iterator for a 3D hyperslab selection. The
 * selection starts at `start` (measured in elements from the buffer
 * origin), spans `count` elements on each axis out of a buffer with
 * allocated shape `shape`, and yields one chunk of `chunk` scalars per
 * element, in memory order.
 */
pub fn iter_slice_3d<'a>(
    slice: &'a [f64],
    start: (usize, usize, usize),
    count: (usize, usize, usize),
    shape: (usize, usize, usize),
    chunk: usize) -> impl Iterator<Item = &'a [f64]>
{
    assert!(slice.len() == shape.0 * shape.1 * shape.2 * chunk);

    let s = chunk;
    let r = shape.0 * s;
    let q = shape.1 * r;

    slice[start.2 * q .. (start.2 + count.2) * q]
    .chunks_exact(q).flat_map(move |k| k[start.1 * r .. (start.1 + count.1) * r]
    .chunks_exact(r).flat_map(move |j| j[start.0 * s .. (start.0 + count.0) * s]
    .chunks_exact(s)))
}
