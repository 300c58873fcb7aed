use crate::index_space::{iter_slice_3d, IndexSpace};




/**
 * A patch maps a rectangular 3D index space at a given refinement level to
 * associated field values. The mapping is backed by a flat array of data
 * with the fields of one cell stored contiguously; cells are laid out in
 * memory order (the i index increases fastest). Smaller levels are finer:
 * a cell at level l covers 2^l ticks of the finest index space per axis.
 */
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Patch {
    level: u32,
    space: IndexSpace,
    num_fields: usize,
    data: Vec<f64>,
}




// ============================================================================
impl Patch {


    /**
     * Generate a patch at a given level, covering the given index space,
     * with all field values zeroed.
     */
    pub fn zeros(level: u32, num_fields: usize, space: IndexSpace) -> Self {
        let data = vec![0.0; space.len() * num_fields];
        Self { level, space, num_fields, data }
    }


    /**
     * Generate a patch at a given level, covering the given index space,
     * with field values written by a closure receiving each cell index and
     * the mutable slice of that cell's fields.
     */
    pub fn from_slice_function<F>(level: u32, num_fields: usize, space: IndexSpace, f: F) -> Self
    where
        F: Fn((i64, i64, i64), &mut [f64])
    {
        let mut patch = Self::zeros(level, num_fields, space);
        for (index, slice) in patch.space.iter().zip(patch.data.chunks_exact_mut(num_fields)) {
            f(index, slice)
        }
        patch
    }


    /**
     * Generate a single-field patch from a scalar function of the cell
     * index.
     */
    pub fn from_function<F>(level: u32, space: IndexSpace, f: F) -> Self
    where
        F: Fn(i64, i64, i64) -> f64
    {
        Self::from_slice_function(level, 1, space, |(i, j, k), s| s[0] = f(i, j, k))
    }


    pub fn level(&self) -> u32 {
        self.level
    }


    pub fn num_fields(&self) -> usize {
        self.num_fields
    }


    pub fn index_space(&self) -> IndexSpace {
        self.space.clone()
    }


    pub fn data(&self) -> &[f64] {
        &self.data
    }


    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }


    /**
     * Return the field values at the given cell index.
     */
    pub fn get_slice(&self, index: (i64, i64, i64)) -> &[f64] {
        self.validate_index(index);
        let n = self.space.memory_offset(index) * self.num_fields;
        &self.data[n .. n + self.num_fields]
    }


    pub fn get_slice_mut(&mut self, index: (i64, i64, i64)) -> &mut [f64] {
        self.validate_index(index);
        let n = self.space.memory_offset(index) * self.num_fields;
        &mut self.data[n .. n + self.num_fields]
    }


    /**
     * Return a new patch covering the given subset of this patch's index
     * space, with the field data copied out.
     */
    pub fn extract(&self, subspace: IndexSpace) -> Self {
        assert!(
            self.space.contains_space(&subspace),
            "extracted region escapes the patch");

        let (i0, j0, k0) = self.space.start();
        let (i1, j1, k1) = subspace.start();
        let start = ((i1 - i0) as usize, (j1 - j0) as usize, (k1 - k0) as usize);

        let mut data = Vec::with_capacity(subspace.len() * self.num_fields);
        for cell in iter_slice_3d(&self.data, start, subspace.dim(), self.space.dim(), self.num_fields) {
            data.extend_from_slice(cell)
        }
        Self {
            level: self.level,
            space: subspace,
            num_fields: self.num_fields,
            data,
        }
    }

    fn validate_index(&self, index: (i64, i64, i64)) {
        if !self.space.contains(index) {
            panic!("index ({} {} {}) out of range on patch ({:?})",
                index.0,
                index.1,
                index.2,
                self.space);
        }
    }
}




// ============================================================================
#[cfg(test)]
mod test {

    use crate::index_space::range3d;
    use super::Patch;

    #[test]
    fn patch_indexing_works() {
        let patch = Patch::from_function(1, range3d(4..10, 4..10, 4..10), |i, j, k| (i + j + k) as f64);
        assert_eq!(patch.get_slice((5, 5, 5)), &[15.0]);
        assert_eq!(patch.get_slice((9, 4, 8)), &[21.0]);
        assert_eq!(patch.num_fields(), 1);
        assert_eq!(patch.data().len(), 216);
    }

    #[test]
    fn patch_fields_are_interleaved() {
        let patch = Patch::from_slice_function(0, 2, range3d(0..2, 0..2, 0..2), |(i, j, k), s| {
            s[0] = i as f64;
            s[1] = (j + k) as f64;
        });
        assert_eq!(patch.get_slice((1, 0, 1)), &[1.0, 1.0]);
        assert_eq!(patch.data()[0..2], [0.0, 0.0]);
        assert_eq!(patch.data()[2..4], [1.0, 0.0]);
    }

    #[test]
    fn extraction_copies_the_selected_region() {
        let patch = Patch::from_function(2, range3d(0..6, 0..6, 0..6), |i, j, k| (i * 100 + j * 10 + k) as f64);
        let sub = patch.extract(range3d(2..4, 1..5, 0..6));
        assert_eq!(sub.index_space(), range3d(2..4, 1..5, 0..6));
        assert_eq!(sub.level(), 2);
        for index in sub.index_space().iter() {
            assert_eq!(sub.get_slice(index), patch.get_slice(index));
        }
    }

    #[test]
    #[should_panic]
    fn out_of_range_indexing_panics() {
        let patch = Patch::zeros(0, 1, range3d(0..4, 0..4, 0..4));
        patch.get_slice((4, 0, 0));
    }
}
