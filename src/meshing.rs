use rayon::prelude::*;
use crate::index_space::IndexSpace;
use crate::patch::Patch;
use crate::prolong;

/// The coarse-to-fine cell size ratio between adjacent refinement levels.
///
pub const REFINEMENT_RATIO: i64 = 2;

/// Return the coarse index space which must be allocated and filled so
/// that the given fine region can be prolongated safely: the coarsened
/// fine space grown by a stencil halo of `order / 2 + 1` cells in every
/// direction. The halo formula holds for even interpolation orders only.
///
pub fn required_coarse_space(fine: &IndexSpace, order: usize) -> IndexSpace {
    assert!(
        order % 2 == 0,
        "the stencil halo formula requires an even interpolation order, got {}",
        order);

    fine.coarsen_by(REFINEMENT_RATIO).extend_all((order / 2 + 1) as i64)
}

/// Prolongate a range of field components from a coarse patch onto a fine
/// patch. The requested fine region is intersected with the fine patch's
/// own index space; each component is processed independently and
/// identically. The coarse patch must cover the halo returned by
/// `required_coarse_space` for the target region.
///
pub fn interp(
    order: usize,
    coarse: &Patch,
    coarse_field: usize,
    fine: &mut Patch,
    fine_field: usize,
    num_fields: usize,
    fine_region: &IndexSpace)
{
    assert!(
        coarse.level() == fine.level() + 1,
        "prolongation steps down exactly one refinement level");
    assert!(coarse_field + num_fields <= coarse.num_fields());
    assert!(fine_field + num_fields <= fine.num_fields());

    let target = fine_region.intersect(&fine.index_space());
    let coarse_space = coarse.index_space();
    let fine_space = fine.index_space();

    assert!(
        coarse_space.contains_space(&required_coarse_space(&target, order)),
        "coarse patch does not cover the stencil halo of the target region");

    let chunk = fine.num_fields();
    let coarse_chunk = coarse.num_fields();

    for field in 0..num_fields {
        if chunk == coarse_chunk {
            prolong::prolongate(
                order,
                fine.data_mut(),
                &fine_space,
                &target,
                coarse.data(),
                &coarse_space,
                chunk,
                coarse_field + field,
                fine_field + field);
        } else {
            // Mismatched interleaving: extract the coarse component into a
            // planar scratch buffer first.
            let src: Vec<f64> = coarse
                .data()
                .chunks_exact(coarse_chunk)
                .map(|cell| cell[coarse_field + field])
                .collect();
            let mut dst = vec![0.0; fine_space.len()];
            prolong::prolongate(order, &mut dst, &fine_space, &target, &src, &coarse_space, 1, 0, 0);

            for index in target.iter() {
                fine.get_slice_mut(index)[fine_field + field] = dst[fine_space.memory_offset(index)];
            }
        }
    }
}

/// Allocate a fine patch covering the given index space (one level finer
/// than the coarse patch) and fill every component by prolongation.
///
pub fn prolongate_patch(order: usize, coarse: &Patch, fine_space: &IndexSpace) -> Patch {
    assert!(coarse.level() > 0, "there is no level finer than 0");

    let mut fine = Patch::zeros(coarse.level() - 1, coarse.num_fields(), fine_space.clone());
    interp(order, coarse, 0, &mut fine, 0, coarse.num_fields(), fine_space);
    fine
}

/// Prolongate a batch of independent (coarse patch, fine region) jobs in
/// parallel. Each job reads its own coarse halo and writes its own fine
/// patch, so the jobs share nothing but the read-only coefficient tables.
///
pub fn prolongate_patches(order: usize, jobs: &[(&Patch, IndexSpace)]) -> Vec<Patch> {
    jobs.par_iter()
        .map(|(coarse, fine_space)| prolongate_patch(order, coarse, fine_space))
        .collect()
}
