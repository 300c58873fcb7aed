//! Regrid provides the conservative interpolation ("prolongation")
//! operator used to transfer cell-centered data from a coarse grid patch
//! to a fine one at refinement boundaries of a block-structured AMR mesh
//! with a 2:1 refinement ratio, along with the equation-of-state value
//! objects consumed by the companion fluid solver. The interpolation is a
//! high-order tensor-product polynomial scheme with numerically verified
//! stencils; the host mesh framework owns the grid buffers and only hands
//! this crate index ranges and flat data.

pub mod coefficients;
pub mod eos;
pub mod index_space;
pub mod interp;
pub mod meshing;
pub mod num;
pub mod patch;
pub mod prolong;
