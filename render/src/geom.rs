pub mod vector;
pub mod aabb;
pub mod affine;
