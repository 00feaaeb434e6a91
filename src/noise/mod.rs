/// Seeded 2D simplex noise.
pub mod simplex;
