//! Deterministic backends for tests and tooling.

mod fixture_backend;

pub use fixture_backend::{stereo_movie_tracks, FixtureBackend};
