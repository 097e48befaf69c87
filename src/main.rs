//! # Voxel Terrain Entry Point
//!
//! Calls into the library's `run()`, which walks a viewer across generated terrain
//! without a window.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    voxel_terrain::run();
}
