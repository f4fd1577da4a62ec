pub mod fakes;

pub use fakes::*;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Generate `size` bytes of pseudo-random data from a fixed seed
pub fn random_payload(size: usize, seed: u64) -> Vec<u8> {
    use rand::{rngs::StdRng, RngCore, SeedableRng};

    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; size];
    rng.fill_bytes(&mut data);
    data
}
