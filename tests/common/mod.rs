// Common test utilities and fixtures

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fake_meili::FakeMeili;
#[allow(unused_imports)]
pub use fixtures::ContentTree;
#[allow(unused_imports)]
pub use helpers::{
    assert_sequential_ids, clear_api_key, create_test_services, meili_config, set_api_key,
    TEST_API_KEY,
};
