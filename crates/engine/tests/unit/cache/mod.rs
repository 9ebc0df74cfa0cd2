//! Cache engine tests.
