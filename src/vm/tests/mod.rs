//! VM module tests
