//! Unit test module
//!
//! Handler tests live here, separate from source files, sharing the mocks in [`mock`].

mod mock;
mod typing_notifier_test;
