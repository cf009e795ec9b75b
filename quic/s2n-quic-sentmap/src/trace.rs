// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Log statements are forwarded to `tracing` when the `sentmap-tracing` feature is enabled
//! and compiled out otherwise.

cfg_if::cfg_if! {
    if #[cfg(feature = "sentmap-tracing")] {
        #[doc(hidden)]
        pub use tracing::debug as _debug;
        #[doc(hidden)]
        pub use tracing::trace as _trace;
    } else {
        #[doc(hidden)]
        pub use crate::__tracing_noop__ as _debug;
        #[doc(hidden)]
        pub use crate::__tracing_noop__ as _trace;
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! __tracing_noop__ {
    ($($fmt:tt)*) => {};
}
