// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Bookkeeping for packets that were sent but not yet acknowledged, declared lost or expired.
//!
//! The send path records what went on the wire through the [`sentmap::SentMap`] transaction
//! API and the loss recovery path later resolves those records through a
//! [`sentmap::Cursor`], notifying the owner of every frame that was carried.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unused_must_use)]

extern crate alloc;

pub mod error;
pub mod frame;
pub mod packet;
pub mod sentmap;
pub mod stream;
pub mod time;
mod trace;

pub use error::Error;
