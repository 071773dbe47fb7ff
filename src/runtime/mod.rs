// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime bindings.
//!
//! The native client lives in `client`; this is the other way in. The WASM
//! module hands the pure core (URLs, paging, highlighting, the session state
//! machine) to a browser front end that does its own `fetch`.

#[cfg(feature = "wasm")]
pub mod wasm;
