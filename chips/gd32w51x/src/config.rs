// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Compile-time configuration of the GD32W51x drivers.
//!
//! Cargo features are only read here. The rest of the crate tests fields
//! of [`CONFIG`] so that every path is type-checked whatever the feature
//! set, and the disabled branches fold away as constants.

/// Compile-time configuration options.
pub(crate) struct Config {
    /// Address the peripherals through the TrustZone secure alias
    /// (`0x5xxx_xxxx`) instead of the non-secure one (`0x4xxx_xxxx`).
    ///
    /// Only firmware running in the secure world may use it.
    pub(crate) trustzone_secure: bool,
    /// Log every GPIO lock sequence at `trace` level.
    pub(crate) trace_gpio_lock: bool,
}

/// The only place in the crate where `cfg!(feature = ...)` is permitted.
pub(crate) const CONFIG: Config = Config {
    trustzone_secure: cfg!(feature = "trustzone_secure"),
    trace_gpio_lock: cfg!(feature = "trace_gpio_lock"),
};
