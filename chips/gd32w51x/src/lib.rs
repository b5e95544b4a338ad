// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! GPIO and EXTI peripheral drivers for the GigaDevice GD32W51x MCU.
//!
//! GD32W51x: <https://www.gigadevice.com/product/mcu/arm-cortex-m33/gd32w515-series>
//!
//! Every driver is built on an explicit register handle rather than a fixed
//! address, so a board obtains the handles from [`gpio::GpioPort::registers`]
//! and [`exti::registers`] once, and tests can hand in fake memory instead.

#![cfg_attr(not(test), no_std)]

mod config;
mod errorcode;

pub mod exti;
pub mod field;
pub mod gpio;
pub mod rcu;

pub use crate::errorcode::ErrorCode;

use crate::config::CONFIG;

/// Offset between the non-secure and the secure alias of every peripheral.
const SECURE_ALIAS_OFFSET: usize = 0x1000_0000;

/// Peripheral bus bases, non-secure alias.
const APB2_BUS_BASE: usize = 0x4001_0000;
const AHB1_BUS_BASE: usize = 0x4002_0000;

pub(crate) const GPIO_BASE: usize = alias(AHB1_BUS_BASE);
pub(crate) const EXTI_BASE: usize = alias(APB2_BUS_BASE + 0x3C00);

/// Select the bus alias the crate was configured for.
const fn alias(non_secure: usize) -> usize {
    if CONFIG.trustzone_secure {
        non_secure + SECURE_ALIAS_OFFSET
    } else {
        non_secure
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use core::mem::size_of;

    /// Plain memory standing in for a memory-mapped register block.
    ///
    /// Writes land in the word at the register's offset and reads return
    /// it, with none of the set/clear/toggle side effects of the silicon.
    #[repr(C, align(4))]
    pub(crate) struct FakeRegisters<const N: usize>([u32; N]);

    impl<const N: usize> FakeRegisters<N> {
        pub(crate) fn new(words: [u32; N]) -> Self {
            FakeRegisters(words)
        }

        /// View the memory as the register block `T`.
        pub(crate) fn block<T>(&mut self) -> &T {
            assert!(size_of::<T>() <= N * 4);
            // Register types are `UnsafeCell<u32>` wrappers laid out as
            // `#[repr(C)]`, so they alias the words one-for-one.
            unsafe { &*self.0.as_mut_ptr().cast::<T>() }
        }

        /// Word at byte offset `offset`.
        pub(crate) fn word(&self, offset: usize) -> u32 {
            self.0[offset / 4]
        }
    }
}
