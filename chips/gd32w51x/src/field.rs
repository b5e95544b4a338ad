// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Pin selectors and per-pin register fields.
//!
//! Several GPIO registers hold one fixed-width field per pin, pin `n`
//! owning bits `n * WIDTH .. (n + 1) * WIDTH`. [`pack_fields`] writes the
//! same value into the fields of every selected pin of a local copy of such
//! a register, leaving the fields of the other pins untouched.

use core::ops::{BitAnd, BitOr, Not};

use tock_registers::fields::FieldValue;
use tock_registers::{LocalRegisterCopy, RegisterLongName};

use crate::ErrorCode;

/// Number of pins on a GPIO port.
pub const PINS_PER_PORT: usize = 16;

/// A set of pins of one port, bit `n` selecting pin `n`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PinMask(u16);

impl PinMask {
    pub const NONE: PinMask = PinMask(0x0000);
    pub const ALL: PinMask = PinMask(0xFFFF);

    pub const PIN0: PinMask = PinMask::pin(0);
    pub const PIN1: PinMask = PinMask::pin(1);
    pub const PIN2: PinMask = PinMask::pin(2);
    pub const PIN3: PinMask = PinMask::pin(3);
    pub const PIN4: PinMask = PinMask::pin(4);
    pub const PIN5: PinMask = PinMask::pin(5);
    pub const PIN6: PinMask = PinMask::pin(6);
    pub const PIN7: PinMask = PinMask::pin(7);
    pub const PIN8: PinMask = PinMask::pin(8);
    pub const PIN9: PinMask = PinMask::pin(9);
    pub const PIN10: PinMask = PinMask::pin(10);
    pub const PIN11: PinMask = PinMask::pin(11);
    pub const PIN12: PinMask = PinMask::pin(12);
    pub const PIN13: PinMask = PinMask::pin(13);
    pub const PIN14: PinMask = PinMask::pin(14);
    pub const PIN15: PinMask = PinMask::pin(15);

    /// Selector for the single pin `index`, which must be below 16.
    pub(crate) const fn pin(index: u8) -> PinMask {
        PinMask(1 << index)
    }

    pub const fn from_bits(bits: u16) -> PinMask {
        PinMask(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// The selector as it is written to 1-bit-per-pin registers.
    pub const fn word(self) -> u32 {
        self.0 as u32
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, index: usize) -> bool {
        index < PINS_PER_PORT && (self.0 >> index) & 1 != 0
    }

    /// Pins 0 to 7, in place.
    pub const fn low(self) -> PinMask {
        PinMask(self.0 & 0x00FF)
    }

    /// Pins 8 to 15, renumbered 0 to 7.
    ///
    /// Used for registers that split a port's fields over two words, where
    /// pin 8 owns the first field of the second word.
    pub const fn high(self) -> PinMask {
        PinMask(self.0 >> 8)
    }

    /// Selected pin indices, in increasing order.
    pub const fn iter(self) -> BitIndices {
        BitIndices::new(self.0 as u32)
    }
}

impl TryFrom<u8> for PinMask {
    type Error = ErrorCode;

    /// Selector for the single pin `index`.
    fn try_from(index: u8) -> Result<PinMask, ErrorCode> {
        if usize::from(index) < PINS_PER_PORT {
            Ok(PinMask::pin(index))
        } else {
            Err(ErrorCode::INVAL)
        }
    }
}

impl BitOr for PinMask {
    type Output = PinMask;

    fn bitor(self, rhs: PinMask) -> PinMask {
        PinMask(self.0 | rhs.0)
    }
}

impl BitAnd for PinMask {
    type Output = PinMask;

    fn bitand(self, rhs: PinMask) -> PinMask {
        PinMask(self.0 & rhs.0)
    }
}

impl Not for PinMask {
    type Output = PinMask;

    fn not(self) -> PinMask {
        PinMask(!self.0)
    }
}

impl From<u16> for PinMask {
    fn from(bits: u16) -> PinMask {
        PinMask(bits)
    }
}

impl IntoIterator for PinMask {
    type Item = usize;
    type IntoIter = BitIndices;

    fn into_iter(self) -> BitIndices {
        self.iter()
    }
}

/// Iterator over the indices of the set bits of a word, lowest first.
///
/// Yields pin numbers for a [`PinMask`] and line numbers for an EXTI
/// pending word.
#[derive(Clone, Debug)]
pub struct BitIndices(u32);

impl BitIndices {
    pub const fn new(bits: u32) -> BitIndices {
        BitIndices(bits)
    }
}

impl Iterator for BitIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 != 0 {
            let index = self.0.trailing_zeros() as usize;
            self.0 &= self.0 - 1;
            Some(index)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let popcnt = self.0.count_ones() as usize;
        (popcnt, Some(popcnt))
    }
}

impl ExactSizeIterator for BitIndices {}

/// A value stored once per pin in a packed configuration register.
pub trait PinField: Copy {
    /// Width of each pin's field, in bits.
    const WIDTH: usize;

    /// The value as it is stored in the field.
    fn bits(self) -> u32;
}

/// Set the field of every pin in `pins` to `value`.
///
/// Pin `n` of `pins` addresses the `n`th field of `register`. Fields of
/// unselected pins are left as they were, and an empty selector leaves the
/// register unchanged. Pins whose field would lie past bit 31 are ignored.
pub fn pack_fields<F: PinField, R: RegisterLongName>(
    register: &mut LocalRegisterCopy<u32, R>,
    pins: PinMask,
    value: F,
) {
    let mask = (1u32 << F::WIDTH) - 1;
    for index in pins.iter().filter(|index| (index + 1) * F::WIDTH <= 32) {
        register.modify(FieldValue::<u32, R>::new(
            mask,
            index * F::WIDTH,
            value.bits(),
        ));
    }
}

/// Value of the field of pin `index` in `register`.
pub fn unpack_field<F: PinField>(register: u32, index: usize) -> u32 {
    let mask = (1u32 << F::WIDTH) - 1;
    (register >> (index * F::WIDTH)) & mask
}
