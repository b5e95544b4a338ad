// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Peripheral reset lines of the reset and clock unit (RCU).
//!
//! Only the AHB1 reset register is modelled: it holds the reset lines of
//! the GPIO ports. Clock trees and the other buses belong to the board's
//! clock setup.

use tock_registers::interfaces::{ReadWriteable, Readable};
use tock_registers::register_bitfields;
use tock_registers::registers::ReadWrite;

use crate::gpio::GpioPort;

/// A peripheral whose registers can be returned to their reset values.
pub trait PeripheralReset {
    /// Hold the peripheral in reset.
    fn assert_reset(&self);
    /// Let the peripheral out of reset.
    fn release_reset(&self);
}

/// Reset and clock unit, up to the AHB1 reset register
#[repr(C)]
pub struct RcuRegisters {
    /// CTL, PLL, CFG0 and INT (0x00 - 0x0C)
    _reserved0: [u32; 4],
    /// AHB1 reset register (RCU_AHB1RST)
    ahb1rst: ReadWrite<u32, AHB1RST::Register>,
}

register_bitfields![u32,
    AHB1RST [
        /// GPIO port A reset
        PARST OFFSET(0) NUMBITS(1) [],
        /// GPIO port B reset
        PBRST OFFSET(1) NUMBITS(1) [],
        /// GPIO port C reset
        PCRST OFFSET(2) NUMBITS(1) []
    ]
];

const RCU_BASE: usize = crate::GPIO_BASE + 0x3800;

/// The RCU register block at its fixed address.
///
/// # Safety
///
/// Must only be called on a GD32W51x, and the returned reference must be
/// the only way the rest of the firmware reaches the AHB1 reset register.
pub unsafe fn registers() -> &'static RcuRegisters {
    &*(RCU_BASE as *const RcuRegisters)
}

pub struct Rcu<'a> {
    registers: &'a RcuRegisters,
}

impl<'a> Rcu<'a> {
    pub const fn new(registers: &'a RcuRegisters) -> Rcu<'a> {
        Rcu { registers }
    }

    /// The reset line of `port`.
    pub const fn gpio_reset(&'a self, port: GpioPort) -> GpioReset<'a> {
        GpioReset { rcu: self, port }
    }

    fn set_gpio_reset(&self, port: GpioPort, asserted: bool) {
        let field = match port {
            GpioPort::GPIOA => AHB1RST::PARST,
            GpioPort::GPIOB => AHB1RST::PBRST,
            GpioPort::GPIOC => AHB1RST::PCRST,
        };
        let value = field.val(u32::from(asserted));
        self.registers.ahb1rst.modify(value);
    }

    fn is_gpio_reset(&self, port: GpioPort) -> bool {
        match port {
            GpioPort::GPIOA => self.registers.ahb1rst.is_set(AHB1RST::PARST),
            GpioPort::GPIOB => self.registers.ahb1rst.is_set(AHB1RST::PBRST),
            GpioPort::GPIOC => self.registers.ahb1rst.is_set(AHB1RST::PCRST),
        }
    }
}

/// Reset line of one GPIO port.
pub struct GpioReset<'a> {
    rcu: &'a Rcu<'a>,
    port: GpioPort,
}

impl GpioReset<'_> {
    pub fn is_asserted(&self) -> bool {
        self.rcu.is_gpio_reset(self.port)
    }
}

impl PeripheralReset for GpioReset<'_> {
    fn assert_reset(&self) {
        self.rcu.set_gpio_reset(self.port, true);
    }

    fn release_reset(&self) {
        self.rcu.set_gpio_reset(self.port, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRegisters;

    #[test]
    fn gpio_reset_lines() {
        let mut fake = FakeRegisters::new([0; 5]);
        let rcu = Rcu::new(fake.block());
        let reset_b = rcu.gpio_reset(GpioPort::GPIOB);
        let reset_c = rcu.gpio_reset(GpioPort::GPIOC);

        reset_b.assert_reset();
        assert!(reset_b.is_asserted());
        assert!(!reset_c.is_asserted());

        reset_c.assert_reset();
        reset_b.release_reset();
        assert!(!reset_b.is_asserted());
        assert!(reset_c.is_asserted());
        reset_c.release_reset();

        assert_eq!(fake.word(0x10), 0);
    }
}
