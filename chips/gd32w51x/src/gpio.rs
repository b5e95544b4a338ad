// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! General-purpose I/O ports A, B and C.
//!
//! A [`Port`] configures any set of its sixteen pins at once, given as a
//! [`PinMask`]. A [`Pin`] is the same port seen through a single-pin mask,
//! and implements the `embedded-hal` digital traits.
//!
//! Port operations take typed selectors and do not check them. Raw pin
//! numbers are checked where they come in: [`Port::pin`] and
//! [`Port::pin_mode`] reject indices past 15 with `INVAL`.
//! Callers that share a port between thread and interrupt context must
//! provide their own exclusion around the read-modify-write operations.

use core::convert::Infallible;
use core::fmt;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState, StatefulOutputPin};
use log::{debug, trace, warn};
use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::register_bitfields;
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};

use crate::config::CONFIG;
use crate::field::{self, PinField, PinMask};
use crate::rcu::PeripheralReset;
use crate::ErrorCode;

/// General-purpose I/O port
#[repr(C)]
pub struct GpioRegisters {
    /// Port control register, two mode bits per pin (GPIOx_CTL)
    ctl: ReadWrite<u32>,
    /// Port output mode register (GPIOx_OMODE)
    omode: ReadWrite<u32>,
    /// Port output speed register, two bits per pin (GPIOx_OSPD)
    ospd: ReadWrite<u32>,
    /// Port pull-up/pull-down register, two bits per pin (GPIOx_PUD)
    pud: ReadWrite<u32>,
    /// Port input status register (GPIOx_ISTAT)
    istat: ReadOnly<u32>,
    /// Port output control register (GPIOx_OCTL)
    octl: ReadWrite<u32>,
    /// Port bit operate register, write 1 to set (GPIOx_BOP)
    bop: WriteOnly<u32>,
    /// Port configuration lock register (GPIOx_LOCK)
    lock: ReadWrite<u32, LOCK::Register>,
    /// Alternate function selected register 0, pins 0 to 7 (GPIOx_AFSEL0)
    afsel0: ReadWrite<u32>,
    /// Alternate function selected register 1, pins 8 to 15 (GPIOx_AFSEL1)
    afsel1: ReadWrite<u32>,
    /// Bit clear register, write 1 to clear (GPIOx_BC)
    bc: WriteOnly<u32>,
    /// Port bit toggle register, write 1 to toggle (GPIOx_TG)
    tg: WriteOnly<u32>,
    /// Port secure configuration register (GPIOx_SCFG)
    scfg: ReadWrite<u32>,
}

register_bitfields![u32,
    LOCK [
        /// Pins whose configuration is frozen once the key sequence completes
        LK OFFSET(0) NUMBITS(16) [],
        /// Lock key
        LKK OFFSET(16) NUMBITS(1) []
    ]
];

/// Distance between two port register blocks.
const PORT_STRIDE: usize = 0x400;

/// The three GPIO ports.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GpioPort {
    GPIOA = 0,
    GPIOB = 1,
    GPIOC = 2,
}

impl GpioPort {
    pub const fn base(self) -> usize {
        crate::GPIO_BASE + (self as usize) * PORT_STRIDE
    }

    /// The register block of this port at its fixed address.
    ///
    /// # Safety
    ///
    /// Must only be called on a GD32W51x, and only once per port: the
    /// drivers assume they are the only users of the registers.
    pub unsafe fn registers(self) -> &'static GpioRegisters {
        &*(self.base() as *const GpioRegisters)
    }
}

impl TryFrom<u8> for GpioPort {
    type Error = ErrorCode;

    fn try_from(port: u8) -> Result<GpioPort, ErrorCode> {
        match port {
            0 => Ok(GpioPort::GPIOA),
            1 => Ok(GpioPort::GPIOB),
            2 => Ok(GpioPort::GPIOC),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// Name a pin by its port and its index within the port.
///
/// The port is held in bits 5:4 and the index in bits 3:0.
const fn pin_id(port: GpioPort, index: u8) -> u8 {
    ((port as u8) << 4) | (index & 0xF)
}

/// GPIO pin identifiers
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinId {
    // GPIOA
    PA00 = pin_id(GpioPort::GPIOA, 0),
    PA01 = pin_id(GpioPort::GPIOA, 1),
    PA02 = pin_id(GpioPort::GPIOA, 2),
    PA03 = pin_id(GpioPort::GPIOA, 3),
    PA04 = pin_id(GpioPort::GPIOA, 4),
    PA05 = pin_id(GpioPort::GPIOA, 5),
    PA06 = pin_id(GpioPort::GPIOA, 6),
    PA07 = pin_id(GpioPort::GPIOA, 7),
    PA08 = pin_id(GpioPort::GPIOA, 8),
    PA09 = pin_id(GpioPort::GPIOA, 9),
    PA10 = pin_id(GpioPort::GPIOA, 10),
    PA11 = pin_id(GpioPort::GPIOA, 11),
    PA12 = pin_id(GpioPort::GPIOA, 12),
    PA13 = pin_id(GpioPort::GPIOA, 13),
    PA14 = pin_id(GpioPort::GPIOA, 14),
    PA15 = pin_id(GpioPort::GPIOA, 15),

    // GPIOB
    PB00 = pin_id(GpioPort::GPIOB, 0),
    PB01 = pin_id(GpioPort::GPIOB, 1),
    PB02 = pin_id(GpioPort::GPIOB, 2),
    PB03 = pin_id(GpioPort::GPIOB, 3),
    PB04 = pin_id(GpioPort::GPIOB, 4),
    PB05 = pin_id(GpioPort::GPIOB, 5),
    PB06 = pin_id(GpioPort::GPIOB, 6),
    PB07 = pin_id(GpioPort::GPIOB, 7),
    PB08 = pin_id(GpioPort::GPIOB, 8),
    PB09 = pin_id(GpioPort::GPIOB, 9),
    PB10 = pin_id(GpioPort::GPIOB, 10),
    PB11 = pin_id(GpioPort::GPIOB, 11),
    PB12 = pin_id(GpioPort::GPIOB, 12),
    PB13 = pin_id(GpioPort::GPIOB, 13),
    PB14 = pin_id(GpioPort::GPIOB, 14),
    PB15 = pin_id(GpioPort::GPIOB, 15),

    // GPIOC
    PC00 = pin_id(GpioPort::GPIOC, 0),
    PC01 = pin_id(GpioPort::GPIOC, 1),
    PC02 = pin_id(GpioPort::GPIOC, 2),
    PC03 = pin_id(GpioPort::GPIOC, 3),
    PC04 = pin_id(GpioPort::GPIOC, 4),
    PC05 = pin_id(GpioPort::GPIOC, 5),
    PC06 = pin_id(GpioPort::GPIOC, 6),
    PC07 = pin_id(GpioPort::GPIOC, 7),
    PC08 = pin_id(GpioPort::GPIOC, 8),
    PC09 = pin_id(GpioPort::GPIOC, 9),
    PC10 = pin_id(GpioPort::GPIOC, 10),
    PC11 = pin_id(GpioPort::GPIOC, 11),
    PC12 = pin_id(GpioPort::GPIOC, 12),
    PC13 = pin_id(GpioPort::GPIOC, 13),
    PC14 = pin_id(GpioPort::GPIOC, 14),
    PC15 = pin_id(GpioPort::GPIOC, 15),
}

impl PinId {
    #[rustfmt::skip]
    const ALL: [PinId; 48] = [
        PinId::PA00, PinId::PA01, PinId::PA02, PinId::PA03,
        PinId::PA04, PinId::PA05, PinId::PA06, PinId::PA07,
        PinId::PA08, PinId::PA09, PinId::PA10, PinId::PA11,
        PinId::PA12, PinId::PA13, PinId::PA14, PinId::PA15,
        PinId::PB00, PinId::PB01, PinId::PB02, PinId::PB03,
        PinId::PB04, PinId::PB05, PinId::PB06, PinId::PB07,
        PinId::PB08, PinId::PB09, PinId::PB10, PinId::PB11,
        PinId::PB12, PinId::PB13, PinId::PB14, PinId::PB15,
        PinId::PC00, PinId::PC01, PinId::PC02, PinId::PC03,
        PinId::PC04, PinId::PC05, PinId::PC06, PinId::PC07,
        PinId::PC08, PinId::PC09, PinId::PC10, PinId::PC11,
        PinId::PC12, PinId::PC13, PinId::PC14, PinId::PC15,
    ];

    pub const fn port(self) -> GpioPort {
        match (self as u8) >> 4 {
            0 => GpioPort::GPIOA,
            1 => GpioPort::GPIOB,
            _ => GpioPort::GPIOC,
        }
    }

    /// Index of the pin within its port, 0 to 15.
    pub const fn index(self) -> u8 {
        (self as u8) & 0xF
    }

    pub const fn mask(self) -> PinMask {
        PinMask::pin(self.index())
    }
}

impl TryFrom<u8> for PinId {
    type Error = ErrorCode;

    /// Accepts the `pin_id` encoding: port in bits 5:4, index in bits 3:0.
    fn try_from(id: u8) -> Result<PinId, ErrorCode> {
        PinId::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(ErrorCode::INVAL)
    }
}

/// Pin mode, two bits per pin in CTL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Input = 0b00,
    Output = 0b01,
    AlternateFunction = 0b10,
    Analog = 0b11,
}

impl Mode {
    const fn from_bits(bits: u32) -> Mode {
        match bits & 0b11 {
            0b00 => Mode::Input,
            0b01 => Mode::Output,
            0b10 => Mode::AlternateFunction,
            _ => Mode::Analog,
        }
    }
}

impl PinField for Mode {
    const WIDTH: usize = 2;

    fn bits(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Mode {
    type Error = ErrorCode;

    fn try_from(bits: u32) -> Result<Mode, ErrorCode> {
        if bits > 0b11 {
            Err(ErrorCode::INVAL)
        } else {
            Ok(Mode::from_bits(bits))
        }
    }
}

/// Pull-up and pull-down resistors, two bits per pin in PUD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    None = 0b00,
    Up = 0b01,
    Down = 0b10,
}

impl PinField for Pull {
    const WIDTH: usize = 2;

    fn bits(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Pull {
    type Error = ErrorCode;

    fn try_from(bits: u32) -> Result<Pull, ErrorCode> {
        match bits {
            0b00 => Ok(Pull::None),
            0b01 => Ok(Pull::Up),
            0b10 => Ok(Pull::Down),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// Output driver, one bit per pin in OMODE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputType {
    PushPull = 0,
    OpenDrain = 1,
}

impl TryFrom<u32> for OutputType {
    type Error = ErrorCode;

    fn try_from(bits: u32) -> Result<OutputType, ErrorCode> {
        match bits {
            0 => Ok(OutputType::PushPull),
            1 => Ok(OutputType::OpenDrain),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// Maximum output speed, two bits per pin in OSPD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speed {
    Max2MHz = 0b00,
    Max10MHz = 0b01,
    Max25MHz = 0b10,
    Max166MHz = 0b11,
}

impl PinField for Speed {
    const WIDTH: usize = 2;

    fn bits(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Speed {
    type Error = ErrorCode;

    fn try_from(bits: u32) -> Result<Speed, ErrorCode> {
        match bits {
            0b00 => Ok(Speed::Max2MHz),
            0b01 => Ok(Speed::Max10MHz),
            0b10 => Ok(Speed::Max25MHz),
            0b11 => Ok(Speed::Max166MHz),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// Alternate function selection, four bits per pin in AFSEL0/AFSEL1.
///
/// Which peripheral each number routes to depends on the pin; see the pin
/// definitions table of the datasheet. AF15 is EVENTOUT on every pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AltFunction {
    AF0 = 0,
    AF1 = 1,
    AF2 = 2,
    AF3 = 3,
    AF4 = 4,
    AF5 = 5,
    AF6 = 6,
    AF7 = 7,
    AF8 = 8,
    AF9 = 9,
    AF10 = 10,
    AF11 = 11,
    AF12 = 12,
    AF13 = 13,
    AF14 = 14,
    AF15 = 15,
}

impl AltFunction {
    const ALL: [AltFunction; 16] = [
        AltFunction::AF0,
        AltFunction::AF1,
        AltFunction::AF2,
        AltFunction::AF3,
        AltFunction::AF4,
        AltFunction::AF5,
        AltFunction::AF6,
        AltFunction::AF7,
        AltFunction::AF8,
        AltFunction::AF9,
        AltFunction::AF10,
        AltFunction::AF11,
        AltFunction::AF12,
        AltFunction::AF13,
        AltFunction::AF14,
        AltFunction::AF15,
    ];
}

impl PinField for AltFunction {
    const WIDTH: usize = 4;

    fn bits(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for AltFunction {
    type Error = ErrorCode;

    fn try_from(bits: u32) -> Result<AltFunction, ErrorCode> {
        usize::try_from(bits)
            .ok()
            .and_then(|index| AltFunction::ALL.get(index))
            .copied()
            .ok_or(ErrorCode::INVAL)
    }
}

/// A register the lock key sequence can run on.
trait LockRegister:
    Readable<T = u32, R = LOCK::Register> + Writeable<T = u32, R = LOCK::Register>
{
}

impl<L> LockRegister for L where
    L: Readable<T = u32, R = LOCK::Register> + Writeable<T = u32, R = LOCK::Register>
{
}

/// Run the lock key sequence on `lock` for `pins`.
///
/// The silicon only latches the lock after exactly this access pattern:
/// write LKK=1, write LKK=0, write LKK=1, read, read. Every write carries
/// the same pin bits. Returns whether the final read shows LKK set, which
/// is how the port reports that the lock is active.
fn lock_sequence<L: LockRegister>(lock: &L, pins: PinMask) -> bool {
    let pins = LOCK::LK.val(pins.word());
    let keyed = LOCK::LKK::SET + pins;

    lock.write(keyed);
    lock.write(pins);
    lock.write(keyed);
    let _ = lock.get();
    lock.is_set(LOCK::LKK)
}

pub struct Port<'a> {
    port: GpioPort,
    registers: &'a GpioRegisters,
    reset: &'a dyn PeripheralReset,
}

impl<'a> Port<'a> {
    pub const fn new(
        port: GpioPort,
        registers: &'a GpioRegisters,
        reset: &'a dyn PeripheralReset,
    ) -> Port<'a> {
        Port {
            port,
            registers,
            reset,
        }
    }

    pub fn port(&self) -> GpioPort {
        self.port
    }

    /// Pin `index` of this port, or `INVAL` if the port has no such pin.
    pub fn pin(&self, index: u8) -> Result<Pin<'_, 'a>, ErrorCode> {
        PinMask::try_from(index).map(|_| self.pin_at(index))
    }

    /// Pin `index`, which the caller has already checked.
    fn pin_at(&self, index: u8) -> Pin<'_, 'a> {
        Pin { port: self, index }
    }

    /// Return every register of the port to its reset value by pulsing the
    /// port's reset line.
    pub fn deinit(&self) {
        debug!("{}: reset", self);
        self.reset.assert_reset();
        self.reset.release_reset();
    }

    /// Set the mode and the pull resistors of `pins`.
    pub fn mode_set(&self, mode: Mode, pull: Pull, pins: PinMask) {
        let mut ctl = self.registers.ctl.extract();
        let mut pud = self.registers.pud.extract();

        field::pack_fields(&mut ctl, pins, mode);
        field::pack_fields(&mut pud, pins, pull);

        self.registers.ctl.set(ctl.get());
        self.registers.pud.set(pud.get());
    }

    /// Set the output driver type and the maximum speed of `pins`.
    pub fn output_options_set(&self, otype: OutputType, speed: Speed, pins: PinMask) {
        let omode = self.registers.omode.get();
        match otype {
            OutputType::OpenDrain => self.registers.omode.set(omode | pins.word()),
            OutputType::PushPull => self.registers.omode.set(omode & !pins.word()),
        }

        let mut ospd = self.registers.ospd.extract();
        field::pack_fields(&mut ospd, pins, speed);
        self.registers.ospd.set(ospd.get());
    }

    /// Route `pins` to alternate function `af`.
    ///
    /// This only selects the function; the pins must also be put in
    /// [`Mode::AlternateFunction`] for it to take effect.
    pub fn af_set(&self, af: AltFunction, pins: PinMask) {
        let mut afsel0 = self.registers.afsel0.extract();
        let mut afsel1 = self.registers.afsel1.extract();

        field::pack_fields(&mut afsel0, pins.low(), af);
        field::pack_fields(&mut afsel1, pins.high(), af);

        self.registers.afsel0.set(afsel0.get());
        self.registers.afsel1.set(afsel1.get());
    }

    /// Drive `pins` high.
    pub fn bit_set(&self, pins: PinMask) {
        self.registers.bop.set(pins.word());
    }

    /// Drive `pins` low.
    pub fn bit_reset(&self, pins: PinMask) {
        self.registers.bc.set(pins.word());
    }

    pub fn bit_write(&self, pins: PinMask, state: PinState) {
        match state {
            PinState::High => self.bit_set(pins),
            PinState::Low => self.bit_reset(pins),
        }
    }

    /// Replace the output level of all sixteen pins.
    pub fn port_write(&self, data: u16) {
        self.registers.octl.set(u32::from(data));
    }

    /// Whether any of `pins` reads high.
    pub fn input_bit_get(&self, pins: PinMask) -> bool {
        self.registers.istat.get() & pins.word() != 0
    }

    pub fn input_port_get(&self) -> u16 {
        self.registers.istat.get() as u16
    }

    /// Whether any of `pins` is driven high.
    pub fn output_bit_get(&self, pins: PinMask) -> bool {
        self.registers.octl.get() & pins.word() != 0
    }

    pub fn output_port_get(&self) -> u16 {
        self.registers.octl.get() as u16
    }

    pub fn bit_toggle(&self, pins: PinMask) {
        self.registers.tg.set(pins.word());
    }

    pub fn port_toggle(&self) {
        self.registers.tg.set(PinMask::ALL.word());
    }

    /// Freeze the configuration of `pins` until the next reset.
    ///
    /// Once locked, CTL, OMODE, OSPD, PUD and AFSELx ignore writes to the
    /// fields of those pins, and the lock itself cannot be undone.
    pub fn pin_lock(&self, pins: PinMask) {
        self.lock_pins(pins);
    }

    /// Whether the port's lock key is active.
    pub fn is_locked(&self) -> bool {
        self.registers.lock.is_set(LOCK::LKK)
    }

    /// Make `pins` accessible to secure software only.
    pub fn bit_set_sec_cfg(&self, pins: PinMask) {
        self.registers.scfg.set(self.registers.scfg.get() | pins.word());
    }

    /// Make `pins` accessible to non-secure software.
    pub fn bit_reset_sec_cfg(&self, pins: PinMask) {
        self.registers.scfg.set(self.registers.scfg.get() & !pins.word());
    }

    /// Whether any of `pins` is secure.
    pub fn sec_cfg_bit_get(&self, pins: PinMask) -> bool {
        self.registers.scfg.get() & pins.word() != 0
    }

    /// Current mode of pin `index`, or `INVAL` if the port has no such pin.
    pub fn pin_mode(&self, index: u8) -> Result<Mode, ErrorCode> {
        PinMask::try_from(index).map(|_| self.mode_at(index))
    }

    fn mode_at(&self, index: u8) -> Mode {
        let ctl = self.registers.ctl.get();
        Mode::from_bits(field::unpack_field::<Mode>(ctl, usize::from(index)))
    }

    fn lock_pins(&self, pins: PinMask) -> bool {
        self.lock_pins_on(&self.registers.lock, pins)
    }

    fn lock_pins_on<L: LockRegister>(&self, lock: &L, pins: PinMask) -> bool {
        if CONFIG.trace_gpio_lock {
            trace!("{}: lock pins {:#06x}", self, pins.bits());
        }
        let locked = lock_sequence(lock, pins);
        if !locked {
            warn!("{}: lock key not set after locking {:#06x}", self, pins.bits());
        }
        locked
    }
}

impl fmt::Display for Port<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.port)
    }
}

/// The three ports of the chip.
pub struct Ports<'a>([Port<'a>; 3]);

impl<'a> Ports<'a> {
    pub const fn new(gpioa: Port<'a>, gpiob: Port<'a>, gpioc: Port<'a>) -> Ports<'a> {
        Ports([gpioa, gpiob, gpioc])
    }

    pub fn port(&self, port: GpioPort) -> &Port<'a> {
        &self.0[port as usize]
    }

    pub fn pin(&self, pin: PinId) -> Pin<'_, 'a> {
        self.port(pin.port()).pin_at(pin.index())
    }
}

/// One pin of a [`Port`].
pub struct Pin<'p, 'a> {
    port: &'p Port<'a>,
    index: u8,
}

impl Pin<'_, '_> {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn mask(&self) -> PinMask {
        PinMask::pin(self.index)
    }

    pub fn mode(&self) -> Mode {
        self.port.mode_at(self.index)
    }

    /// Configure the pin as a push-pull output.
    pub fn make_output(&self) {
        let pins = self.mask();
        self.port.output_options_set(OutputType::PushPull, Speed::Max2MHz, pins);
        self.port.mode_set(Mode::Output, Pull::None, pins);
    }

    /// Configure the pin as an input with the given pull resistor.
    pub fn make_input(&self, pull: Pull) {
        self.port.mode_set(Mode::Input, pull, self.mask());
    }

    /// Hand the pin to a peripheral.
    ///
    /// The function is selected before the mode changes so that the pin
    /// never drives another function's signal in between.
    pub fn set_alternate(&self, af: AltFunction, otype: OutputType, speed: Speed) {
        self.port.af_set(af, self.mask());
        self.port.output_options_set(otype, speed, self.mask());
        self.port.mode_set(Mode::AlternateFunction, Pull::None, self.mask());
    }

    /// Change the pull resistor, keeping the current mode.
    pub fn set_pull(&self, pull: Pull) {
        self.port.mode_set(self.mode(), pull, self.mask());
    }

    pub fn make_analog(&self) {
        self.port.mode_set(Mode::Analog, Pull::None, self.mask());
    }

    /// Lock the configuration of this pin until reset.
    ///
    /// Fails with `FAIL` if the port does not report its lock key active
    /// after the sequence.
    pub fn lock(&self) -> Result<(), ErrorCode> {
        self.lock_on(&self.port.registers.lock)
    }

    fn lock_on<L: LockRegister>(&self, lock: &L) -> Result<(), ErrorCode> {
        if self.port.lock_pins_on(lock, self.mask()) {
            Ok(())
        } else {
            Err(ErrorCode::FAIL)
        }
    }
}

impl ErrorType for Pin<'_, '_> {
    type Error = Infallible;
}

impl OutputPin for Pin<'_, '_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.bit_reset(self.mask());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.bit_set(self.mask());
        Ok(())
    }
}

impl StatefulOutputPin for Pin<'_, '_> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.port.output_bit_get(self.mask()))
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.port.output_bit_get(self.mask()))
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.port.bit_toggle(self.mask());
        Ok(())
    }
}

impl InputPin for Pin<'_, '_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.port.input_bit_get(self.mask()))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.port.input_bit_get(self.mask()))
    }
}
