// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! External interrupt/event controller (EXTI).
//!
//! Lines 0 to 15 follow the GPIO pins of the same number; the rest are
//! wired to internal peripherals. Every line operation touches the single
//! bit `1 << line` of the register concerned.

use log::{debug, trace};
use tock_cells::optional_cell::OptionalCell;
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::register_bitfields;
use tock_registers::registers::ReadWrite;

use crate::field::BitIndices;
use crate::ErrorCode;

/// External interrupt/event controller
#[repr(C)]
pub struct ExtiRegisters {
    /// Interrupt enable register (EXTI_INTEN)
    inten: ReadWrite<u32>,
    /// Event enable register (EXTI_EVEN)
    even: ReadWrite<u32>,
    /// Rising edge trigger enable register (EXTI_RTEN)
    rten: ReadWrite<u32>,
    /// Falling edge trigger enable register (EXTI_FTEN)
    ften: ReadWrite<u32>,
    /// Software interrupt event register (EXTI_SWIEV)
    swiev: ReadWrite<u32>,
    /// Pending register, write 1 to clear (EXTI_PD)
    pd: ReadWrite<u32>,
    /// Secure configuration register (EXTI_SECCFG)
    seccfg: ReadWrite<u32>,
    /// Privilege configuration register (EXTI_PRIVCFG)
    privcfg: ReadWrite<u32>,
    /// Lock register (EXTI_LOCK)
    lock: ReadWrite<u32, LOCK::Register>,
}

register_bitfields![u32,
    LOCK [
        /// Freezes SECCFG and PRIVCFG until the next reset
        LOCK OFFSET(0) NUMBITS(1) []
    ]
];

/// Number of EXTI lines.
pub const EXTI_LINES: usize = 29;

/// INTEN after reset: the lines of always-on internal wake-up sources.
const INTEN_RESET: u32 = 0x0F94_0000;

/// The EXTI register block at its fixed address.
///
/// # Safety
///
/// Must only be called on a GD32W51x, and only once: the driver assumes
/// it is the only user of the registers.
pub unsafe fn registers() -> &'static ExtiRegisters {
    &*(crate::EXTI_BASE as *const ExtiRegisters)
}

/// Anything that wants to hear about a line firing.
pub trait ExtiClient {
    fn fired(&self);
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineId {
    Exti0 = 0,
    Exti1 = 1,
    Exti2 = 2,
    Exti3 = 3,
    Exti4 = 4,
    Exti5 = 5,
    Exti6 = 6,
    Exti7 = 7,
    Exti8 = 8,
    Exti9 = 9,
    Exti10 = 10,
    Exti11 = 11,
    Exti12 = 12,
    Exti13 = 13,
    Exti14 = 14,
    Exti15 = 15,
    Exti16 = 16,
    Exti17 = 17,
    Exti18 = 18,
    Exti19 = 19,
    Exti20 = 20,
    Exti21 = 21,
    Exti22 = 22,
    Exti23 = 23,
    Exti24 = 24,
    Exti25 = 25,
    Exti26 = 26,
    Exti27 = 27,
    Exti28 = 28,
}

impl LineId {
    const ALL: [LineId; EXTI_LINES] = [
        LineId::Exti0,
        LineId::Exti1,
        LineId::Exti2,
        LineId::Exti3,
        LineId::Exti4,
        LineId::Exti5,
        LineId::Exti6,
        LineId::Exti7,
        LineId::Exti8,
        LineId::Exti9,
        LineId::Exti10,
        LineId::Exti11,
        LineId::Exti12,
        LineId::Exti13,
        LineId::Exti14,
        LineId::Exti15,
        LineId::Exti16,
        LineId::Exti17,
        LineId::Exti18,
        LineId::Exti19,
        LineId::Exti20,
        LineId::Exti21,
        LineId::Exti22,
        LineId::Exti23,
        LineId::Exti24,
        LineId::Exti25,
        LineId::Exti26,
        LineId::Exti27,
        LineId::Exti28,
    ];

    /// The line's bit in every EXTI register.
    pub const fn mask(self) -> u32 {
        1 << (self as u8)
    }
}

impl TryFrom<u8> for LineId {
    type Error = ErrorCode;

    fn try_from(line: u8) -> Result<LineId, ErrorCode> {
        LineId::ALL
            .get(usize::from(line))
            .copied()
            .ok_or(ErrorCode::INVAL)
    }
}

/// What a line produces when it triggers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExtiMode {
    Interrupt = 0,
    Event = 1,
}

impl TryFrom<u32> for ExtiMode {
    type Error = ErrorCode;

    fn try_from(mode: u32) -> Result<ExtiMode, ErrorCode> {
        match mode {
            0 => Ok(ExtiMode::Interrupt),
            1 => Ok(ExtiMode::Event),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

/// Edge a line triggers on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Trigger {
    Rising = 0,
    Falling = 1,
    Both = 2,
    /// Leave both edge detectors off.
    None = 3,
}

impl TryFrom<u32> for Trigger {
    type Error = ErrorCode;

    fn try_from(trigger: u32) -> Result<Trigger, ErrorCode> {
        match trigger {
            0 => Ok(Trigger::Rising),
            1 => Ok(Trigger::Falling),
            2 => Ok(Trigger::Both),
            3 => Ok(Trigger::None),
            _ => Err(ErrorCode::INVAL),
        }
    }
}

pub struct Exti<'a> {
    registers: &'a ExtiRegisters,
    clients: [OptionalCell<&'a dyn ExtiClient>; EXTI_LINES],
}

impl<'a> Exti<'a> {
    pub const fn new(registers: &'a ExtiRegisters) -> Exti<'a> {
        Exti {
            registers,
            clients: [
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
                OptionalCell::empty(),
            ],
        }
    }

    /// Put every line back in its reset configuration.
    ///
    /// Pending flags and the lock are left alone; a set lock also keeps
    /// SECCFG and PRIVCFG from changing.
    pub fn deinit(&self) {
        debug!("EXTI: reset");
        self.registers.inten.set(INTEN_RESET);
        self.registers.even.set(0);
        self.registers.rten.set(0);
        self.registers.ften.set(0);
        self.registers.swiev.set(0);
        self.registers.seccfg.set(0);
        self.registers.privcfg.set(0);
    }

    /// Configure `line` from scratch.
    ///
    /// The line is first removed from INTEN, EVEN, RTEN and FTEN, so with
    /// `Trigger::None` it ends up with both edge detectors off.
    pub fn init(&self, line: LineId, mode: ExtiMode, trigger: Trigger) {
        let bit = line.mask();

        clear_bits(&self.registers.inten, bit);
        clear_bits(&self.registers.even, bit);
        clear_bits(&self.registers.rten, bit);
        clear_bits(&self.registers.ften, bit);

        match mode {
            ExtiMode::Interrupt => set_bits(&self.registers.inten, bit),
            ExtiMode::Event => set_bits(&self.registers.even, bit),
        }

        match trigger {
            Trigger::Rising => {
                set_bits(&self.registers.rten, bit);
                clear_bits(&self.registers.ften, bit);
            }
            Trigger::Falling => {
                clear_bits(&self.registers.rten, bit);
                set_bits(&self.registers.ften, bit);
            }
            Trigger::Both => {
                set_bits(&self.registers.rten, bit);
                set_bits(&self.registers.ften, bit);
            }
            Trigger::None => {}
        }
    }

    pub fn interrupt_enable(&self, line: LineId) {
        set_bits(&self.registers.inten, line.mask());
    }

    pub fn interrupt_disable(&self, line: LineId) {
        clear_bits(&self.registers.inten, line.mask());
    }

    pub fn event_enable(&self, line: LineId) {
        set_bits(&self.registers.even, line.mask());
    }

    pub fn event_disable(&self, line: LineId) {
        clear_bits(&self.registers.even, line.mask());
    }

    /// Raise `line` from software, as if its edge had been detected.
    pub fn software_interrupt_enable(&self, line: LineId) {
        set_bits(&self.registers.swiev, line.mask());
    }

    pub fn software_interrupt_disable(&self, line: LineId) {
        clear_bits(&self.registers.swiev, line.mask());
    }

    /// Make `line` configurable by secure software only.
    pub fn security_enable(&self, line: LineId) {
        set_bits(&self.registers.seccfg, line.mask());
    }

    pub fn security_disable(&self, line: LineId) {
        clear_bits(&self.registers.seccfg, line.mask());
    }

    /// Make `line` configurable by privileged software only.
    pub fn privilege_enable(&self, line: LineId) {
        set_bits(&self.registers.privcfg, line.mask());
    }

    pub fn privilege_disable(&self, line: LineId) {
        clear_bits(&self.registers.privcfg, line.mask());
    }

    /// Freeze SECCFG and PRIVCFG. Only a reset releases the lock.
    pub fn lock_enable(&self) {
        debug!("EXTI: lock security and privilege configuration");
        self.registers.lock.modify(LOCK::LOCK::SET);
    }

    pub fn is_locked(&self) -> bool {
        self.registers.lock.is_set(LOCK::LOCK)
    }

    pub fn flag_get(&self, line: LineId) -> bool {
        self.pending().is_set(line)
    }

    pub fn flag_clear(&self, line: LineId) {
        self.pending().clear(line.mask());
    }

    pub fn interrupt_flag_get(&self, line: LineId) -> bool {
        self.flag_get(line)
    }

    pub fn interrupt_flag_clear(&self, line: LineId) {
        self.flag_clear(line);
    }

    pub fn set_client(&self, line: LineId, client: &'a dyn ExtiClient) {
        self.clients[line as usize].set(client);
    }

    /// Acknowledge every pending line and notify its client.
    ///
    /// Only the flags seen here are cleared, so a line that fires after
    /// the read stays pending for the next call.
    pub fn handle_interrupt(&self) {
        let pending = self.pending().take();
        trace!("EXTI: pending {:#010x}", pending);

        BitIndices::new(pending).for_each(|line| {
            if let Some(client) = self.clients.get(line) {
                client.map(|client| client.fired());
            }
        });
    }

    fn pending(&self) -> Pending<'_, ReadWrite<u32>> {
        Pending(&self.registers.pd)
    }
}

/// The pending register: reads report raised lines, writing 1 clears a line
/// and writing 0 leaves it alone.
struct Pending<'r, P>(&'r P);

impl<P> Pending<'_, P>
where
    P: Readable<T = u32, R = ()> + Writeable<T = u32, R = ()>,
{
    fn is_set(&self, line: LineId) -> bool {
        self.0.get() & line.mask() != 0
    }

    fn clear(&self, lines: u32) {
        self.0.set(lines);
    }

    /// Clear the lines raised right now and return them. Lines raised
    /// after the read are not cleared.
    fn take(&self) -> u32 {
        let lines = self.0.get();
        self.clear(lines);
        lines
    }
}

fn set_bits(register: &ReadWrite<u32>, bits: u32) {
    register.set(register.get() | bits);
}

fn clear_bits(register: &ReadWrite<u32>, bits: u32) {
    register.set(register.get() & !bits);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRegisters;
    use core::cell::Cell;

    const INTEN: usize = 0x00;
    const EVEN: usize = 0x04;
    const RTEN: usize = 0x08;
    const FTEN: usize = 0x0C;
    const SWIEV: usize = 0x10;
    const PD: usize = 0x14;
    const SECCFG: usize = 0x18;
    const PRIVCFG: usize = 0x1C;
    const LOCK_REG: usize = 0x20;

    /// A write-1-to-clear pending register. Lines in `late` are raised just
    /// after each read, as if they fired while the read was in flight.
    #[derive(Default)]
    struct ClearOnWrite {
        raised: Cell<u32>,
        late: Cell<u32>,
    }

    impl Readable for ClearOnWrite {
        type T = u32;
        type R = ();

        fn get(&self) -> u32 {
            let raised = self.raised.get();
            self.raised.set(raised | self.late.replace(0));
            raised
        }
    }

    impl Writeable for ClearOnWrite {
        type T = u32;
        type R = ();

        fn set(&self, value: u32) {
            self.raised.set(self.raised.get() & !value);
        }
    }

    #[derive(Default)]
    struct CountingClient {
        fired: Cell<usize>,
    }

    impl ExtiClient for CountingClient {
        fn fired(&self) {
            self.fired.set(self.fired.get() + 1);
        }
    }

    fn fake_exti() -> FakeRegisters<9> {
        FakeRegisters::new([0; 9])
    }

    #[test]
    fn register_offsets() {
        let mut fake = fake_exti();
        let regs: *const ExtiRegisters = fake.block::<ExtiRegisters>();
        let base = regs as usize;
        let regs = unsafe { &*regs };
        assert_eq!(core::ptr::addr_of!(regs.pd) as usize - base, PD);
        assert_eq!(core::ptr::addr_of!(regs.lock) as usize - base, LOCK_REG);
        assert_eq!(crate::EXTI_BASE & !crate::SECURE_ALIAS_OFFSET, 0x4001_3C00);
    }

    #[test]
    fn init_interrupt_rising() {
        let mut words = [0; 9];
        words[EVEN / 4] = 1 << 3;
        words[FTEN / 4] = 1 << 3;
        let mut fake = FakeRegisters::new(words);
        let exti = Exti::new(fake.block());

        exti.init(LineId::Exti3, ExtiMode::Interrupt, Trigger::Rising);

        assert_eq!(fake.word(INTEN), 1 << 3);
        assert_eq!(fake.word(EVEN), 0);
        assert_eq!(fake.word(RTEN), 1 << 3);
        assert_eq!(fake.word(FTEN), 0);
    }

    #[test]
    fn init_event_falling() {
        let mut words = [0; 9];
        words[INTEN / 4] = 0xFFFF_FFFF;
        words[RTEN / 4] = 0xFFFF_FFFF;
        let mut fake = FakeRegisters::new(words);
        let exti = Exti::new(fake.block());

        exti.init(LineId::Exti20, ExtiMode::Event, Trigger::Falling);

        assert_eq!(fake.word(INTEN), !(1 << 20));
        assert_eq!(fake.word(EVEN), 1 << 20);
        assert_eq!(fake.word(RTEN), !(1 << 20));
        assert_eq!(fake.word(FTEN), 1 << 20);
    }

    #[test]
    fn init_both_and_none() {
        let mut fake = fake_exti();
        let exti = Exti::new(fake.block());

        exti.init(LineId::Exti0, ExtiMode::Interrupt, Trigger::Both);
        exti.init(LineId::Exti28, ExtiMode::Interrupt, Trigger::Both);
        exti.init(LineId::Exti28, ExtiMode::Event, Trigger::None);

        assert_eq!(fake.word(INTEN), 1);
        assert_eq!(fake.word(EVEN), 1 << 28);
        assert_eq!(fake.word(RTEN), 1);
        assert_eq!(fake.word(FTEN), 1);
    }

    #[test]
    fn enable_then_disable_restores() {
        let initial = 0x0A5A_5A5A;
        let mut fake = FakeRegisters::new([initial; 9]);
        let exti = Exti::new(fake.block());

        for line in [LineId::Exti0, LineId::Exti1, LineId::Exti16, LineId::Exti28] {
            let was_set = initial & line.mask() != 0;

            exti.interrupt_enable(line);
            exti.event_enable(line);
            exti.software_interrupt_enable(line);
            exti.security_enable(line);
            exti.privilege_enable(line);
            for offset in [INTEN, EVEN, SWIEV, SECCFG, PRIVCFG] {
                assert_eq!(exti.registers_word(offset) & line.mask(), line.mask());
            }

            exti.interrupt_disable(line);
            exti.event_disable(line);
            exti.software_interrupt_disable(line);
            exti.security_disable(line);
            exti.privilege_disable(line);
            for offset in [INTEN, EVEN, SWIEV, SECCFG, PRIVCFG] {
                assert_eq!(exti.registers_word(offset) & line.mask(), 0);
            }

            if was_set {
                exti.interrupt_enable(line);
                exti.event_enable(line);
                exti.software_interrupt_enable(line);
                exti.security_enable(line);
                exti.privilege_enable(line);
            }
        }

        for offset in [INTEN, EVEN, SWIEV, SECCFG, PRIVCFG] {
            assert_eq!(fake.word(offset), initial);
        }
    }

    #[test]
    fn flags() {
        let mut words = [0; 9];
        words[PD / 4] = (1 << 5) | (1 << 22);
        let mut fake = FakeRegisters::new(words);
        let exti = Exti::new(fake.block());

        assert!(exti.flag_get(LineId::Exti5));
        assert!(exti.interrupt_flag_get(LineId::Exti22));
        assert!(!exti.flag_get(LineId::Exti6));

        exti.flag_clear(LineId::Exti5);
        assert_eq!(exti.registers_word(PD), 1 << 5);
        exti.interrupt_flag_clear(LineId::Exti22);

        assert_eq!(fake.word(PD), 1 << 22);
    }

    #[test]
    fn clear_by_writing_one() {
        let pd = ClearOnWrite::default();
        pd.raised.set(LineId::Exti5.mask() | LineId::Exti22.mask());
        let pending = Pending(&pd);

        assert!(pending.is_set(LineId::Exti5));
        pending.clear(LineId::Exti5.mask());
        assert!(!pending.is_set(LineId::Exti5));
        assert!(pending.is_set(LineId::Exti22));

        pending.clear(LineId::Exti22.mask());
        assert!(!pending.is_set(LineId::Exti22));
        assert_eq!(pd.raised.get(), 0);
    }

    #[test]
    fn take_leaves_late_lines_pending() {
        let pd = ClearOnWrite::default();
        pd.raised.set(LineId::Exti0.mask() | LineId::Exti13.mask());
        pd.late.set(LineId::Exti4.mask());
        let pending = Pending(&pd);

        assert_eq!(pending.take(), (1 << 0) | (1 << 13));
        assert!(pending.is_set(LineId::Exti4));
        assert!(!pending.is_set(LineId::Exti0));
        assert!(!pending.is_set(LineId::Exti13));

        assert_eq!(pending.take(), 1 << 4);
        assert_eq!(pd.raised.get(), 0);
    }

    #[test]
    fn deinit_values() {
        let mut fake = FakeRegisters::new([0xFFFF_FFFF; 9]);
        let exti = Exti::new(fake.block());

        exti.deinit();

        assert_eq!(fake.word(INTEN), 0x0F94_0000);
        for offset in [EVEN, RTEN, FTEN, SWIEV, SECCFG, PRIVCFG] {
            assert_eq!(fake.word(offset), 0, "offset {:#x}", offset);
        }
        assert_eq!(fake.word(PD), 0xFFFF_FFFF);
        assert_eq!(fake.word(LOCK_REG), 0xFFFF_FFFF);
    }

    #[test]
    fn lock() {
        let mut fake = fake_exti();
        let exti = Exti::new(fake.block());

        assert!(!exti.is_locked());
        exti.lock_enable();
        assert!(exti.is_locked());

        assert_eq!(fake.word(LOCK_REG), 1);
    }

    #[test]
    fn dispatch_pending_lines() {
        let mut words = [0; 9];
        words[PD / 4] = (1 << 1) | (1 << 13) | (1 << 28) | (1 << 30);
        let mut fake = FakeRegisters::new(words);
        let exti = Exti::new(fake.block());
        let button = CountingClient::default();
        let radio = CountingClient::default();
        let idle = CountingClient::default();

        exti.set_client(LineId::Exti1, &button);
        exti.set_client(LineId::Exti28, &radio);
        exti.set_client(LineId::Exti2, &idle);

        exti.handle_interrupt();

        assert_eq!(button.fired.get(), 1);
        assert_eq!(radio.fired.get(), 1);
        assert_eq!(idle.fired.get(), 0);
        // Plain memory keeps what was written; the silicon would clear it.
        assert_eq!(fake.word(PD), (1 << 1) | (1 << 13) | (1 << 28) | (1 << 30));
    }

    #[test]
    fn raw_conversions() {
        assert_eq!(LineId::try_from(28u8), Ok(LineId::Exti28));
        assert_eq!(LineId::try_from(29u8), Err(ErrorCode::INVAL));
        assert_eq!(LineId::Exti16.mask(), 0x0001_0000);
        assert_eq!(ExtiMode::try_from(1u32), Ok(ExtiMode::Event));
        assert_eq!(ExtiMode::try_from(2u32), Err(ErrorCode::INVAL));
        assert_eq!(Trigger::try_from(3u32), Ok(Trigger::None));
        assert_eq!(Trigger::try_from(4u32), Err(ErrorCode::INVAL));
    }

    impl Exti<'_> {
        fn registers_word(&self, offset: usize) -> u32 {
            let registers = [
                &self.registers.inten,
                &self.registers.even,
                &self.registers.rten,
                &self.registers.ften,
                &self.registers.swiev,
                &self.registers.pd,
                &self.registers.seccfg,
                &self.registers.privcfg,
            ];
            registers[offset / 4].get()
        }
    }
}
