//! Fixture ids and board revisions shared by the unit tests.

#![allow(clippy::panic)]

use crate::bus::BusHandle;
use crate::descriptor::{Addressing, PeripheralDescriptor, PinId, SignalDescriptor, SignalFlags};
use crate::id::{BoardId, LogicalId};
use crate::mapping::BoardMapping;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sig {
    Reset,
    Enable,
    ChipSelect,
}

impl LogicalId for Sig {
    const COUNT: usize = 3;
    const ALL: &'static [Self] = &[Sig::Reset, Sig::Enable, Sig::ChipSelect];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Sig::Reset => "reset",
            Sig::Enable => "enable",
            Sig::ChipSelect => "chip_select",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dev {
    Amp,
    Flash,
}

impl LogicalId for Dev {
    const COUNT: usize = 2;
    const ALL: &'static [Self] = &[Dev::Amp, Dev::Flash];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Dev::Amp => "amp",
            Dev::Flash => "flash",
        }
    }
}

pub const fn sig(pin: u32, flags: SignalFlags) -> Option<SignalDescriptor> {
    match SignalDescriptor::new(PinId::new(pin), flags) {
        Ok(d) => Some(d),
        Err(_) => panic!("invalid signal fixture"),
    }
}

pub const fn i2c(bus: BusHandle, address: u8) -> Option<PeripheralDescriptor<Sig>> {
    match PeripheralDescriptor::new(bus, Addressing::I2c { address }) {
        Ok(d) => Some(d),
        Err(_) => panic!("invalid i2c fixture"),
    }
}

pub const fn spi(bus: BusHandle, chip_select: Sig) -> Option<PeripheralDescriptor<Sig>> {
    match PeripheralDescriptor::new(bus, Addressing::Spi { chip_select }) {
        Ok(d) => Some(d),
        Err(_) => panic!("invalid spi fixture"),
    }
}

pub type TestMapping = BoardMapping<'static, Sig, Dev>;

const REV_A_SIGNALS: [Option<SignalDescriptor>; 3] = [
    sig(0, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)),
    None,
    sig(7, SignalFlags::ACTIVE_LOW),
];
const REV_A_PERIPHERALS: [Option<PeripheralDescriptor<Sig>>; 2] = [
    i2c(BusHandle::I2C0, 0x45),
    spi(BusHandle::SPI0, Sig::ChipSelect),
];

/// Fully populated revision with one unmapped row.
pub static REV_A: TestMapping =
    BoardMapping::new(BoardId::new(1), "rev-a", &REV_A_SIGNALS, &REV_A_PERIPHERALS);

const REV_B_SIGNALS: [Option<SignalDescriptor>; 1] = [sig(0, SignalFlags::ACTIVE_HIGH)];

/// Short revision: one signal row, no peripherals.
pub static REV_B: TestMapping = BoardMapping::new(BoardId::new(2), "rev-b", &REV_B_SIGNALS, &[]);

/// Revision with nothing wired.
pub static EMPTY: TestMapping = BoardMapping::new(BoardId::new(3), "empty", &[], &[]);
