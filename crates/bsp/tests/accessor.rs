//! End-to-end accessor behaviour over a small two-revision product, using
//! only the public API a product crate sees.

#![allow(clippy::unwrap_used, clippy::panic)]

use bsp::{
    Addressing, BoardAccess, BoardId, BoardIdentity, BoardMapping, BusHandle, BusType, Catalog,
    GlobalRegistry, LogicalId, LookupError, PeripheralDescriptor, PinId, Registry,
    SignalDescriptor, SignalFlags,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signal {
    CodecReset,
    HeadphoneDetect,
    SensorCs,
    LedEnable,
}

impl LogicalId for Signal {
    const COUNT: usize = 4;
    const ALL: &'static [Self] = &[
        Signal::CodecReset,
        Signal::HeadphoneDetect,
        Signal::SensorCs,
        Signal::LedEnable,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Signal::CodecReset => "codec_reset",
            Signal::HeadphoneDetect => "headphone_detect",
            Signal::SensorCs => "sensor_cs",
            Signal::LedEnable => "led_enable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Peripheral {
    Codec,
    Sensor,
}

impl LogicalId for Peripheral {
    const COUNT: usize = 2;
    const ALL: &'static [Self] = &[Peripheral::Codec, Peripheral::Sensor];

    fn index(self) -> usize {
        self as usize
    }

    fn name(self) -> &'static str {
        match self {
            Peripheral::Codec => "codec",
            Peripheral::Sensor => "sensor",
        }
    }
}

const fn sig(pin: u32, flags: SignalFlags) -> Option<SignalDescriptor> {
    match SignalDescriptor::new(PinId::new(pin), flags) {
        Ok(d) => Some(d),
        Err(_) => panic!("bad signal"),
    }
}

const fn dev(bus: BusHandle, addressing: Addressing<Signal>) -> Option<PeripheralDescriptor<Signal>> {
    match PeripheralDescriptor::new(bus, addressing) {
        Ok(d) => Some(d),
        Err(_) => panic!("bad peripheral"),
    }
}

// Proto: codec only, two signals declared.
const PROTO_SIGNALS: [Option<SignalDescriptor>; 2] = [
    sig(12, SignalFlags::ACTIVE_LOW),
    sig(13, SignalFlags::PULL_UP),
];
const PROTO_PERIPHERALS: [Option<PeripheralDescriptor<Signal>>; 1] =
    [dev(BusHandle::I2C1, Addressing::I2c { address: 0x1A })];
static PROTO: BoardMapping<'static, Signal, Peripheral> =
    BoardMapping::new(BoardId::new(10), "proto", &PROTO_SIGNALS, &PROTO_PERIPHERALS);

// Rev B: codec moved, headphone detect dropped, SPI sensor added.
const REV_B_SIGNALS: [Option<SignalDescriptor>; 4] = [
    sig(20, SignalFlags::ACTIVE_LOW.union(SignalFlags::PULL_UP)),
    None,
    sig(21, SignalFlags::ACTIVE_LOW),
    sig(21, SignalFlags::ACTIVE_HIGH),
];
const REV_B_PERIPHERALS: [Option<PeripheralDescriptor<Signal>>; 2] = [
    dev(BusHandle::I2C2, Addressing::I2c { address: 0x1B }),
    dev(BusHandle::SPI0, Addressing::Spi { chip_select: Signal::SensorCs }),
];
static REV_B: BoardMapping<'static, Signal, Peripheral> =
    BoardMapping::new(BoardId::new(11), "rev-b", &REV_B_SIGNALS, &REV_B_PERIPHERALS);

static BOARDS: [&BoardMapping<'static, Signal, Peripheral>; 2] = [&PROTO, &REV_B];
static CATALOG: Catalog<'static, Signal, Peripheral> = Catalog::new(&BOARDS);

struct IdEeprom(u16);

impl BoardIdentity for IdEeprom {
    type Error = core::convert::Infallible;

    fn read_board_id(&mut self) -> Result<BoardId, Self::Error> {
        Ok(BoardId::new(self.0))
    }
}

#[test]
fn catalog_is_consistent() {
    assert_eq!(CATALOG.validate(), Ok(()));
}

#[test]
fn same_driver_code_resolves_per_revision() {
    let mut proto = Registry::new();
    proto.select_detected(&mut IdEeprom(10), &CATALOG).unwrap();
    let mut rev_b = Registry::new();
    rev_b.select_detected(&mut IdEeprom(11), &CATALOG).unwrap();

    let codec = |r: &Registry<'_, Signal, Peripheral>| r.get_peripheral(Peripheral::Codec).unwrap();
    assert_eq!(codec(&proto).bus().decode(), (BusType::I2c, 1));
    assert_eq!(codec(&rev_b).bus().decode(), (BusType::I2c, 2));
    assert_eq!(codec(&rev_b).i2c_address(), Some(0x1B));
}

#[test]
fn lookups_are_total_over_declared_mapped_rows() {
    for mapping in CATALOG.iter() {
        let registry = Registry::with_mapping(mapping);
        for index in 0..mapping.signal_count() {
            assert_eq!(registry.get_signal_at(index).ok(), mapping.signal_at(index));
        }
        for (id, descriptor) in mapping.mapped_signals() {
            assert_eq!(registry.get_signal(id), Ok(descriptor));
        }
        for (id, descriptor) in mapping.mapped_peripherals() {
            assert_eq!(registry.get_peripheral(id), Ok(descriptor));
        }
    }
}

#[test]
fn rows_beyond_declared_size_are_not_found() {
    let registry = Registry::with_mapping(&PROTO);
    assert_eq!(registry.get_signal(Signal::SensorCs), Err(LookupError::NotFound));
    assert_eq!(registry.get_signal(Signal::LedEnable), Err(LookupError::NotFound));
    assert_eq!(registry.get_peripheral(Peripheral::Sensor), Err(LookupError::NotFound));
}

#[test]
fn one_past_the_last_id_is_not_found() {
    let registry = Registry::with_mapping(&REV_B);
    assert_eq!(registry.get_signal_at(Signal::COUNT), Err(LookupError::NotFound));
    assert_eq!(registry.get_peripheral_at(Peripheral::COUNT), Err(LookupError::NotFound));
}

#[test]
fn unmapped_row_inside_the_table_is_not_found() {
    let registry = Registry::with_mapping(&REV_B);
    assert_eq!(registry.get_signal(Signal::HeadphoneDetect), Err(LookupError::NotFound));
    assert!(registry.get_signal(Signal::LedEnable).is_ok());
}

#[test]
fn shared_pin_is_reported_for_both_signals() {
    let registry = Registry::with_mapping(&REV_B);
    let cs = registry.get_signal(Signal::SensorCs).unwrap();
    let led = registry.get_signal(Signal::LedEnable).unwrap();
    assert_eq!(cs.pin(), led.pin());
    assert_ne!(cs.polarity(), led.polarity());
}

#[test]
fn spi_chip_select_resolves_through_the_same_mapping() {
    let registry = Registry::with_mapping(&REV_B);
    let sensor = registry.get_peripheral(Peripheral::Sensor).unwrap();
    assert_eq!(sensor.i2c_address(), None);
    let cs = sensor.chip_select().unwrap();
    assert_eq!(registry.get_signal(cs).map(|d| d.pin()), Ok(PinId::new(21)));
}

#[test]
fn global_registry_serves_lookups_after_selection() {
    static BOARD: GlobalRegistry<Signal, Peripheral> = GlobalRegistry::new();

    assert_eq!(BOARD.get_signal(Signal::CodecReset), Err(LookupError::Unconfigured));
    BOARD.select_detected(&mut IdEeprom(11), &CATALOG).unwrap();
    let first = BOARD.get_peripheral(Peripheral::Sensor);
    assert_eq!(BOARD.get_peripheral(Peripheral::Sensor), first);
    assert_eq!(first.unwrap().bus(), BusHandle::SPI0);
}
