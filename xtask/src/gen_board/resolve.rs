//! Turn a parsed board file into validated descriptor tables.
//!
//! Names resolve against the product's id enumerations and every row goes
//! through the same constructors the firmware's `const` tables use, so a
//! file that resolves here generates a module that builds.

use anyhow::{anyhow, bail, ensure, Context, Result};
use bsp::{
    Addressing, BoardId, BoardMapping, BusHandle, BusType, LogicalId, PeripheralDescriptor,
    PinId, SignalDescriptor, SignalFlags,
};
use soul_board::{PeripheralId, SignalId};

use super::schema::{BiasEntry, BoardFile, PeripheralEntry, SignalEntry};

/// A board revision ready to emit.
#[derive(Debug)]
pub struct Board {
    pub id: u16,
    pub name: String,
    pub signals: Vec<Option<SignalDescriptor>>,
    pub peripherals: Vec<Option<PeripheralDescriptor<SignalId>>>,
}

impl Board {
    /// Static item name, e.g. `EVT2`.
    pub fn static_name(&self) -> String {
        self.name.to_ascii_uppercase()
    }
}

pub fn resolve(file: &BoardFile) -> Result<Board> {
    let name = &file.board.name;
    ensure!(
        is_identifier(name),
        "board name {name:?} must be lower-case letters, digits and '_', starting with a letter"
    );

    let mut signals = vec![None; SignalId::COUNT];
    for (key, entry) in &file.signals {
        let id = SignalId::from_name(key).ok_or_else(|| anyhow!("unknown signal {key:?}"))?;
        let descriptor = signal(entry).with_context(|| format!("signal {key:?}"))?;
        if let Some(slot) = signals.get_mut(id.index()) {
            *slot = Some(descriptor);
        }
    }

    let mut peripherals = vec![None; PeripheralId::COUNT];
    for (key, entry) in &file.peripherals {
        let id =
            PeripheralId::from_name(key).ok_or_else(|| anyhow!("unknown peripheral {key:?}"))?;
        let descriptor = peripheral(entry).with_context(|| format!("peripheral {key:?}"))?;
        if let Some(slot) = peripherals.get_mut(id.index()) {
            *slot = Some(descriptor);
        }
    }

    let signals = declare(signals, file.board.signal_count, "signal_count", |i| {
        SignalId::from_index(i).map(SignalId::name)
    })?;
    let peripherals = declare(peripherals, file.board.peripheral_count, "peripheral_count", |i| {
        PeripheralId::from_index(i).map(PeripheralId::name)
    })?;

    BoardMapping::<SignalId, PeripheralId>::new(
        BoardId::new(file.board.id),
        "candidate",
        &signals,
        &peripherals,
    )
    .validate()
    .with_context(|| format!("board {name:?}"))?;

    Ok(Board {
        id: file.board.id,
        name: name.clone(),
        signals,
        peripherals,
    })
}

fn signal(entry: &SignalEntry) -> Result<SignalDescriptor> {
    let mut flags = SignalFlags::ACTIVE_HIGH;
    if entry.active_low {
        flags |= SignalFlags::ACTIVE_LOW;
    }
    match entry.bias {
        BiasEntry::None => {}
        BiasEntry::PullUp => flags |= SignalFlags::PULL_UP,
        BiasEntry::PullDown => flags |= SignalFlags::PULL_DOWN,
    }
    Ok(SignalDescriptor::new(PinId::new(entry.pin), flags)?)
}

fn peripheral(entry: &PeripheralEntry) -> Result<PeripheralDescriptor<SignalId>> {
    let bus = parse_bus(&entry.bus)?;
    let addressing = match (bus.bus_type(), entry.address, entry.chip_select.as_deref()) {
        (BusType::I2c, Some(address), None) => Addressing::I2c { address },
        (BusType::I3c, Some(address), None) => Addressing::I3c { address },
        (BusType::Spi, None, Some(cs)) => Addressing::Spi {
            chip_select: SignalId::from_name(cs)
                .ok_or_else(|| anyhow!("unknown chip-select signal {cs:?}"))?,
        },
        (BusType::OneWire, None, None) => Addressing::OneWire,
        (BusType::Usb, None, None) => Addressing::Usb,
        (BusType::I2c | BusType::I3c, _, _) => {
            bail!("{} devices take exactly an `address`", bus.bus_type())
        }
        (BusType::Spi, _, _) => bail!("spi devices take exactly a `chip_select`"),
        (BusType::OneWire | BusType::Usb, _, _) => {
            bail!("{} devices take no addressing keys", bus.bus_type())
        }
    };
    Ok(PeripheralDescriptor::new(bus, addressing)?)
}

/// Parse `"i2c0"`, `"spi1"`, `"onewire0"`...
pub fn parse_bus(text: &str) -> Result<BusHandle> {
    // The index is the trailing digit run: the `2` in `i2c0` is part of the type.
    let type_name = text.trim_end_matches(|c: char| c.is_ascii_digit());
    let index = text.strip_prefix(type_name).unwrap_or_default();
    ensure!(!index.is_empty(), "bus {text:?} has no controller index");
    let bus_type =
        BusType::from_name(type_name).ok_or_else(|| anyhow!("unknown bus type {type_name:?}"))?;
    let index: u8 = index
        .parse()
        .with_context(|| format!("bad controller index in bus {text:?}"))?;
    Ok(BusHandle::new(bus_type, index)?)
}

/// Trim a full-range table to its declared size.
fn declare<T>(
    mut rows: Vec<Option<T>>,
    declared: Option<usize>,
    key: &str,
    name_of: impl Fn(usize) -> Option<&'static str>,
) -> Result<Vec<Option<T>>> {
    let mapped = rows.iter().rposition(Option::is_some).map_or(0, |last| last.saturating_add(1));
    match declared {
        None => rows.truncate(mapped),
        Some(size) if size < mapped => {
            let hidden = mapped.saturating_sub(1);
            bail!(
                "{key} = {size} hides mapped entry {:?}",
                name_of(hidden).unwrap_or("?")
            );
        }
        Some(size) => rows.resize_with(size, || None),
    }
    Ok(rows)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    fn resolve_str(text: &str) -> Result<Board> {
        resolve(&BoardFile::parse(text)?)
    }

    fn error_of(text: &str) -> String {
        format!("{:#}", resolve_str(text).unwrap_err())
    }

    const HEADER: &str = "[board]\nid = 7\nname = \"proto\"\n";

    #[test]
    fn declared_size_is_last_mapped_row_plus_one() {
        let board = resolve_str(&format!(
            "{HEADER}[signals]\nusb_reset_n = {{ pin = 2 }}\n[peripherals]\naudio_amp_right = {{ bus = \"i2c2\", address = 0x20 }}\n"
        ))
        .unwrap();
        assert_eq!(board.signals.len(), SignalId::UsbResetN.index() + 1);
        assert_eq!(board.signals[0], None);
        assert_eq!(board.peripherals.len(), 2);
        assert_eq!(board.peripherals[1].unwrap().bus(), BusHandle::I2C2);
    }

    #[test]
    fn explicit_count_pads_with_unmapped_rows() {
        let board = resolve_str(
            "[board]\nid = 1\nname = \"pad\"\nsignal_count = 5\n[signals]\namp_left_reset = { pin = 0 }\n",
        )
        .unwrap();
        assert_eq!(board.signals.len(), 5);
        assert!(board.peripherals.is_empty());
    }

    #[test]
    fn count_hiding_a_mapped_row_is_rejected() {
        let err = error_of(
            "[board]\nid = 1\nname = \"short\"\nsignal_count = 2\n[signals]\nbutton_n = { pin = 5 }\n",
        );
        assert!(err.contains("hides mapped entry \"button_n\""), "{err}");
    }

    #[test]
    fn count_beyond_id_range_is_rejected() {
        let err = error_of("[board]\nid = 1\nname = \"long\"\nsignal_count = 11\n");
        assert!(err.contains("signal table declares 11 rows"), "{err}");
    }

    #[test]
    fn flags_compose_from_polarity_and_bias() {
        let board = resolve_str(&format!(
            "{HEADER}[signals]\namp_left_reset = {{ pin = 0, active_low = true, bias = \"pull-up\" }}\n"
        ))
        .unwrap();
        assert_eq!(board.signals[0].unwrap().flags().bits(), 0b01_0001);
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert!(error_of(&format!("{HEADER}[signals]\nled = {{ pin = 1 }}\n")).contains("unknown signal"));
        assert!(error_of(&format!("{HEADER}[peripherals]\ndac = {{ bus = \"i2c0\", address = 1 }}\n"))
            .contains("unknown peripheral"));
        assert!(error_of(&format!(
            "{HEADER}[peripherals]\naudio_amp_left = {{ bus = \"can0\", address = 1 }}\n"
        ))
        .contains("unknown bus type"));
    }

    #[test]
    fn unknown_bias_is_rejected() {
        assert!(BoardFile::parse(&format!(
            "{HEADER}[signals]\nbutton_n = {{ pin = 5, bias = \"pull-sideways\" }}\n"
        ))
        .is_err());
    }

    #[test]
    fn bus_index_past_field_width_is_rejected() {
        let err = error_of(&format!(
            "{HEADER}[peripherals]\naudio_amp_left = {{ bus = \"i2c16\", address = 0x45 }}\n"
        ));
        assert!(err.contains("exceeds maximum 15"), "{err}");
    }

    #[test]
    fn payload_must_match_bus_type() {
        let err = error_of(&format!(
            "{HEADER}[peripherals]\naudio_amp_left = {{ bus = \"spi0\", address = 0x45 }}\n"
        ));
        assert!(err.contains("exactly a `chip_select`"), "{err}");
        let err = error_of(&format!(
            "{HEADER}[peripherals]\naudio_amp_left = {{ bus = \"i2c0\", chip_select = \"button_n\" }}\n"
        ));
        assert!(err.contains("exactly an `address`"), "{err}");
    }

    #[test]
    fn chip_select_must_be_mapped_on_the_same_board() {
        let err = error_of(&format!(
            "{HEADER}[peripherals]\nmotor_driver = {{ bus = \"spi0\", chip_select = \"motor_driver_cs\" }}\n"
        ));
        assert!(err.contains("chip-select motor_driver_cs of motor_driver"), "{err}");
    }

    #[test]
    fn board_name_must_be_an_identifier() {
        assert!(error_of("[board]\nid = 1\nname = \"Evt-3\"\n").contains("board name"));
    }

    #[test]
    fn bus_names_parse() {
        assert_eq!(parse_bus("i2c0").unwrap(), BusHandle::I2C0);
        assert_eq!(parse_bus("spi0").unwrap(), BusHandle::SPI0);
        assert_eq!(parse_bus("usb15").unwrap().decode(), (BusType::Usb, 15));
        assert!(parse_bus("i2c").is_err());
        assert!(parse_bus("i2c300").is_err());
    }

    #[test]
    fn digits_inside_the_type_name_stay_in_the_type() {
        assert_eq!(parse_bus("i2c1").unwrap(), BusHandle::I2C1);
        assert_eq!(parse_bus("i2c12").unwrap().decode(), (BusType::I2c, 12));
        assert_eq!(parse_bus("i3c0").unwrap().decode(), (BusType::I3c, 0));
        assert_eq!(parse_bus("onewire3").unwrap().decode(), (BusType::OneWire, 3));
        let err = format!("{:#}", parse_bus("i3c").unwrap_err());
        assert!(err.contains("no controller index"), "{err}");
        let err = format!("{:#}", parse_bus("ic0").unwrap_err());
        assert!(err.contains("unknown bus type \"ic\""), "{err}");
    }
}
