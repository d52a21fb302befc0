//! Render a resolved board as a `soul-board` board module.

use std::collections::BTreeSet;
use std::fmt::{self, Write as _};

use bsp::{Addressing, BusHandle, LogicalId, PeripheralDescriptor, SignalDescriptor, SignalFlags};
use soul_board::{PeripheralId, SignalId};

use super::resolve::Board;

/// Rust source of the board module. `source` names the input file in the header.
pub fn render(board: &Board, source: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_module(&mut out, board, source)?;
    Ok(out)
}

fn write_module(out: &mut String, board: &Board, source: &str) -> fmt::Result {
    let mut bsp_items = BTreeSet::from(["BoardId", "BoardMapping", "PeripheralDescriptor", "SignalDescriptor"]);
    let mut helpers = BTreeSet::new();
    if board.signals.iter().any(Option::is_some) {
        bsp_items.insert("SignalFlags");
        helpers.insert("signal");
    }
    if board.peripherals.iter().any(Option::is_some) {
        bsp_items.extend(["Addressing", "BusType"]);
        helpers.extend(["bus", "peripheral"]);
    }

    let title = board.static_name();
    writeln!(out, "//! {title} board mapping")?;
    writeln!(out, "//!")?;
    writeln!(out, "//! Generated by `cargo xtask gen-board` from `{source}`. Do not edit.")?;
    writeln!(out)?;
    writeln!(out, "use bsp::{{{}}};", join(&bsp_items))?;
    writeln!(out)?;
    if !helpers.is_empty() {
        writeln!(out, "use super::{{{}}};", join(&helpers))?;
    }
    writeln!(out, "use crate::{{PeripheralId, SignalId}};")?;
    writeln!(out)?;

    writeln!(out, "const SIGNALS: [Option<SignalDescriptor>; {}] = [", board.signals.len())?;
    for (index, row) in board.signals.iter().enumerate() {
        let name = SignalId::from_index(index).map_or("?", SignalId::name);
        writeln!(out, "    {}, // {name}", signal_expr(row.as_ref()))?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(
        out,
        "const PERIPHERALS: [Option<PeripheralDescriptor<SignalId>>; {}] = [",
        board.peripherals.len()
    )?;
    for (index, row) in board.peripherals.iter().enumerate() {
        let name = PeripheralId::from_index(index).map_or("?", PeripheralId::name);
        writeln!(out, "    {}, // {name}", peripheral_expr(row.as_ref()))?;
    }
    writeln!(out, "];")?;
    writeln!(out)?;

    writeln!(out, "/// {title} (board id {})", board.id)?;
    writeln!(out, "pub static {title}: BoardMapping<'static, SignalId, PeripheralId> =")?;
    writeln!(
        out,
        "    BoardMapping::new(BoardId::new({}), \"{}\", &SIGNALS, &PERIPHERALS);",
        board.id, board.name
    )
}

fn join(items: &BTreeSet<&str>) -> String {
    items.iter().copied().collect::<Vec<_>>().join(", ")
}

fn signal_expr(row: Option<&SignalDescriptor>) -> String {
    let Some(descriptor) = row else {
        return "None".to_string();
    };
    format!("signal({}, {})", descriptor.pin().get(), flags_expr(descriptor.flags()))
}

fn flags_expr(flags: SignalFlags) -> String {
    let mut names = flags.iter_names().map(|(name, _)| format!("SignalFlags::{name}"));
    let Some(first) = names.next() else {
        return "SignalFlags::ACTIVE_HIGH".to_string();
    };
    names.fold(first, |acc, next| format!("{acc}.union({next})"))
}

fn peripheral_expr(row: Option<&PeripheralDescriptor<SignalId>>) -> String {
    let Some(descriptor) = row else {
        return "None".to_string();
    };
    format!(
        "peripheral({}, {})",
        bus_expr(descriptor.bus()),
        addressing_expr(descriptor.addressing())
    )
}

fn bus_expr(bus: BusHandle) -> String {
    let (bus_type, index) = bus.decode();
    format!("bus(BusType::{bus_type:?}, {index})")
}

fn addressing_expr(addressing: Addressing<SignalId>) -> String {
    match addressing {
        Addressing::I2c { address } => format!("Addressing::I2c {{ address: {address:#04x} }}"),
        Addressing::I3c { address } => format!("Addressing::I3c {{ address: {address:#04x} }}"),
        Addressing::Spi { chip_select } => {
            format!("Addressing::Spi {{ chip_select: SignalId::{chip_select:?} }}")
        }
        Addressing::OneWire => "Addressing::OneWire".to_string(),
        Addressing::Usb => "Addressing::Usb".to_string(),
    }
}
