//! Board description file format.
//!
//! ```toml
//! [board]
//! id = 2
//! name = "evt2"
//!
//! [signals]
//! amp_left_reset = { pin = 0, active_low = true, bias = "pull-up" }
//!
//! [peripherals]
//! audio_amp_left = { bus = "i2c0", address = 0x45 }
//! motor_driver   = { bus = "spi0", chip_select = "motor_driver_cs" }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardFile {
    pub board: BoardSection,
    #[serde(default)]
    pub signals: BTreeMap<String, SignalEntry>,
    #[serde(default)]
    pub peripherals: BTreeMap<String, PeripheralEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSection {
    pub id: u16,
    pub name: String,
    /// Overrides the declared signal table size.
    pub signal_count: Option<usize>,
    /// Overrides the declared peripheral table size.
    pub peripheral_count: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignalEntry {
    pub pin: u32,
    #[serde(default)]
    pub active_low: bool,
    #[serde(default)]
    pub bias: BiasEntry,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BiasEntry {
    #[default]
    None,
    PullUp,
    PullDown,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeripheralEntry {
    /// Bus type name followed by controller index, e.g. `"i2c0"`.
    pub bus: String,
    pub address: Option<u8>,
    pub chip_select: Option<String>,
}

impl BoardFile {
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
