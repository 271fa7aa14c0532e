// src/bus/sim.rs

//! Simulated 1-Wire line with one optional slave device, driven entirely by
//! the master's pin operations and delays. Slots are classified by how long
//! the master held the line low.

use crate::common::{
    crc::calculate_crc8,
    hal_traits::{OneWirePin, OneWireTimer},
    FunctionCommand,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

/// Low time at or above which the slave sees a reset pulse.
const RESET_THRESHOLD_US: u64 = 480;
/// Low time below which a write slot carries a 1.
const WRITE_ONE_THRESHOLD_US: u64 = 15;
/// How long the slave pulls the line low to send a 0.
const SLAVE_LOW_US: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimError;

#[derive(Debug, Clone)]
pub(crate) struct SimDevice {
    pub rom: [u8; 8],
    pub scratchpad: [u8; 9],
    /// Temperature LSB, MSB and COUNT_REMAIN loaded by the next conversion.
    pub measured: [u8; 3],
    /// Overrides the conversion time, otherwise half the datasheet maximum.
    pub conversion_us: Option<u64>,
    pub never_finishes: bool,
    pub corrupt_crc: bool,
    pub zero_scratchpad: bool,
    pub parasite: bool,
    pending_done_at: Option<u64>,
}

impl SimDevice {
    pub fn ds18b20(rom: [u8; 8]) -> Self {
        Self::with_power_on_scratchpad(rom, [0x50, 0x05, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10])
            .measuring(0x91, 0x01, 0x0C)
    }

    pub fn ds18s20(rom: [u8; 8]) -> Self {
        Self::with_power_on_scratchpad(rom, [0xAA, 0x00, 0x4B, 0x46, 0xFF, 0xFF, 0x0C, 0x10])
            .measuring(0x32, 0x00, 0x0C)
    }

    fn with_power_on_scratchpad(rom: [u8; 8], data: [u8; 8]) -> Self {
        let mut scratchpad = [0u8; 9];
        scratchpad[..8].copy_from_slice(&data);
        scratchpad[8] = calculate_crc8(&data);
        SimDevice {
            rom,
            scratchpad,
            measured: [0; 3],
            conversion_us: None,
            never_finishes: false,
            corrupt_crc: false,
            zero_scratchpad: false,
            parasite: false,
            pending_done_at: None,
        }
    }

    pub fn measuring(mut self, lsb: u8, msb: u8, count_remain: u8) -> Self {
        self.measured = [lsb, msb, count_remain];
        self
    }

    fn is_ds18s20(&self) -> bool {
        self.rom[0] == 0x10
    }

    fn conversion_time_us(&self) -> u64 {
        self.conversion_us.unwrap_or_else(|| {
            let max = if self.is_ds18s20() {
                750_000
            } else {
                93_750 << ((self.scratchpad[4] >> 5) & 0b11)
            };
            max / 2
        })
    }

    fn refresh_crc(&mut self) {
        self.scratchpad[8] = calculate_crc8(&self.scratchpad[..8]);
    }

    fn apply_conversion(&mut self, now_us: u64) {
        if self.never_finishes {
            return;
        }
        if let Some(done_at) = self.pending_done_at {
            if now_us >= done_at {
                self.scratchpad[0] = self.measured[0];
                self.scratchpad[1] = self.measured[1];
                if self.is_ds18s20() {
                    self.scratchpad[6] = self.measured[2];
                }
                self.refresh_crc();
                self.pending_done_at = None;
            }
        }
    }

    fn conversion_done(&self, now_us: u64) -> bool {
        !self.never_finishes && self.pending_done_at.map_or(true, |t| now_us >= t)
    }

    fn transmitted_scratchpad(&self) -> [u8; 9] {
        if self.zero_scratchpad {
            return [0u8; 9];
        }
        let mut data = self.scratchpad;
        if self.corrupt_crc {
            data[8] ^= 0xFF;
        }
        data
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rx {
    RomCommand,
    MatchRom,
    Function,
    WriteScratchpad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterTx {
    Function,
    Idle,
}

#[derive(Debug, Clone)]
enum DeviceState {
    Idle,
    Receiving { purpose: Rx, buf: [u8; 8], expected: usize, bits: usize },
    Transmitting { data: [u8; 9], len: usize, bits: usize, then: AfterTx },
    Converting,
    PowerSupply,
}

fn receiving(purpose: Rx, expected: usize) -> DeviceState {
    DeviceState::Receiving { purpose, buf: [0u8; 8], expected, bits: 0 }
}

#[derive(Debug)]
pub(crate) struct SimBus {
    pub now_us: u64,
    pub last_low_us: u64,
    pub stuck_low: bool,
    pub fail_io: bool,
    pub device: Option<SimDevice>,
    pub resets: u32,
    pub conversions: u32,
    pub scratchpad_writes: u32,
    pub function_commands: Vec<u8>,
    master_low_since: Option<u64>,
    hold_from: u64,
    hold_until: u64,
    state: DeviceState,
}

impl SimBus {
    pub fn master_low(&self) -> bool {
        self.master_low_since.is_some()
    }

    fn line_high(&self) -> bool {
        let slave_low = self.now_us >= self.hold_from && self.now_us < self.hold_until;
        !(self.master_low() || self.stuck_low || slave_low)
    }

    fn hold_low(&mut self, from: u64, until: u64) {
        self.hold_from = from;
        self.hold_until = until;
    }

    fn on_release(&mut self) {
        let Some(since) = self.master_low_since.take() else {
            return;
        };
        let low = self.now_us - since;
        self.last_low_us = low;

        if low >= RESET_THRESHOLD_US {
            self.resets += 1;
            if self.device.is_some() {
                // Presence pulse
                self.hold_low(self.now_us + 15, self.now_us + 150);
                self.state = receiving(Rx::RomCommand, 1);
            }
            return;
        }

        let now = self.now_us;
        let state = core::mem::replace(&mut self.state, DeviceState::Idle);
        self.state = match state {
            DeviceState::Idle => DeviceState::Idle,
            DeviceState::Receiving { purpose, mut buf, expected, bits } => {
                if low < WRITE_ONE_THRESHOLD_US {
                    buf[bits / 8] |= 1 << (bits % 8);
                }
                let bits = bits + 1;
                if bits == expected * 8 {
                    self.on_received(purpose, &buf[..expected])
                } else {
                    DeviceState::Receiving { purpose, buf, expected, bits }
                }
            }
            DeviceState::Transmitting { data, len, bits, then } => {
                if (data[bits / 8] >> (bits % 8)) & 0x01 == 0 {
                    self.hold_low(now, now + SLAVE_LOW_US);
                }
                let bits = bits + 1;
                if bits < len * 8 {
                    DeviceState::Transmitting { data, len, bits, then }
                } else if then == AfterTx::Function {
                    receiving(Rx::Function, 1)
                } else {
                    DeviceState::Idle
                }
            }
            DeviceState::Converting => {
                // A parasite-powered device draws its power from the line and cannot answer
                let busy = self
                    .device
                    .as_ref()
                    .map_or(false, |d| !d.parasite && !d.conversion_done(now));
                if busy {
                    self.hold_low(now, now + SLAVE_LOW_US);
                }
                DeviceState::Converting
            }
            DeviceState::PowerSupply => {
                if self.device.as_ref().map_or(false, |d| d.parasite) {
                    self.hold_low(now, now + SLAVE_LOW_US);
                }
                DeviceState::Idle
            }
        };
    }

    fn on_received(&mut self, purpose: Rx, bytes: &[u8]) -> DeviceState {
        let now = self.now_us;
        let Some(device) = self.device.as_mut() else {
            return DeviceState::Idle;
        };

        match purpose {
            Rx::RomCommand => match bytes[0] {
                0x33 => {
                    let mut data = [0u8; 9];
                    data[..8].copy_from_slice(&device.rom);
                    DeviceState::Transmitting { data, len: 8, bits: 0, then: AfterTx::Function }
                }
                0x55 => receiving(Rx::MatchRom, 8),
                0xCC => receiving(Rx::Function, 1),
                _ => DeviceState::Idle,
            },
            Rx::MatchRom => {
                if bytes == device.rom {
                    receiving(Rx::Function, 1)
                } else {
                    DeviceState::Idle
                }
            }
            Rx::Function => {
                self.function_commands.push(bytes[0]);
                match FunctionCommand::from_u8(bytes[0]) {
                    Some(FunctionCommand::ConvertT) => {
                        self.conversions += 1;
                        device.pending_done_at = Some(now + device.conversion_time_us());
                        DeviceState::Converting
                    }
                    Some(FunctionCommand::ReadScratchpad) => {
                        device.apply_conversion(now);
                        let data = device.transmitted_scratchpad();
                        DeviceState::Transmitting { data, len: 9, bits: 0, then: AfterTx::Idle }
                    }
                    Some(FunctionCommand::WriteScratchpad) => {
                        let len = if device.is_ds18s20() { 2 } else { 3 };
                        receiving(Rx::WriteScratchpad, len)
                    }
                    Some(FunctionCommand::ReadPowerSupply) => DeviceState::PowerSupply,
                    None => DeviceState::Idle,
                }
            }
            Rx::WriteScratchpad => {
                device.scratchpad[2] = bytes[0];
                device.scratchpad[3] = bytes[1];
                if let Some(config) = bytes.get(2) {
                    // Only the resolution bits are writable
                    device.scratchpad[4] = (config & 0b0110_0000) | 0b0001_1111;
                }
                device.refresh_crc();
                self.scratchpad_writes += 1;
                DeviceState::Idle
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SimPin {
    sim: Rc<RefCell<SimBus>>,
}

#[derive(Debug, Clone)]
pub(crate) struct SimTimer {
    sim: Rc<RefCell<SimBus>>,
}

impl OneWirePin for SimPin {
    type Error = SimError;

    fn drive_low(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.sim.borrow_mut();
        if sim.fail_io {
            return Err(SimError);
        }
        if sim.master_low_since.is_none() {
            sim.master_low_since = Some(sim.now_us);
        }
        Ok(())
    }

    fn release(&mut self) -> Result<(), Self::Error> {
        let mut sim = self.sim.borrow_mut();
        if sim.fail_io {
            return Err(SimError);
        }
        sim.on_release();
        Ok(())
    }

    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let sim = self.sim.borrow();
        if sim.fail_io {
            return Err(SimError);
        }
        Ok(sim.line_high())
    }
}

impl OneWireTimer for SimTimer {
    fn delay_us(&mut self, us: u32) {
        self.sim.borrow_mut().now_us += us as u64;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sim.borrow_mut().now_us += ms as u64 * 1_000;
    }
}

/// Builds a pin/timer pair sharing one simulated line.
pub(crate) fn bus(device: Option<SimDevice>) -> (SimPin, SimTimer, Rc<RefCell<SimBus>>) {
    let sim = Rc::new(RefCell::new(SimBus {
        now_us: 0,
        last_low_us: 0,
        stuck_low: false,
        fail_io: false,
        device,
        resets: 0,
        conversions: 0,
        scratchpad_writes: 0,
        function_commands: Vec::new(),
        master_low_since: None,
        hold_from: 0,
        hold_until: 0,
        state: DeviceState::Idle,
    }));
    (SimPin { sim: sim.clone() }, SimTimer { sim: sim.clone() }, sim)
}
