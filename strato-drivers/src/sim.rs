//! Simulated two-wire controller for host tests
//!
//! Emulates the controller's status-code state machine with a single
//! register-file device attached. Pointer writes and reads auto-increment
//! like the real sensor. Faults are injected per action index: every
//! `issue()` call (stop included) counts as one action.

use heapless::Vec;
use strato_core::bme280::{registers, CalibrationParameters};
use strato_hal::twi::{BitRate, TwiCommand, TwiController};

/// Address the simulated sensor answers to
pub const SENSOR_ADDRESS: u8 = 0x77;

/// Datasheet worked-example coefficients
pub const DATASHEET_CALIBRATION: CalibrationParameters = CalibrationParameters {
    t1: 27504,
    t2: 26435,
    t3: -1000,
    p1: 36477,
    p2: -10685,
    p3: 3024,
    p4: 2855,
    p5: 140,
    p6: -7,
    p7: 15500,
    p8: -14600,
    p9: 6000,
};

/// Raw temperature 519888 as stored in the device
pub const RAW_TEMPERATURE_BYTES: [u8; 3] = [0x7E, 0xED, 0x00];
/// Raw pressure 415148 as stored in the device
pub const RAW_PRESSURE_BYTES: [u8; 3] = [0x65, 0x5A, 0xC0];

/// Prescaler bits the simulated status register always reports
const PRESCALER_NOISE: u8 = 0b11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Stop,
    Write(u8),
    Read { ack: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selected {
    None,
    Write,
    Read,
}

pub struct SimController {
    pub device_address: u8,
    pub registers: [u8; 256],
    pub events: Vec<BusEvent, 1024>,
    pub bit_rate: Option<BitRate>,
    pub enabled: bool,
    started: bool,
    expecting_header: bool,
    selected: Selected,
    pointer_set: bool,
    pointer: u8,
    status: u8,
    data: u8,
    complete: bool,
    stop_pending: bool,
    actions: usize,
    status_override: Option<(usize, u8)>,
    hang_at: Option<usize>,
}

impl SimController {
    pub fn new(device_address: u8) -> Self {
        Self {
            device_address,
            registers: [0; 256],
            events: Vec::new(),
            bit_rate: None,
            enabled: false,
            started: false,
            expecting_header: false,
            selected: Selected::None,
            pointer_set: false,
            pointer: 0,
            status: 0xF8,
            data: 0,
            complete: false,
            stop_pending: false,
            actions: 0,
            status_override: None,
            hang_at: None,
        }
    }

    /// A sensor at [`SENSOR_ADDRESS`] loaded with the datasheet example
    pub fn bme280() -> Self {
        let mut sim = Self::new(SENSOR_ADDRESS);
        let calibration = DATASHEET_CALIBRATION.to_bytes();
        sim.load(registers::CALIBRATION, &calibration);
        sim.load(registers::CHIP_ID, &[registers::CHIP_ID_BME280]);
        sim.load(registers::PRESS_MSB, &RAW_PRESSURE_BYTES);
        sim.load(registers::TEMP_MSB, &RAW_TEMPERATURE_BYTES);
        sim
    }

    pub fn load(&mut self, register: u8, bytes: &[u8]) {
        let start = register as usize;
        self.registers[start..start + bytes.len()].copy_from_slice(bytes);
    }

    /// Report `status` instead of the real code after action `index`
    pub fn override_status(&mut self, index: usize, status: u8) {
        self.status_override = Some((index, status));
    }

    /// Never complete action `index`
    pub fn hang_at(&mut self, index: usize) {
        self.hang_at = Some(index);
    }

    fn transmit(&mut self, byte: u8) {
        if self.expecting_header {
            self.expecting_header = false;
            let read = byte & 1 == 1;
            if byte >> 1 == self.device_address {
                self.selected = if read { Selected::Read } else { Selected::Write };
                self.pointer_set = self.pointer_set && read;
                self.status = if read { 0x40 } else { 0x18 };
            } else {
                self.selected = Selected::None;
                self.status = if read { 0x48 } else { 0x20 };
            }
            return;
        }

        if self.selected != Selected::Write {
            self.status = 0x30;
            return;
        }
        if self.pointer_set {
            self.registers[self.pointer as usize] = byte;
            self.pointer = self.pointer.wrapping_add(1);
        } else {
            self.pointer = byte;
            self.pointer_set = true;
        }
        self.status = 0x28;
    }

    fn receive(&mut self, ack: bool) {
        self.data = if self.selected == Selected::Read {
            let byte = self.registers[self.pointer as usize];
            self.pointer = self.pointer.wrapping_add(1);
            byte
        } else {
            0xFF
        };
        self.status = if ack { 0x50 } else { 0x58 };
    }
}

impl TwiController for SimController {
    fn configure(&mut self, bit_rate: BitRate) {
        self.bit_rate = Some(bit_rate);
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn issue(&mut self, command: TwiCommand) {
        let index = self.actions;
        self.actions += 1;
        let hung = self.hang_at == Some(index);

        match command {
            TwiCommand::Start => {
                let _ = self.events.push(BusEvent::Start);
                self.status = if self.started { 0x10 } else { 0x08 };
                self.started = true;
                self.expecting_header = true;
                self.selected = Selected::None;
            }
            TwiCommand::Stop => {
                let _ = self.events.push(BusEvent::Stop);
                self.started = false;
                self.expecting_header = false;
                self.selected = Selected::None;
                self.pointer_set = false;
                self.status = 0xF8;
                self.stop_pending = hung;
                return;
            }
            TwiCommand::Transmit => {
                let _ = self.events.push(BusEvent::Write(self.data));
                self.transmit(self.data);
            }
            TwiCommand::ReceiveAck | TwiCommand::ReceiveNack => {
                let ack = command == TwiCommand::ReceiveAck;
                let _ = self.events.push(BusEvent::Read { ack });
                self.receive(ack);
            }
        }

        if let Some((at, status)) = self.status_override {
            if at == index {
                self.status = status;
            }
        }
        self.complete = !hung;
    }

    fn is_complete(&self) -> bool {
        self.complete
    }

    fn stop_pending(&self) -> bool {
        self.stop_pending
    }

    fn load_data(&mut self, byte: u8) {
        self.data = byte;
    }

    fn data(&self) -> u8 {
        self.data
    }

    fn raw_status(&self) -> u8 {
        self.status | PRESCALER_NOISE
    }
}
