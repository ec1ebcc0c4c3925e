//! Register read/write accessors over device state

use super::addr::{Register, UNIMPLEMENTED};
use crate::state::bits::{flag, pack_flags, pack_sources, unpack_sources, CHANNELS_PER_ROUTE_BYTE};
use crate::state::{DeviceState, ExpansionLines, InputKind, NUM_CHANNELS, NUM_SOURCES};
use crate::traits::PreampControl;
use crate::version::FirmwareVersion;

/// Byte-wide register space addressed by the transaction state machine
pub trait RegisterFile {
    /// Current value of the register at `addr`, or `0xFF` if none
    fn read(&self, addr: u8) -> u8;

    /// Apply a write to the register at `addr`; a no-op if none
    fn write(&mut self, addr: u8, data: u8);
}

/// Register map over a borrowed device state
///
/// Holds the state and the control layer only for as long as the caller
/// lends them, typically one transaction.
pub struct RegisterMap<'a, C> {
    state: &'a mut DeviceState,
    control: &'a mut C,
    version: FirmwareVersion,
}

impl<'a, C: PreampControl> RegisterMap<'a, C> {
    pub fn new(state: &'a mut DeviceState, control: &'a mut C, version: FirmwareVersion) -> Self {
        Self {
            state,
            control,
            version,
        }
    }

    /// Push every writable field to the control layer
    ///
    /// Writes only reach the control layer when a field changes, so the
    /// hardware has to be brought in line with the state once at startup.
    pub fn sync(&mut self) {
        let state = &*self.state;
        for (src, &kind) in state.inputs.iter().enumerate() {
            self.control.configure_input(src, kind);
        }
        for ch in 0..NUM_CHANNELS {
            self.control.connect_channel(state.channel_source[ch], ch);
            self.control.set_volume(ch, state.volume[ch]);
            self.control.set_mute(ch, state.muted[ch]);
        }
        self.control.set_standby(state.standby);
        self.control.set_fan_override(state.fan_override);
        self.control.set_led_override(state.led_override);
        if state.led_override {
            self.control.set_leds(state.leds);
        }
        self.control.set_expansion_boot0(state.expansion.boot0);
        self.control.set_expansion_reset(state.expansion.nrst);
        self.control.set_uart_passthrough(state.expansion.uart_passthrough);
    }

    fn read_register(&self, reg: Register) -> u8 {
        let state = &*self.state;
        let hash = self.version.hash_bytes();

        match reg {
            Register::SrcAd => {
                let mut digital = [false; NUM_SOURCES];
                for (bit, kind) in digital.iter_mut().zip(state.inputs.iter()) {
                    *bit = kind.is_digital();
                }
                pack_flags(&digital)
            }
            Register::Ch321 => pack_sources(&state.channel_source[..CHANNELS_PER_ROUTE_BYTE]),
            Register::Ch654 => pack_sources(&state.channel_source[CHANNELS_PER_ROUTE_BYTE..]),
            Register::Mute => pack_flags(&state.muted),
            Register::Standby => u8::from(!state.standby),
            Register::VolCh1
            | Register::VolCh2
            | Register::VolCh3
            | Register::VolCh4
            | Register::VolCh5
            | Register::VolCh6 => match reg.volume_channel() {
                Some(ch) => state.volume[ch],
                None => UNIMPLEMENTED,
            },
            Register::PowerStatus => state.power.to_byte(),
            Register::FanCtrl => u8::from(state.fan_override),
            Register::LedCtrl => u8::from(state.led_override),
            Register::LedVal => state.leds,
            Register::Expansion => state.expansion.to_byte(),
            Register::Hv1Voltage => state.sensors.hv1,
            Register::Hv1Temp => state.sensors.hv1_temp,
            Register::Amp1Temp => state.sensors.amp1_temp,
            Register::Amp2Temp => state.sensors.amp2_temp,
            Register::VersionMajor => self.version.major,
            Register::VersionMinor => self.version.minor,
            Register::GitHash65 => hash[0],
            Register::GitHash43 => hash[1],
            Register::GitHash21 => hash[2],
            Register::GitHash0D => hash[3],
        }
    }

    fn write_register(&mut self, reg: Register, data: u8) {
        match reg {
            Register::SrcAd => {
                for src in 0..NUM_SOURCES {
                    let kind = InputKind::from_bit(flag(data, src));
                    if self.state.inputs[src] != kind {
                        self.state.inputs[src] = kind;
                        self.control.configure_input(src, kind);
                    }
                }
            }
            Register::Ch321 => self.route(0, data),
            Register::Ch654 => self.route(CHANNELS_PER_ROUTE_BYTE, data),
            Register::Mute => {
                for ch in 0..NUM_CHANNELS {
                    let muted = flag(data, ch);
                    if self.state.muted[ch] != muted {
                        self.state.muted[ch] = muted;
                        self.control.set_mute(ch, muted);
                    }
                }
            }
            Register::Standby => {
                let standby = data == 0;
                if self.state.standby != standby {
                    self.state.standby = standby;
                    self.control.set_standby(standby);
                }
            }
            Register::VolCh1
            | Register::VolCh2
            | Register::VolCh3
            | Register::VolCh4
            | Register::VolCh5
            | Register::VolCh6 => {
                if let Some(ch) = reg.volume_channel() {
                    if self.state.volume[ch] != data {
                        self.state.volume[ch] = data;
                        self.control.set_volume(ch, data);
                    }
                }
            }
            Register::FanCtrl => {
                let on = flag(data, 0);
                if self.state.fan_override != on {
                    self.state.fan_override = on;
                    self.control.set_fan_override(on);
                }
            }
            Register::LedCtrl => {
                let on = flag(data, 0);
                if self.state.led_override != on {
                    self.state.led_override = on;
                    self.control.set_led_override(on);
                    if on {
                        self.control.set_leds(self.state.leds);
                    }
                }
            }
            Register::LedVal => {
                if self.state.leds != data {
                    self.state.leds = data;
                    if self.state.led_override {
                        self.control.set_leds(data);
                    }
                }
            }
            Register::Expansion => self.set_expansion(ExpansionLines::from_byte(data)),
            Register::PowerStatus
            | Register::Hv1Voltage
            | Register::Hv1Temp
            | Register::Amp1Temp
            | Register::Amp2Temp
            | Register::VersionMajor
            | Register::VersionMinor
            | Register::GitHash65
            | Register::GitHash43
            | Register::GitHash21
            | Register::GitHash0D => {
                #[cfg(feature = "defmt")]
                defmt::debug!("write to read-only register {:?} ignored", reg);
            }
        }
    }

    /// Apply a routing byte to the three channels starting at `first`
    fn route(&mut self, first: usize, data: u8) {
        for (offset, source) in unpack_sources(data).into_iter().enumerate() {
            let ch = first + offset;
            if self.state.channel_source[ch] != source {
                self.state.channel_source[ch] = source;
                self.control.connect_channel(source, ch);
            }
        }
    }

    fn set_expansion(&mut self, lines: ExpansionLines) {
        let current = self.state.expansion;
        self.state.expansion = lines;

        // BOOT0 is sampled when reset is released, so drive it first
        if current.boot0 != lines.boot0 {
            self.control.set_expansion_boot0(lines.boot0);
        }
        if current.nrst != lines.nrst {
            self.control.set_expansion_reset(lines.nrst);
        }
        if current.uart_passthrough != lines.uart_passthrough {
            self.control.set_uart_passthrough(lines.uart_passthrough);
        }
    }
}

impl<C: PreampControl> RegisterFile for RegisterMap<'_, C> {
    fn read(&self, addr: u8) -> u8 {
        match Register::from_addr(addr) {
            Some(reg) => self.read_register(reg),
            None => UNIMPLEMENTED,
        }
    }

    fn write(&mut self, addr: u8, data: u8) {
        if let Some(reg) = Register::from_addr(addr) {
            self.write_register(reg, data);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PowerStatus, SensorReadings};
    use heapless::Vec;
    use proptest::prelude::*;

    const VERSION: FirmwareVersion = FirmwareVersion::new(1, 7, 0x0abc_def1, true);

    /// Control layer call, as recorded by the mock
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Input(usize, InputKind),
        Connect(u8, usize),
        Mute(usize, bool),
        Standby(bool),
        Volume(usize, u8),
        Fan(bool),
        LedOverride(bool),
        Leds(u8),
        Reset(bool),
        Boot0(bool),
        Passthrough(bool),
    }

    /// Mock control layer that records every call
    #[derive(Default)]
    struct MockControl {
        calls: Vec<Call, 64>,
    }

    impl MockControl {
        fn record(&mut self, call: Call) {
            self.calls.push(call).expect("mock call log full");
        }
    }

    impl PreampControl for MockControl {
        fn configure_input(&mut self, source: usize, kind: InputKind) {
            self.record(Call::Input(source, kind));
        }
        fn connect_channel(&mut self, source: u8, channel: usize) {
            self.record(Call::Connect(source, channel));
        }
        fn set_mute(&mut self, channel: usize, muted: bool) {
            self.record(Call::Mute(channel, muted));
        }
        fn set_standby(&mut self, standby: bool) {
            self.record(Call::Standby(standby));
        }
        fn set_volume(&mut self, channel: usize, volume: u8) {
            self.record(Call::Volume(channel, volume));
        }
        fn set_fan_override(&mut self, on: bool) {
            self.record(Call::Fan(on));
        }
        fn set_led_override(&mut self, on: bool) {
            self.record(Call::LedOverride(on));
        }
        fn set_leds(&mut self, leds: u8) {
            self.record(Call::Leds(leds));
        }
        fn set_expansion_reset(&mut self, high: bool) {
            self.record(Call::Reset(high));
        }
        fn set_expansion_boot0(&mut self, high: bool) {
            self.record(Call::Boot0(high));
        }
        fn set_uart_passthrough(&mut self, enabled: bool) {
            self.record(Call::Passthrough(enabled));
        }
    }

    #[test]
    fn test_unknown_address_reads_sentinel() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();
        let map = RegisterMap::new(&mut state, &mut control, VERSION);

        assert_eq!(map.read(0x14), 0xFF);
        assert_eq!(map.read(0x99), 0xFF);
        assert_eq!(map.read(0xF9), 0xFF);
    }

    #[test]
    fn test_mute_bitmap_lsb_first() {
        let mut state = DeviceState::new();
        state.muted = [true; NUM_CHANNELS];
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        map.write(Register::Mute.addr(), 0b0000_0101);
        assert_eq!(map.read(Register::Mute.addr()), 0b0000_0101);

        assert_eq!(state.muted, [true, false, true, false, false, false]);
        assert_eq!(
            control.calls.as_slice(),
            &[
                Call::Mute(1, false),
                Call::Mute(3, false),
                Call::Mute(4, false),
                Call::Mute(5, false),
            ]
        );
    }

    #[test]
    fn test_volume_write_affects_one_channel() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        map.write(Register::VolCh1.addr(), 0x2A);
        assert_eq!(map.read(Register::VolCh1.addr()), 0x2A);

        assert_eq!(state.volume, [0x2A, 0, 0, 0, 0, 0]);
        assert_eq!(control.calls.as_slice(), &[Call::Volume(0, 0x2A)]);
    }

    #[test]
    fn test_routing_unpacks_lsb_group_first() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        // ch3 = 1, ch4 = 2, ch5 = 3
        map.write(Register::Ch654.addr(), 0b11_10_01);
        // ch0 = 2, ch1 = 0, ch2 = 1
        map.write(Register::Ch321.addr(), 0b01_00_10);

        assert_eq!(map.read(Register::Ch654.addr()), 0b11_10_01);
        assert_eq!(map.read(Register::Ch321.addr()), 0b01_00_10);
        assert_eq!(state.channel_source, [2, 0, 1, 1, 2, 3]);
        assert_eq!(
            control.calls.as_slice(),
            &[
                Call::Connect(1, 3),
                Call::Connect(2, 4),
                Call::Connect(3, 5),
                Call::Connect(2, 0),
                Call::Connect(1, 2),
            ]
        );
    }

    #[test]
    fn test_source_types() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        // Upper bits beyond the four sources are ignored
        map.write(Register::SrcAd.addr(), 0b1111_1001);
        assert_eq!(map.read(Register::SrcAd.addr()), 0b1001);

        assert_eq!(
            control.calls.as_slice(),
            &[
                Call::Input(0, InputKind::Digital),
                Call::Input(3, InputKind::Digital),
            ]
        );
    }

    #[test]
    fn test_standby_register() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        assert_eq!(map.read(Register::Standby.addr()), 1);

        map.write(Register::Standby.addr(), 0);
        assert_eq!(map.read(Register::Standby.addr()), 0);

        // Any non-zero value leaves standby
        map.write(Register::Standby.addr(), 0x80);
        assert_eq!(map.read(Register::Standby.addr()), 1);

        assert_eq!(
            control.calls.as_slice(),
            &[Call::Standby(true), Call::Standby(false)]
        );
    }

    #[test]
    fn test_power_status_reads_fresh_fields() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        {
            let map = RegisterMap::new(&mut state, &mut control, VERSION);
            assert_eq!(map.read(Register::PowerStatus.addr()), 0);
        }

        state.power = PowerStatus {
            fan_fail: true,
            ovr_tmp: false,
            pg_12v: true,
        };
        let map = RegisterMap::new(&mut state, &mut control, VERSION);
        assert_eq!(map.read(Register::PowerStatus.addr()), 0b0000_1010);
    }

    #[test]
    fn test_read_only_writes_ignored() {
        let mut state = DeviceState::new();
        state.refresh(
            PowerStatus {
                fan_fail: false,
                ovr_tmp: true,
                pg_12v: true,
            },
            SensorReadings {
                hv1: 0x90,
                hv1_temp: 0x40,
                amp1_temp: 0x41,
                amp2_temp: 0x42,
            },
        );
        let before = state.clone();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        for reg in Register::ALL.iter().filter(|r| !r.is_writable()) {
            map.write(reg.addr(), 0x5A);
        }
        assert_eq!(map.read(Register::Hv1Voltage.addr()), 0x90);
        assert_eq!(map.read(Register::Amp2Temp.addr()), 0x42);

        assert_eq!(state, before);
        assert!(control.calls.is_empty());
    }

    #[test]
    fn test_version_registers() {
        let mut state = DeviceState::new();
        state.volume = [0xFA; NUM_CHANNELS];
        let mut control = MockControl::default();

        let map = RegisterMap::new(&mut state, &mut control, VERSION);
        assert_eq!(map.read(Register::VersionMajor.addr()), 1);
        assert_eq!(map.read(Register::VersionMinor.addr()), 7);
        assert_eq!(map.read(Register::GitHash65.addr()), 0xAB);
        assert_eq!(map.read(Register::GitHash43.addr()), 0xCD);
        assert_eq!(map.read(Register::GitHash21.addr()), 0xEF);
        assert_eq!(map.read(Register::GitHash0D.addr()), 0x11);
    }

    #[test]
    fn test_expansion_passthrough_toggles_once() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        map.write(Register::Expansion.addr(), 0b111);
        map.write(Register::Expansion.addr(), 0b111);
        assert_eq!(map.read(Register::Expansion.addr()), 0b111);
        map.write(Register::Expansion.addr(), 0b001);

        assert_eq!(
            control.calls.as_slice(),
            &[
                Call::Boot0(true),
                Call::Reset(true),
                Call::Passthrough(true),
                Call::Boot0(false),
                Call::Passthrough(false),
            ]
        );
    }

    #[test]
    fn test_led_value_follows_override() {
        let mut state = DeviceState::new();
        let mut control = MockControl::default();

        let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
        // Stored but not driven while the firmware owns the LEDs
        map.write(Register::LedVal.addr(), 0x3C);
        map.write(Register::LedCtrl.addr(), 1);
        map.write(Register::LedVal.addr(), 0x3D);
        map.write(Register::FanCtrl.addr(), 1);

        assert_eq!(map.read(Register::LedVal.addr()), 0x3D);
        assert_eq!(map.read(Register::LedCtrl.addr()), 1);
        assert_eq!(map.read(Register::FanCtrl.addr()), 1);
        assert_eq!(
            control.calls.as_slice(),
            &[
                Call::LedOverride(true),
                Call::Leds(0x3C),
                Call::Leds(0x3D),
                Call::Fan(true),
            ]
        );
    }

    #[test]
    fn test_sync_pushes_whole_state() {
        let mut state = DeviceState::new();
        state.expansion.nrst = true;
        let mut control = MockControl::default();

        RegisterMap::new(&mut state, &mut control, VERSION).sync();

        assert!(control.calls.contains(&Call::Standby(false)));
        assert!(control.calls.contains(&Call::Volume(5, 0)));
        assert!(control.calls.contains(&Call::Reset(true)));
        assert!(control.calls.contains(&Call::Passthrough(false)));
        // LED value is not driven while the firmware owns the LEDs
        assert!(!control.calls.iter().any(|c| matches!(c, Call::Leds(_))));
    }

    proptest! {
        #[test]
        fn prop_unknown_address_is_inert(addr in any::<u8>(), data in any::<u8>()) {
            prop_assume!(Register::from_addr(addr).is_none());

            let mut state = DeviceState::new();
            state.volume[1] = 0x33;
            let before = state.clone();
            let mut control = MockControl::default();

            let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
            map.write(addr, data);
            prop_assert_eq!(map.read(addr), 0xFF);
            prop_assert_eq!(&state, &before);
            prop_assert!(control.calls.is_empty());
        }

        #[test]
        fn prop_rewrite_is_idempotent(index in 0usize..Register::ALL.len(), data in any::<u8>()) {
            let reg = Register::ALL[index];
            let mut state = DeviceState::new();
            let mut control = MockControl::default();

            let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
            map.write(reg.addr(), data);
            let first = map.read(reg.addr());
            let calls = control.calls.len();

            let mut map = RegisterMap::new(&mut state, &mut control, VERSION);
            map.write(reg.addr(), data);
            prop_assert_eq!(map.read(reg.addr()), first);
            prop_assert_eq!(control.calls.len(), calls);
        }
    }
}
