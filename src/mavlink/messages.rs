//! Message definitions (common dialect, base fields only) and id-based dispatch.
//!
//! Fields are declared in wire order, which is the protocol's declaration order stably sorted by
//! element size. Enum-valued fields keep their raw integer; see [`super::enums`].

use super::{
    codec::{deserialize, deserialize_verified, serialize},
    enums::{
        GpsFixType, MavAutopilot, MavResult, MavState, MavType, ModeFlags, ProtocolCapabilities,
        SysStatusSensors,
    },
    message::MavMessage,
    view::MessageView,
};
use crate::{Error, FixedStr};

mavlink_message! {
    /// Presence beacon of a system or component.
    pub struct Heartbeat: 0, "HEARTBEAT" {
        /// Autopilot-specific flags
        pub custom_mode: u32,
        /// Vehicle or component type (MAV_TYPE)
        pub mav_type ("type"): u8,
        /// MAV_AUTOPILOT
        pub autopilot: u8,
        /// MAV_MODE_FLAG bitmap
        pub base_mode: u8,
        /// MAV_STATE
        pub system_status: u8,
        pub mavlink_version: u8,
    }
}

impl Heartbeat {
    pub fn vehicle_type(&self) -> Option<MavType> {
        MavType::try_from(self.mav_type).ok()
    }

    pub fn autopilot_kind(&self) -> Option<MavAutopilot> {
        MavAutopilot::try_from(self.autopilot).ok()
    }

    pub fn state(&self) -> Option<MavState> {
        MavState::try_from(self.system_status).ok()
    }

    pub fn mode_flags(&self) -> ModeFlags {
        ModeFlags::from_bits(self.base_mode)
    }
}

mavlink_message! {
    /// General system state.
    pub struct SysStatus: 1, "SYS_STATUS" {
        pub onboard_control_sensors_present: u32,
        pub onboard_control_sensors_enabled: u32,
        pub onboard_control_sensors_health: u32,
        /// Main loop load, in 0.1 %
        pub load: u16,
        /// Battery voltage in mV, `u16::MAX` if unknown
        pub voltage_battery: u16,
        /// Battery current in cA, -1 if unknown
        pub current_battery: i16,
        /// Communication drop rate, in 0.01 %
        pub drop_rate_comm: u16,
        pub errors_comm: u16,
        pub errors_count1: u16,
        pub errors_count2: u16,
        pub errors_count3: u16,
        pub errors_count4: u16,
        /// Remaining battery energy in %, -1 if unknown
        pub battery_remaining: i8,
    }
}

impl SysStatus {
    pub fn sensors_present(&self) -> SysStatusSensors {
        SysStatusSensors::from_bits(self.onboard_control_sensors_present)
    }

    pub fn sensors_enabled(&self) -> SysStatusSensors {
        SysStatusSensors::from_bits(self.onboard_control_sensors_enabled)
    }

    pub fn sensors_health(&self) -> SysStatusSensors {
        SysStatusSensors::from_bits(self.onboard_control_sensors_health)
    }
}

mavlink_message! {
    /// System time of the master clock.
    pub struct SystemTime: 2, "SYSTEM_TIME" {
        /// UNIX epoch time in µs
        pub time_unix_usec: u64,
        /// Time since boot in ms
        pub time_boot_ms: u32,
    }
}

mavlink_message! {
    /// Request to take or release control of a system.
    pub struct ChangeOperatorControl: 5, "CHANGE_OPERATOR_CONTROL" {
        pub target_system: u8,
        /// 0 to request control, 1 to release it
        pub control_request: u8,
        pub version: u8,
        pub passkey: FixedStr<25>,
    }
}

mavlink_message! {
    /// Reply to CHANGE_OPERATOR_CONTROL.
    pub struct ChangeOperatorControlAck: 6, "CHANGE_OPERATOR_CONTROL_ACK" {
        pub gcs_system_id: u8,
        pub control_request: u8,
        /// 0 means accepted
        pub ack: u8,
    }
}

mavlink_message! {
    pub struct AuthKey: 7, "AUTH_KEY" {
        pub key: FixedStr<32>,
    }
}

mavlink_message! {
    /// Request a single parameter, by id or by index.
    pub struct ParamRequestRead: 20, "PARAM_REQUEST_READ" {
        /// -1 to look the parameter up by `param_id`
        pub param_index: i16,
        pub target_system: u8,
        pub target_component: u8,
        pub param_id: FixedStr<16>,
    }
}

mavlink_message! {
    pub struct ParamRequestList: 21, "PARAM_REQUEST_LIST" {
        pub target_system: u8,
        pub target_component: u8,
    }
}

mavlink_message! {
    /// A parameter value, sent on request or on change.
    pub struct ParamValue: 22, "PARAM_VALUE" {
        pub param_value: f32,
        pub param_count: u16,
        pub param_index: u16,
        pub param_id: FixedStr<16>,
        /// MAV_PARAM_TYPE
        pub param_type: u8,
    }
}

mavlink_message! {
    pub struct ParamSet: 23, "PARAM_SET" {
        pub param_value: f32,
        pub target_system: u8,
        pub target_component: u8,
        pub param_id: FixedStr<16>,
        /// MAV_PARAM_TYPE
        pub param_type: u8,
    }
}

mavlink_message! {
    /// Raw GPS fix.
    pub struct GpsRawInt: 24, "GPS_RAW_INT" {
        pub time_usec: u64,
        /// Latitude in 1E7 degrees
        pub lat: i32,
        /// Longitude in 1E7 degrees
        pub lon: i32,
        /// Altitude (MSL) in mm
        pub alt: i32,
        pub eph: u16,
        pub epv: u16,
        /// Ground speed in cm/s
        pub vel: u16,
        /// Course over ground in cdeg
        pub cog: u16,
        /// GPS_FIX_TYPE
        pub fix_type: u8,
        pub satellites_visible: u8,
    }
}

impl GpsRawInt {
    pub fn fix(&self) -> Option<GpsFixType> {
        GpsFixType::try_from(self.fix_type).ok()
    }
}

mavlink_message! {
    /// Per-satellite status, up to 20 satellites.
    pub struct GpsStatus: 25, "GPS_STATUS" {
        pub satellites_visible: u8,
        pub satellite_prn: [u8; 20],
        pub satellite_used: [u8; 20],
        pub satellite_elevation: [u8; 20],
        pub satellite_azimuth: [u8; 20],
        pub satellite_snr: [u8; 20],
    }
}

mavlink_message! {
    pub struct ScaledImu: 26, "SCALED_IMU" {
        pub time_boot_ms: u32,
        pub xacc: i16,
        pub yacc: i16,
        pub zacc: i16,
        pub xgyro: i16,
        pub ygyro: i16,
        pub zgyro: i16,
        pub xmag: i16,
        pub ymag: i16,
        pub zmag: i16,
    }
}

mavlink_message! {
    pub struct RawImu: 27, "RAW_IMU" {
        pub time_usec: u64,
        pub xacc: i16,
        pub yacc: i16,
        pub zacc: i16,
        pub xgyro: i16,
        pub ygyro: i16,
        pub zgyro: i16,
        pub xmag: i16,
        pub ymag: i16,
        pub zmag: i16,
    }
}

mavlink_message! {
    pub struct RawPressure: 28, "RAW_PRESSURE" {
        pub time_usec: u64,
        pub press_abs: i16,
        pub press_diff1: i16,
        pub press_diff2: i16,
        pub temperature: i16,
    }
}

mavlink_message! {
    pub struct ScaledPressure: 29, "SCALED_PRESSURE" {
        pub time_boot_ms: u32,
        /// Absolute pressure in hPa
        pub press_abs: f32,
        /// Differential pressure in hPa
        pub press_diff: f32,
        /// Temperature in cdegC
        pub temperature: i16,
    }
}

mavlink_message! {
    /// Attitude in the aeronautical frame (right-handed, Z-down, X-front, Y-right).
    pub struct Attitude: 30, "ATTITUDE" {
        pub time_boot_ms: u32,
        /// Roll angle in rad
        pub roll: f32,
        /// Pitch angle in rad
        pub pitch: f32,
        /// Yaw angle in rad
        pub yaw: f32,
        pub rollspeed: f32,
        pub pitchspeed: f32,
        pub yawspeed: f32,
    }
}

mavlink_message! {
    /// Attitude as a quaternion (w, x, y, z).
    pub struct AttitudeQuaternion: 31, "ATTITUDE_QUATERNION" {
        pub time_boot_ms: u32,
        pub q1: f32,
        pub q2: f32,
        pub q3: f32,
        pub q4: f32,
        pub rollspeed: f32,
        pub pitchspeed: f32,
        pub yawspeed: f32,
    }
}

mavlink_message! {
    pub struct LocalPositionNed: 32, "LOCAL_POSITION_NED" {
        pub time_boot_ms: u32,
        pub x: f32,
        pub y: f32,
        pub z: f32,
        pub vx: f32,
        pub vy: f32,
        pub vz: f32,
    }
}

mavlink_message! {
    /// Filtered global position estimate.
    pub struct GlobalPositionInt: 33, "GLOBAL_POSITION_INT" {
        pub time_boot_ms: u32,
        /// Latitude in 1E7 degrees
        pub lat: i32,
        /// Longitude in 1E7 degrees
        pub lon: i32,
        /// Altitude (MSL) in mm
        pub alt: i32,
        /// Altitude above home in mm
        pub relative_alt: i32,
        pub vx: i16,
        pub vy: i16,
        pub vz: i16,
        /// Heading in cdeg, `u16::MAX` if unknown
        pub hdg: u16,
    }
}

mavlink_message! {
    pub struct RcChannelsScaled: 34, "RC_CHANNELS_SCALED" {
        pub time_boot_ms: u32,
        pub chan1_scaled: i16,
        pub chan2_scaled: i16,
        pub chan3_scaled: i16,
        pub chan4_scaled: i16,
        pub chan5_scaled: i16,
        pub chan6_scaled: i16,
        pub chan7_scaled: i16,
        pub chan8_scaled: i16,
        pub port: u8,
        pub rssi: u8,
    }
}

mavlink_message! {
    pub struct RcChannelsRaw: 35, "RC_CHANNELS_RAW" {
        pub time_boot_ms: u32,
        pub chan1_raw: u16,
        pub chan2_raw: u16,
        pub chan3_raw: u16,
        pub chan4_raw: u16,
        pub chan5_raw: u16,
        pub chan6_raw: u16,
        pub chan7_raw: u16,
        pub chan8_raw: u16,
        pub port: u8,
        pub rssi: u8,
    }
}

mavlink_message! {
    /// Metrics typically shown on a HUD for fixed wing aircraft.
    pub struct VfrHud: 74, "VFR_HUD" {
        pub airspeed: f32,
        pub groundspeed: f32,
        pub alt: f32,
        pub climb: f32,
        /// Heading in degrees, 0..360
        pub heading: i16,
        /// Throttle in %
        pub throttle: u16,
    }
}

mavlink_message! {
    /// Command with integer-scaled position parameters.
    pub struct CommandInt: 75, "COMMAND_INT" {
        pub param1: f32,
        pub param2: f32,
        pub param3: f32,
        pub param4: f32,
        pub x: i32,
        pub y: i32,
        pub z: f32,
        pub command: u16,
        pub target_system: u8,
        pub target_component: u8,
        /// MAV_FRAME
        pub frame: u8,
        pub current: u8,
        pub autocontinue: u8,
    }
}

mavlink_message! {
    pub struct CommandLong: 76, "COMMAND_LONG" {
        pub param1: f32,
        pub param2: f32,
        pub param3: f32,
        pub param4: f32,
        pub param5: f32,
        pub param6: f32,
        pub param7: f32,
        pub command: u16,
        pub target_system: u8,
        pub target_component: u8,
        pub confirmation: u8,
    }
}

mavlink_message! {
    pub struct CommandAck: 77, "COMMAND_ACK" {
        pub command: u16,
        /// MAV_RESULT
        pub result: u8,
    }
}

impl CommandAck {
    pub fn outcome(&self) -> Option<MavResult> {
        MavResult::try_from(self.result).ok()
    }
}

mavlink_message! {
    /// Autopilot software version and capabilities.
    pub struct AutopilotVersion: 148, "AUTOPILOT_VERSION" {
        /// MAV_PROTOCOL_CAPABILITY bitmap
        pub capabilities: u64,
        pub uid: u64,
        pub flight_sw_version: u32,
        pub middleware_sw_version: u32,
        pub os_sw_version: u32,
        pub board_version: u32,
        pub vendor_id: u16,
        pub product_id: u16,
        pub flight_custom_version: [u8; 8],
        pub middleware_custom_version: [u8; 8],
        pub os_custom_version: [u8; 8],
    }
}

impl AutopilotVersion {
    pub fn capabilities_flags(&self) -> ProtocolCapabilities {
        ProtocolCapabilities::from_bits(self.capabilities)
    }
}

macro_rules! message_enum {
    ($($variant:ident),* $(,)?) => {
        /// Any message defined by this crate.
        #[non_exhaustive]
        #[derive(Clone, Copy, Debug, PartialEq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub enum Message {
            $($variant($variant),)*
        }

        impl Message {
            /// Decodes a frame by its message id, without checking the frame CRC.
            pub fn decode(view: &MessageView<'_>) -> Result<Self, Error> {
                match view.message_id() {
                    $(id if id == $variant::ID => deserialize::<$variant>(view).map(Message::$variant),)*
                    id => {
                        debug!("unknown message id {=u32}", id);
                        Err(Error::ParseError)
                    }
                }
            }

            /// Decodes a frame by its message id after checking its CRC.
            pub fn decode_verified(view: &MessageView<'_>) -> Result<Self, Error> {
                match view.message_id() {
                    $(id if id == $variant::ID => deserialize_verified::<$variant>(view).map(Message::$variant),)*
                    _ => Err(Error::ParseError),
                }
            }

            /// CRC_EXTRA of a known message id.
            pub fn crc_extra(id: u32) -> Option<u8> {
                match id {
                    $(id if id == $variant::ID => Some($variant::CRC_EXTRA),)*
                    _ => None,
                }
            }

            pub fn id(&self) -> u32 {
                match self {
                    $(Message::$variant(_) => $variant::ID,)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Message::$variant(_) => $variant::NAME,)*
                }
            }

            /// Serializes the inner message, see [`serialize`].
            pub fn serialize(
                &self,
                system_id: u8,
                component_id: u8,
                sequence: u8,
                buf: &mut [u8],
            ) -> Result<usize, Error> {
                match self {
                    $(Message::$variant(msg) => serialize(msg, system_id, component_id, sequence, buf),)*
                }
            }
        }

        $(
            impl From<$variant> for Message {
                fn from(msg: $variant) -> Self {
                    Message::$variant(msg)
                }
            }
        )*
    };
}

message_enum! {
    Heartbeat,
    SysStatus,
    SystemTime,
    ChangeOperatorControl,
    ChangeOperatorControlAck,
    AuthKey,
    ParamRequestRead,
    ParamRequestList,
    ParamValue,
    ParamSet,
    GpsRawInt,
    GpsStatus,
    ScaledImu,
    RawImu,
    RawPressure,
    ScaledPressure,
    Attitude,
    AttitudeQuaternion,
    LocalPositionNed,
    GlobalPositionInt,
    RcChannelsScaled,
    RcChannelsRaw,
    VfrHud,
    CommandInt,
    CommandLong,
    CommandAck,
    AutopilotVersion,
}
