//! Protocol enumerations carried in message fields.
//!
//! Messages store these as their raw integer; convert with `TryFrom`/`Into`.

use bitfields::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// MAV_TYPE: vehicle or component type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MavType {
    Generic = 0,
    FixedWing = 1,
    Quadrotor = 2,
    Coaxial = 3,
    Helicopter = 4,
    AntennaTracker = 5,
    /// Ground control station
    Gcs = 6,
    Airship = 7,
    FreeBalloon = 8,
    Rocket = 9,
    GroundRover = 10,
    SurfaceBoat = 11,
    Submarine = 12,
    Hexarotor = 13,
    Octorotor = 14,
    Tricopter = 15,
    FlappingWing = 16,
    Kite = 17,
    OnboardController = 18,
    VtolTailsitterDuorotor = 19,
    VtolTailsitterQuadrotor = 20,
    VtolTiltrotor = 21,
    VtolFixedrotor = 22,
    VtolTailsitter = 23,
    VtolTiltwing = 24,
    VtolReserved5 = 25,
    Gimbal = 26,
    Adsb = 27,
    Parafoil = 28,
    Dodecarotor = 29,
    Camera = 30,
    ChargingStation = 31,
    Flarm = 32,
    Servo = 33,
    /// Open Drone ID
    Odid = 34,
    Decarotor = 35,
    Battery = 36,
    Parachute = 37,
    Log = 38,
    Osd = 39,
    Imu = 40,
    Gps = 41,
    Winch = 42,
    GenericMultirotor = 43,
    Illuminator = 44,
    SpacecraftOrbiter = 45,
    GroundQuadruped = 46,
    VtolGyrodyne = 47,
    Gripper = 48,
    Radio = 49,
}

/// MAV_AUTOPILOT: autopilot firmware family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MavAutopilot {
    Generic = 0,
    Reserved = 1,
    Slugs = 2,
    ArduPilotMega = 3,
    OpenPilot = 4,
    GenericWaypointsOnly = 5,
    GenericWaypointsAndSimpleNavigationOnly = 6,
    GenericMissionFull = 7,
    /// Not a flight controller
    Invalid = 8,
    Ppz = 9,
    Udb = 10,
    Fp = 11,
    Px4 = 12,
    SmaccmPilot = 13,
    AutoQuad = 14,
    Armazila = 15,
    Aerob = 16,
    Asluav = 17,
    SmartAp = 18,
    AirRails = 19,
    Reflex = 20,
}

/// MAV_STATE: system status reported in HEARTBEAT.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MavState {
    /// Uninitialized system, state is unknown.
    Uninit = 0,
    /// System is booting up.
    Boot = 1,
    /// System is calibrating and not flight-ready.
    Calibrating = 2,
    /// System is grounded and on standby.
    Standby = 3,
    /// System is active and might be already airborne.
    Active = 4,
    /// System is in a non-normal flight mode but can still navigate.
    Critical = 5,
    /// System lost control over parts or over the whole airframe.
    Emergency = 6,
    /// System just initialized its power-down sequence.
    Poweroff = 7,
    /// System is terminating itself.
    FlightTermination = 8,
}

/// MAV_RESULT: outcome of a command, as reported in COMMAND_ACK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MavResult {
    Accepted = 0,
    TemporarilyRejected = 1,
    Denied = 2,
    Unsupported = 3,
    Failed = 4,
    InProgress = 5,
    Cancelled = 6,
    CommandLongOnly = 7,
    CommandIntOnly = 8,
    CommandUnsupportedMavFrame = 9,
    NotInControl = 10,
}

/// MAV_PARAM_TYPE: storage type of a parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MavParamType {
    Uint8 = 1,
    Int8 = 2,
    Uint16 = 3,
    Int16 = 4,
    Uint32 = 5,
    Int32 = 6,
    Uint64 = 7,
    Int64 = 8,
    Real32 = 9,
    Real64 = 10,
}

/// MAV_FRAME: coordinate frame of a position or command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum MavFrame {
    Global = 0,
    LocalNed = 1,
    Mission = 2,
    GlobalRelativeAlt = 3,
    LocalEnu = 4,
    GlobalInt = 5,
    GlobalRelativeAltInt = 6,
    LocalOffsetNed = 7,
    BodyNed = 8,
    BodyOffsetNed = 9,
    GlobalTerrainAlt = 10,
    GlobalTerrainAltInt = 11,
    BodyFrd = 12,
    Reserved13 = 13,
    Reserved14 = 14,
    Reserved15 = 15,
    Reserved16 = 16,
    Reserved17 = 17,
    Reserved18 = 18,
    Reserved19 = 19,
    LocalFrd = 20,
    LocalFlu = 21,
}

/// GPS_FIX_TYPE
#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GpsFixType {
    /// No GPS connected
    NoGps = 0,
    /// No position information, GPS is connected
    NoFix = 1,
    Fix2d = 2,
    Fix3d = 3,
    /// DGPS/SBAS aided 3D position
    Dgps = 4,
    /// RTK float, 3D position
    RtkFloat = 5,
    /// RTK fixed, 3D position
    RtkFixed = 6,
    /// Static fixed, typically used for base stations
    Static = 7,
    /// Precise point positioning
    Ppp = 8,
}

/// MAV_MODE_FLAG: the `base_mode` bitmap of HEARTBEAT.
#[bitfield(u8)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags {
    /// Bits of `custom_mode` are in use
    custom_mode_enabled: bool,
    /// Test mode, for temporary system tests
    test_enabled: bool,
    /// Autonomous mode, the system finds its own goal positions
    auto_enabled: bool,
    /// Guided mode, the system flies waypoints or mission items
    guided_enabled: bool,
    /// The system stabilizes its attitude electronically
    stabilize_enabled: bool,
    /// Hardware in the loop simulation
    hil_enabled: bool,
    /// Remote control input is enabled
    manual_input_enabled: bool,
    /// Motors are enabled, the vehicle is armed
    safety_armed: bool,
}

/// MAV_SYS_STATUS_SENSOR: sensor and subsystem bitmap used by SYS_STATUS.
#[bitfield(u32)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub struct SysStatusSensors {
    gyro_3d: bool,
    accel_3d: bool,
    mag_3d: bool,
    absolute_pressure: bool,
    differential_pressure: bool,
    gps: bool,
    optical_flow: bool,
    vision_position: bool,
    laser_position: bool,
    external_ground_truth: bool,
    angular_rate_control: bool,
    attitude_stabilization: bool,
    yaw_position: bool,
    z_altitude_control: bool,
    xy_position_control: bool,
    motor_outputs: bool,
    rc_receiver: bool,
    gyro2_3d: bool,
    accel2_3d: bool,
    mag2_3d: bool,
    geofence: bool,
    ahrs: bool,
    terrain: bool,
    reverse_motor: bool,
    logging: bool,
    battery: bool,
    proximity: bool,
    satcom: bool,
    prearm_check: bool,
    obstacle_avoidance: bool,
    propulsion: bool,
    extension_used: bool,
}

/// MAV_PROTOCOL_CAPABILITY: the `capabilities` bitmap of AUTOPILOT_VERSION.
#[bitfield(u64)]
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolCapabilities {
    /// MISSION_ITEM with float coordinates
    mission_float: bool,
    /// PARAM_VALUE/PARAM_SET with float values
    param_float: bool,
    /// MISSION_ITEM_INT
    mission_int: bool,
    /// COMMAND_INT
    command_int: bool,
    /// Parameter values are packed bytewise into the float field
    param_encode_bytewise: bool,
    /// File Transfer Protocol v1
    ftp: bool,
    set_attitude_target: bool,
    set_position_target_local_ned: bool,
    set_position_target_global_int: bool,
    terrain: bool,
    reserved3: bool,
    flight_termination: bool,
    compass_calibration: bool,
    mavlink2: bool,
    mission_fence: bool,
    mission_rally: bool,
    reserved2: bool,
    /// Parameter values are C-cast into the float field
    param_encode_c_cast: bool,
    component_implements_gimbal_manager: bool,
    #[bits(45)]
    _reserved: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip() {
        assert_eq!(MavType::try_from(6u8), Ok(MavType::Gcs));
        assert_eq!(u8::from(MavAutopilot::Px4), 12);
        assert_eq!(MavParamType::try_from(9u8), Ok(MavParamType::Real32));
        assert_eq!(GpsFixType::try_from(3u8), Ok(GpsFixType::Fix3d));
        assert_eq!(u8::from(MavFrame::LocalFlu), 21);
        assert!(MavParamType::try_from(0u8).is_err());
        assert!(MavResult::try_from(11u8).is_err());
        assert!(MavState::try_from(9u8).is_err());
    }

    #[test]
    fn test_mode_flags_bits() {
        let flags = ModeFlags::from_bits(0b1000_0001);
        assert!(flags.custom_mode_enabled());
        assert!(flags.safety_armed());
        assert!(!flags.guided_enabled());

        let mut flags = ModeFlags::from_bits(0);
        flags.set_guided_enabled(true);
        flags.set_stabilize_enabled(true);
        assert_eq!(flags.into_bits(), 8 | 16);
    }

    #[test]
    fn test_sys_status_sensor_bits() {
        let sensors = SysStatusSensors::from_bits(32 | (1 << 31));
        assert!(sensors.gps());
        assert!(sensors.extension_used());
        assert!(!sensors.gyro_3d());
        assert!(SysStatusSensors::from_bits(1 << 16).rc_receiver());
    }

    #[test]
    fn test_protocol_capability_bits() {
        let caps = ProtocolCapabilities::from_bits(8 | 8192 | 262144);
        assert!(caps.command_int());
        assert!(caps.mavlink2());
        assert!(caps.component_implements_gimbal_manager());
        assert!(!caps.mission_float());
        assert!(!caps.ftp());

        let mut caps = ProtocolCapabilities::from_bits(0);
        caps.set_param_float(true);
        caps.set_param_encode_c_cast(true);
        assert_eq!(caps.into_bits(), 2 | 131072);
    }
}
