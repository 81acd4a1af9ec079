#![warn(clippy::all, clippy::nursery, rust_2018_idioms)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub mod config;
mod credentials;
pub mod mqtt;
pub mod wifi;

pub use credentials::Credentials;
pub use mqtt::{MqttAuth, MqttCredentials, MqttIdentity};
pub use wifi::WifiCredentials;

pub const DEFAULT_MQTT_PORT: u16 = 1883;
pub const DEFAULT_CLIENT_ID: &str = "ESP32-1";
pub const DEFAULT_TOPIC: &str = "ESP32-1";

pub const EXAMPLE_SSID: &str = "VOTRE_SSID";
pub const EXAMPLE_PASSWORD: &str = "VOTRE_PASSWORD";
pub const EXAMPLE_MQTT_SERVER: &str = "192.168.1.100";

/// Longest SSID accepted by 802.11.
pub const MAX_SSID_LEN: usize = 32;
/// WPA2 passphrases are 8 to 63 ASCII characters, or a 64 hex digit PSK.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 64;
pub const PSK_HEX_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SSID is empty")]
    EmptySsid,
    #[error("SSID is {0} bytes, at most {} are allowed", MAX_SSID_LEN)]
    SsidTooLong(usize),
    #[error("WiFi password is {0} bytes, at most {} are allowed", MAX_PASSWORD_LEN)]
    PasswordTooLong(usize),
    #[error("WiFi password is {0} bytes, WPA2 needs at least {}", MIN_PASSWORD_LEN)]
    PasswordTooShort(usize),
    #[error("WiFi password must be ASCII, and a {}-character password must be a hex PSK", PSK_HEX_LEN)]
    PasswordInvalid,
    #[error("MQTT broker address is empty")]
    EmptyServer,
    #[error("{0} is not a valid MQTT broker port")]
    InvalidPort(u16),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
pub type Result<T> = std::result::Result<T, Error>;
