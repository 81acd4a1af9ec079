use std::borrow::Cow;
use std::fmt;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::CONFIG;
use crate::{Error, MqttAuth, MqttCredentials, Result, WifiCredentials};

/// WiFi and MQTT broker credentials of a device.
///
/// The record is built once, from `cfg.toml` at compile time or from a
/// serialized copy, and is never mutated afterwards. Consumers read it
/// through [`wifi`](Credentials::wifi) and [`mqtt`](Credentials::mqtt).
///
/// Empty `mqtt_user` and `mqtt_password` mean the broker is reached without
/// authentication.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credentials<'a> {
    #[serde(borrow)]
    ssid: Cow<'a, str>,
    #[serde(borrow)]
    password: Cow<'a, str>,
    #[serde(borrow)]
    mqtt_server: Cow<'a, str>,
    #[serde(default = "default_mqtt_port")]
    mqtt_port: u16,
    #[serde(borrow, default)]
    mqtt_user: Cow<'a, str>,
    #[serde(borrow, default)]
    mqtt_password: Cow<'a, str>,
}

const fn default_mqtt_port() -> u16 {
    crate::DEFAULT_MQTT_PORT
}

impl<'a> Credentials<'a> {
    /// Placeholder values shipped in `cfg.toml.example`.
    pub const EXAMPLE: Credentials<'static> = Credentials {
        ssid: Cow::Borrowed(crate::EXAMPLE_SSID),
        password: Cow::Borrowed(crate::EXAMPLE_PASSWORD),
        mqtt_server: Cow::Borrowed(crate::EXAMPLE_MQTT_SERVER),
        mqtt_port: crate::DEFAULT_MQTT_PORT,
        mqtt_user: Cow::Borrowed(""),
        mqtt_password: Cow::Borrowed(""),
    };

    /// Credentials for an anonymous broker on the default port.
    #[must_use]
    pub fn new(
        ssid: impl Into<Cow<'a, str>>,
        password: impl Into<Cow<'a, str>>,
        mqtt_server: impl Into<Cow<'a, str>>,
    ) -> Self {
        Self {
            ssid: ssid.into(),
            password: password.into(),
            mqtt_server: mqtt_server.into(),
            mqtt_port: crate::DEFAULT_MQTT_PORT,
            mqtt_user: Cow::Borrowed(""),
            mqtt_password: Cow::Borrowed(""),
        }
    }

    /// The credentials compiled in from `cfg.toml`.
    #[must_use]
    pub const fn from_config() -> Credentials<'static> {
        Credentials {
            ssid: Cow::Borrowed(CONFIG.wifi_ssid),
            password: Cow::Borrowed(CONFIG.wifi_password),
            mqtt_server: Cow::Borrowed(CONFIG.mqtt_server),
            mqtt_port: CONFIG.mqtt_port,
            mqtt_user: Cow::Borrowed(CONFIG.mqtt_user),
            mqtt_password: Cow::Borrowed(CONFIG.mqtt_password),
        }
    }

    /// Sets the broker port.
    #[inline]
    #[must_use]
    pub fn with_mqtt_port(mut self, port: u16) -> Self {
        self.mqtt_port = port;
        self
    }

    /// Sets the broker username and password.
    #[must_use]
    pub fn with_mqtt_auth(
        mut self,
        user: impl Into<Cow<'a, str>>,
        password: impl Into<Cow<'a, str>>,
    ) -> Self {
        self.mqtt_user = user.into();
        self.mqtt_password = password.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    #[inline]
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[inline]
    #[must_use]
    pub fn mqtt_server(&self) -> &str {
        &self.mqtt_server
    }

    #[inline]
    #[must_use]
    pub const fn mqtt_port(&self) -> u16 {
        self.mqtt_port
    }

    #[inline]
    #[must_use]
    pub fn mqtt_user(&self) -> &str {
        &self.mqtt_user
    }

    #[inline]
    #[must_use]
    pub fn mqtt_password(&self) -> &str {
        &self.mqtt_password
    }

    /// The `(ssid, password)` pair used to join the network.
    #[must_use]
    pub fn wifi(&self) -> WifiCredentials<'_> {
        WifiCredentials::new(&self.ssid, &self.password)
    }

    /// The `(server, port, user, password)` tuple used to reach the broker.
    #[must_use]
    pub fn mqtt(&self) -> MqttCredentials<'_> {
        MqttCredentials::new(&self.mqtt_server, self.mqtt_port, &self.mqtt_user, &self.mqtt_password)
    }

    /// Serialize to a JSON object keyed by field name.
    ///
    /// # Errors
    ///
    /// - if serialization fails
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }

    /// Deserialize from a JSON object, borrowing from `json` where possible.
    ///
    /// A missing `mqtt_port` is 1883, missing `mqtt_user`/`mqtt_password`
    /// are empty.
    ///
    /// # Errors
    ///
    /// - if `json` is not an object with at least `ssid`, `password` and
    ///   `mqtt_server`
    /// - if `json` has a key that is not a credentials field
    pub fn from_json(json: &'a str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::from)
    }

    #[must_use]
    pub fn into_owned(self) -> Credentials<'static> {
        Credentials {
            ssid: Cow::Owned(self.ssid.into_owned()),
            password: Cow::Owned(self.password.into_owned()),
            mqtt_server: Cow::Owned(self.mqtt_server.into_owned()),
            mqtt_port: self.mqtt_port,
            mqtt_user: Cow::Owned(self.mqtt_user.into_owned()),
            mqtt_password: Cow::Owned(self.mqtt_password.into_owned()),
        }
    }

    /// Run the WiFi and broker conversions once, as boot code would, and
    /// log what the device is about to use.
    ///
    /// # Errors
    ///
    /// - if the WiFi station configuration cannot be built
    /// - if the broker URL cannot be built
    pub fn check(&self) -> Result<()> {
        let wifi = self.wifi();
        if let Err(e) = wifi.client_configuration() {
            warn!("WiFi credentials rejected: {e}");
            return Err(e);
        }

        let mqtt = self.mqtt();
        if mqtt.is_half_configured() {
            warn!("only one of mqtt_user and mqtt_password is set, connecting anonymously");
        }
        let url = match mqtt.broker_url() {
            Ok(url) => url,
            Err(e) => {
                warn!("MQTT credentials rejected: {e}");
                return Err(e);
            }
        };

        info!(
            "WiFi {:?} ({}), MQTT broker {url} ({})",
            wifi.ssid(),
            if wifi.is_open() { "open" } else { "WPA2" },
            match mqtt.auth() {
                MqttAuth::Anonymous => "anonymous",
                MqttAuth::Basic { .. } => "authenticated",
            },
        );
        Ok(())
    }
}

impl Default for Credentials<'_> {
    fn default() -> Self {
        Credentials::EXAMPLE
    }
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ssid", &self.ssid)
            .field("password", &Redacted(&self.password))
            .field("mqtt_server", &self.mqtt_server)
            .field("mqtt_port", &self.mqtt_port)
            .field("mqtt_user", &self.mqtt_user)
            .field("mqtt_password", &Redacted(&self.mqtt_password))
            .finish()
    }
}

/// Debug stand-in for a secret: shows whether it is set, never its value.
pub(crate) struct Redacted<'s>(pub(crate) &'s str);

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("\"\"")
        } else {
            f.write_str("\"***\"")
        }
    }
}
