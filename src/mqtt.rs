use std::fmt;
use std::net::Ipv6Addr;

use crate::config::CONFIG;
use crate::credentials::Redacted;
use crate::{Error, Result};

/// How the device authenticates to the broker.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MqttAuth<'a> {
    Anonymous,
    Basic { username: &'a str, password: &'a str },
}

impl fmt::Debug for MqttAuth<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("Anonymous"),
            Self::Basic { username, password } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &Redacted(password))
                .finish(),
        }
    }
}

/// The `(server, port, user, password)` tuple an MQTT client needs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MqttCredentials<'a> {
    server: &'a str,
    port: u16,
    user: &'a str,
    password: &'a str,
}

impl<'a> MqttCredentials<'a> {
    #[inline]
    #[must_use]
    pub const fn new(server: &'a str, port: u16, user: &'a str, password: &'a str) -> Self {
        Self { server, port, user, password }
    }

    #[inline]
    #[must_use]
    pub const fn server(&self) -> &'a str {
        self.server
    }

    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[inline]
    #[must_use]
    pub const fn user(&self) -> &'a str {
        self.user
    }

    #[inline]
    #[must_use]
    pub const fn password(&self) -> &'a str {
        self.password
    }

    /// Credentials are only sent when both user and password are set. A
    /// half-filled pair is treated as anonymous.
    #[must_use]
    pub const fn auth(&self) -> MqttAuth<'a> {
        if self.user.is_empty() || self.password.is_empty() {
            MqttAuth::Anonymous
        } else {
            MqttAuth::Basic { username: self.user, password: self.password }
        }
    }

    /// Exactly one of user and password is set.
    #[inline]
    #[must_use]
    pub const fn is_half_configured(&self) -> bool {
        self.user.is_empty() != self.password.is_empty()
    }

    /// Broker URL in the form `mqtt://host:port`. IPv6 literals are put in
    /// brackets.
    ///
    /// # Errors
    ///
    /// - if the server is empty
    /// - if the port is 0
    pub fn broker_url(&self) -> Result<String> {
        let host = self.server.trim();
        if host.is_empty() {
            return Err(Error::EmptyServer);
        }
        if self.port == 0 {
            return Err(Error::InvalidPort(self.port));
        }

        if host.parse::<Ipv6Addr>().is_ok() {
            Ok(format!("mqtt://[{host}]:{}", self.port))
        } else {
            Ok(format!("mqtt://{host}:{}", self.port))
        }
    }

    /// Client ID of the form `{base}_{suffix}`.
    ///
    /// `suffix` should change between boots (uptime, MAC address, ...) so a
    /// reconnecting device does not kick its previous session off the
    /// broker. An empty `base` falls back to [`DEFAULT_CLIENT_ID`](crate::DEFAULT_CLIENT_ID).
    #[must_use]
    pub fn client_id(base: &str, suffix: impl fmt::Display) -> String {
        let base = if base.is_empty() { crate::DEFAULT_CLIENT_ID } else { base };
        format!("{base}_{suffix}")
    }
}

impl fmt::Debug for MqttCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MqttCredentials")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &Redacted(self.password))
            .finish()
    }
}

/// Client ID prefix and topic the device is known by on the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MqttIdentity<'a> {
    client_id: &'a str,
    topic: &'a str,
}

impl<'a> MqttIdentity<'a> {
    #[inline]
    #[must_use]
    pub const fn new(client_id: &'a str, topic: &'a str) -> Self {
        Self { client_id, topic }
    }

    /// `mqtt_client_id` and `mqtt_topic` from `cfg.toml`.
    #[must_use]
    pub const fn from_config() -> MqttIdentity<'static> {
        MqttIdentity { client_id: CONFIG.mqtt_client_id, topic: CONFIG.mqtt_topic }
    }

    /// The configured prefix, [`DEFAULT_CLIENT_ID`](crate::DEFAULT_CLIENT_ID)
    /// when empty.
    #[must_use]
    pub const fn client_id_base(&self) -> &'a str {
        if self.client_id.is_empty() {
            crate::DEFAULT_CLIENT_ID
        } else {
            self.client_id
        }
    }

    /// Per-boot client ID, see [`MqttCredentials::client_id`].
    #[must_use]
    pub fn client_id(&self, suffix: impl fmt::Display) -> String {
        MqttCredentials::client_id(self.client_id_base(), suffix)
    }

    /// The topic the Unity scene subscribes to, [`DEFAULT_TOPIC`](crate::DEFAULT_TOPIC)
    /// when empty.
    #[must_use]
    pub const fn topic(&self) -> &'a str {
        if self.topic.is_empty() {
            crate::DEFAULT_TOPIC
        } else {
            self.topic
        }
    }
}

impl Default for MqttIdentity<'_> {
    fn default() -> Self {
        MqttIdentity::new(crate::DEFAULT_CLIENT_ID, crate::DEFAULT_TOPIC)
    }
}

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_svc::mqtt::client::{MqttClientConfiguration, MqttProtocolVersion};

    use super::{MqttAuth, MqttCredentials};

    impl<'a> MqttCredentials<'a> {
        /// Configuration for `EspMqttClient::new`, paired with
        /// [`broker_url`](Self::broker_url).
        #[must_use]
        pub fn client_configuration(&self, client_id: &'a str) -> MqttClientConfiguration<'a> {
            let (username, password) = match self.auth() {
                MqttAuth::Basic { username, password } => (Some(username), Some(password)),
                MqttAuth::Anonymous => (None, None),
            };

            MqttClientConfiguration {
                protocol_version: Some(MqttProtocolVersion::V3_1_1),
                client_id: Some(client_id),
                username,
                password,
                ..MqttClientConfiguration::default()
            }
        }
    }
}
