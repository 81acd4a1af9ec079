use std::fmt;

use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};

use crate::credentials::Redacted;
use crate::{Error, Result, MAX_PASSWORD_LEN, MAX_SSID_LEN, MIN_PASSWORD_LEN, PSK_HEX_LEN};

/// The `(ssid, password)` pair a network-join routine needs.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WifiCredentials<'a> {
    ssid: &'a str,
    password: &'a str,
}

impl<'a> WifiCredentials<'a> {
    #[inline]
    #[must_use]
    pub const fn new(ssid: &'a str, password: &'a str) -> Self {
        Self { ssid, password }
    }

    #[inline]
    #[must_use]
    pub const fn ssid(&self) -> &'a str {
        self.ssid
    }

    #[inline]
    #[must_use]
    pub const fn password(&self) -> &'a str {
        self.password
    }

    /// An empty password means an open network.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.password.is_empty()
    }

    /// Build the station configuration handed to the WiFi driver.
    ///
    /// Open networks use [`AuthMethod::None`], everything else
    /// [`AuthMethod::WPA2Personal`].
    ///
    /// # Errors
    ///
    /// - if the SSID is empty or longer than 32 bytes
    /// - if the password is longer than 64 bytes
    /// - if the password is set but shorter than 8 bytes
    /// - if the password is not ASCII, or is 64 characters and not hex
    pub fn client_configuration(&self) -> Result<ClientConfiguration> {
        if self.ssid.is_empty() {
            return Err(Error::EmptySsid);
        }
        if self.ssid.len() > MAX_SSID_LEN {
            return Err(Error::SsidTooLong(self.ssid.len()));
        }
        if self.password.len() > MAX_PASSWORD_LEN {
            return Err(Error::PasswordTooLong(self.password.len()));
        }
        if !self.password.is_ascii() {
            return Err(Error::PasswordInvalid);
        }
        if !self.is_open() && self.password.len() < MIN_PASSWORD_LEN {
            return Err(Error::PasswordTooShort(self.password.len()));
        }
        // a 64 character password is a raw PSK, not a passphrase
        if self.password.len() == PSK_HEX_LEN
            && !self.password.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(Error::PasswordInvalid);
        }

        let mut config = ClientConfiguration {
            auth_method: if self.is_open() { AuthMethod::None } else { AuthMethod::WPA2Personal },
            ..ClientConfiguration::default()
        };
        // lengths are checked above
        config.ssid.push_str(self.ssid).map_err(|()| Error::SsidTooLong(self.ssid.len()))?;
        config
            .password
            .push_str(self.password)
            .map_err(|()| Error::PasswordTooLong(self.password.len()))?;

        Ok(config)
    }

    /// [`client_configuration`](Self::client_configuration) wrapped for
    /// `Wifi::set_configuration`.
    ///
    /// # Errors
    ///
    /// - see [`client_configuration`](Self::client_configuration)
    pub fn configuration(&self) -> Result<Configuration> {
        self.client_configuration().map(Configuration::Client)
    }
}

impl fmt::Debug for WifiCredentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &Redacted(self.password))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use embedded_svc::wifi::{AuthMethod, Configuration};

    use super::WifiCredentials;
    use crate::Error;

    #[test]
    fn secured_network() -> anyhow::Result<()> {
        let config = WifiCredentials::new("VOTRE_SSID", "VOTRE_PASSWORD").client_configuration()?;
        assert_eq!(config.ssid.as_str(), "VOTRE_SSID");
        assert_eq!(config.password.as_str(), "VOTRE_PASSWORD");
        assert_eq!(config.auth_method, AuthMethod::WPA2Personal);
        Ok(())
    }

    #[test]
    fn open_network() -> anyhow::Result<()> {
        let wifi = WifiCredentials::new("cafe", "");
        assert!(wifi.is_open());
        let config = wifi.client_configuration()?;
        assert_eq!(config.auth_method, AuthMethod::None);
        assert!(config.password.is_empty());
        Ok(())
    }

    #[test]
    fn wrapped_for_driver() -> anyhow::Result<()> {
        let wifi = WifiCredentials::new("cafe", "");
        assert!(matches!(wifi.configuration()?, Configuration::Client(_)));
        Ok(())
    }

    #[test]
    fn length_limits() {
        let long_ssid = "s".repeat(33);
        let long_password = "p".repeat(65);

        assert!(matches!(
            WifiCredentials::new("", "password").client_configuration(),
            Err(Error::EmptySsid)
        ));
        assert!(matches!(
            WifiCredentials::new(&long_ssid, "password").client_configuration(),
            Err(Error::SsidTooLong(33))
        ));
        assert!(matches!(
            WifiCredentials::new("lab", &long_password).client_configuration(),
            Err(Error::PasswordTooLong(65))
        ));
        assert!(matches!(
            WifiCredentials::new("lab", "short").client_configuration(),
            Err(Error::PasswordTooShort(5))
        ));
    }

    #[test]
    fn limits_are_inclusive() {
        let ssid = "s".repeat(32);
        let psk = "0123456789abcdef".repeat(4);
        let passphrase = "p".repeat(63);
        assert!(WifiCredentials::new(&ssid, &psk).client_configuration().is_ok());
        assert!(WifiCredentials::new("lab", &passphrase).client_configuration().is_ok());
        assert!(WifiCredentials::new("lab", "12345678").client_configuration().is_ok());
    }

    #[test]
    fn raw_psk_must_be_hex() {
        let not_hex = "p".repeat(64);
        assert!(matches!(
            WifiCredentials::new("lab", &not_hex).client_configuration(),
            Err(Error::PasswordInvalid)
        ));
        let upper = "0123456789ABCDEF".repeat(4);
        assert!(WifiCredentials::new("lab", &upper).client_configuration().is_ok());
    }

    #[test]
    fn passphrase_must_be_ascii() {
        // 4 characters, 8 bytes
        assert!(matches!(
            WifiCredentials::new("lab", "éééé").client_configuration(),
            Err(Error::PasswordInvalid)
        ));
        assert!(matches!(
            WifiCredentials::new("lab", "mot-de-passé").client_configuration(),
            Err(Error::PasswordInvalid)
        ));
    }

    #[test]
    fn debug_hides_password() {
        let out = format!("{:?}", WifiCredentials::new("lab", "hunter22"));
        assert!(out.contains("lab"));
        assert!(!out.contains("hunter22"));
    }
}
