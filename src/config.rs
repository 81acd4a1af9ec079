//! Build-time configuration read from the `[physical-integration-esp-idf]`
//! table of `cfg.toml`.
//!
//! Every value defaults to the placeholder from `cfg.toml.example`, so the
//! crate still builds when no `cfg.toml` is present.

#[toml_cfg::toml_config]
pub struct Config {
    #[default("VOTRE_SSID")]
    pub wifi_ssid: &'static str,
    #[default("VOTRE_PASSWORD")]
    pub wifi_password: &'static str,
    #[default("192.168.1.100")]
    pub mqtt_server: &'static str,
    #[default(1883)]
    pub mqtt_port: u16,
    #[default("")]
    pub mqtt_user: &'static str,
    #[default("")]
    pub mqtt_password: &'static str,
    #[default("ESP32-1")]
    pub mqtt_client_id: &'static str,
    #[default("ESP32-1")]
    pub mqtt_topic: &'static str,
}

#[cfg(test)]
mod tests {
    use super::CONFIG;

    #[test]
    fn port_is_usable() {
        assert_ne!(CONFIG.mqtt_port, 0);
    }

    #[test]
    fn identity_is_set() {
        assert!(!CONFIG.mqtt_client_id.is_empty());
        assert!(!CONFIG.mqtt_topic.is_empty());
    }
}
