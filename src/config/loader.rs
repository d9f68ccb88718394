use crate::config::schema::SiteConfig;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use validator::Validate;

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SiteConfig> {
        let path = path.as_ref();
        let config = Self::load_file(path)?;
        config.validate().map_err(|source| Error::Validation {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<SiteConfig> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config: SiteConfig = serde_json::from_str(&content)?;
                Ok(config)
            }
            Some("yaml") | Some("yml") => {
                let config: SiteConfig = serde_yaml::from_str(&content)?;
                Ok(config)
            }
            Some("toml") => {
                let config: SiteConfig = toml::from_str(&content)?;
                Ok(config)
            }
            _ => Err(Error::Config(format!(
                "Unsupported file extension: {}",
                path.display()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_json_with_defaults() {
        let file = write_config(
            ".json",
            r#"{
                "wordpress": {
                    "application_password": {"username": "admin", "password": "s3cret"},
                    "api_url": "https://example.com/wp-json/wp/v2"
                }
            }"#,
        );

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.wordpress.application_password.username, "admin");
        assert!(config.woocommerce.is_none());
        assert_eq!(config.checks.per_page, 100);
        assert_eq!(config.checks.elementor_probe_limit, 10);
        assert_eq!(config.checks.min_products, 3);
    }

    #[test]
    fn loads_toml_with_woocommerce() {
        let file = write_config(
            ".toml",
            r#"
            [wordpress]
            api_url = "https://example.com/wp-json/wp/v2"

            [wordpress.application_password]
            username = "admin"
            password = "s3cret"

            [woocommerce]
            consumer_key = "ck_123"
            consumer_secret = "cs_456"
            api_url = "https://example.com/wp-json/wc/v3"

            [checks]
            elementor_probe_limit = 5
            "#,
        );

        let config = ConfigLoader::load(file.path()).unwrap();
        let wc = config.woocommerce.unwrap();
        assert!(wc.is_configured());
        assert_eq!(config.checks.elementor_probe_limit, 5);
    }

    #[test]
    fn missing_wordpress_credentials_is_an_error() {
        let file = write_config(
            ".json",
            r#"{
                "wordpress": {
                    "application_password": {"username": "", "password": ""},
                    "api_url": "https://example.com/wp-json/wp/v2"
                }
            }"#,
        );

        let err = ConfigLoader::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        // The diagnostic names the offending file, like parse and IO errors do.
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ConfigLoader::load("does-not-exist.json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn blank_woocommerce_keys_count_as_unconfigured() {
        let file = write_config(
            ".json",
            r#"{
                "wordpress": {
                    "application_password": {"username": "admin", "password": "s3cret"},
                    "api_url": "https://example.com/wp-json/wp/v2"
                },
                "woocommerce": {"consumer_key": "", "consumer_secret": "", "api_url": ""}
            }"#,
        );

        let config = ConfigLoader::load(file.path()).unwrap();
        assert!(!config.woocommerce.unwrap().is_configured());
    }
}
