//! Tool configuration loaded from `provision.toml`.
//!
//! Every field defaults to the value the worker recipe has always used, so an
//! empty or absent file converges the stock Apache worker layout.

use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::AppError;

/// Top-level provisioning configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvisionConfig {
    #[serde(default)]
    pub data_bag: DataBagConfig,
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Location of the data bag item holding the run's inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataBagConfig {
    /// Root directory containing one sub-directory per bag.
    #[serde(default = "default_data_bag_path")]
    pub path: PathBuf,
    #[serde(default = "default_bag")]
    pub bag: String,
    #[serde(default = "default_item")]
    pub item: String,
}

impl Default for DataBagConfig {
    fn default() -> Self {
        Self { path: default_data_bag_path(), bag: default_bag(), item: default_item() }
    }
}

impl DataBagConfig {
    /// Path of the item file: `{path}/{bag}/{item}.json`.
    pub fn item_path(&self) -> PathBuf {
        self.path.join(&self.bag).join(format!("{}.json", self.item))
    }
}

/// Web server package and how to query and install it.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    #[serde(default = "default_package")]
    pub name: String,
    /// Exits zero and prints `installed` when the package is present.
    #[serde(default = "default_query_command")]
    pub query: Vec<String>,
    #[serde(default = "default_install_command")]
    pub install: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: default_package(),
            query: default_query_command(),
            install: default_install_command(),
        }
    }
}

/// Virtual host site layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    #[serde(default = "default_site")]
    pub name: String,
    #[serde(default = "default_available_dir")]
    pub available_dir: PathBuf,
    /// Directory created beneath the document root.
    #[serde(default = "default_runone_dir")]
    pub runone_dir: String,
    /// Octal permission bits for the run directory.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Site disabled after the worker site is enabled.
    #[serde(default = "default_disable")]
    pub disable: String,
    #[serde(default = "default_enable_command")]
    pub enable_command: Vec<String>,
    #[serde(default = "default_disable_command")]
    pub disable_command: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: default_site(),
            available_dir: default_available_dir(),
            runone_dir: default_runone_dir(),
            mode: default_mode(),
            disable: default_disable(),
            enable_command: default_enable_command(),
            disable_command: default_disable_command(),
        }
    }
}

impl SiteConfig {
    /// Path of the rendered site file: `{available_dir}/{name}.conf`.
    pub fn config_path(&self) -> PathBuf {
        self.available_dir.join(format!("{}.conf", self.name))
    }

    pub fn mode_bits(&self) -> Result<u32, AppError> {
        parse_mode(&self.mode)
    }
}

/// Service reloaded at the end of every run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    #[serde(default = "default_service")]
    pub name: String,
    #[serde(default = "default_reload_command")]
    pub reload_command: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { name: default_service(), reload_command: default_reload_command() }
    }
}

impl ProvisionConfig {
    /// Reject values that would make a run meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        let names = [
            ("data_bag.bag", &self.data_bag.bag),
            ("data_bag.item", &self.data_bag.item),
            ("package.name", &self.package.name),
            ("site.name", &self.site.name),
            ("site.runone_dir", &self.site.runone_dir),
            ("site.disable", &self.site.disable),
            ("service.name", &self.service.name),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(AppError::config_error(format!("{} must not be empty", field)));
            }
        }

        if self.site.name.contains('/') || self.site.runone_dir.contains('/') {
            return Err(AppError::config_error(
                "site.name and site.runone_dir must be single path components",
            ));
        }

        let commands = [
            ("package.query", &self.package.query),
            ("package.install", &self.package.install),
            ("site.enable_command", &self.site.enable_command),
            ("site.disable_command", &self.site.disable_command),
            ("service.reload_command", &self.service.reload_command),
        ];
        for (field, argv) in commands {
            if argv.first().is_none_or(|program| program.trim().is_empty()) {
                return Err(AppError::config_error(format!("{} must name a program", field)));
            }
        }

        self.site.mode_bits()?;
        Ok(())
    }
}

/// Parse an octal mode string such as `0755` or `755`.
pub fn parse_mode(mode: &str) -> Result<u32, AppError> {
    let digits = mode.trim();
    let bits = u32::from_str_radix(digits, 8)
        .map_err(|_| AppError::config_error(format!("Invalid octal mode '{}'", mode)))?;
    if bits > 0o7777 {
        return Err(AppError::config_error(format!("Mode '{}' is out of range", mode)));
    }
    Ok(bits)
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|part| part.to_string()).collect()
}

fn default_data_bag_path() -> PathBuf {
    PathBuf::from("/var/chef/data_bags")
}

fn default_bag() -> String {
    "data".to_string()
}

fn default_item() -> String {
    "local".to_string()
}

fn default_package() -> String {
    "apache2".to_string()
}

fn default_query_command() -> Vec<String> {
    argv(&["dpkg-query", "-W", "-f=${db:Status-Status}", "{package}"])
}

fn default_install_command() -> Vec<String> {
    argv(&["apt-get", "install", "-y", "-q", "{package}"])
}

fn default_site() -> String {
    "worker".to_string()
}

fn default_available_dir() -> PathBuf {
    PathBuf::from("/etc/apache2/sites-available")
}

fn default_runone_dir() -> String {
    "oa-runone".to_string()
}

fn default_mode() -> String {
    "0755".to_string()
}

fn default_disable() -> String {
    "000-default".to_string()
}

fn default_enable_command() -> Vec<String> {
    argv(&["a2ensite", "{site}"])
}

fn default_disable_command() -> Vec<String> {
    argv(&["a2dissite", "{site}"])
}

fn default_service() -> String {
    "apache2".to_string()
}

fn default_reload_command() -> Vec<String> {
    argv(&["service", "{service}", "reload"])
}
