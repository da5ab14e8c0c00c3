//! Desired state of a single run, resolved from configuration and inputs.

use std::fmt;
use std::path::PathBuf;

use crate::domain::{AppError, ConfigBundle, ProvisionConfig, VirtualHost};

/// A program plus arguments with placeholders already expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Expand `{package}`, `{site}` and `{service}` in every element of `argv`.
    pub fn expand(argv: &[String], vars: &[(&str, &str)]) -> Result<Self, AppError> {
        let mut expanded = argv.iter().map(|part| {
            vars.iter().fold(part.clone(), |acc, (key, value)| {
                acc.replace(&format!("{{{}}}", key), value)
            })
        });

        let program = expanded
            .next()
            .filter(|program| !program.trim().is_empty())
            .ok_or_else(|| AppError::config_error("Command line must name a program"))?;

        Ok(Self { program, args: expanded.collect() })
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Package that must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: String,
    pub query: CommandLine,
    pub install: CommandLine,
}

/// Directory that must exist with the given owner and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectorySpec {
    pub path: PathBuf,
    pub owner: String,
    pub mode: u32,
}

/// File that must hold exactly `content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub path: PathBuf,
    pub content: String,
}

/// Everything one run converges, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvergePlan {
    pub package: PackageSpec,
    pub directory: DirectorySpec,
    pub site_file: FileSpec,
    pub enable_site: CommandLine,
    pub disable_site: CommandLine,
    pub reload_service: CommandLine,
}

impl ConvergePlan {
    /// Resolve the plan. Pure: touches neither the filesystem nor the network.
    pub fn build(
        config: &ProvisionConfig,
        bundle: &ConfigBundle,
        hostname: &str,
    ) -> Result<Self, AppError> {
        config.validate()?;

        let package = config.package.name.as_str();
        let site = config.site.name.as_str();
        let service = config.service.name.as_str();

        let content = VirtualHost { hostname, web_docroot: &bundle.web_docroot, site }.render()?;

        Ok(Self {
            package: PackageSpec {
                name: package.to_string(),
                query: CommandLine::expand(&config.package.query, &[("package", package)])?,
                install: CommandLine::expand(&config.package.install, &[("package", package)])?,
            },
            directory: DirectorySpec {
                path: bundle.web_docroot.join(&config.site.runone_dir),
                owner: bundle.username.clone(),
                mode: config.site.mode_bits()?,
            },
            site_file: FileSpec { path: config.site.config_path(), content },
            enable_site: CommandLine::expand(&config.site.enable_command, &[("site", site)])?,
            disable_site: CommandLine::expand(
                &config.site.disable_command,
                &[("site", config.site.disable.as_str())],
            )?,
            reload_service: CommandLine::expand(
                &config.service.reload_command,
                &[("service", service)],
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle() -> ConfigBundle {
        ConfigBundle { web_docroot: PathBuf::from("/var/www/app"), username: "deploy".into() }
    }

    #[test]
    fn expand_substitutes_placeholders() {
        let argv = vec!["a2ensite".to_string(), "{site}".to_string()];
        let cmd = CommandLine::expand(&argv, &[("site", "worker")]).unwrap();

        assert_eq!(cmd.program, "a2ensite");
        assert_eq!(cmd.args, vec!["worker"]);
        assert_eq!(cmd.to_string(), "a2ensite worker");
    }

    #[test]
    fn expand_leaves_unrelated_braces() {
        let argv = vec!["dpkg-query".to_string(), "-f=${db:Status-Status}".to_string()];
        let cmd = CommandLine::expand(&argv, &[("package", "apache2")]).unwrap();

        assert_eq!(cmd.args, vec!["-f=${db:Status-Status}"]);
    }

    #[test]
    fn expand_rejects_empty_argv() {
        assert!(CommandLine::expand(&[], &[]).is_err());
    }

    #[test]
    fn default_plan_matches_worker_recipe() {
        let plan = ConvergePlan::build(&ProvisionConfig::default(), &bundle(), "worker-1").unwrap();

        assert_eq!(plan.package.name, "apache2");
        assert_eq!(plan.package.install.to_string(), "apt-get install -y -q apache2");
        assert_eq!(plan.directory.path, PathBuf::from("/var/www/app/oa-runone"));
        assert_eq!(plan.directory.owner, "deploy");
        assert_eq!(plan.directory.mode, 0o755);
        assert_eq!(
            plan.site_file.path,
            PathBuf::from("/etc/apache2/sites-available/worker.conf")
        );
        assert!(plan.site_file.content.contains("ServerName worker-1\n"));
        assert!(plan.site_file.content.contains("DocumentRoot /var/www/app\n"));
        assert_eq!(plan.enable_site.to_string(), "a2ensite worker");
        assert_eq!(plan.disable_site.to_string(), "a2dissite 000-default");
        assert_eq!(plan.reload_service.to_string(), "service apache2 reload");
    }

    #[test]
    fn username_does_not_affect_site_file() {
        let config = ProvisionConfig::default();
        let first = ConvergePlan::build(&config, &bundle(), "worker-1").unwrap();
        let other = ConfigBundle { username: "www-data".into(), ..bundle() };
        let second = ConvergePlan::build(&config, &other, "worker-1").unwrap();

        assert_eq!(first.site_file, second.site_file);
        assert_ne!(first.directory.owner, second.directory.owner);
    }
}
