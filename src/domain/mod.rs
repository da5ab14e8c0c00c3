pub mod config_bundle;
pub mod error;
pub mod plan;
pub mod provision_config;
pub mod report;
pub mod vhost;

pub use config_bundle::ConfigBundle;
pub use error::AppError;
pub use plan::{CommandLine, ConvergePlan, DirectorySpec, FileSpec, PackageSpec};
pub use provision_config::{
    DataBagConfig, PackageConfig, ProvisionConfig, ServiceConfig, SiteConfig,
};
pub use report::{ConvergeReport, Step, StepOutcome, StepStatus};
pub use vhost::VirtualHost;
