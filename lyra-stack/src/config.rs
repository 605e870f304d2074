//! Stack configuration
//!
//! The topology is fixed; only a handful of settings can be overridden
//! from the command line.

/// Project prefix for resource names
pub const PROJECT_PREFIX: &str = "lyra-demo";

/// AWS region the stack targets
pub const REGION: &str = "us-east-1";

/// Availability zones; each gets one public, one app, and one db subnet
pub const AVAILABILITY_ZONES: &[&str] = &["us-east-1a", "us-east-1b"];

/// VPC CIDR block
pub const VPC_CIDR: &str = "10.0.0.0/16";

/// Public subnet CIDRs, one per availability zone
pub const PUBLIC_SUBNET_CIDRS: &[&str] = &["10.0.1.0/24", "10.0.2.0/24"];

/// Private application subnet CIDRs, one per availability zone
pub const PRIVATE_APP_SUBNET_CIDRS: &[&str] = &["10.0.3.0/24", "10.0.4.0/24"];

/// Private database subnet CIDRs, one per availability zone
pub const PRIVATE_DB_SUBNET_CIDRS: &[&str] = &["10.0.5.0/24", "10.0.6.0/24"];

/// Default CIDR allowed to reach the app tier over SSH
///
/// Wide open for the demo environment; narrow it with --ssh-cidr.
pub const DEFAULT_SSH_CIDR: &str = "0.0.0.0/0";

/// Settings used while declaring the network stack
#[derive(Debug, Clone)]
pub struct StackConfig {
    pub project: String,
    pub region: String,
    pub availability_zones: Vec<String>,
    pub vpc_cidr: String,
    pub public_subnet_cidrs: Vec<String>,
    pub private_app_subnet_cidrs: Vec<String>,
    pub private_db_subnet_cidrs: Vec<String>,
    pub allowed_ssh_cidr: String,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            project: PROJECT_PREFIX.to_string(),
            region: REGION.to_string(),
            availability_zones: AVAILABILITY_ZONES.iter().map(|s| s.to_string()).collect(),
            vpc_cidr: VPC_CIDR.to_string(),
            public_subnet_cidrs: PUBLIC_SUBNET_CIDRS.iter().map(|s| s.to_string()).collect(),
            private_app_subnet_cidrs: PRIVATE_APP_SUBNET_CIDRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            private_db_subnet_cidrs: PRIVATE_DB_SUBNET_CIDRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_ssh_cidr: DEFAULT_SSH_CIDR.to_string(),
        }
    }
}

impl StackConfig {
    /// Override the CIDR allowed to reach the app tier over SSH
    pub fn with_ssh_cidr(mut self, cidr: impl Into<String>) -> Self {
        self.allowed_ssh_cidr = cidr.into();
        self
    }
}
