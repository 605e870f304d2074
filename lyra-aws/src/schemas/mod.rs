//! EC2 resource schema definitions
//!
//! One module per resource type, modeled on the CloudFormation types
//! the network stack declares.

use lyra_core::schema::ResourceSchema;

pub mod eip;
pub mod internet_gateway;
pub mod nat_gateway;
pub mod route;
pub mod route_table;
pub mod route_table_association;
pub mod security_group;
pub mod subnet;
pub mod vpc;
pub mod vpc_gateway_attachment;

/// AWS schema configuration
///
/// Combines a ResourceSchema with AWS-specific metadata.
pub struct AwsSchemaConfig {
    /// AWS CloudFormation type name (e.g., "AWS::EC2::VPC")
    pub aws_type_name: &'static str,
    /// Whether this resource type uses tags
    pub has_tags: bool,
    /// The resource schema with attribute definitions
    pub schema: ResourceSchema,
}

/// Returns all schema configs
pub fn configs() -> Vec<AwsSchemaConfig> {
    vec![
        vpc::ec2_vpc_config(),
        subnet::ec2_subnet_config(),
        internet_gateway::ec2_internet_gateway_config(),
        vpc_gateway_attachment::ec2_vpc_gateway_attachment_config(),
        route_table::ec2_route_table_config(),
        route::ec2_route_config(),
        route_table_association::ec2_subnet_route_table_association_config(),
        eip::ec2_eip_config(),
        nat_gateway::ec2_nat_gateway_config(),
        security_group::ec2_security_group_config(),
    ]
}

/// Look up the schema config for a resource type
pub fn config_for(resource_type: &str) -> Option<AwsSchemaConfig> {
    configs()
        .into_iter()
        .find(|c| c.schema.resource_type == resource_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_for() {
        assert!(config_for("ec2_vpc").is_some());
        assert!(config_for("ec2_subnet").is_some());
        assert!(config_for("unknown").is_none());
    }

    #[test]
    fn test_config_aws_type() {
        assert_eq!(config_for("ec2_vpc").unwrap().aws_type_name, "AWS::EC2::VPC");
        assert_eq!(
            config_for("ec2_subnet").unwrap().aws_type_name,
            "AWS::EC2::Subnet"
        );
        assert_eq!(
            config_for("ec2_vpc_gateway_attachment").unwrap().aws_type_name,
            "AWS::EC2::VPCGatewayAttachment"
        );
        assert_eq!(
            config_for("ec2_subnet_route_table_association")
                .unwrap()
                .aws_type_name,
            "AWS::EC2::SubnetRouteTableAssociation"
        );
        assert_eq!(
            config_for("ec2_security_group").unwrap().aws_type_name,
            "AWS::EC2::SecurityGroup"
        );
    }

    #[test]
    fn test_every_config_has_a_distinct_type() {
        let configs = configs();
        assert_eq!(configs.len(), 10);

        let mut types: Vec<&str> = configs
            .iter()
            .map(|c| c.schema.resource_type.as_str())
            .collect();
        types.sort_unstable();
        types.dedup();
        assert_eq!(types.len(), 10);
    }

    #[test]
    fn test_tagged_types_define_a_tags_attribute() {
        for config in configs() {
            assert_eq!(
                config.has_tags,
                config.schema.attributes.contains_key("tags"),
                "schema '{}' disagrees with its has_tags flag",
                config.schema.resource_type
            );
        }
    }
}
