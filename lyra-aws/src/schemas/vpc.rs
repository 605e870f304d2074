//! VPC resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::VPC.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_vpc (AWS::EC2::VPC)
pub fn ec2_vpc_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::VPC",
        has_tags: true,
        schema: ResourceSchema::new("ec2_vpc")
            .with_description("An AWS VPC (Virtual Private Cloud)")
            .attribute(
                AttributeSchema::new("cidr_block", types::cidr())
                    .required()
                    .with_description("The IPv4 CIDR block for the VPC")
                    .with_provider_name("CidrBlock"),
            )
            .attribute(
                AttributeSchema::new("enable_dns_support", AttributeType::Bool)
                    .with_description("Enable DNS resolution support")
                    .with_provider_name("EnableDnsSupport"),
            )
            .attribute(
                AttributeSchema::new("enable_dns_hostnames", AttributeType::Bool)
                    .with_description("Enable DNS hostnames")
                    .with_provider_name("EnableDnsHostnames"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the VPC")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .with_description("The ID of the VPC (read-only)")
                    .with_provider_name("VpcId"),
            ),
    }
}
