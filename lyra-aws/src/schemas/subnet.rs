//! Subnet resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::Subnet.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_subnet (AWS::EC2::Subnet)
pub fn ec2_subnet_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::Subnet",
        has_tags: true,
        schema: ResourceSchema::new("ec2_subnet")
            .with_description("An AWS VPC Subnet")
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the VPC the subnet is in")
                    .with_provider_name("VpcId"),
            )
            .attribute(
                AttributeSchema::new("cidr_block", types::cidr())
                    .required()
                    .with_description("The IPv4 CIDR block for the subnet")
                    .with_provider_name("CidrBlock"),
            )
            .attribute(
                AttributeSchema::new("availability_zone", AttributeType::String)
                    .with_description("The Availability Zone of the subnet")
                    .with_provider_name("AvailabilityZone"),
            )
            .attribute(
                AttributeSchema::new("map_public_ip_on_launch", AttributeType::Bool)
                    .with_description(
                        "Whether instances launched in this subnet receive a public IPv4 address",
                    )
                    .with_provider_name("MapPublicIpOnLaunch"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the subnet")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("subnet_id", AttributeType::String)
                    .with_description("The ID of the subnet (read-only)")
                    .with_provider_name("SubnetId"),
            ),
    }
}
