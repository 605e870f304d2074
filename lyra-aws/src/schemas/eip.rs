//! Elastic IP resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::EIP.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_eip (AWS::EC2::EIP)
pub fn ec2_eip_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::EIP",
        has_tags: true,
        schema: ResourceSchema::new("ec2_eip")
            .with_description("An Elastic IP address")
            .attribute(
                AttributeSchema::new("domain", AttributeType::String)
                    .with_description("Set to 'vpc' to allocate the address for use with a VPC")
                    .with_provider_name("Domain"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the Elastic IP")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("allocation_id", AttributeType::String)
                    .with_description("The allocation ID of the address (read-only)")
                    .with_provider_name("AllocationId"),
            )
            .attribute(
                AttributeSchema::new("public_ip", AttributeType::String)
                    .with_description("The public IP address (read-only)")
                    .with_provider_name("PublicIp"),
            ),
    }
}
