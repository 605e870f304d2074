//! NAT gateway resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::NatGateway.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_nat_gateway (AWS::EC2::NatGateway)
pub fn ec2_nat_gateway_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::NatGateway",
        has_tags: true,
        schema: ResourceSchema::new("ec2_nat_gateway")
            .with_description("A NAT gateway for outbound traffic from private subnets")
            .attribute(
                AttributeSchema::new("subnet_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the public subnet the NAT gateway lives in")
                    .with_provider_name("SubnetId"),
            )
            .attribute(
                AttributeSchema::new("allocation_id", AttributeType::String)
                    .with_description(
                        "The allocation ID of the Elastic IP address, required for a public NAT gateway",
                    )
                    .with_provider_name("AllocationId"),
            )
            .attribute(
                AttributeSchema::new(
                    "connectivity_type",
                    AttributeType::Enum(vec!["public".to_string(), "private".to_string()]),
                )
                .with_description("Whether the NAT gateway supports public or private connectivity")
                .with_provider_name("ConnectivityType"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the NAT gateway")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("nat_gateway_id", AttributeType::String)
                    .with_description("The ID of the NAT gateway (read-only)")
                    .with_provider_name("NatGatewayId"),
            ),
    }
}
