//! Internet gateway resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::InternetGateway.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_internet_gateway (AWS::EC2::InternetGateway)
pub fn ec2_internet_gateway_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::InternetGateway",
        has_tags: true,
        schema: ResourceSchema::new("ec2_internet_gateway")
            .with_description("An AWS Internet Gateway")
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the internet gateway")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("internet_gateway_id", AttributeType::String)
                    .with_description("The ID of the internet gateway (read-only)")
                    .with_provider_name("InternetGatewayId"),
            ),
    }
}
