//! Route table resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::RouteTable.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;
use crate::types::tags_type;

/// Returns the schema config for ec2_route_table (AWS::EC2::RouteTable)
pub fn ec2_route_table_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::RouteTable",
        has_tags: true,
        schema: ResourceSchema::new("ec2_route_table")
            .with_description("An AWS VPC Route Table")
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the VPC the route table belongs to")
                    .with_provider_name("VpcId"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the route table")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("route_table_id", AttributeType::String)
                    .with_description("The ID of the route table (read-only)")
                    .with_provider_name("RouteTableId"),
            ),
    }
}
