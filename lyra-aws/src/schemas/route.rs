//! Route resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::Route. A route targets either an
//! internet gateway or a NAT gateway.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema, types};

use super::AwsSchemaConfig;

/// Returns the schema config for ec2_route (AWS::EC2::Route)
pub fn ec2_route_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::Route",
        has_tags: false,
        schema: ResourceSchema::new("ec2_route")
            .with_description("A route in a VPC route table")
            .attribute(
                AttributeSchema::new("route_table_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the route table for the route")
                    .with_provider_name("RouteTableId"),
            )
            .attribute(
                AttributeSchema::new("destination_cidr_block", types::cidr())
                    .required()
                    .with_description("The IPv4 CIDR block used for the destination match")
                    .with_provider_name("DestinationCidrBlock"),
            )
            .attribute(
                AttributeSchema::new("gateway_id", AttributeType::String)
                    .with_description("The ID of an internet gateway attached to the VPC")
                    .with_provider_name("GatewayId"),
            )
            .attribute(
                AttributeSchema::new("nat_gateway_id", AttributeType::String)
                    .with_description("The ID of a NAT gateway")
                    .with_provider_name("NatGatewayId"),
            ),
    }
}
