//! Subnet route table association resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::SubnetRouteTableAssociation.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;

/// Returns the schema config for ec2_subnet_route_table_association
/// (AWS::EC2::SubnetRouteTableAssociation)
pub fn ec2_subnet_route_table_association_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::SubnetRouteTableAssociation",
        has_tags: false,
        schema: ResourceSchema::new("ec2_subnet_route_table_association")
            .with_description("Associates a subnet with a route table")
            .attribute(
                AttributeSchema::new("subnet_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the subnet")
                    .with_provider_name("SubnetId"),
            )
            .attribute(
                AttributeSchema::new("route_table_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the route table")
                    .with_provider_name("RouteTableId"),
            )
            .attribute(
                AttributeSchema::new("id", AttributeType::String)
                    .with_description("The association ID (read-only)")
                    .with_provider_name("Id"),
            ),
    }
}
