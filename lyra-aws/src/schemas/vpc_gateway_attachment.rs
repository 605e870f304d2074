//! VPC gateway attachment resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::VPCGatewayAttachment.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;

/// Returns the schema config for ec2_vpc_gateway_attachment (AWS::EC2::VPCGatewayAttachment)
pub fn ec2_vpc_gateway_attachment_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::VPCGatewayAttachment",
        has_tags: false,
        schema: ResourceSchema::new("ec2_vpc_gateway_attachment")
            .with_description("Attaches an internet gateway to a VPC")
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the VPC")
                    .with_provider_name("VpcId"),
            )
            .attribute(
                AttributeSchema::new("internet_gateway_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the internet gateway to attach")
                    .with_provider_name("InternetGatewayId"),
            ),
    }
}
