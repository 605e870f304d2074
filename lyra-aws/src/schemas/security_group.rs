//! Security group resource schema definition
//!
//! Modeled on CloudFormation AWS::EC2::SecurityGroup with inline
//! ingress and egress rules.

use lyra_core::schema::{AttributeSchema, AttributeType, ResourceSchema};

use super::AwsSchemaConfig;
use crate::types::{egress_rule, ingress_rule, tags_type};

/// Returns the schema config for ec2_security_group (AWS::EC2::SecurityGroup)
pub fn ec2_security_group_config() -> AwsSchemaConfig {
    AwsSchemaConfig {
        aws_type_name: "AWS::EC2::SecurityGroup",
        has_tags: true,
        schema: ResourceSchema::new("ec2_security_group")
            .with_description("An AWS VPC Security Group with inline rules")
            .attribute(
                AttributeSchema::new("group_name", AttributeType::String)
                    .with_description("The name of the security group")
                    .with_provider_name("GroupName"),
            )
            .attribute(
                AttributeSchema::new("description", AttributeType::String)
                    .required()
                    .with_description("A description for the security group")
                    .with_provider_name("GroupDescription"),
            )
            .attribute(
                AttributeSchema::new("vpc_id", AttributeType::String)
                    .required()
                    .with_description("The ID of the VPC for the security group")
                    .with_provider_name("VpcId"),
            )
            .attribute(
                AttributeSchema::new("ingress", AttributeType::List(Box::new(ingress_rule())))
                    .with_description("The inbound rules associated with the security group")
                    .with_provider_name("SecurityGroupIngress"),
            )
            .attribute(
                AttributeSchema::new("egress", AttributeType::List(Box::new(egress_rule())))
                    .with_description("The outbound rules associated with the security group")
                    .with_provider_name("SecurityGroupEgress"),
            )
            .attribute(
                AttributeSchema::new("tags", tags_type())
                    .with_description("The tags for the security group")
                    .with_provider_name("Tags"),
            )
            .attribute(
                AttributeSchema::new("group_id", AttributeType::String)
                    .with_description("The ID of the security group (read-only)")
                    .with_provider_name("GroupId"),
            ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_core::resource::Value;
    use lyra_core::schema::TypeError;
    use std::collections::HashMap;

    fn rule(entries: &[(&str, Value)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn base_attrs() -> HashMap<String, Value> {
        let mut attrs = HashMap::new();
        attrs.insert(
            "description".to_string(),
            Value::String("Security group for the web tier".to_string()),
        );
        attrs.insert(
            "vpc_id".to_string(),
            Value::Ref("vpc".to_string(), "vpc_id".to_string()),
        );
        attrs
    }

    #[test]
    fn valid_security_group_with_rules() {
        let config = ec2_security_group_config();
        let mut attrs = base_attrs();
        attrs.insert(
            "ingress".to_string(),
            Value::List(vec![rule(&[
                ("ip_protocol", Value::String("tcp".to_string())),
                ("from_port", Value::Int(443)),
                ("to_port", Value::Int(443)),
                ("cidr_ip", Value::String("0.0.0.0/0".to_string())),
            ])]),
        );
        attrs.insert(
            "egress".to_string(),
            Value::List(vec![rule(&[
                ("ip_protocol", Value::String("-1".to_string())),
                ("from_port", Value::Int(0)),
                ("to_port", Value::Int(0)),
                ("cidr_ip", Value::String("0.0.0.0/0".to_string())),
            ])]),
        );

        assert!(config.schema.validate(&attrs).is_ok());
    }

    #[test]
    fn invalid_rule_surfaces_as_list_item_error() {
        let config = ec2_security_group_config();
        let mut attrs = base_attrs();
        attrs.insert(
            "ingress".to_string(),
            Value::List(vec![rule(&[
                ("ip_protocol", Value::String("tcp".to_string())),
                ("from_port", Value::Int(80)),
                ("to_port", Value::Int(80)),
                // Missing cidr_ip / source_security_group_id
            ])]),
        );

        let errors = config.schema.validate(&attrs).unwrap_err();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, TypeError::ListItemError { index: 0, .. }))
        );
    }

    #[test]
    fn security_group_requires_description_and_vpc() {
        let config = ec2_security_group_config();
        let attrs = HashMap::new();

        let errors = config.schema.validate(&attrs).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
