//! Manifest rendering for declared stacks
//!
//! Validates every resource against its schema, maps attribute names
//! to provider casing, and emits a Manifest in creation order.

use serde_json::json;
use thiserror::Error;

use lyra_core::manifest::{Manifest, ManifestResource, ref_placeholder};
use lyra_core::resource::Value;
use lyra_core::stack::{Stack, StackError};

use crate::schemas::config_for;
use crate::types::RULE_ATTRIBUTES;

/// Errors raised while rendering a stack into a manifest
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Stack(#[from] StackError),

    #[error("Unknown resource type '{resource_type}' for '{binding}'")]
    UnknownResourceType {
        binding: String,
        resource_type: String,
    },

    #[error("Validation failed for '{binding}': {errors}")]
    Validation { binding: String, errors: String },

    #[error("Output '{name}' must be a string or reference")]
    InvalidOutput { name: String },
}

/// Render a declared stack into a creation manifest
pub fn render_manifest(
    stack: &Stack,
    project: &str,
    region: &str,
) -> Result<Manifest, RenderError> {
    let ordered = stack.ordered()?;
    let graph = stack.graph();

    let mut manifest = Manifest::new(project, region);

    for (binding, resource) in ordered {
        let config = config_for(&resource.id.resource_type).ok_or_else(|| {
            RenderError::UnknownResourceType {
                binding: binding.clone(),
                resource_type: resource.id.resource_type.clone(),
            }
        })?;

        config
            .schema
            .validate(&resource.attributes)
            .map_err(|errors| RenderError::Validation {
                binding: binding.clone(),
                errors: errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            })?;

        let mut desired_state = serde_json::Map::new();

        // Map declared attributes to AWS attributes using provider_name
        for (dsl_name, attr_schema) in &config.schema.attributes {
            // Skip tags - handled separately below
            if dsl_name == "tags" {
                continue;
            }
            if let Some(aws_name) = &attr_schema.provider_name
                && let Some(value) = resource.attributes.get(dsl_name.as_str())
            {
                desired_state.insert(aws_name.to_string(), attribute_to_json(dsl_name, value));
            }
        }

        if config.has_tags {
            let tags = build_tags(resource.attributes.get("tags"));
            if !tags.is_empty() {
                desired_state.insert("Tags".to_string(), json!(tags));
            }
        }

        set_default_values(&resource.id.resource_type, &mut desired_state);

        manifest.resources.push(ManifestResource {
            binding: binding.clone(),
            resource_type: resource.id.resource_type.clone(),
            name: resource.id.name.clone(),
            aws_type: config.aws_type_name.to_string(),
            depends_on: graph.dependency_targets(binding),
            desired_state: serde_json::Value::Object(desired_state),
        });
    }

    for (name, value) in stack.outputs() {
        let rendered = match value {
            Value::Ref(binding, attribute) => ref_placeholder(binding, attribute),
            Value::String(s) => s.clone(),
            _ => return Err(RenderError::InvalidOutput { name: name.clone() }),
        };
        manifest.outputs.insert(name.clone(), rendered);
    }

    Ok(manifest)
}

/// Convert a declared attribute to its AWS JSON value
fn attribute_to_json(dsl_name: &str, value: &Value) -> serde_json::Value {
    match dsl_name {
        "ingress" | "egress" => {
            if let Value::List(rules) = value {
                serde_json::Value::Array(rules.iter().map(rule_to_json).collect())
            } else {
                value_to_json(value)
            }
        }
        _ => value_to_json(value),
    }
}

/// Convert a security group rule map to provider attribute casing
fn rule_to_json(rule: &Value) -> serde_json::Value {
    match rule {
        Value::Map(fields) => {
            let mut obj = serde_json::Map::new();
            for (name, provider_name) in RULE_ATTRIBUTES {
                if let Some(value) = fields.get(*name) {
                    obj.insert((*provider_name).to_string(), value_to_json(value));
                }
            }
            serde_json::Value::Object(obj)
        }
        other => value_to_json(other),
    }
}

/// Convert a Value to a JSON value, encoding references as placeholders
fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Int(i) => json!(i),
        Value::Bool(b) => json!(b),
        Value::List(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
        Value::Map(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                obj.insert(k.clone(), value_to_json(v));
            }
            serde_json::Value::Object(obj)
        }
        Value::Ref(binding, attribute) => json!(ref_placeholder(binding, attribute)),
    }
}

/// Build tags array for CloudFormation format, sorted by key
fn build_tags(user_tags: Option<&Value>) -> Vec<serde_json::Value> {
    let mut tags = Vec::new();
    if let Some(Value::Map(user_tags)) = user_tags {
        let mut entries: Vec<(&String, &Value)> = user_tags.iter().collect();
        entries.sort_by_key(|(key, _)| key.as_str());
        for (key, value) in entries {
            if let Value::String(v) = value {
                tags.push(json!({"Key": key, "Value": v}));
            }
        }
    }
    tags
}

/// Set default values for create
fn set_default_values(
    resource_type: &str,
    desired_state: &mut serde_json::Map<String, serde_json::Value>,
) {
    if resource_type == "ec2_eip" && !desired_state.contains_key("Domain") {
        desired_state.insert("Domain".to_string(), json!("vpc"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lyra_core::resource::Resource;
    use std::collections::HashMap;

    fn tags(name: &str) -> Value {
        let mut map = HashMap::new();
        map.insert("Name".to_string(), Value::String(name.to_string()));
        Value::Map(map)
    }

    fn vpc_with_subnet() -> Stack {
        let mut stack = Stack::new();
        let vpc = stack
            .declare(
                "vpc",
                Resource::new("ec2_vpc", "test-vpc")
                    .with_attribute("cidr_block", Value::String("10.0.0.0/16".to_string()))
                    .with_attribute("enable_dns_support", Value::Bool(true))
                    .with_attribute("tags", tags("test-vpc")),
            )
            .unwrap();
        stack
            .declare(
                "subnet",
                Resource::new("ec2_subnet", "test-subnet")
                    .with_attribute("vpc_id", vpc.attr("vpc_id"))
                    .with_attribute("cidr_block", Value::String("10.0.1.0/24".to_string()))
                    .with_attribute("map_public_ip_on_launch", Value::Bool(true)),
            )
            .unwrap();
        stack.export("vpc_id", vpc.attr("vpc_id")).unwrap();
        stack
    }

    #[test]
    fn test_render_resources_in_creation_order() {
        let stack = vpc_with_subnet();
        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();

        assert_eq!(manifest.project, "test");
        assert_eq!(manifest.region, "us-east-1");
        assert_eq!(manifest.resources.len(), 2);
        assert_eq!(manifest.resources[0].binding, "vpc");
        assert_eq!(manifest.resources[1].binding, "subnet");
        assert_eq!(manifest.resources[1].depends_on, vec!["vpc".to_string()]);
    }

    #[test]
    fn test_render_uses_provider_attribute_names() {
        let stack = vpc_with_subnet();
        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();

        let vpc = manifest.find_resource("vpc").unwrap();
        assert_eq!(vpc.aws_type, "AWS::EC2::VPC");
        assert_eq!(vpc.desired_state["CidrBlock"], json!("10.0.0.0/16"));
        assert_eq!(vpc.desired_state["EnableDnsSupport"], json!(true));

        let subnet = manifest.find_resource("subnet").unwrap();
        assert_eq!(subnet.desired_state["VpcId"], json!("${vpc.vpc_id}"));
        assert_eq!(subnet.desired_state["MapPublicIpOnLaunch"], json!(true));
    }

    #[test]
    fn test_render_tags_as_key_value_array() {
        let mut stack = Stack::new();
        let mut tag_map = HashMap::new();
        tag_map.insert("Name".to_string(), Value::String("test-vpc".to_string()));
        tag_map.insert(
            "Environment".to_string(),
            Value::String("demo".to_string()),
        );
        stack
            .declare(
                "vpc",
                Resource::new("ec2_vpc", "test-vpc")
                    .with_attribute("cidr_block", Value::String("10.0.0.0/16".to_string()))
                    .with_attribute("tags", Value::Map(tag_map)),
            )
            .unwrap();

        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();
        let vpc = manifest.find_resource("vpc").unwrap();
        assert_eq!(
            vpc.desired_state["Tags"],
            json!([
                {"Key": "Environment", "Value": "demo"},
                {"Key": "Name", "Value": "test-vpc"},
            ])
        );
    }

    #[test]
    fn test_render_rejects_unknown_resource_type() {
        let mut stack = Stack::new();
        stack
            .declare("gateway", Resource::new("ec2_vpn_gateway", "test-vgw"))
            .unwrap();

        let err = render_manifest(&stack, "test", "us-east-1").unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownResourceType { binding, .. } if binding == "gateway"
        ));
    }

    #[test]
    fn test_render_rejects_invalid_resource() {
        let mut stack = Stack::new();
        // Subnet without its required cidr_block and vpc_id.
        stack
            .declare("subnet", Resource::new("ec2_subnet", "test-subnet"))
            .unwrap();

        let err = render_manifest(&stack, "test", "us-east-1").unwrap_err();
        assert!(matches!(
            err,
            RenderError::Validation { binding, .. } if binding == "subnet"
        ));
    }

    #[test]
    fn test_render_defaults_eip_domain_to_vpc() {
        let mut stack = Stack::new();
        stack
            .declare("nat_eip", Resource::new("ec2_eip", "test-eip"))
            .unwrap();

        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();
        let eip = manifest.find_resource("nat_eip").unwrap();
        assert_eq!(eip.desired_state["Domain"], json!("vpc"));
    }

    #[test]
    fn test_render_security_group_rules() {
        let mut stack = Stack::new();
        let vpc = stack
            .declare(
                "vpc",
                Resource::new("ec2_vpc", "test-vpc")
                    .with_attribute("cidr_block", Value::String("10.0.0.0/16".to_string())),
            )
            .unwrap();
        let app_sg = stack
            .declare(
                "app_sg",
                Resource::new("ec2_security_group", "app-sg")
                    .with_attribute("description", Value::String("App tier".to_string()))
                    .with_attribute("vpc_id", vpc.attr("vpc_id"))
                    .with_attribute(
                        "ingress",
                        Value::List(vec![Value::Map(HashMap::from([
                            ("ip_protocol".to_string(), Value::String("tcp".to_string())),
                            ("from_port".to_string(), Value::Int(80)),
                            ("to_port".to_string(), Value::Int(80)),
                            ("cidr_ip".to_string(), Value::String("0.0.0.0/0".to_string())),
                        ]))]),
                    ),
            )
            .unwrap();
        stack
            .declare(
                "db_sg",
                Resource::new("ec2_security_group", "db-sg")
                    .with_attribute("description", Value::String("DB tier".to_string()))
                    .with_attribute("vpc_id", vpc.attr("vpc_id"))
                    .with_attribute(
                        "ingress",
                        Value::List(vec![Value::Map(HashMap::from([
                            ("ip_protocol".to_string(), Value::String("tcp".to_string())),
                            ("from_port".to_string(), Value::Int(3306)),
                            ("to_port".to_string(), Value::Int(3306)),
                            (
                                "source_security_group_id".to_string(),
                                app_sg.attr("group_id"),
                            ),
                        ]))]),
                    ),
            )
            .unwrap();

        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();

        let app = manifest.find_resource("app_sg").unwrap();
        assert_eq!(
            app.desired_state["SecurityGroupIngress"],
            json!([{
                "IpProtocol": "tcp",
                "FromPort": 80,
                "ToPort": 80,
                "CidrIp": "0.0.0.0/0",
            }])
        );

        let db = manifest.find_resource("db_sg").unwrap();
        let db_rule = &db.desired_state["SecurityGroupIngress"][0];
        assert_eq!(db_rule["SourceSecurityGroupId"], json!("${app_sg.group_id}"));
        assert!(db_rule.get("CidrIp").is_none());
        assert_eq!(db.depends_on, vec!["app_sg".to_string(), "vpc".to_string()]);
    }

    #[test]
    fn test_render_outputs() {
        let stack = vpc_with_subnet();
        let manifest = render_manifest(&stack, "test", "us-east-1").unwrap();

        assert_eq!(manifest.outputs["vpc_id"], "${vpc.vpc_id}");
    }

    #[test]
    fn test_render_rejects_non_string_output() {
        let mut stack = Stack::new();
        stack.export("count", Value::Int(6)).unwrap();

        let err = render_manifest(&stack, "test", "us-east-1").unwrap_err();
        assert!(matches!(err, RenderError::InvalidOutput { name } if name == "count"));
    }
}
