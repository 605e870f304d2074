//! Shared attribute types for EC2 resource schemas

use std::collections::HashMap;

use lyra_core::resource::Value;
use lyra_core::schema::{AttributeType, validate_cidr};

/// Mapping from rule attribute names to provider property names
pub const RULE_ATTRIBUTES: &[(&str, &str)] = &[
    ("ip_protocol", "IpProtocol"),
    ("from_port", "FromPort"),
    ("to_port", "ToPort"),
    ("cidr_ip", "CidrIp"),
    ("source_security_group_id", "SourceSecurityGroupId"),
    ("description", "Description"),
];

/// Tags type for AWS resources (Terraform-style map)
pub fn tags_type() -> AttributeType {
    AttributeType::Map(Box::new(AttributeType::String))
}

/// Port number type (with validation)
pub fn port_number() -> AttributeType {
    AttributeType::Custom {
        name: "PortNumber".to_string(),
        base: Box::new(AttributeType::Int),
        validate: |value| {
            if let Value::Int(n) = value {
                if *n >= 0 && *n <= 65535 {
                    Ok(())
                } else {
                    Err("Port number must be between 0 and 65535".to_string())
                }
            } else {
                Err("Expected integer".to_string())
            }
        },
    }
}

/// Protocol type for security group rules
pub fn protocol() -> AttributeType {
    AttributeType::Enum(vec![
        "tcp".to_string(),
        "udp".to_string(),
        "icmp".to_string(),
        "-1".to_string(), // All traffic
    ])
}

/// Inbound security group rule type
pub fn ingress_rule() -> AttributeType {
    AttributeType::Custom {
        name: "IngressRule".to_string(),
        base: Box::new(AttributeType::Map(Box::new(AttributeType::String))),
        validate: validate_ingress_rule,
    }
}

/// Outbound security group rule type
pub fn egress_rule() -> AttributeType {
    AttributeType::Custom {
        name: "EgressRule".to_string(),
        base: Box::new(AttributeType::Map(Box::new(AttributeType::String))),
        validate: validate_egress_rule,
    }
}

fn validate_ingress_rule(value: &Value) -> Result<(), String> {
    let rule = rule_map(value)?;
    validate_common_rule_fields(rule)?;

    // Exactly one traffic source
    let has_cidr = rule.contains_key("cidr_ip");
    let has_group = rule.contains_key("source_security_group_id");
    match (has_cidr, has_group) {
        (true, true) => {
            Err("Specify either 'cidr_ip' or 'source_security_group_id', not both".to_string())
        }
        (false, false) => {
            Err("An ingress rule needs a 'cidr_ip' or 'source_security_group_id' source".to_string())
        }
        _ => Ok(()),
    }
}

fn validate_egress_rule(value: &Value) -> Result<(), String> {
    let rule = rule_map(value)?;
    validate_common_rule_fields(rule)?;

    if rule.contains_key("source_security_group_id") {
        return Err("'source_security_group_id' is not valid for egress rules".to_string());
    }
    if !rule.contains_key("cidr_ip") {
        return Err("An egress rule needs a 'cidr_ip' destination".to_string());
    }
    Ok(())
}

fn rule_map(value: &Value) -> Result<&HashMap<String, Value>, String> {
    match value {
        Value::Map(map) => Ok(map),
        _ => Err("Expected a rule map".to_string()),
    }
}

fn validate_common_rule_fields(rule: &HashMap<String, Value>) -> Result<(), String> {
    for key in rule.keys() {
        if !RULE_ATTRIBUTES.iter().any(|(name, _)| name == key) {
            return Err(format!("Unknown rule attribute '{}'", key));
        }
    }

    let protocol_value = rule
        .get("ip_protocol")
        .ok_or_else(|| "Rule attribute 'ip_protocol' is required".to_string())?;
    protocol()
        .validate(protocol_value)
        .map_err(|e| format!("Invalid 'ip_protocol': {}", e))?;

    let from = required_port(rule, "from_port")?;
    let to = required_port(rule, "to_port")?;
    if from > to {
        return Err(format!(
            "'from_port' {} must not exceed 'to_port' {}",
            from, to
        ));
    }

    if let Some(v) = rule.get("cidr_ip") {
        match v {
            Value::String(s) => {
                validate_cidr(s).map_err(|e| format!("Invalid 'cidr_ip': {}", e))?;
            }
            Value::Ref(_, _) => {}
            _ => return Err("Rule attribute 'cidr_ip' must be a CIDR string".to_string()),
        }
    }

    if let Some(v) = rule.get("source_security_group_id") {
        if !matches!(v, Value::String(_) | Value::Ref(_, _)) {
            return Err(
                "Rule attribute 'source_security_group_id' must be a string or reference"
                    .to_string(),
            );
        }
    }

    if let Some(v) = rule.get("description") {
        if !matches!(v, Value::String(_)) {
            return Err("Rule attribute 'description' must be a string".to_string());
        }
    }

    Ok(())
}

fn required_port(rule: &HashMap<String, Value>, key: &str) -> Result<i64, String> {
    let value = rule
        .get(key)
        .ok_or_else(|| format!("Rule attribute '{}' is required", key))?;
    port_number()
        .validate(value)
        .map_err(|e| format!("Invalid '{}': {}", key, e))?;
    match value {
        Value::Int(n) => Ok(*n),
        _ => Err(format!("Rule attribute '{}' must be an integer", key)),
    }
}
