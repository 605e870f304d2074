//! Security group declarations
//!
//! Four groups chained by reference: the load balancer accepts web
//! traffic from anywhere, the application tier accepts traffic only
//! from the load balancer group (plus SSH from an allowed CIDR), and
//! the database and cache tiers accept traffic only from the
//! application group.

use std::collections::HashMap;

use lyra_core::resource::{Resource, Value};
use lyra_core::stack::{Handle, Stack, StackError};

use crate::config::StackConfig;
use crate::network::name_tag;

/// Handles to the declared security groups
pub struct SecurityGroups {
    pub alb: Handle,
    pub app: Handle,
    pub db: Handle,
    pub cache: Handle,
}

fn rule_fields(
    protocol: &str,
    from_port: i64,
    to_port: i64,
    description: &str,
) -> HashMap<String, Value> {
    let mut fields = HashMap::new();
    fields.insert("ip_protocol".to_string(), Value::String(protocol.to_string()));
    fields.insert("from_port".to_string(), Value::Int(from_port));
    fields.insert("to_port".to_string(), Value::Int(to_port));
    fields.insert(
        "description".to_string(),
        Value::String(description.to_string()),
    );
    fields
}

/// Ingress rule open to a CIDR block
fn cidr_ingress(protocol: &str, from_port: i64, to_port: i64, cidr: &str, description: &str) -> Value {
    let mut fields = rule_fields(protocol, from_port, to_port, description);
    fields.insert("cidr_ip".to_string(), Value::String(cidr.to_string()));
    Value::Map(fields)
}

/// Ingress rule restricted to members of another security group
fn group_ingress(
    protocol: &str,
    from_port: i64,
    to_port: i64,
    source: Value,
    description: &str,
) -> Value {
    let mut fields = rule_fields(protocol, from_port, to_port, description);
    fields.insert("source_security_group_id".to_string(), source);
    Value::Map(fields)
}

/// Allow-all egress rule shared by every group
fn open_egress() -> Value {
    let mut fields = rule_fields("-1", 0, 0, "Allow all outbound traffic");
    fields.insert(
        "cidr_ip".to_string(),
        Value::String("0.0.0.0/0".to_string()),
    );
    Value::Map(fields)
}

/// Declare the four tier security groups
pub fn declare_security_groups(
    stack: &mut Stack,
    config: &StackConfig,
    vpc: &Handle,
) -> Result<SecurityGroups, StackError> {
    let p = &config.project;

    let alb_name = format!("{}-alb-sg", p);
    let alb = stack.declare(
        "alb_sg",
        Resource::new("ec2_security_group", &alb_name)
            .with_attribute("group_name", Value::String(alb_name.clone()))
            .with_attribute(
                "description",
                Value::String("Security group for the application load balancer".to_string()),
            )
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute(
                "ingress",
                Value::List(vec![
                    cidr_ingress("tcp", 80, 80, "0.0.0.0/0", "HTTP from anywhere"),
                    cidr_ingress("tcp", 443, 443, "0.0.0.0/0", "HTTPS from anywhere"),
                ]),
            )
            .with_attribute("egress", Value::List(vec![open_egress()]))
            .with_attribute("tags", name_tag(&alb_name)),
    )?;

    let app_name = format!("{}-app-sg", p);
    let app = stack.declare(
        "app_sg",
        Resource::new("ec2_security_group", &app_name)
            .with_attribute("group_name", Value::String(app_name.clone()))
            .with_attribute(
                "description",
                Value::String("Security group for the application tier".to_string()),
            )
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute(
                "ingress",
                Value::List(vec![
                    group_ingress("tcp", 80, 80, alb.attr("group_id"), "HTTP from the load balancer"),
                    group_ingress(
                        "tcp",
                        443,
                        443,
                        alb.attr("group_id"),
                        "HTTPS from the load balancer",
                    ),
                    cidr_ingress(
                        "tcp",
                        22,
                        22,
                        &config.allowed_ssh_cidr,
                        "SSH for administration",
                    ),
                ]),
            )
            .with_attribute("egress", Value::List(vec![open_egress()]))
            .with_attribute("tags", name_tag(&app_name)),
    )?;

    let db_name = format!("{}-db-sg", p);
    let db = stack.declare(
        "db_sg",
        Resource::new("ec2_security_group", &db_name)
            .with_attribute("group_name", Value::String(db_name.clone()))
            .with_attribute(
                "description",
                Value::String("Security group for the database tier".to_string()),
            )
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute(
                "ingress",
                Value::List(vec![group_ingress(
                    "tcp",
                    3306,
                    3306,
                    app.attr("group_id"),
                    "MySQL from the application tier",
                )]),
            )
            .with_attribute("egress", Value::List(vec![open_egress()]))
            .with_attribute("tags", name_tag(&db_name)),
    )?;

    let cache_name = format!("{}-cache-sg", p);
    let cache = stack.declare(
        "cache_sg",
        Resource::new("ec2_security_group", &cache_name)
            .with_attribute("group_name", Value::String(cache_name.clone()))
            .with_attribute(
                "description",
                Value::String("Security group for the cache tier".to_string()),
            )
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute(
                "ingress",
                Value::List(vec![group_ingress(
                    "tcp",
                    6379,
                    6379,
                    app.attr("group_id"),
                    "Redis from the application tier",
                )]),
            )
            .with_attribute("egress", Value::List(vec![open_egress()]))
            .with_attribute("tags", name_tag(&cache_name)),
    )?;

    Ok(SecurityGroups {
        alb,
        app,
        db,
        cache,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::declare_network;

    fn declared() -> Stack {
        let mut stack = Stack::new();
        let config = StackConfig::default();
        let network = declare_network(&mut stack, &config).unwrap();
        declare_security_groups(&mut stack, &config, &network.vpc).unwrap();
        stack
    }

    fn ingress_rules<'a>(stack: &'a Stack, binding: &str) -> &'a [Value] {
        match stack.resource(binding).unwrap().attributes.get("ingress") {
            Some(Value::List(rules)) => rules,
            other => panic!("{} has no ingress list: {:?}", binding, other),
        }
    }

    fn rule_field<'a>(rule: &'a Value, field: &str) -> Option<&'a Value> {
        match rule {
            Value::Map(fields) => fields.get(field),
            other => panic!("rule is not a map: {:?}", other),
        }
    }

    #[test]
    fn alb_accepts_web_traffic_from_anywhere_and_nothing_else() {
        let stack = declared();
        let rules = ingress_rules(&stack, "alb_sg");

        assert_eq!(rules.len(), 2);
        let mut ports = Vec::new();
        for rule in rules {
            assert_eq!(
                rule_field(rule, "cidr_ip"),
                Some(&Value::String("0.0.0.0/0".to_string()))
            );
            assert!(rule_field(rule, "source_security_group_id").is_none());
            match rule_field(rule, "from_port") {
                Some(Value::Int(port)) => ports.push(*port),
                other => panic!("missing from_port: {:?}", other),
            }
        }
        ports.sort();
        assert_eq!(ports, vec![80, 443]);
    }

    #[test]
    fn app_tier_accepts_web_traffic_only_from_the_alb_group() {
        let stack = declared();
        let rules = ingress_rules(&stack, "app_sg");
        assert_eq!(rules.len(), 3);

        for port in [80, 443] {
            let rule = rules
                .iter()
                .find(|r| rule_field(r, "from_port") == Some(&Value::Int(port)))
                .unwrap();
            assert_eq!(
                rule_field(rule, "source_security_group_id"),
                Some(&Value::Ref("alb_sg".to_string(), "group_id".to_string()))
            );
            assert!(rule_field(rule, "cidr_ip").is_none());
        }
    }

    #[test]
    fn app_tier_ssh_rule_honors_the_configured_cidr() {
        let mut stack = Stack::new();
        let config = StackConfig::default().with_ssh_cidr("203.0.113.0/24");
        let network = declare_network(&mut stack, &config).unwrap();
        declare_security_groups(&mut stack, &config, &network.vpc).unwrap();

        let rules = ingress_rules(&stack, "app_sg");
        let ssh = rules
            .iter()
            .find(|r| rule_field(r, "from_port") == Some(&Value::Int(22)))
            .unwrap();
        assert_eq!(
            rule_field(ssh, "cidr_ip"),
            Some(&Value::String("203.0.113.0/24".to_string()))
        );
        assert!(rule_field(ssh, "source_security_group_id").is_none());
    }

    #[test]
    fn data_tiers_accept_only_group_referenced_traffic() {
        let stack = declared();

        for (binding, port) in [("db_sg", 3306), ("cache_sg", 6379)] {
            let rules = ingress_rules(&stack, binding);
            assert_eq!(rules.len(), 1, "{} should have one ingress rule", binding);
            assert_eq!(rule_field(&rules[0], "from_port"), Some(&Value::Int(port)));
            assert_eq!(rule_field(&rules[0], "to_port"), Some(&Value::Int(port)));
            assert_eq!(
                rule_field(&rules[0], "source_security_group_id"),
                Some(&Value::Ref("app_sg".to_string(), "group_id".to_string()))
            );
            assert!(
                rule_field(&rules[0], "cidr_ip").is_none(),
                "{} must not open a CIDR range",
                binding
            );
        }
    }

    #[test]
    fn every_group_allows_all_outbound_traffic() {
        let stack = declared();

        for binding in ["alb_sg", "app_sg", "db_sg", "cache_sg"] {
            let egress = match stack.resource(binding).unwrap().attributes.get("egress") {
                Some(Value::List(rules)) => rules,
                other => panic!("{} has no egress list: {:?}", binding, other),
            };
            assert_eq!(egress.len(), 1);
            assert_eq!(
                rule_field(&egress[0], "ip_protocol"),
                Some(&Value::String("-1".to_string()))
            );
            assert_eq!(
                rule_field(&egress[0], "cidr_ip"),
                Some(&Value::String("0.0.0.0/0".to_string()))
            );
        }
    }

    #[test]
    fn groups_are_scoped_to_the_vpc() {
        let stack = declared();

        for binding in ["alb_sg", "app_sg", "db_sg", "cache_sg"] {
            assert_eq!(
                stack.resource(binding).unwrap().attributes.get("vpc_id"),
                Some(&Value::Ref("vpc".to_string(), "vpc_id".to_string()))
            );
        }
    }
}
