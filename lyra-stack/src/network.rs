//! Network topology declaration
//!
//! One VPC spanning two availability zones, with a public subnet tier
//! routed through an internet gateway and two private tiers routed
//! through a single NAT gateway in the first public subnet.

use std::collections::HashMap;

use lyra_core::resource::{Resource, Value};
use lyra_core::stack::{Handle, Stack, StackError};

use crate::config::StackConfig;

/// Handles to the declared network resources
pub struct Network {
    pub vpc: Handle,
    pub public_subnets: Vec<Handle>,
    pub private_app_subnets: Vec<Handle>,
    pub private_db_subnets: Vec<Handle>,
}

/// Build a Name tag map
pub(crate) fn name_tag(name: &str) -> Value {
    let mut tags = HashMap::new();
    tags.insert("Name".to_string(), Value::String(name.to_string()));
    Value::Map(tags)
}

/// Declare the VPC, subnets, gateways, and routing
pub fn declare_network(stack: &mut Stack, config: &StackConfig) -> Result<Network, StackError> {
    let p = &config.project;

    let vpc_name = format!("{}-vpc", p);
    let vpc = stack.declare(
        "vpc",
        Resource::new("ec2_vpc", &vpc_name)
            .with_attribute("cidr_block", Value::String(config.vpc_cidr.clone()))
            .with_attribute("enable_dns_support", Value::Bool(true))
            .with_attribute("enable_dns_hostnames", Value::Bool(true))
            .with_attribute("tags", name_tag(&vpc_name)),
    )?;

    let igw_name = format!("{}-igw", p);
    let igw = stack.declare(
        "igw",
        Resource::new("ec2_internet_gateway", &igw_name)
            .with_attribute("tags", name_tag(&igw_name)),
    )?;

    stack.declare(
        "igw_attachment",
        Resource::new("ec2_vpc_gateway_attachment", format!("{}-igw-attachment", p))
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute("internet_gateway_id", igw.attr("internet_gateway_id")),
    )?;

    let mut public_subnets = Vec::new();
    let mut private_app_subnets = Vec::new();
    let mut private_db_subnets = Vec::new();

    for (i, (((zone, public_cidr), app_cidr), db_cidr)) in config
        .availability_zones
        .iter()
        .zip(&config.public_subnet_cidrs)
        .zip(&config.private_app_subnet_cidrs)
        .zip(&config.private_db_subnet_cidrs)
        .enumerate()
    {
        let n = i + 1;

        let name = format!("{}-public-subnet-{}", p, n);
        let subnet = stack.declare(
            format!("public_subnet_{}", n),
            Resource::new("ec2_subnet", &name)
                .with_attribute("vpc_id", vpc.attr("vpc_id"))
                .with_attribute("cidr_block", Value::String(public_cidr.clone()))
                .with_attribute("availability_zone", Value::String(zone.clone()))
                .with_attribute("map_public_ip_on_launch", Value::Bool(true))
                .with_attribute("tags", name_tag(&name)),
        )?;
        public_subnets.push(subnet);

        let name = format!("{}-private-app-subnet-{}", p, n);
        let subnet = stack.declare(
            format!("private_app_subnet_{}", n),
            Resource::new("ec2_subnet", &name)
                .with_attribute("vpc_id", vpc.attr("vpc_id"))
                .with_attribute("cidr_block", Value::String(app_cidr.clone()))
                .with_attribute("availability_zone", Value::String(zone.clone()))
                .with_attribute("tags", name_tag(&name)),
        )?;
        private_app_subnets.push(subnet);

        let name = format!("{}-private-db-subnet-{}", p, n);
        let subnet = stack.declare(
            format!("private_db_subnet_{}", n),
            Resource::new("ec2_subnet", &name)
                .with_attribute("vpc_id", vpc.attr("vpc_id"))
                .with_attribute("cidr_block", Value::String(db_cidr.clone()))
                .with_attribute("availability_zone", Value::String(zone.clone()))
                .with_attribute("tags", name_tag(&name)),
        )?;
        private_db_subnets.push(subnet);
    }

    let public_rt_name = format!("{}-public-rt", p);
    let public_rt = stack.declare(
        "public_rt",
        Resource::new("ec2_route_table", &public_rt_name)
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute("tags", name_tag(&public_rt_name)),
    )?;

    stack.declare(
        "public_route",
        Resource::new("ec2_route", format!("{}-public-route", p))
            .with_attribute("route_table_id", public_rt.attr("route_table_id"))
            .with_attribute(
                "destination_cidr_block",
                Value::String("0.0.0.0/0".to_string()),
            )
            .with_attribute("gateway_id", igw.attr("internet_gateway_id")),
    )?;

    for (i, subnet) in public_subnets.iter().enumerate() {
        stack.declare(
            format!("public_rt_assoc_{}", i + 1),
            Resource::new(
                "ec2_subnet_route_table_association",
                format!("{}-public-rt-assoc-{}", p, i + 1),
            )
            .with_attribute("subnet_id", subnet.attr("subnet_id"))
            .with_attribute("route_table_id", public_rt.attr("route_table_id")),
        )?;
    }

    // One NAT gateway in the first public subnet serves both private tiers
    let eip_name = format!("{}-nat-eip", p);
    let nat_eip = stack.declare(
        "nat_eip",
        Resource::new("ec2_eip", &eip_name).with_attribute("tags", name_tag(&eip_name)),
    )?;

    let nat_gw = stack.declare(
        "nat_gw",
        Resource::new("ec2_nat_gateway", format!("{}-nat-gw", p))
            .with_attribute("subnet_id", public_subnets[0].attr("subnet_id"))
            .with_attribute("allocation_id", nat_eip.attr("allocation_id"))
            .with_attribute("tags", name_tag(&format!("{}-nat", p))),
    )?;

    let private_rt_name = format!("{}-private-rt", p);
    let private_rt = stack.declare(
        "private_rt",
        Resource::new("ec2_route_table", &private_rt_name)
            .with_attribute("vpc_id", vpc.attr("vpc_id"))
            .with_attribute("tags", name_tag(&private_rt_name)),
    )?;

    stack.declare(
        "private_route",
        Resource::new("ec2_route", format!("{}-private-route", p))
            .with_attribute("route_table_id", private_rt.attr("route_table_id"))
            .with_attribute(
                "destination_cidr_block",
                Value::String("0.0.0.0/0".to_string()),
            )
            .with_attribute("nat_gateway_id", nat_gw.attr("nat_gateway_id")),
    )?;

    // Both private tiers share the private route table
    for (i, subnet) in private_app_subnets
        .iter()
        .chain(&private_db_subnets)
        .enumerate()
    {
        stack.declare(
            format!("private_rt_assoc_{}", i + 1),
            Resource::new(
                "ec2_subnet_route_table_association",
                format!("{}-private-rt-assoc-{}", p, i + 1),
            )
            .with_attribute("subnet_id", subnet.attr("subnet_id"))
            .with_attribute("route_table_id", private_rt.attr("route_table_id")),
        )?;
    }

    Ok(Network {
        vpc,
        public_subnets,
        private_app_subnets,
        private_db_subnets,
    })
}
