//! Stack outputs
//!
//! Exports the identifiers downstream stacks need to attach compute,
//! databases, and caches to this network.

use lyra_core::stack::{Stack, StackError};

use crate::network::Network;
use crate::security_groups::SecurityGroups;

/// Export resource identifiers for consumption by other stacks
pub fn export_outputs(
    stack: &mut Stack,
    network: &Network,
    groups: &SecurityGroups,
) -> Result<(), StackError> {
    stack.export("vpc_id", network.vpc.attr("vpc_id"))?;

    for (i, subnet) in network.public_subnets.iter().enumerate() {
        stack.export(format!("public_subnet_{}_id", i + 1), subnet.attr("subnet_id"))?;
    }
    for (i, subnet) in network.private_app_subnets.iter().enumerate() {
        stack.export(
            format!("private_app_subnet_{}_id", i + 1),
            subnet.attr("subnet_id"),
        )?;
    }
    for (i, subnet) in network.private_db_subnets.iter().enumerate() {
        stack.export(
            format!("private_db_subnet_{}_id", i + 1),
            subnet.attr("subnet_id"),
        )?;
    }

    stack.export("alb_sg_id", groups.alb.attr("group_id"))?;
    stack.export("app_sg_id", groups.app.attr("group_id"))?;
    stack.export("db_sg_id", groups.db.attr("group_id"))?;
    stack.export("cache_sg_id", groups.cache.attr("group_id"))?;

    Ok(())
}
