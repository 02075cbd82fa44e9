use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use thiserror::Error;

use crate::{
    ip::{parse_block, Contains},
    planner::{AddressLayout, ConfigValues},
    VIRTUAL_IPS,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// the values were checked and rejected
    #[error("{}", .0)]
    Failed(String),
    /// the values couldn't be checked at all
    #[error("{}", .0)]
    Defect(String),
}

/// Semantic check run on a complete plan. Every problem found is passed to `report`.
pub trait ConfigValidator: Send + Sync {
    fn validate(
        &self,
        values: &ConfigValues,
        report: &mut dyn FnMut(&str),
    ) -> Result<(), ValidationError>;
}

/// Passes everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl ConfigValidator for AcceptAll {
    fn validate(
        &self,
        _values: &ConfigValues,
        _report: &mut dyn FnMut(&str),
    ) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Checks that the addresses of a plan fit the provisioning network and don't step on
/// each other, and that the hostname and interface look usable.
#[derive(Debug, Default, Clone, Copy)]
pub struct LayoutValidator;

impl ConfigValidator for LayoutValidator {
    fn validate(
        &self,
        values: &ConfigValues,
        report: &mut dyn FnMut(&str),
    ) -> Result<(), ValidationError> {
        let layout = values.layout.as_ref().ok_or_else(|| {
            ValidationError::Defect("There's no address layout to validate!".to_owned())
        })?;
        let block = parse_block(&values.network_cidr)
            .map_err(|error| ValidationError::Defect(error.to_string()))?;

        let mut problems = Vec::new();
        check_hostname(&values.hostname, &mut problems);
        check_interface(&values.local_interface, &mut problems);
        check_layout(layout, &block, &mut problems);
        check_pool_sizes(layout, values.node_count, &mut problems);

        for problem in &problems {
            report(problem);
        }

        match problems.into_iter().next() {
            Some(first) => Err(ValidationError::Failed(first)),
            None => Ok(()),
        }
    }
}

fn check_hostname(hostname: &str, problems: &mut Vec<String>) {
    let labels = hostname.split('.').collect::<Vec<_>>();
    let valid_label = |label: &&str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };

    if hostname.len() > 253 || labels.len() < 2 || !labels.iter().all(valid_label) {
        problems.push(format!("Hostname '{hostname}' is not a fully qualified domain name!"));
    }
}

fn check_interface(local_interface: &str, problems: &mut Vec<String>) {
    if local_interface.trim().is_empty() || local_interface.chars().any(char::is_whitespace) {
        problems.push(format!("Interface name '{local_interface}' is invalid!"));
    }
}

fn check_layout(layout: &AddressLayout, block: &Ipv4Net, problems: &mut Vec<String>) {
    let dhcp = layout.dhcp_range();
    let inspection = layout.inspection_range();
    let addresses = [
        ("local_ip", layout.local_ip.addr()),
        ("network_gateway", layout.network_gateway),
        ("undercloud_public_vip", layout.undercloud_public_vip),
        ("undercloud_admin_vip", layout.undercloud_admin_vip),
    ];
    let pools = [("dhcp", dhcp), ("inspection", inspection)];

    if layout.local_ip.prefix_len() != block.prefix_len() {
        problems.push(format!(
            "local_ip {} doesn't use the network_cidr prefix length ({})!",
            layout.local_ip,
            block.prefix_len()
        ));
    }

    for (name, address) in addresses {
        check_inside(name, address, block, problems);
    }

    for (name, pool) in pools {
        check_inside(&format!("{name}_start"), pool.start, block, problems);
        check_inside(&format!("{name}_end"), pool.end, block, problems);

        if pool.is_empty() {
            problems.push(format!(
                "Invalid {name} range, {} doesn't come before {}!",
                pool.start, pool.end
            ));
        }
    }

    if dhcp.overlaps(&inspection) {
        problems.push(format!(
            "Inspection range {inspection} overlaps with the DHCP range {dhcp}!"
        ));
    }

    // the gateway is the undercloud itself, only the addresses it claims are compared
    let claimed = [addresses[0], addresses[2], addresses[3]];

    for (name, address) in claimed {
        for (pool_name, pool) in &pools {
            if inside(pool, &address) {
                problems.push(format!(
                    "{name} {address} lies inside the {pool_name} range {pool}!"
                ));
            }
        }
    }

    for (i, (name, address)) in claimed.iter().enumerate() {
        for (other_name, other) in claimed.iter().skip(i + 1) {
            if address == other {
                problems.push(format!("{name} and {other_name} share the address {address}!"));
            }
        }
    }
}

fn check_pool_sizes(layout: &AddressLayout, node_count: u64, problems: &mut Vec<String>) {
    let needed = [
        ("dhcp", layout.dhcp_range(), node_count.saturating_add(u64::from(VIRTUAL_IPS))),
        ("inspection", layout.inspection_range(), node_count),
    ];

    for (name, pool, needed) in needed {
        let len = pool.len();

        if len < needed {
            problems.push(format!(
                "The {name} range {pool} holds {len} addresses, {needed} needed for {node_count} nodes!"
            ));
        }
    }
}

fn inside<C: Contains<Ipv4Addr>>(container: &C, address: &Ipv4Addr) -> bool {
    container.contains(address)
}

fn check_inside(name: &str, address: Ipv4Addr, block: &Ipv4Net, problems: &mut Vec<String>) {
    if !inside(block, &address) {
        problems.push(format!("{name} {address} is outside of network_cidr {block}!"));
    } else if address == block.network() {
        problems.push(format!("{name} {address} is the network address of {block}!"));
    }
}
