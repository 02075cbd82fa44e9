use std::{net::Ipv4Addr, num::IntErrorKind};

use ipnet::Ipv4Net;
use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::{
    ip::{parse_block, range::AddressRange, BlockError, Offset},
    render::render_config,
    settings::{Overrides, Settings},
    validator::{ConfigValidator, ValidationError},
    INSUFFICIENT_ADDRESSES_MESSAGE, UNDERCLOUD_IPS, VIRTUAL_IPS,
};

/// Conditions that make planning impossible. Capacity and validation failures are not
/// among them, those end up in [`ConfigValues::error`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("{}", .0)]
    MalformedCidr(BlockError),
    #[error("Node count '{}' is not a positive integer!", .0)]
    MalformedNodeCount(String),
    #[error("Couldn't validate the configuration! {}", .0)]
    Validator(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{}", INSUFFICIENT_ADDRESSES_MESSAGE)]
pub struct CapacityError {
    pub available: u64,
    pub required: u64,
}

/// Addresses carved out of the provisioning block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressLayout {
    pub masquerade_network: String,
    pub local_ip: Ipv4Net,
    pub network_gateway: Ipv4Addr,
    pub undercloud_public_vip: Ipv4Addr,
    pub undercloud_admin_vip: Ipv4Addr,
    pub dhcp_start: Ipv4Addr,
    pub dhcp_end: Ipv4Addr,
    pub inspection_start: Ipv4Addr,
    pub inspection_end: Ipv4Addr,
}

impl AddressLayout {
    /// Number of addresses a block must hold to fit `node_count` nodes.
    pub fn required_addresses(node_count: u64) -> u64 {
        node_count
            .saturating_mul(2)
            .saturating_add(u64::from(VIRTUAL_IPS + UNDERCLOUD_IPS + 1))
    }

    /// Lays out the block: local ip and gateway at offset 1, the VIPs at 2 and 3,
    /// then `node_count + VIRTUAL_IPS` DHCP addresses followed by `node_count`
    /// inspection addresses.
    pub fn derive(
        block: &Ipv4Net,
        network_cidr: &str,
        node_count: u64,
    ) -> Result<Self, CapacityError> {
        let available = block.size();
        let required = Self::required_addresses(node_count);
        let insufficient = || CapacityError {
            available,
            required,
        };

        if available < required {
            return Err(insufficient());
        }

        let node_count = u32::try_from(node_count).map_err(|_| insufficient())?;

        let local_address = block.nth(1).ok_or_else(insufficient)?;
        let local_ip =
            Ipv4Net::new(local_address, block.prefix_len()).map_err(|_| insufficient())?;

        let dhcp_start_offset = 1 + UNDERCLOUD_IPS;
        let dhcp_size = node_count
            .checked_add(VIRTUAL_IPS)
            .ok_or_else(insufficient)?;
        let dhcp = AddressRange::from_offsets(block, dhcp_start_offset, dhcp_size)
            .ok_or_else(insufficient)?;

        let inspection_start_offset = dhcp_start_offset + dhcp_size;
        let inspection = AddressRange::from_offsets(block, inspection_start_offset, node_count)
            .ok_or_else(insufficient)?;

        debug!(
            "Laid out {block}: dhcp offsets {dhcp_start_offset}..{}, inspection offsets {inspection_start_offset}..{}",
            inspection_start_offset - 1,
            inspection_start_offset + node_count - 1
        );

        Ok(Self {
            masquerade_network: network_cidr.to_owned(),
            local_ip,
            network_gateway: local_address,
            undercloud_public_vip: block.nth(2).ok_or_else(insufficient)?,
            undercloud_admin_vip: block.nth(3).ok_or_else(insufficient)?,
            dhcp_start: dhcp.start,
            dhcp_end: dhcp.end,
            inspection_start: inspection.start,
            inspection_end: inspection.end,
        })
    }

    pub fn dhcp_range(&self) -> AddressRange {
        AddressRange::new(self.dhcp_start, self.dhcp_end)
    }

    pub fn inspection_range(&self) -> AddressRange {
        AddressRange::new(self.inspection_start, self.inspection_end)
    }
}

/// Everything needed to render the wizard result. `layout` is absent when the block
/// was too small, `error` is empty when the plan passed every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValues {
    pub hostname: String,
    pub local_interface: String,
    pub network_cidr: String,
    pub node_count: u64,
    #[serde(flatten)]
    pub layout: Option<AddressLayout>,
    pub config: String,
    pub error: String,
}

impl ConfigValues {
    pub fn is_ok(&self) -> bool {
        self.error.is_empty()
    }

    /// Named values in template order, followed by the bookkeeping fields.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("hostname", self.hostname.clone()),
            ("local_interface", self.local_interface.clone()),
            ("network_cidr", self.network_cidr.clone()),
        ];

        if let Some(layout) = &self.layout {
            fields.extend([
                ("masquerade_network", layout.masquerade_network.clone()),
                ("local_ip", layout.local_ip.to_string()),
                ("network_gateway", layout.network_gateway.to_string()),
                ("undercloud_public_vip", layout.undercloud_public_vip.to_string()),
                ("undercloud_admin_vip", layout.undercloud_admin_vip.to_string()),
                ("dhcp_start", layout.dhcp_start.to_string()),
                ("dhcp_end", layout.dhcp_end.to_string()),
                ("inspection_start", layout.inspection_start.to_string()),
                ("inspection_end", layout.inspection_end.to_string()),
            ]);
        }

        fields.extend([
            ("node_count", self.node_count.to_string()),
            ("error", self.error.clone()),
            ("config", self.config.clone()),
        ]);

        fields
    }
}

/// Plans the provisioning network for the given overrides and hands the result to
/// `validator`.
pub fn plan(
    overrides: &Overrides,
    validator: &dyn ConfigValidator,
) -> Result<ConfigValues, PlanError> {
    let settings = Settings::with_overrides(overrides);
    let block = parse_block(&settings.network_cidr).map_err(PlanError::MalformedCidr)?;
    let node_count = parse_node_count(&settings.node_count)?;

    let mut values = ConfigValues {
        hostname: settings.hostname,
        local_interface: settings.local_interface,
        network_cidr: settings.network_cidr,
        node_count,
        layout: None,
        config: String::new(),
        error: String::new(),
    };

    let layout = match AddressLayout::derive(&block, &values.network_cidr, node_count) {
        Ok(layout) => layout,
        Err(error) => {
            debug!(
                "{block} holds {} addresses, {} needed for {node_count} nodes",
                error.available, error.required
            );
            values.error = error.to_string();

            return Ok(values);
        }
    };

    values.config = render_config(&values, &layout);
    values.layout = Some(layout);

    let mut report = |message: &str| warn!("{message}");
    match validator.validate(&values, &mut report) {
        Ok(()) => {}
        Err(ValidationError::Failed(message)) => values.error = message,
        Err(ValidationError::Defect(message)) => return Err(PlanError::Validator(message)),
    }

    Ok(values)
}

/// Zero and non-numbers are malformed. Numbers too large for `u64` saturate, no block
/// can hold them anyway.
fn parse_node_count(raw: &str) -> Result<u64, PlanError> {
    match raw.trim().parse::<u64>() {
        Ok(count) if count > 0 => Ok(count),
        Err(error) if *error.kind() == IntErrorKind::PosOverflow => Ok(u64::MAX),
        _ => Err(PlanError::MalformedNodeCount(raw.to_owned())),
    }
}
