use crate::planner::{AddressLayout, ConfigValues};

/// Renders the `[DEFAULT]` fragment of `undercloud.conf`.
pub fn render_config(values: &ConfigValues, layout: &AddressLayout) -> String {
    let hostname = &values.hostname;
    let local_interface = &values.local_interface;
    let network_cidr = &values.network_cidr;
    let masquerade_network = &layout.masquerade_network;
    let local_ip = layout.local_ip;
    let network_gateway = layout.network_gateway;
    let public_vip = layout.undercloud_public_vip;
    let admin_vip = layout.undercloud_admin_vip;
    let dhcp_start = layout.dhcp_start;
    let dhcp_end = layout.dhcp_end;
    let inspection_start = layout.inspection_start;
    let inspection_end = layout.inspection_end;

    format!(
        "# Config generated by undercloud wizard
# Use these values in undercloud.conf
[DEFAULT]
undercloud_hostname = {hostname}
local_interface = {local_interface}
network_cidr = {network_cidr}
masquerade_network = {masquerade_network}
local_ip = {local_ip}
network_gateway = {network_gateway}
undercloud_public_vip = {public_vip}
undercloud_admin_vip = {admin_vip}
dhcp_start = {dhcp_start}
dhcp_end = {dhcp_end}
inspection_iprange = {inspection_start},{inspection_end}
"
    )
}
