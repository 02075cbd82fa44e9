pub mod ip;
pub mod planner;
pub mod render;
pub mod settings;
pub mod validator;

/// Headroom added to the DHCP pool for virtual IPs beyond the two allocated ones.
/// This may not be accurate for some setups.
pub const VIRTUAL_IPS: u32 = 10;
/// local_ip, public_vip, admin_vip
pub const UNDERCLOUD_IPS: u32 = 3;

pub const INSUFFICIENT_ADDRESSES_MESSAGE: &str =
    "Insufficient addresses available in provisioning CIDR";
