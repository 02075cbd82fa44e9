pub const DEFAULT_HOSTNAME: &str = "undercloud.localdomain";
pub const DEFAULT_LOCAL_INTERFACE: &str = "eth1";
pub const DEFAULT_NETWORK_CIDR: &str = "192.0.2.0/24";
pub const DEFAULT_NODE_COUNT: &str = "2";

/// User supplied values, `None` meaning "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub hostname: Option<String>,
    pub local_interface: Option<String>,
    pub network_cidr: Option<String>,
    pub node_count: Option<String>,
}

impl Overrides {
    /// Picks the recognized keys out of raw key/value params. Empty values count as unset
    /// and unknown keys are skipped. When a key repeats, the last non-empty value wins.
    pub fn from_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut overrides = Self::default();

        for (key, value) in params {
            let value = value.as_ref();
            if value.is_empty() {
                continue;
            }

            let slot = match key.as_ref() {
                "hostname" => &mut overrides.hostname,
                "local_interface" => &mut overrides.local_interface,
                "network_cidr" => &mut overrides.network_cidr,
                "node_count" => &mut overrides.node_count,
                _ => continue,
            };

            *slot = Some(value.to_owned());
        }

        overrides
    }

    /// Layers `other` on top of `self`, fields set in `other` win.
    pub fn merge(self, other: Overrides) -> Self {
        Self {
            hostname: non_empty(other.hostname).or(non_empty(self.hostname)),
            local_interface: non_empty(other.local_interface).or(non_empty(self.local_interface)),
            network_cidr: non_empty(other.network_cidr).or(non_empty(self.network_cidr)),
            node_count: non_empty(other.node_count).or(non_empty(self.node_count)),
        }
    }
}

/// The raw planner inputs after applying overrides onto defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hostname: String,
    pub local_interface: String,
    pub network_cidr: String,
    pub node_count: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hostname: DEFAULT_HOSTNAME.to_owned(),
            local_interface: DEFAULT_LOCAL_INTERFACE.to_owned(),
            network_cidr: DEFAULT_NETWORK_CIDR.to_owned(),
            node_count: DEFAULT_NODE_COUNT.to_owned(),
        }
    }
}

impl Settings {
    pub fn with_overrides(overrides: &Overrides) -> Self {
        let defaults = Self::default();

        Self {
            hostname: pick(&overrides.hostname, defaults.hostname),
            local_interface: pick(&overrides.local_interface, defaults.local_interface),
            network_cidr: pick(&overrides.network_cidr, defaults.network_cidr),
            node_count: pick(&overrides.node_count, defaults.node_count),
        }
    }
}

fn pick(value: &Option<String>, default: String) -> String {
    match value.as_deref() {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => default,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}
