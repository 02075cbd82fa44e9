use std::io::Write;

use log::warn;

use crate::{cli::ValuesArgs, output::CliPrint};

use super::plan_network;

/// Prints the values even when the plan carries an error, the error is part of them.
pub fn values(args: ValuesArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let values = plan_network(&args.plan)?;

    if !values.is_ok() {
        warn!("{}", values.error);
    }

    values.print(args.format, out)
}

#[cfg(test)]
mod tests {
    use undercloud_wizard_core::INSUFFICIENT_ADDRESSES_MESSAGE;

    use super::values;
    use crate::cli::{OutputFormat, PlanArgs, ValuesArgs};

    fn values_args(network_cidr: &str, format: OutputFormat) -> ValuesArgs {
        ValuesArgs {
            plan: PlanArgs {
                overrides_file: None,
                set: Vec::new(),
                hostname: None,
                local_interface: None,
                network_cidr: Some(network_cidr.to_owned()),
                node_count: None,
                no_validate: false,
            },
            format,
        }
    }

    #[test]
    fn capacity_failure_still_prints_the_values() {
        let mut out = Vec::new();

        values(values_args("192.0.2.0/29", OutputFormat::Json), &mut out).unwrap();

        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(printed["error"], INSUFFICIENT_ADDRESSES_MESSAGE);
        assert_eq!(printed["network_cidr"], "192.0.2.0/29");
        assert_eq!(printed["hostname"], "undercloud.localdomain");
        assert!(printed.get("dhcp_start").is_none());
    }

    #[test]
    fn table_is_printed_for_a_successful_plan() {
        let mut out = Vec::new();

        values(values_args("192.0.2.0/24", OutputFormat::Table), &mut out).unwrap();

        let printed = String::from_utf8(out).unwrap();

        assert!(printed.contains("inspection_end         192.0.2.17\n"));
        assert!(printed.ends_with("error                  -\n"));
    }

    #[test]
    fn malformed_cidr_is_still_fatal() {
        let mut out = Vec::new();

        assert!(values(values_args("192.0.2.0/99", OutputFormat::Table), &mut out).is_err());
        assert!(out.is_empty());
    }
}
