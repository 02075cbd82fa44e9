use std::{fs, io::Write};

use anyhow::{anyhow, Context};
use log::info;

use crate::cli::GenerateArgs;

use super::plan_network;

/// Writes the config to `--output` when given, to `out` otherwise. A plan carrying an
/// error writes nothing and fails with that error.
pub fn generate(args: GenerateArgs, out: &mut dyn Write) -> anyhow::Result<()> {
    let values = plan_network(&args.plan)?;

    if !values.is_ok() {
        return Err(anyhow!("{}", values.error));
    }

    if let Some(output) = args.output {
        fs::write(&output, &values.config)
            .context(format!("Couldn't write the output to {output}"))?;

        info!("Configuration written to {output}!");
    } else {
        out.write_all(values.config.as_bytes())
            .context("Couldn't write the configuration!")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use undercloud_wizard_core::INSUFFICIENT_ADDRESSES_MESSAGE;

    use super::generate;
    use crate::{
        cli::{GenerateArgs, PlanArgs},
        commands::plan_network,
    };

    fn plan_args(network_cidr: &str) -> PlanArgs {
        PlanArgs {
            overrides_file: None,
            set: Vec::new(),
            hostname: None,
            local_interface: None,
            network_cidr: Some(network_cidr.to_owned()),
            node_count: None,
            no_validate: false,
        }
    }

    #[test]
    fn prints_the_config_when_no_output_is_given() {
        let expected = plan_network(&plan_args("192.0.2.0/24")).unwrap().config;
        let mut out = Vec::new();
        let args = GenerateArgs {
            plan: plan_args("192.0.2.0/24"),
            output: None,
        };

        generate(args, &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn too_small_block_fails_without_output() {
        let mut out = Vec::new();
        let args = GenerateArgs {
            plan: plan_args("192.0.2.0/29"),
            output: None,
        };

        let error = generate(args, &mut out).unwrap_err();

        assert_eq!(error.to_string(), INSUFFICIENT_ADDRESSES_MESSAGE);
        assert!(out.is_empty());
    }

    #[test]
    fn validation_failure_fails_the_command() {
        let mut out = Vec::new();
        let args = GenerateArgs {
            plan: PlanArgs {
                hostname: Some("undercloud".to_owned()),
                ..plan_args("192.0.2.0/24")
            },
            output: None,
        };

        let error = generate(args, &mut out).unwrap_err();

        assert!(error.to_string().contains("'undercloud'"));
        assert!(out.is_empty());
    }

    #[test]
    fn output_file_receives_exactly_the_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("undercloud.conf");
        let expected = plan_network(&plan_args("10.8.0.0/22")).unwrap().config;
        let mut out = Vec::new();
        let args = GenerateArgs {
            plan: plan_args("10.8.0.0/22"),
            output: Some(path.to_string_lossy().into_owned()),
        };

        generate(args, &mut out).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
        assert!(out.is_empty());
    }

    #[test]
    fn unwritable_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("undercloud.conf");
        let args = GenerateArgs {
            plan: plan_args("192.0.2.0/24"),
            output: Some(path.to_string_lossy().into_owned()),
        };

        let error = generate(args, &mut Vec::new()).unwrap_err();

        assert!(error.to_string().starts_with("Couldn't write the output to"));
    }
}
