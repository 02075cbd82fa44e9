use log::debug;
use undercloud_wizard_core::{
    planner::{plan, ConfigValues},
    validator::{AcceptAll, ConfigValidator, LayoutValidator},
};

use crate::{cli::PlanArgs, overrides::collect_overrides};

pub mod generate;
pub mod values;

pub fn plan_network(args: &PlanArgs) -> anyhow::Result<ConfigValues> {
    let overrides = collect_overrides(args)?;

    debug!("{overrides:#?}");

    let validator: &dyn ConfigValidator = if args.no_validate {
        &AcceptAll
    } else {
        &LayoutValidator
    };

    Ok(plan(&overrides, validator)?)
}
