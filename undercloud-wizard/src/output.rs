use std::{
    fmt::Display,
    io::{self, Write},
};

use serde::Serialize;
use undercloud_wizard_core::planner::ConfigValues;

use crate::cli::OutputFormat;

pub struct TableCellOption<T>(Option<T>);

impl<T> From<Option<T>> for TableCellOption<T> {
    fn from(value: Option<T>) -> Self {
        TableCellOption(value)
    }
}

impl<T: Display> Display for TableCellOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(value) = &self.0 {
            value.fmt(f)
        } else {
            f.write_str("-")
        }
    }
}

pub trait TableOutputDisplay {
    fn format_table(&self) -> String;

    fn write_table(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(self.format_table().as_bytes())
    }
}

impl TableOutputDisplay for ConfigValues {
    /// One `name value` row per field, the rendered config is left out.
    fn format_table(&self) -> String {
        let fields = self
            .fields()
            .into_iter()
            .filter(|(name, _)| *name != "config")
            .collect::<Vec<_>>();
        let width = fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

        fields
            .into_iter()
            .map(|(name, value)| {
                let cell: TableCellOption<String> = Some(value).filter(|v| !v.is_empty()).into();
                format!("{name:<width$}  {cell}\n")
            })
            .collect()
    }
}

pub trait SerializableOutputDisplay {
    fn write_json(&self, out: &mut dyn Write) -> Result<(), serde_json::Error>;
    fn write_json_pretty(&self, out: &mut dyn Write) -> Result<(), serde_json::Error>;
    fn write_yaml(&self, out: &mut dyn Write) -> Result<(), serde_yaml::Error>;
}

impl<T: ?Sized + Serialize> SerializableOutputDisplay for T {
    fn write_json(&self, out: &mut dyn Write) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string(self)?;
        writeln!(out, "{output}").map_err(serde_json::Error::io)?;

        Ok(())
    }

    fn write_json_pretty(&self, out: &mut dyn Write) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string_pretty(self)?;
        writeln!(out, "{output}").map_err(serde_json::Error::io)?;

        Ok(())
    }

    fn write_yaml(&self, out: &mut dyn Write) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(out, self)
    }
}

pub trait CliPrint {
    fn print(&self, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()>;
}

impl<T: Serialize + TableOutputDisplay> CliPrint for T {
    fn print(&self, format: OutputFormat, out: &mut dyn Write) -> anyhow::Result<()> {
        match format {
            OutputFormat::Table => self.write_table(out)?,
            OutputFormat::Json => self.write_json(out)?,
            OutputFormat::JsonPretty => self.write_json_pretty(out)?,
            OutputFormat::Yaml => self.write_yaml(out)?,
        }

        Ok(())
    }
}
