//! Plain-text listings of catalogs and parameter values.

use std::io::{self, Write};

use itertools::Itertools;

use jackfront_core::catalog::Catalog;
use jackfront_core::grammar::{DRIVER_SELECT_KEY, DRIVER_SELECT_NAME};
use jackfront_core::server::Server;

/// Width of the option column.
const OPTION_WIDTH: usize = 36;

fn write_options<W: Write>(output: &mut W, catalog: &Catalog) -> io::Result<()> {
    if catalog.is_empty() {
        return writeln!(output, "  (none)");
    }

    for parameter in catalog.iter() {
        let option = parameter.to_string();
        let description = parameter.short_description.as_deref().unwrap_or_default();
        writeln!(
            output,
            "  {option:<OPTION_WIDTH$} {description} (default: {})",
            parameter.default_value()
        )?;
        if let Some(long_description) = &parameter.long_description {
            for line in long_description.lines() {
                writeln!(output, "  {:<OPTION_WIDTH$} {line}", "")?;
            }
        }
    }

    Ok(())
}

/// Writes the options of the server and of every driver, for `--list`.
///
/// # Errors
///
/// Returns any error from writing to `output`.
pub fn write_catalog_help<W: Write>(output: &mut W, server: &Server) -> io::Result<()> {
    writeln!(output, "Server `{}` options:", server.name)?;
    write_options(output, &server.parameters)?;
    let select = format!("-{DRIVER_SELECT_KEY}, --{DRIVER_SELECT_NAME} <driver>");
    writeln!(
        output,
        "  {select:<OPTION_WIDTH$} select the driver: {}",
        server.drivers.names().join(", ")
    )?;

    for driver in server.drivers.iter() {
        writeln!(output)?;
        match &driver.description {
            Some(description) => {
                writeln!(output, "Driver `{}` options ({description}):", driver.name)?;
            }
            None => writeln!(output, "Driver `{}` options:", driver.name)?,
        }
        write_options(output, &driver.parameters)?;
    }

    Ok(())
}

/// Writes the current value of each parameter, marking explicitly set ones with `*`.
///
/// # Errors
///
/// Returns any error from writing to `output`.
pub fn write_parameter_values<W: Write>(
    output: &mut W,
    title: &str,
    catalog: &Catalog,
) -> io::Result<()> {
    writeln!(output, "{title}:")?;
    for parameter in catalog.iter() {
        let marker = if parameter.is_set() { '*' } else { ' ' };
        let option = parameter.to_string();
        writeln!(
            output,
            " {marker} {option:<OPTION_WIDTH$} {}",
            parameter.value()
        )?;
    }
    Ok(())
}
