//! Parameter tables for reporting.
//!
//! Read-only views of registries grouped by object, one row per parameter
//! reading `"description (name): value"`. Intended for progress reports
//! during or after a calibration run, not for typesetting.

use crate::error::Result;
use crate::model::{walk, ModelObject};
use crate::object_id::ObjectId;
use crate::parameters::{ParamRegistry, Parameter};
use std::collections::BTreeMap;
use std::fmt;

/// Options for building parameter tables.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Only list parameters with a calibrated element close to a bound. Default: false
    pub close_to_bounds_only: bool,

    /// Distance to a bound, as a share of the bound width, that counts as close. Default: 0.01
    pub tolerance: f64,

    /// Digits after the decimal point. Default: 4
    pub precision: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            close_to_bounds_only: false,
            tolerance: 0.01,
            precision: 4,
        }
    }
}

/// One parameter in a table
#[derive(Debug, Clone, PartialEq)]
pub struct ParamRow {
    pub name: String,
    pub description: String,
    pub symbol: String,
    pub value: Vec<f64>,
    pub close_to_bounds: bool,
    precision: usize,
}

impl ParamRow {
    fn from_param(param: &Parameter, config: &ReportConfig) -> Self {
        Self {
            name: param.name().to_string(),
            description: param.description().to_string(),
            symbol: param.symbol().to_string(),
            value: param.value().to_vec(),
            close_to_bounds: param.is_close_to_bounds(config.tolerance),
            precision: config.precision,
        }
    }

    /// The formatted value: a scalar, or a bracketed list
    pub fn formatted_value(&self) -> String {
        let p = self.precision;
        match self.value.as_slice() {
            [v] => format!("{:.*}", p, v),
            values => {
                let parts: Vec<String> = values.iter().map(|v| format!("{:.*}", p, v)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// `"description (name): value"`
    pub fn label(&self) -> String {
        format!("{} ({}): {}", self.description, self.name, self.formatted_value())
    }
}

/// The rows of one object
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTable {
    pub object_id: ObjectId,
    pub rows: Vec<ParamRow>,
}

impl fmt::Display for ParamTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.object_id)?;
        for row in &self.rows {
            let flag = if row.close_to_bounds { "  (close to bounds)" } else { "" };
            writeln!(f, "  {}{}", row.label(), flag)?;
        }
        Ok(())
    }
}

/// Table of the parameters of one registry with the given calibration status
///
/// A parameter counts as calibrated if any of its elements is. Returns `None`
/// if no parameter qualifies.
pub fn param_table(
    registry: &ParamRegistry,
    calibrated: bool,
    config: &ReportConfig,
) -> Option<ParamTable> {
    let rows: Vec<ParamRow> = registry
        .iter()
        .filter(|p| p.is_calibrated() == calibrated)
        .map(|p| ParamRow::from_param(p, config))
        .filter(|row| !config.close_to_bounds_only || row.close_to_bounds)
        .collect();

    if rows.is_empty() {
        return None;
    }
    Some(ParamTable {
        object_id: registry.owner().clone(),
        rows,
    })
}

/// One table per object in the tree, keyed by object id
///
/// Objects without qualifying parameters are left out.
pub fn param_tables(
    root: &dyn ModelObject,
    calibrated: bool,
    config: &ReportConfig,
) -> Result<BTreeMap<ObjectId, ParamTable>> {
    let mut tables = BTreeMap::new();
    walk(root, &mut |object| {
        if let Some(table) = param_table(object.pvector(), calibrated, config) {
            tables.insert(object.object_id().clone(), table);
        }
        Ok(())
    })?;
    Ok(tables)
}

/// Plain-text report of all parameters with the given calibration status, in
/// traversal order
pub fn report_params(root: &dyn ModelObject, calibrated: bool, config: &ReportConfig) -> Result<String> {
    let mut out = String::new();
    walk(root, &mut |object| {
        if let Some(table) = param_table(object.pvector(), calibrated, config) {
            out.push_str(&table.to_string());
        }
        Ok(())
    })?;
    Ok(out)
}
