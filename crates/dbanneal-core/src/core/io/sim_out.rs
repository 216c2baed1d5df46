use super::document::{self, ParameterBlock};
use super::traits::SimFile;
use nalgebra::Point2;
use quick_xml::{DeError, SeError};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

const ROOT: &str = "sim_out";

#[derive(Debug, Error)]
pub enum SimOutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] DeError),
    #[error("Failed to encode result document: {0}")]
    Encode(#[from] SeError),
    #[error("Malformed result document: {0}")]
    Malformed(String),
}

/// Identity of the engine that produced a result document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInfo {
    #[serde(rename = "engine")]
    pub name: String,
    pub version: String,
}

/// Contents of a result document.
///
/// `configurations[k][i]` is the occupation (0 or 1) of the site at
/// `site_locations[i]` in the `k`-th recorded cycle. Configurations are kept
/// in the order they were produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SimOutput {
    pub engine: EngineInfo,
    /// Effective simulation parameters, in the order they are written.
    pub parameters: Vec<(String, String)>,
    /// Free-site locations in design units, in load order.
    pub site_locations: Vec<Point2<f64>>,
    pub configurations: Vec<Vec<u8>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SimOutDocument {
    eng_info: EngineInfo,
    #[serde(default)]
    sim_params: ParameterBlock,
    physloc: LocationList,
    elec_dist: DistributionList,
}

#[derive(Debug, Serialize, Deserialize)]
struct LocationList {
    #[serde(rename = "dbdot", default)]
    dbdots: Vec<Location>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Location {
    #[serde(rename = "@x")]
    x: f64,
    #[serde(rename = "@y")]
    y: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct DistributionList {
    #[serde(rename = "dist", default)]
    dists: Vec<String>,
}

pub struct SimOutFile;

impl SimFile for SimOutFile {
    type Data = SimOutput;
    type Error = SimOutError;

    fn read_from(reader: &mut impl BufRead) -> Result<SimOutput, SimOutError> {
        let document: SimOutDocument = quick_xml::de::from_reader(reader)?;

        let site_locations: Vec<Point2<f64>> = document
            .physloc
            .dbdots
            .iter()
            .map(|loc| Point2::new(loc.x, loc.y))
            .collect();

        let configurations = document
            .elec_dist
            .dists
            .iter()
            .map(|dist| read_configuration(dist, site_locations.len()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SimOutput {
            engine: document.eng_info,
            parameters: document.sim_params.0,
            site_locations,
            configurations,
        })
    }

    fn write_to(output: &SimOutput, writer: &mut impl Write) -> Result<(), SimOutError> {
        let width = output.site_locations.len();
        if let Some(bad) = output.configurations.iter().find(|c| c.len() != width) {
            return Err(SimOutError::Malformed(format!(
                "configuration of length {} does not match {width} sites",
                bad.len()
            )));
        }

        let document = SimOutDocument {
            eng_info: output.engine.clone(),
            sim_params: ParameterBlock(output.parameters.clone()),
            physloc: LocationList {
                dbdots: output
                    .site_locations
                    .iter()
                    .map(|p| Location { x: p.x, y: p.y })
                    .collect(),
            },
            elec_dist: DistributionList {
                dists: output
                    .configurations
                    .iter()
                    .map(|c| render_configuration(c))
                    .collect(),
            },
        };
        writer.write_all(document::to_xml_string(ROOT, &document)?.as_bytes())?;
        Ok(())
    }
}

/// Renders an occupation vector as a string of `0`/`1` digits.
pub fn render_configuration(configuration: &[u8]) -> String {
    configuration
        .iter()
        .map(|&q| if q == 0 { '0' } else { '1' })
        .collect()
}

fn read_configuration(text: &str, width: usize) -> Result<Vec<u8>, SimOutError> {
    let configuration = text
        .chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(SimOutError::Malformed(format!(
                "invalid occupation digit '{other}'"
            ))),
        })
        .collect::<Result<Vec<u8>, _>>()?;
    if configuration.len() != width {
        return Err(SimOutError::Malformed(format!(
            "configuration '{text}' does not match {width} sites"
        )));
    }
    Ok(configuration)
}
