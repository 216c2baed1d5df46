use super::document::{self, ParameterBlock};
use super::traits::SimFile;
use crate::core::models::aggregate::SiteTree;
use crate::core::models::ids::AggregateId;
use crate::core::models::problem::Problem;
use crate::core::models::site::Site;
use quick_xml::{DeError, SeError};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

const ROOT: &str = "dbdesigner";
const SITE_LAYER_TYPE: &str = "DB";
const ELECTRODE_LAYER_TYPE: &str = "Electrode";

#[derive(Debug, Error)]
pub enum DesignError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed design document: {0}")]
    Xml(#[from] DeError),
    #[error("Failed to encode design document: {0}")]
    Encode(#[from] SeError),
    #[error("Missing required section <{0}>")]
    MissingSection(&'static str),
    #[error("<{element}> is missing required field '{field}'")]
    MissingField {
        element: &'static str,
        field: &'static str,
    },
    #[error("Invalid value '{value}' for field '{field}' of <{element}>")]
    InvalidField {
        element: &'static str,
        field: &'static str,
        value: String,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DesignDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    sim_params: Option<ParameterBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    design: Option<DesignSection>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DesignSection {
    #[serde(rename = "layer", default)]
    layers: Vec<LayerElement>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct LayerElement {
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(rename = "dbdot", default)]
    dbdots: Vec<DbDotElement>,
    #[serde(rename = "aggregate", default)]
    aggregates: Vec<AggregateElement>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AggregateElement {
    #[serde(rename = "dbdot", default)]
    dbdots: Vec<DbDotElement>,
    #[serde(rename = "aggregate", default)]
    aggregates: Vec<AggregateElement>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DbDotElement {
    elec: f64,
    physloc: PhysLocElement,
}

#[derive(Debug, Serialize, Deserialize)]
struct PhysLocElement {
    #[serde(rename = "@x")]
    x: f64,
    #[serde(rename = "@y")]
    y: f64,
}

/// The design document consumed by the engine.
///
/// ```text
/// <dbdesigner>
///   <sim_params> <key>value</key> ... </sim_params>
///   <design>
///     <layer type="DB">
///       <aggregate> ... </aggregate>
///       <dbdot> <elec>0</elec> <physloc x="..." y="..."/> </dbdot>
///     </layer>
///   </design>
/// </dbdesigner>
/// ```
///
/// Only `DB` layers contribute sites; every `DB` layer is read into the root
/// aggregate in document order. Within a layer or aggregate the sites come
/// before the nested aggregates, so only the order among siblings of the
/// same kind is significant. Sections other than `sim_params` and `design`
/// are ignored, and so is the name of the root element.
pub struct DesignFile;

impl SimFile for DesignFile {
    type Data = Problem;
    type Error = DesignError;

    fn read_from(reader: &mut impl BufRead) -> Result<Problem, DesignError> {
        let document: DesignDocument = quick_xml::de::from_reader(reader)?;
        let sim_params = document
            .sim_params
            .ok_or(DesignError::MissingSection("sim_params"))?;
        let design = document
            .design
            .ok_or(DesignError::MissingSection("design"))?;

        let mut problem = Problem::new();
        for (key, value) in sim_params.0 {
            debug!(key = %key, value = %value, "Read simulation parameter");
            problem.set_parameter(key, value);
        }

        let root = problem.sites().root();
        for layer in &design.layers {
            let layer_type = layer.kind.as_deref().ok_or(DesignError::MissingField {
                element: "layer",
                field: "type",
            })?;
            match layer_type {
                SITE_LAYER_TYPE => {
                    add_items(problem.sites_mut(), root, &layer.dbdots, &layer.aggregates)?
                }
                ELECTRODE_LAYER_TYPE => {
                    warn!("Electrode layers are not modelled; skipping layer");
                }
                other => debug!(layer_type = other, "No action defined for layer; skipping"),
            }
        }

        debug!(
            sites = problem.sites().len(),
            aggregates = problem.sites().aggregate_count(),
            "Design read"
        );
        Ok(problem)
    }

    /// Writes the explicit parameters and the site tree as a single `DB`
    /// layer. External fixed charges have no representation in this format
    /// and are not written.
    fn write_to(problem: &Problem, writer: &mut impl Write) -> Result<(), DesignError> {
        let tree = problem.sites();
        let root = aggregate_element(tree, tree.root());
        let document = DesignDocument {
            sim_params: Some(ParameterBlock(
                problem
                    .parameters()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            )),
            design: Some(DesignSection {
                layers: vec![LayerElement {
                    kind: Some(SITE_LAYER_TYPE.to_string()),
                    dbdots: root.dbdots,
                    aggregates: root.aggregates,
                }],
            }),
        };
        writer.write_all(document::to_xml_string(ROOT, &document)?.as_bytes())?;
        Ok(())
    }
}

fn add_items(
    tree: &mut SiteTree,
    parent: AggregateId,
    dbdots: &[DbDotElement],
    aggregates: &[AggregateElement],
) -> Result<(), DesignError> {
    for dbdot in dbdots {
        let site = to_site(dbdot)?;
        debug!(x = site.x(), y = site.y(), elec = site.elec(), "Site created");
        tree.add_site(parent, site)
            .ok_or(DesignError::MissingSection("aggregate"))?;
    }
    for aggregate in aggregates {
        let child = tree
            .add_aggregate(parent)
            .ok_or(DesignError::MissingSection("aggregate"))?;
        add_items(tree, child, &aggregate.dbdots, &aggregate.aggregates)?;
    }
    Ok(())
}

fn to_site(dbdot: &DbDotElement) -> Result<Site, DesignError> {
    let elec = finite("dbdot", "elec", dbdot.elec)?;
    let x = finite("physloc", "x", dbdot.physloc.x)?;
    let y = finite("physloc", "y", dbdot.physloc.y)?;
    Ok(Site::new(x, y, elec))
}

fn finite(element: &'static str, field: &'static str, value: f64) -> Result<f64, DesignError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DesignError::InvalidField {
            element,
            field,
            value: value.to_string(),
        })
    }
}

fn aggregate_element(tree: &SiteTree, id: AggregateId) -> AggregateElement {
    let Some(aggregate) = tree.aggregate(id) else {
        return AggregateElement::default();
    };
    AggregateElement {
        dbdots: aggregate
            .sites()
            .iter()
            .map(|site| DbDotElement {
                elec: site.elec(),
                physloc: PhysLocElement {
                    x: site.x(),
                    y: site.y(),
                },
            })
            .collect(),
        aggregates: aggregate
            .children()
            .iter()
            .map(|&child| aggregate_element(tree, child))
            .collect(),
    }
}
