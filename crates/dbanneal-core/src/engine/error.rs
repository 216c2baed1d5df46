use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Nothing to simulate: the design has no free sites ({fixed_sites} fixed)")]
    DegenerateProblem { fixed_sites: usize },
}
