// ──────────────────────────────────────────────────────────────────────────────
// PyO3-binding: analysen eksponert til Python-siden som JSON-streng inn/ut.
// ──────────────────────────────────────────────────────────────────────────────

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::improvement::analyze_improvement;
use crate::storage::trajectory_from_json;

/// Tar to opptaks-payloads (JSON-strenger fra pose-sporingen) og
/// returnerer forbedringsrapporten som JSON-streng. Ugyldige payloads
/// gir PyValueError med feltsti fra parseren.
#[pyfunction]
pub fn analyze_improvement_json(before_json: &str, after_json: &str) -> PyResult<String> {
    let before = trajectory_from_json(before_json, "before")
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let after = trajectory_from_json(after_json, "after")
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let report = analyze_improvement(&before, &after);

    serde_json::to_string(&report)
        .map_err(|e| PyValueError::new_err(format!("serialisering av rapport: {e}")))
}

#[pymodule]
fn swinggraph_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze_improvement_json, m)?)?;
    Ok(())
}
