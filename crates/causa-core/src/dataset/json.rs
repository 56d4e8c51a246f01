//! JSON datasets: `{"x": [1.0, 2.0], "y": [3.0, 4.0]}`.

use serde_json::Value;

use crate::errors::DataError;

pub(super) fn parse(text: &str) -> Result<(Vec<String>, Vec<Vec<f64>>), DataError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DataError::Json(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| DataError::Json("top-level value must be an object".to_string()))?;

    let mut names = Vec::with_capacity(object.len());
    let mut columns = Vec::with_capacity(object.len());
    for (name, values) in object {
        let array = values
            .as_array()
            .ok_or_else(|| DataError::Json(format!("column {name} is not an array")))?;
        let column = array
            .iter()
            .enumerate()
            .map(|(row, v)| {
                v.as_f64()
                    .ok_or_else(|| DataError::Json(format!("column {name} row {row} is not a number")))
            })
            .collect::<Result<Vec<f64>, _>>()?;
        names.push(name.clone());
        columns.push(column);
    }

    Ok((names, columns))
}
