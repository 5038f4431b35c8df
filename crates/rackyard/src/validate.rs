//! Structural validation of a warehouse configuration.
//!
//! Runs before any partitioning and rejects configurations whose layout would
//! need a division by zero: no workstations, or a side without rows or floors.

use log::debug;

use crate::{
    error::RackyardError,
    model::{Side, WarehouseConfig},
};

/// Checks that every denominator the layout engine divides by is non-zero.
///
/// # Errors
///
/// Returns [`RackyardError::Validation`] naming the first offending field.
pub fn validate(config: &WarehouseConfig) -> Result<(), RackyardError> {
    if config.num_workstations == Some(0) {
        return Err(RackyardError::Validation(
            "num_workstations must be greater than zero".to_string(),
        ));
    }
    if config.workstation_configs.is_empty() {
        return Err(RackyardError::Validation(
            "workstation_configs must contain at least one workstation".to_string(),
        ));
    }

    for (index, workstation) in config.workstation_configs.iter().enumerate() {
        for side in Side::BOTH {
            let side_config = workstation.side(side);
            let path = format!("workstation_configs[{index}].{side}_side_config");

            if side_config.num_rows == 0 {
                return Err(RackyardError::Validation(format!(
                    "{path}.num_rows must be greater than zero"
                )));
            }
            if side_config.num_floors == 0 {
                return Err(RackyardError::Validation(format!(
                    "{path}.num_floors must be greater than zero"
                )));
            }
            if side_config.column_count().is_none() {
                return Err(RackyardError::Validation(format!(
                    "{path}: num_aisles * deep is too large"
                )));
            }
        }
    }

    debug!(workstations = config.workstation_configs.len(); "Configuration is structurally valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn side(rows: u32, floors: u32) -> serde_json::Value {
        json!({
            "num_floors": floors, "num_rows": rows, "num_aisles": 1, "deep": 1,
            "gap_front": 0, "gap_back": 0, "gap_left": 0, "gap_right": 0
        })
    }

    fn config(num_workstations: Option<u32>, left: serde_json::Value) -> WarehouseConfig {
        serde_json::from_value(json!({
            "warehouse_dimensions": {
                "length": 500, "width": 1000, "height": 500, "height_safety_margin": 50
            },
            "num_workstations": num_workstations,
            "workstation_gap": 100,
            "workstation_configs": [{
                "aisle_space": 100,
                "left_side_config": left,
                "right_side_config": side(1, 1)
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_configuration() {
        assert!(validate(&config(Some(1), side(2, 3))).is_ok());
        assert!(validate(&config(None, side(2, 3))).is_ok());
    }

    #[test]
    fn test_zero_workstations_rejected() {
        let err = validate(&config(Some(0), side(1, 1))).unwrap_err();
        assert!(err.to_string().contains("num_workstations"), "{err}");
    }

    #[test]
    fn test_empty_workstation_list_rejected() {
        let mut config = config(None, side(1, 1));
        config.workstation_configs.clear();
        assert!(matches!(
            validate(&config),
            Err(RackyardError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let err = validate(&config(None, side(0, 1))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation error: workstation_configs[0].left_side_config.num_rows \
             must be greater than zero"
        );
    }

    #[test]
    fn test_zero_floors_rejected() {
        let err = validate(&config(None, side(1, 0))).unwrap_err();
        assert!(err.to_string().contains("num_floors"), "{err}");
    }
}
