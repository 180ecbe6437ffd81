use crate::error::{Error, Result};
use jvsx_table::ParameterDefinition;

/// Check `value` against the parameter's declared range. Never clamps.
pub fn validate(definition: &ParameterDefinition, value: i32) -> Result<()> {
    if !definition.contains(value) {
        return Err(Error::ValueOutOfRange {
            parameter: definition.name.clone(),
            value,
            min: definition.min,
            max: definition.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_bounds_inclusive() {
        let def = ParameterDefinition::new("EFX:Type", 0x0C, 0, 39);
        assert!(validate(&def, 0).is_ok());
        assert!(validate(&def, 39).is_ok());

        let err = validate(&def, 40).unwrap_err();
        assert!(matches!(
            err,
            Error::ValueOutOfRange {
                value: 40,
                min: 0,
                max: 39,
                ..
            }
        ));
        assert!(validate(&def, -1).is_err());
    }

    #[test]
    fn test_validate_signed() {
        let def = ParameterDefinition::new("Part coarse tune", 0x06, -48, 48).signed();
        assert!(validate(&def, -48).is_ok());
        assert!(validate(&def, -49).is_err());
    }
}
