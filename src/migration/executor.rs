//! Sequential application of a resolved migration path.

use crate::envelope::Value;
use crate::errors::MigrateError;

use super::step::Migration;

/// Apply `steps` to `initial`, in order, as an all-or-nothing pipeline.
///
/// The accumulator is owned by the pipeline: each step's validator (if any)
/// sees the pre-transform value, each transform consumes it and produces the
/// next one. On the first rejection or fault the accumulator is dropped and
/// never observable; the final value is returned only when every step has
/// completed. Nothing is persisted here, so atomicity needs no rollback.
pub fn execute(steps: &[Migration], initial: Value) -> Result<Value, MigrateError> {
    let mut current = initial;

    for step in steps {
        if let Some(validate) = &step.validate {
            match validate(&current) {
                Ok(true) => {}
                Ok(false) => {
                    return Err(MigrateError::StepValidation {
                        version: step.version,
                    });
                }
                Err(source) => {
                    return Err(MigrateError::ValidatorFault {
                        version: step.version,
                        source,
                    });
                }
            }
        }

        current = (step.up)(current).map_err(|source| MigrateError::StepExecution {
            version: step.version,
            source,
        })?;
    }

    Ok(current)
}
